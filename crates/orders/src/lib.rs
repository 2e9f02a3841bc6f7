//! Orders domain module.
//!
//! Sales orders for the storefront and the admin dealer-sale flow, plus the
//! pricing calculator both go through. Pure deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod order;
pub mod pricing;

pub use order::{
    CancelOrder, ConfirmOrder, DeliverOrder, Order, OrderCancelled, OrderCommand, OrderConfirmed,
    OrderDelivered, OrderEvent, OrderId, OrderLine, OrderPlaced, OrderProcessingStarted,
    OrderShipped, OrderStatus, PlaceOrder, ProductId, ShipOrder, StartProcessing,
};
pub use pricing::{PriceBreakdown, PricingError, TaxCharge, TaxRate, price_order};
