use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spicetrade_core::{Aggregate, AggregateRoot, Currency, DomainError, DomainEvent, EntityId, Money, Rate};
use spicetrade_dealers::DealerId;

use crate::pricing::{self, PriceBreakdown, PricingError, TaxRate};

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product identifier.
///
/// Catalog management lives outside this domain layer; orders only carry the
/// reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether the order still counts as money owed: shipped, delivered and
    /// cancelled orders are off the debt books.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Processing
        )
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Order line: product, quantity, unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub line_no: u32,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
}

/// Aggregate root: Order.
///
/// Pricing is computed once when the order is placed and never mutated;
/// status transitions are the only evolution afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    /// None for guest/web checkout; Some for dealer sales.
    dealer_id: Option<DealerId>,
    lines: Vec<OrderLine>,
    pricing: PriceBreakdown,
    currency: Currency,
    status: OrderStatus,
    placed_at: DateTime<Utc>,
    version: u64,
    created: bool,
}

impl Order {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: OrderId) -> Self {
        Self {
            id,
            dealer_id: None,
            lines: Vec::new(),
            pricing: PriceBreakdown::zero(),
            currency: Currency::Cad,
            status: OrderStatus::Pending,
            placed_at: DateTime::<Utc>::MIN_UTC,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn dealer_id(&self) -> Option<DealerId> {
        self.dealer_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn pricing(&self) -> &PriceBreakdown {
        &self.pricing
    }

    pub fn total(&self) -> Money {
        self.pricing.total
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: PlaceOrder (checkout or admin dealer sale).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub order_id: OrderId,
    pub dealer_id: Option<DealerId>,
    pub lines: Vec<OrderLine>,
    pub discount: Rate,
    pub taxes: Vec<TaxRate>,
    pub shipping: Money,
    pub currency: Currency,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ConfirmOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmOrder {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: StartProcessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartProcessing {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ShipOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipOrder {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeliverOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverOrder {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CancelOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub order_id: OrderId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCommand {
    PlaceOrder(PlaceOrder),
    ConfirmOrder(ConfirmOrder),
    StartProcessing(StartProcessing),
    ShipOrder(ShipOrder),
    DeliverOrder(DeliverOrder),
    CancelOrder(CancelOrder),
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub dealer_id: Option<DealerId>,
    pub lines: Vec<OrderLine>,
    pub pricing: PriceBreakdown,
    pub currency: Currency,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderConfirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmed {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderProcessingStarted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProcessingStarted {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderShipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderShipped {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderDelivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDelivered {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderCancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub order_id: OrderId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderPlaced(OrderPlaced),
    OrderConfirmed(OrderConfirmed),
    OrderProcessingStarted(OrderProcessingStarted),
    OrderShipped(OrderShipped),
    OrderDelivered(OrderDelivered),
    OrderCancelled(OrderCancelled),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "orders.order.placed",
            OrderEvent::OrderConfirmed(_) => "orders.order.confirmed",
            OrderEvent::OrderProcessingStarted(_) => "orders.order.processing_started",
            OrderEvent::OrderShipped(_) => "orders.order.shipped",
            OrderEvent::OrderDelivered(_) => "orders.order.delivered",
            OrderEvent::OrderCancelled(_) => "orders.order.cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderPlaced(e) => e.occurred_at,
            OrderEvent::OrderConfirmed(e) => e.occurred_at,
            OrderEvent::OrderProcessingStarted(e) => e.occurred_at,
            OrderEvent::OrderShipped(e) => e.occurred_at,
            OrderEvent::OrderDelivered(e) => e.occurred_at,
            OrderEvent::OrderCancelled(e) => e.occurred_at,
        }
    }
}

impl From<PricingError> for DomainError {
    fn from(err: PricingError) -> Self {
        DomainError::validation(err.to_string())
    }
}

impl Aggregate for Order {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::OrderPlaced(e) => {
                self.id = e.order_id;
                self.dealer_id = e.dealer_id;
                self.lines = e.lines.clone();
                self.pricing = e.pricing.clone();
                self.currency = e.currency;
                self.status = OrderStatus::Pending;
                self.placed_at = e.occurred_at;
                self.created = true;
            }
            OrderEvent::OrderConfirmed(_) => {
                self.status = OrderStatus::Confirmed;
            }
            OrderEvent::OrderProcessingStarted(_) => {
                self.status = OrderStatus::Processing;
            }
            OrderEvent::OrderShipped(_) => {
                self.status = OrderStatus::Shipped;
            }
            OrderEvent::OrderDelivered(_) => {
                self.status = OrderStatus::Delivered;
            }
            OrderEvent::OrderCancelled(_) => {
                self.status = OrderStatus::Cancelled;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::PlaceOrder(cmd) => self.handle_place(cmd),
            OrderCommand::ConfirmOrder(cmd) => {
                self.handle_transition(cmd.order_id, OrderStatus::Pending, cmd.occurred_at, |t| {
                    OrderEvent::OrderConfirmed(OrderConfirmed {
                        order_id: cmd.order_id,
                        occurred_at: t,
                    })
                })
            }
            OrderCommand::StartProcessing(cmd) => self.handle_transition(
                cmd.order_id,
                OrderStatus::Confirmed,
                cmd.occurred_at,
                |t| {
                    OrderEvent::OrderProcessingStarted(OrderProcessingStarted {
                        order_id: cmd.order_id,
                        occurred_at: t,
                    })
                },
            ),
            OrderCommand::ShipOrder(cmd) => self.handle_transition(
                cmd.order_id,
                OrderStatus::Processing,
                cmd.occurred_at,
                |t| {
                    OrderEvent::OrderShipped(OrderShipped {
                        order_id: cmd.order_id,
                        occurred_at: t,
                    })
                },
            ),
            OrderCommand::DeliverOrder(cmd) => {
                self.handle_transition(cmd.order_id, OrderStatus::Shipped, cmd.occurred_at, |t| {
                    OrderEvent::OrderDelivered(OrderDelivered {
                        order_id: cmd.order_id,
                        occurred_at: t,
                    })
                })
            }
            OrderCommand::CancelOrder(cmd) => self.handle_cancel(cmd),
        }
    }
}

impl Order {
    fn ensure_order_id(&self, order_id: OrderId) -> Result<(), DomainError> {
        if self.id != order_id {
            return Err(DomainError::invariant("order_id mismatch"));
        }
        Ok(())
    }

    fn handle_place(&self, cmd: &PlaceOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("order already exists"));
        }

        if cmd.lines.is_empty() {
            return Err(DomainError::validation("cannot place order without lines"));
        }
        for line in &cmd.lines {
            if !line.unit_price.is_positive() {
                return Err(DomainError::validation("unit_price must be positive"));
            }
        }
        if cmd.shipping.is_negative() {
            return Err(DomainError::validation("shipping cannot be negative"));
        }

        let pricing = pricing::price_order(&cmd.lines, cmd.discount, &cmd.taxes, cmd.shipping)?;

        Ok(vec![OrderEvent::OrderPlaced(OrderPlaced {
            order_id: cmd.order_id,
            dealer_id: cmd.dealer_id,
            lines: cmd.lines.clone(),
            pricing,
            currency: cmd.currency,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_transition(
        &self,
        order_id: OrderId,
        expected: OrderStatus,
        occurred_at: DateTime<Utc>,
        make_event: impl FnOnce(DateTime<Utc>) -> OrderEvent,
    ) -> Result<Vec<OrderEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_order_id(order_id)?;

        if self.status != expected {
            return Err(DomainError::invariant(format!(
                "illegal status transition from {:?}",
                self.status
            )));
        }

        Ok(vec![make_event(occurred_at)])
    }

    fn handle_cancel(&self, cmd: &CancelOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_order_id(cmd.order_id)?;

        if self.status.is_terminal() {
            return Err(DomainError::invariant(
                "cannot cancel a delivered or already cancelled order",
            ));
        }

        Ok(vec![OrderEvent::OrderCancelled(OrderCancelled {
            order_id: cmd.order_id,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
