//! Dealers domain module.
//!
//! Wholesale/reseller accounts with their own discount rate and running
//! ledger. Pure deterministic domain logic (no IO, no HTTP, no storage).

pub mod dealer;

pub use dealer::{
    ContactInfo, Dealer, DealerCommand, DealerDeactivated, DealerDiscountChanged, DealerEvent,
    DealerId, DealerRegistered, DealerStatus, DealerUpdated, DeactivateDealer, RegisterDealer,
    SetDiscountRate, UpdateDetails,
};
