//! Treasury domain module.
//!
//! Money received from dealers: direct payments (cash, transfer, card) and
//! checks with their clearance lifecycle. Pure deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod check;
pub mod payment;

pub use check::{
    BounceCheck, Check, CheckBounced, CheckCleared, CheckCommand, CheckDeposited, CheckEvent,
    CheckId, CheckRegistered, CheckStatus, ClearCheck, DepositCheck, RegisterCheck,
};
pub use payment::{
    Payment, PaymentCommand, PaymentEvent, PaymentId, PaymentMethod, PaymentRecorded,
    RecordPayment,
};
