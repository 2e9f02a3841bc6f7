use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spicetrade_core::{Aggregate, AggregateRoot, DomainError, DomainEvent, EntityId, Money};
use spicetrade_dealers::DealerId;

/// Payment identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub EntityId);

impl PaymentId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// How the money arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    CreditCard,
    Check,
    Other,
}

/// Aggregate root: Payment.
///
/// A payment is a fact: once recorded it never changes. The only command is
/// `RecordPayment`; corrections are new, offsetting records entered by the
/// back office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    id: PaymentId,
    dealer_id: Option<DealerId>,
    amount: Money,
    method: PaymentMethod,
    received_at: DateTime<Utc>,
    reference: Option<String>,
    version: u64,
    created: bool,
}

impl Payment {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: PaymentId) -> Self {
        Self {
            id,
            dealer_id: None,
            amount: Money::ZERO,
            method: PaymentMethod::Other,
            received_at: DateTime::<Utc>::MIN_UTC,
            reference: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> PaymentId {
        self.id
    }

    pub fn dealer_id(&self) -> Option<DealerId> {
        self.dealer_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl AggregateRoot for Payment {
    type Id = PaymentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RecordPayment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayment {
    pub payment_id: PaymentId,
    pub dealer_id: DealerId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub received_at: DateTime<Utc>,
    pub reference: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentCommand {
    RecordPayment(RecordPayment),
}

/// Event: PaymentRecorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecorded {
    pub payment_id: PaymentId,
    pub dealer_id: DealerId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub received_at: DateTime<Utc>,
    pub reference: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentEvent {
    PaymentRecorded(PaymentRecorded),
}

impl DomainEvent for PaymentEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PaymentEvent::PaymentRecorded(_) => "treasury.payment.recorded",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PaymentEvent::PaymentRecorded(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Payment {
    type Command = PaymentCommand;
    type Event = PaymentEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            PaymentEvent::PaymentRecorded(e) => {
                self.id = e.payment_id;
                self.dealer_id = Some(e.dealer_id);
                self.amount = e.amount;
                self.method = e.method;
                self.received_at = e.received_at;
                self.reference = e.reference.clone();
                self.created = true;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            PaymentCommand::RecordPayment(cmd) => self.handle_record(cmd),
        }
    }
}

impl Payment {
    fn handle_record(&self, cmd: &RecordPayment) -> Result<Vec<PaymentEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("payment already recorded"));
        }

        if !cmd.amount.is_positive() {
            return Err(DomainError::validation("payment amount must be positive"));
        }

        Ok(vec![PaymentEvent::PaymentRecorded(PaymentRecorded {
            payment_id: cmd.payment_id,
            dealer_id: cmd.dealer_id,
            amount: cmd.amount,
            method: cmd.method,
            received_at: cmd.received_at,
            reference: cmd.reference.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
