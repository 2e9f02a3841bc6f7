use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spicetrade_core::{Aggregate, AggregateRoot, DomainError, DomainEvent, EntityId, Rate};

/// Dealer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealerId(pub EntityId);

impl DealerId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for DealerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Dealer status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealerStatus {
    Active,
    Inactive,
}

/// Contact information for a dealer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Aggregate root: Dealer (wholesale account).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealer {
    id: DealerId,
    company_name: String,
    contact: ContactInfo,
    /// Default discount applied to this dealer's sales.
    discount: Rate,
    status: DealerStatus,
    version: u64,
    created: bool,
}

impl Dealer {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: DealerId) -> Self {
        Self {
            id,
            company_name: String::new(),
            contact: ContactInfo::default(),
            discount: Rate::ZERO,
            status: DealerStatus::Active,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> DealerId {
        self.id
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn discount(&self) -> Rate {
        self.discount
    }

    pub fn status(&self) -> DealerStatus {
        self.status
    }

    /// Invariant helper: whether this dealer may place orders or make
    /// payments. Inactive dealers cannot transact; their existing ledger
    /// remains readable.
    pub fn can_transact(&self) -> bool {
        self.status == DealerStatus::Active
    }
}

impl AggregateRoot for Dealer {
    type Id = DealerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterDealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterDealer {
    pub dealer_id: DealerId,
    pub company_name: String,
    pub contact: Option<ContactInfo>,
    pub discount: Rate,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateDetails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDetails {
    pub dealer_id: DealerId,
    /// Optional new company name (if None, keep existing).
    pub company_name: Option<String>,
    /// Optional new contact info (if None, keep existing).
    pub contact: Option<ContactInfo>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetDiscountRate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDiscountRate {
    pub dealer_id: DealerId,
    pub discount: Rate,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeactivateDealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateDealer {
    pub dealer_id: DealerId,
    /// Optional human-readable reason for deactivation.
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerCommand {
    RegisterDealer(RegisterDealer),
    UpdateDetails(UpdateDetails),
    SetDiscountRate(SetDiscountRate),
    DeactivateDealer(DeactivateDealer),
}

/// Event: DealerRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerRegistered {
    pub dealer_id: DealerId,
    pub company_name: String,
    pub contact: ContactInfo,
    pub discount: Rate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DealerUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerUpdated {
    pub dealer_id: DealerId,
    pub company_name: String,
    pub contact: ContactInfo,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DealerDiscountChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerDiscountChanged {
    pub dealer_id: DealerId,
    pub discount: Rate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DealerDeactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerDeactivated {
    pub dealer_id: DealerId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerEvent {
    DealerRegistered(DealerRegistered),
    DealerUpdated(DealerUpdated),
    DealerDiscountChanged(DealerDiscountChanged),
    DealerDeactivated(DealerDeactivated),
}

impl DomainEvent for DealerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DealerEvent::DealerRegistered(_) => "dealers.dealer.registered",
            DealerEvent::DealerUpdated(_) => "dealers.dealer.updated",
            DealerEvent::DealerDiscountChanged(_) => "dealers.dealer.discount_changed",
            DealerEvent::DealerDeactivated(_) => "dealers.dealer.deactivated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DealerEvent::DealerRegistered(e) => e.occurred_at,
            DealerEvent::DealerUpdated(e) => e.occurred_at,
            DealerEvent::DealerDiscountChanged(e) => e.occurred_at,
            DealerEvent::DealerDeactivated(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Dealer {
    type Command = DealerCommand;
    type Event = DealerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            DealerEvent::DealerRegistered(e) => {
                self.id = e.dealer_id;
                self.company_name = e.company_name.clone();
                self.contact = e.contact.clone();
                self.discount = e.discount;
                self.status = DealerStatus::Active;
                self.created = true;
            }
            DealerEvent::DealerUpdated(e) => {
                self.company_name = e.company_name.clone();
                self.contact = e.contact.clone();
            }
            DealerEvent::DealerDiscountChanged(e) => {
                self.discount = e.discount;
            }
            DealerEvent::DealerDeactivated(_) => {
                self.status = DealerStatus::Inactive;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            DealerCommand::RegisterDealer(cmd) => self.handle_register(cmd),
            DealerCommand::UpdateDetails(cmd) => self.handle_update(cmd),
            DealerCommand::SetDiscountRate(cmd) => self.handle_set_discount(cmd),
            DealerCommand::DeactivateDealer(cmd) => self.handle_deactivate(cmd),
        }
    }
}

impl Dealer {
    fn ensure_dealer_id(&self, dealer_id: DealerId) -> Result<(), DomainError> {
        if self.id != dealer_id {
            return Err(DomainError::invariant("dealer_id mismatch"));
        }
        Ok(())
    }

    fn ensure_discount_in_range(discount: Rate) -> Result<(), DomainError> {
        if discount > Rate::ONE_HUNDRED_PERCENT {
            return Err(DomainError::validation(
                "dealer discount cannot exceed 100%",
            ));
        }
        Ok(())
    }

    fn handle_register(&self, cmd: &RegisterDealer) -> Result<Vec<DealerEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("dealer already exists"));
        }

        if cmd.company_name.trim().is_empty() {
            return Err(DomainError::validation("company name cannot be empty"));
        }
        Self::ensure_discount_in_range(cmd.discount)?;

        let contact = cmd.contact.clone().unwrap_or_default();

        Ok(vec![DealerEvent::DealerRegistered(DealerRegistered {
            dealer_id: cmd.dealer_id,
            company_name: cmd.company_name.clone(),
            contact,
            discount: cmd.discount,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateDetails) -> Result<Vec<DealerEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_dealer_id(cmd.dealer_id)?;

        let new_name = cmd
            .company_name
            .clone()
            .unwrap_or_else(|| self.company_name.clone());
        if new_name.trim().is_empty() {
            return Err(DomainError::validation("company name cannot be empty"));
        }

        let new_contact = cmd.contact.clone().unwrap_or_else(|| self.contact.clone());

        Ok(vec![DealerEvent::DealerUpdated(DealerUpdated {
            dealer_id: cmd.dealer_id,
            company_name: new_name,
            contact: new_contact,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_discount(&self, cmd: &SetDiscountRate) -> Result<Vec<DealerEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_dealer_id(cmd.dealer_id)?;
        Self::ensure_discount_in_range(cmd.discount)?;

        Ok(vec![DealerEvent::DealerDiscountChanged(
            DealerDiscountChanged {
                dealer_id: cmd.dealer_id,
                discount: cmd.discount,
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_deactivate(&self, cmd: &DeactivateDealer) -> Result<Vec<DealerEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_dealer_id(cmd.dealer_id)?;

        if self.status == DealerStatus::Inactive {
            return Err(DomainError::conflict("dealer is already inactive"));
        }

        Ok(vec![DealerEvent::DealerDeactivated(DealerDeactivated {
            dealer_id: cmd.dealer_id,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
