use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spicetrade_core::{Aggregate, AggregateRoot, DomainError, DomainEvent, EntityId, Money};
use spicetrade_dealers::DealerId;

/// Check identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(pub EntityId);

impl CheckId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CheckId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Check clearance lifecycle.
///
/// Only `Cleared` checks count as credit in the dealer ledger; every other
/// state is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pending,
    Deposited,
    Cleared,
    Bounced,
}

impl CheckStatus {
    pub fn is_cleared(&self) -> bool {
        matches!(self, CheckStatus::Cleared)
    }
}

/// Aggregate root: Check.
///
/// Lifecycle: Pending → Deposited → Cleared | Bounced. A bounced check is
/// terminal; the back office registers a replacement check instead of
/// re-depositing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    id: CheckId,
    dealer_id: Option<DealerId>,
    amount: Money,
    check_number: String,
    bank: Option<String>,
    issued_on: DateTime<Utc>,
    due_on: DateTime<Utc>,
    status: CheckStatus,
    notes: Option<String>,
    version: u64,
    created: bool,
}

impl Check {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: CheckId) -> Self {
        Self {
            id,
            dealer_id: None,
            amount: Money::ZERO,
            check_number: String::new(),
            bank: None,
            issued_on: DateTime::<Utc>::MIN_UTC,
            due_on: DateTime::<Utc>::MIN_UTC,
            status: CheckStatus::Pending,
            notes: None,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> CheckId {
        self.id
    }

    pub fn dealer_id(&self) -> Option<DealerId> {
        self.dealer_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn check_number(&self) -> &str {
        &self.check_number
    }

    pub fn bank(&self) -> Option<&str> {
        self.bank.as_deref()
    }

    pub fn issued_on(&self) -> DateTime<Utc> {
        self.issued_on
    }

    pub fn due_on(&self) -> DateTime<Utc> {
        self.due_on
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

impl AggregateRoot for Check {
    type Id = CheckId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterCheck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCheck {
    pub check_id: CheckId,
    pub dealer_id: DealerId,
    pub amount: Money,
    pub check_number: String,
    pub bank: Option<String>,
    pub issued_on: DateTime<Utc>,
    pub due_on: DateTime<Utc>,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DepositCheck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositCheck {
    pub check_id: CheckId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCheck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCheck {
    pub check_id: CheckId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: BounceCheck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BounceCheck {
    pub check_id: CheckId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckCommand {
    RegisterCheck(RegisterCheck),
    DepositCheck(DepositCheck),
    ClearCheck(ClearCheck),
    BounceCheck(BounceCheck),
}

/// Event: CheckRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRegistered {
    pub check_id: CheckId,
    pub dealer_id: DealerId,
    pub amount: Money,
    pub check_number: String,
    pub bank: Option<String>,
    pub issued_on: DateTime<Utc>,
    pub due_on: DateTime<Utc>,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckDeposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDeposited {
    pub check_id: CheckId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCleared {
    pub check_id: CheckId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CheckBounced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckBounced {
    pub check_id: CheckId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckEvent {
    CheckRegistered(CheckRegistered),
    CheckDeposited(CheckDeposited),
    CheckCleared(CheckCleared),
    CheckBounced(CheckBounced),
}

impl DomainEvent for CheckEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CheckEvent::CheckRegistered(_) => "treasury.check.registered",
            CheckEvent::CheckDeposited(_) => "treasury.check.deposited",
            CheckEvent::CheckCleared(_) => "treasury.check.cleared",
            CheckEvent::CheckBounced(_) => "treasury.check.bounced",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CheckEvent::CheckRegistered(e) => e.occurred_at,
            CheckEvent::CheckDeposited(e) => e.occurred_at,
            CheckEvent::CheckCleared(e) => e.occurred_at,
            CheckEvent::CheckBounced(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Check {
    type Command = CheckCommand;
    type Event = CheckEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CheckEvent::CheckRegistered(e) => {
                self.id = e.check_id;
                self.dealer_id = Some(e.dealer_id);
                self.amount = e.amount;
                self.check_number = e.check_number.clone();
                self.bank = e.bank.clone();
                self.issued_on = e.issued_on;
                self.due_on = e.due_on;
                self.status = CheckStatus::Pending;
                self.notes = e.notes.clone();
                self.created = true;
            }
            CheckEvent::CheckDeposited(_) => {
                self.status = CheckStatus::Deposited;
            }
            CheckEvent::CheckCleared(_) => {
                self.status = CheckStatus::Cleared;
            }
            CheckEvent::CheckBounced(_) => {
                self.status = CheckStatus::Bounced;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CheckCommand::RegisterCheck(cmd) => self.handle_register(cmd),
            CheckCommand::DepositCheck(cmd) => self.handle_deposit(cmd),
            CheckCommand::ClearCheck(cmd) => self.handle_clear(cmd),
            CheckCommand::BounceCheck(cmd) => self.handle_bounce(cmd),
        }
    }
}

impl Check {
    fn ensure_check_id(&self, check_id: CheckId) -> Result<(), DomainError> {
        if self.id != check_id {
            return Err(DomainError::invariant("check_id mismatch"));
        }
        Ok(())
    }

    fn ensure_exists(&self, check_id: CheckId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_check_id(check_id)
    }

    fn handle_register(&self, cmd: &RegisterCheck) -> Result<Vec<CheckEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("check already registered"));
        }

        if !cmd.amount.is_positive() {
            return Err(DomainError::validation("check amount must be positive"));
        }
        if cmd.check_number.trim().is_empty() {
            return Err(DomainError::validation("check number cannot be empty"));
        }
        if cmd.due_on < cmd.issued_on {
            return Err(DomainError::validation(
                "due date cannot precede issue date",
            ));
        }

        Ok(vec![CheckEvent::CheckRegistered(CheckRegistered {
            check_id: cmd.check_id,
            dealer_id: cmd.dealer_id,
            amount: cmd.amount,
            check_number: cmd.check_number.clone(),
            bank: cmd.bank.clone(),
            issued_on: cmd.issued_on,
            due_on: cmd.due_on,
            notes: cmd.notes.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deposit(&self, cmd: &DepositCheck) -> Result<Vec<CheckEvent>, DomainError> {
        self.ensure_exists(cmd.check_id)?;

        if self.status != CheckStatus::Pending {
            return Err(DomainError::invariant(
                "only a pending check can be deposited",
            ));
        }

        Ok(vec![CheckEvent::CheckDeposited(CheckDeposited {
            check_id: cmd.check_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear(&self, cmd: &ClearCheck) -> Result<Vec<CheckEvent>, DomainError> {
        self.ensure_exists(cmd.check_id)?;

        if self.status != CheckStatus::Deposited {
            return Err(DomainError::invariant(
                "only a deposited check can be cleared",
            ));
        }

        Ok(vec![CheckEvent::CheckCleared(CheckCleared {
            check_id: cmd.check_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_bounce(&self, cmd: &BounceCheck) -> Result<Vec<CheckEvent>, DomainError> {
        self.ensure_exists(cmd.check_id)?;

        if self.status != CheckStatus::Deposited {
            return Err(DomainError::invariant(
                "only a deposited check can bounce",
            ));
        }

        Ok(vec![CheckEvent::CheckBounced(CheckBounced {
            check_id: cmd.check_id,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
