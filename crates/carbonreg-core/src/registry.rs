//! The registry: one authoritative store for every entity, keyed by address.

use std::collections::BTreeMap;

use carbonreg_types::{compute_content_id, Address, ContentIdError, Digest, UnitId};
use serde::Serialize;

use crate::company::{Company, CompanyStatus, Surveyor};
use crate::config::RegistryConfig;
use crate::identity::SurveyorRoster;
use crate::ledger::CreditLedger;
use crate::settlement::{NoopSettlement, SettlementHook};
use crate::workflow::VerificationQueue;

/// Domain separator for state digests: `b"carbonreg:state:v1\0"`.
const STATE_DOMAIN_SEPARATOR: &[u8] = b"carbonreg:state:v1\0";

/// Registry state and the operations over it.
///
/// Mutating operations take an explicit [`Caller`](crate::Caller), check all
/// of their preconditions first and only then apply their effect, so a
/// failed call leaves the registry unchanged. Wrap it in a
/// [`SharedRegistry`](crate::SharedRegistry) to share it across threads.
pub struct Registry {
    pub(crate) config: RegistryConfig,
    pub(crate) roster: SurveyorRoster,
    pub(crate) companies: BTreeMap<Address, Company>,
    pub(crate) verification: VerificationQueue,
    pub(crate) ledger: CreditLedger,
    pub(crate) settlement: Box<dyn SettlementHook>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_settlement(config, Box::new(NoopSettlement))
    }

    /// Creates an empty registry that reports payments to `settlement`.
    pub fn with_settlement(config: RegistryConfig, settlement: Box<dyn SettlementHook>) -> Self {
        Self {
            config,
            roster: SurveyorRoster::default(),
            companies: BTreeMap::new(),
            verification: VerificationQueue::default(),
            ledger: CreditLedger::default(),
            settlement,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Company record at `address`, if registered.
    pub fn company(&self, address: &Address) -> Option<&Company> {
        self.companies.get(address)
    }

    /// Lifecycle state of `address`.
    pub fn status(&self, address: &Address) -> CompanyStatus {
        self.companies
            .get(address)
            .map(|c| c.status)
            .unwrap_or(CompanyStatus::Unregistered)
    }

    /// Units owned by `address` in acquisition order.
    pub fn tokens(&self, address: &Address) -> Vec<UnitId> {
        self.ledger.units_of(address).to_vec()
    }

    /// Units `address` may transfer away: holdings above its reserve.
    pub fn surplus(&self, address: &Address) -> u64 {
        self.companies
            .get(address)
            .map(|c| c.surplus(self.ledger.balance_of(address)))
            .unwrap_or(0)
    }

    /// Collection name of the credit units.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Collection symbol of the credit units.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Current holder of `unit`.
    pub fn owner_of(&self, unit: UnitId) -> Option<&Address> {
        self.ledger.owner_of(unit)
    }

    /// Number of units held by `address`.
    pub fn balance_of(&self, address: &Address) -> u64 {
        self.ledger.balance_of(address)
    }

    /// Number of units ever minted.
    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    /// Order-stable copy of the full state.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            surveyors: self.roster.surveyors().to_vec(),
            companies: self.companies.values().cloned().collect(),
            pending: self
                .verification
                .queues()
                .map(|(s, q)| (s.clone(), q.to_vec()))
                .collect(),
            holdings: self
                .ledger
                .holdings()
                .map(|(o, u)| (o.clone(), u.to_vec()))
                .collect(),
            total_supply: self.ledger.total_supply(),
        }
    }

    /// Content digest of [`Registry::snapshot`].
    ///
    /// Two registries that received the same calls in the same order have
    /// the same digest.
    pub fn state_digest(&self) -> Result<Digest, ContentIdError> {
        compute_content_id(STATE_DOMAIN_SEPARATOR, &self.snapshot())
    }
}

/// Serializable view of the registry state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    /// Surveyor roster in registration order.
    pub surveyors: Vec<Surveyor>,
    /// Company records ordered by address.
    pub companies: Vec<Company>,
    /// Non-empty verification queues by surveyor.
    pub pending: BTreeMap<Address, Vec<Address>>,
    /// Non-empty unit holdings by owner.
    pub holdings: BTreeMap<Address, Vec<UnitId>>,
    /// Units ever minted.
    pub total_supply: u64,
}
