//! State machine for a permissioned carbon credit registry.
//!
//! This crate provides:
//! - The surveyor roster (identity registry)
//! - The verification workflow: company registration, approval, rejection
//! - The credit ledger of individually numbered units
//! - Quota-limited credit requests
//! - Surplus-gated transfers that fulfil a pending request
//!
//! Core invariants:
//! - Every call is checked in full before it mutates anything
//! - A company keeps the surveyor it registered with
//! - `requests_consumed` never exceeds the configured quota
//! - No transfer takes an owner's holdings below its reserve quantity
//! - The same calls in the same order always produce the same state
//!
#![deny(missing_docs)]

/// Caller identity, replayable calls and receipts.
pub mod call;
/// Company, surveyor and request records.
pub mod company;
/// Registry configuration.
pub mod config;
/// Error taxonomy.
pub mod errors;
pub mod identity;
pub mod ledger;
/// Registry store and queries.
pub mod registry;
pub mod requests;
pub mod settlement;
/// Lock-guarded shared handle.
pub mod shared;
pub mod transfer;
pub mod workflow;

pub use call::{Call, Caller, Receipt};
pub use company::{Company, CompanyRegistration, CompanyStatus, CreditRequest, Surveyor};
pub use config::{
    ConfigError, DuplicateSurveyorPolicy, RegistryConfig, ResubmissionPolicy, MAX_BASE_ALLOCATION,
};
pub use errors::{ErrorKind, RegistryError};
pub use registry::{Registry, RegistrySnapshot};
pub use settlement::{NoopSettlement, SettlementHook};
pub use shared::SharedRegistry;
pub use transfer::{TransferOrder, TransferReceipt};
