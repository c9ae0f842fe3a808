//! Hook for recording payments and prices outside the registry.
//!
//! The registry never moves funds. Request payments and transfer prices are
//! handed to the installed hook after the state change is applied, and are
//! not checked against each other.

use carbonreg_types::Address;

use crate::company::CreditRequest;
use crate::transfer::TransferReceipt;

/// Receives payment and price records from the registry.
pub trait SettlementHook: Send + Sync {
    /// Called after `company` queued `request` at `index`.
    fn on_request(&self, company: &Address, index: usize, request: &CreditRequest) {
        let _ = (company, index, request);
    }

    /// Called after a transfer completed.
    fn on_transfer(&self, receipt: &TransferReceipt) {
        let _ = receipt;
    }
}

/// Hook that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSettlement;

impl SettlementHook for NoopSettlement {}
