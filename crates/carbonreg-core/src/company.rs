use carbonreg_types::{Address, DisplayName, RegistrationId};
use serde::{Deserialize, Serialize};

/// An authorized auditor on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surveyor {
    /// Surveyor address; the identity its approvals are checked against.
    pub address: Address,
    /// Display name.
    pub name: DisplayName,
}

/// Lifecycle state of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    /// No record exists for the address.
    Unregistered,
    /// Waiting for the assigned surveyor's decision.
    PendingVerification,
    /// Approved; may request and transfer credits.
    Verified,
    /// Rejected by the assigned surveyor.
    Rejected,
}

/// Pending request for credit units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRequest {
    /// Company that asked for the units.
    pub requester: Address,
    /// Requested unit count; always positive.
    pub amount: u64,
    /// Payment value attached to the request (0 when none was sent).
    pub payment: u64,
}

/// Company registration details as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRegistration {
    /// Company address.
    pub address: Address,
    /// Display name.
    pub name: DisplayName,
    /// Self-reported emissions score.
    pub score: u64,
    /// Units the company must keep to cover its own emissions.
    pub quantity: u64,
    /// External registration identifier.
    pub registration_id: RegistrationId,
    /// Surveyor responsible for the company.
    pub surveyor: Address,
}

/// Registry record of a company.
///
/// Owned credit units live in the ledger, keyed by the same address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company address.
    pub address: Address,
    /// Display name.
    pub name: DisplayName,
    /// Self-reported emissions score.
    pub score: u64,
    /// Reserve: units the company may never transfer away.
    pub quantity: u64,
    /// External registration identifier.
    pub registration_id: RegistrationId,
    /// Assigned surveyor, fixed at first registration.
    pub surveyor: Address,
    /// Lifecycle state; never `Unregistered` for a stored record.
    pub status: CompanyStatus,
    /// Receive-request calls already made.
    pub requests_consumed: u32,
    /// Pending credit requests in submission order.
    pub credit_requests: Vec<CreditRequest>,
}

impl Company {
    pub(crate) fn pending(registration: CompanyRegistration) -> Self {
        Self {
            address: registration.address,
            name: registration.name,
            score: registration.score,
            quantity: registration.quantity,
            registration_id: registration.registration_id,
            surveyor: registration.surveyor,
            status: CompanyStatus::PendingVerification,
            requests_consumed: 0,
            credit_requests: Vec::new(),
        }
    }

    /// Returns true once the assigned surveyor approved the company.
    pub fn is_verified(&self) -> bool {
        self.status == CompanyStatus::Verified
    }

    /// Units above the reserve out of `owned`, clamped at zero.
    pub fn surplus(&self, owned: u64) -> u64 {
        owned.saturating_sub(self.quantity)
    }
}
