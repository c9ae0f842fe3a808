use carbonreg_types::Address;
use serde::Serialize;
use thiserror::Error;

/// Coarse classification of registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong caller for the operation's role.
    Authorization,
    /// The company is not in the verified state.
    NotVerified,
    /// Amount outside its allowed domain.
    InvalidAmount,
    /// Lifetime request quota exhausted.
    QuotaExceeded,
    /// Owner holds fewer units than requested.
    InsufficientTotal,
    /// Owner's surplus above its reserve is too small.
    InsufficientSurplus,
    /// Referenced entity does not exist.
    NotFound,
    /// Call conflicts with the entity's current state or registry policy.
    Conflict,
    /// Registry handle is unusable.
    Internal,
}

/// Registry rejections.
///
/// The `Display` text of each variant is its stable reason string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller is not the surveyor assigned to the company.
    #[error("Only relevant surveyor can perform this action")]
    NotAssignedSurveyor,
    /// Caller is not the registry administrator.
    #[error("Only the registry administrator can perform this action")]
    NotAdministrator,
    /// Caller does not own the units it tries to move.
    #[error("Caller is not owner nor approved")]
    NotOwner,
    /// Receive request from a caller that is not a verified company.
    #[error("Only verified companies can request for credits")]
    RequesterNotVerified,
    /// Transfer from an owner that is not a verified company.
    #[error("Only verified companies can transfer credits")]
    OwnerNotVerified,
    /// Receive request for zero units.
    #[error("Number of tokens requested should be > 0")]
    InvalidRequestAmount,
    /// Transfer of zero units.
    #[error("Number of tokens transferred should be > 0")]
    InvalidTransferAmount,
    /// Company already used all of its request calls.
    #[error("You do not have enough requests remaining")]
    QuotaExceeded,
    /// Owner holds fewer units than the transfer amount.
    #[error("Not enough credits to be transferred")]
    InsufficientTotal {
        /// Units the transfer asked for.
        requested: u64,
        /// Units the owner holds.
        owned: u64,
    },
    /// Owner's surplus above its reserve does not cover the transfer amount.
    #[error("Only available credits can be transferred")]
    InsufficientSurplus {
        /// Units the transfer asked for.
        requested: u64,
        /// Units the owner may part with.
        available: u64,
    },
    /// No company is registered at the address.
    #[error("Company {0} is not registered")]
    UnknownCompany(Address),
    /// No surveyor is registered at the address.
    #[error("Surveyor {0} is not registered")]
    UnknownSurveyor(Address),
    /// Surveyor address is already on the roster.
    #[error("Surveyor {0} is already registered")]
    DuplicateSurveyor(Address),
    /// Company is pending verification or already verified.
    #[error("Company {0} is already registered")]
    AlreadyRegistered(Address),
    /// Rejected company may not be submitted again.
    #[error("Company {0} was rejected and may not resubmit")]
    ResubmissionForbidden(Address),
    /// Resubmission names a different surveyor than the assigned one.
    #[error("Company {company} is assigned to surveyor {assigned}")]
    SurveyorReassignment {
        /// Company being resubmitted.
        company: Address,
        /// Surveyor the company is bound to.
        assigned: Address,
    },
    /// Company has no verification decision outstanding.
    #[error("Company {0} has no pending verification request")]
    NotPending(Address),
    /// Request index does not address a pending request.
    #[error("Company {company} has no pending credit request at index {index}")]
    UnknownRequest {
        /// Requesting company.
        company: Address,
        /// Offending index.
        index: usize,
    },
    /// Requester and owner are the same company.
    #[error("Credits cannot be transferred to their owner")]
    SelfTransfer,
    /// Minting would exceed the batch limit or the unit id space.
    #[error("Cannot mint {requested} units: {minted} already minted, at most {max_batch} per approval")]
    MintOverflow {
        /// Units asked for.
        requested: u64,
        /// Units minted so far.
        minted: u64,
        /// Largest batch accepted.
        max_batch: u64,
    },
    /// A thread panicked while holding the registry lock.
    #[error("registry lock poisoned")]
    Poisoned,
}

impl RegistryError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotAssignedSurveyor
            | RegistryError::NotAdministrator
            | RegistryError::NotOwner => ErrorKind::Authorization,
            RegistryError::RequesterNotVerified | RegistryError::OwnerNotVerified => {
                ErrorKind::NotVerified
            }
            RegistryError::InvalidRequestAmount | RegistryError::InvalidTransferAmount => {
                ErrorKind::InvalidAmount
            }
            RegistryError::QuotaExceeded => ErrorKind::QuotaExceeded,
            RegistryError::InsufficientTotal { .. } => ErrorKind::InsufficientTotal,
            RegistryError::InsufficientSurplus { .. } => ErrorKind::InsufficientSurplus,
            RegistryError::UnknownCompany(_)
            | RegistryError::UnknownSurveyor(_)
            | RegistryError::UnknownRequest { .. } => ErrorKind::NotFound,
            RegistryError::DuplicateSurveyor(_)
            | RegistryError::AlreadyRegistered(_)
            | RegistryError::ResubmissionForbidden(_)
            | RegistryError::SurveyorReassignment { .. }
            | RegistryError::NotPending(_)
            | RegistryError::SelfTransfer => ErrorKind::Conflict,
            RegistryError::MintOverflow { .. } | RegistryError::Poisoned => ErrorKind::Internal,
        }
    }
}
