//! Shared primitives for the carbon credit registry.
//!
//! Addresses, names and registration identifiers are validated on
//! construction and on deserialization, so every value that reaches the
//! registry state machine is already well formed. Content ids are
//! `sha256(domain || canonical_json(value))` and are what the journal and the
//! state digest are built on.
//!
#![deny(missing_docs)]

/// Canonical JSON bytes for hashing.
pub mod canonicalizer;
/// Domain-separated content ids.
pub mod content_id;
/// Digest primitive.
pub mod digest;
/// Validated identifiers and newtypes.
pub mod identifiers;
/// Validation errors for identifiers.
pub mod validation;

pub use canonicalizer::{canonical_bytes, CanonicalizationError};
pub use content_id::{compute_content_id, verify_content_id, ContentIdError, ID_FIELD};
pub use digest::{Digest, DigestAlg};
pub use identifiers::{Address, DisplayName, RegistrationId, Timestamp, UnitId};
pub use validation::ValidationError;
