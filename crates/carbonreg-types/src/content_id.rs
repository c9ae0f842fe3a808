//! Content ids with domain-separated hashing.
//!
//! Content ids are computed as `sha256(domain || canonical_bytes(value))`,
//! where the `record_id` field is excluded from the hash input and every JSON
//! number is hashed as its decimal string.

use crate::{canonical_bytes, CanonicalizationError, Digest, DigestAlg, ValidationError};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};

/// Name of the self-referential id field stripped before hashing.
pub const ID_FIELD: &str = "record_id";

/// Computes the content id of a serializable value under `domain`.
///
/// # Errors
///
/// Returns [`ContentIdError`] if serialization or canonicalization fails.
pub fn compute_content_id<T: Serialize>(domain: &[u8], value: &T) -> Result<Digest, ContentIdError> {
    let mut value: Value =
        serde_json::to_value(value).map_err(|e| ContentIdError::Serialization(e.to_string()))?;

    if let Value::Object(map) = &mut value {
        map.remove(ID_FIELD);
    }

    stringify_numbers(&mut value);

    let bytes = canonical_bytes(&value)?;

    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(&bytes);
    let hash_bytes = hasher.finalize();

    use base64::Engine;
    let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash_bytes);
    Ok(Digest::new(DigestAlg::Sha256, b64)?)
}

/// Returns whether `claimed` matches the content id recomputed from `value`.
pub fn verify_content_id<T: Serialize>(
    domain: &[u8],
    value: &T,
    claimed: &Digest,
) -> Result<bool, ContentIdError> {
    Ok(compute_content_id(domain, value)? == *claimed)
}

/// Error during content id computation.
#[derive(thiserror::Error, Debug)]
pub enum ContentIdError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
    /// Digest construction failed.
    #[error("digest construction failed: {0}")]
    Digest(#[from] ValidationError),
}

fn stringify_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => {
            let s = n.to_string();
            *value = Value::String(s);
        }
        Value::Array(arr) => {
            for v in arr {
                stringify_numbers(v);
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                stringify_numbers(v);
            }
        }
        _ => {}
    }
}
