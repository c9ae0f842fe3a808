//! Record-by-record journal verification.

use carbonreg_core::{Registry, RegistryConfig};
use carbonreg_types::Digest;
use serde::Serialize;

use crate::errors::JournalError;
use crate::reader::JournalReader;

/// Outcome of checking one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordCheck {
    /// Sequence number stored in the record.
    pub sequence: u64,
    /// Operation name of the recorded call.
    pub op: &'static str,
    /// Stored record id matches the content.
    pub id_valid: bool,
    /// Sequence number follows the previous record.
    pub in_sequence: bool,
    /// Registry rejection reason when the call does not re-apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<String>,
}

impl RecordCheck {
    /// Returns true if the record passed every check.
    pub fn is_ok(&self) -> bool {
        self.id_valid && self.in_sequence && self.rejected.is_none()
    }
}

/// Result of verifying a whole journal.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Per-record outcomes in journal order.
    pub records: Vec<RecordCheck>,
    /// Digest of the state reached by re-applying the accepted records.
    pub state_digest: Digest,
}

impl VerificationReport {
    /// Returns true if every record passed.
    pub fn all_ok(&self) -> bool {
        self.records.iter().all(RecordCheck::is_ok)
    }
}

/// Checks every record of `reader` without stopping at the first failure.
///
/// Unlike [`replay`](crate::replay()), a failing record is reported and the
/// remaining records are still checked against the state reached so far.
pub fn verify_journal(
    reader: &mut JournalReader,
    config: RegistryConfig,
) -> Result<VerificationReport, JournalError> {
    let mut registry = Registry::new(config);
    let mut records = Vec::new();
    let mut previous = 0u64;

    while let Some(record) = reader.read_record()? {
        let id_valid = record.verify()?;
        let in_sequence = record.sequence == previous + 1;
        previous = record.sequence;

        let rejected = registry
            .apply(&record.caller, &record.call)
            .err()
            .map(|e| e.to_string());

        records.push(RecordCheck {
            sequence: record.sequence,
            op: record.call.op(),
            id_valid,
            in_sequence,
            rejected,
        });
    }

    Ok(VerificationReport {
        records,
        state_digest: registry.state_digest()?,
    })
}
