//! Sealed call records: the unit of the journal.

use carbonreg_core::{Call, Caller};
use carbonreg_types::{compute_content_id, verify_content_id, ContentIdError, Digest, Timestamp};
use serde::{Deserialize, Serialize};

/// Domain separator for record ids: `b"carbonreg:call:v1\0"`.
pub const RECORD_DOMAIN_SEPARATOR: &[u8] = b"carbonreg:call:v1\0";

/// One successfully applied call, as stored in the journal.
///
/// `record_id` is the content id of every other field, so a record cannot be
/// edited in place without the change being detected on replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Content id over the remaining fields.
    pub record_id: Digest,
    /// Position in the journal, starting at 1.
    pub sequence: u64,
    /// When the call was applied.
    pub recorded_at: Timestamp,
    /// Identity the call was made under.
    pub caller: Caller,
    /// The call itself.
    pub call: Call,
}

#[derive(Serialize)]
struct RecordBody<'a> {
    sequence: u64,
    recorded_at: &'a Timestamp,
    caller: &'a Caller,
    call: &'a Call,
}

impl CallRecord {
    /// Builds a record and computes its id.
    pub fn seal(
        sequence: u64,
        recorded_at: Timestamp,
        caller: Caller,
        call: Call,
    ) -> Result<Self, ContentIdError> {
        let record_id = compute_content_id(
            RECORD_DOMAIN_SEPARATOR,
            &RecordBody {
                sequence,
                recorded_at: &recorded_at,
                caller: &caller,
                call: &call,
            },
        )?;
        Ok(Self {
            record_id,
            sequence,
            recorded_at,
            caller,
            call,
        })
    }

    /// Returns whether `record_id` matches the record's content.
    pub fn verify(&self) -> Result<bool, ContentIdError> {
        verify_content_id(RECORD_DOMAIN_SEPARATOR, self, &self.record_id)
    }
}
