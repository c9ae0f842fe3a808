//! Rebuilding registry state from a journal.

use carbonreg_core::{Registry, RegistryConfig};
use log::{debug, info};

use crate::errors::{JournalError, ReplayError};
use crate::reader::JournalReader;

/// Registry rebuilt from a journal.
pub struct Replayed {
    /// State after the last record.
    pub registry: Registry,
    /// Number of records applied.
    pub records: u64,
}

impl Replayed {
    /// Sequence number the next appended record must carry.
    pub fn next_sequence(&self) -> u64 {
        self.records + 1
    }
}

/// Replays every record of `reader` into a fresh registry.
///
/// Each record must carry the next sequence number, verify against its
/// `record_id`, and be accepted by the registry. The first record that does
/// not stops the replay.
pub fn replay(reader: &mut JournalReader, config: RegistryConfig) -> Result<Replayed, ReplayError> {
    replay_into(reader, Registry::new(config))
}

/// Replays every record of `reader` on top of `registry`.
pub fn replay_into(
    reader: &mut JournalReader,
    mut registry: Registry,
) -> Result<Replayed, ReplayError> {
    let mut records = 0u64;
    while let Some(record) = reader.read_record()? {
        let expected = records + 1;
        if record.sequence != expected {
            return Err(ReplayError::SequenceGap {
                expected,
                found: record.sequence,
            });
        }
        if !record.verify().map_err(JournalError::from)? {
            return Err(ReplayError::RecordIdMismatch {
                sequence: record.sequence,
            });
        }
        registry
            .apply(&record.caller, &record.call)
            .map_err(|source| ReplayError::Rejected {
                sequence: record.sequence,
                source,
            })?;
        debug!("replayed record {} ({})", record.sequence, record.call.op());
        records = expected;
    }

    info!("replayed {} records", records);
    Ok(Replayed { registry, records })
}
