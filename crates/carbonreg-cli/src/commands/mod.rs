//! Subcommand implementations and the helpers they share.

pub mod decide;
pub mod history;
pub mod query;
pub mod register;
pub mod request;
pub mod transfer;
pub mod verify;

use std::error::Error;
use std::path::Path;

use carbonreg_core::{Call, Caller, Registry, RegistryConfig};
use carbonreg_journal::{
    replay, CallRecord, JournalReader, JournalWriter, ReadMode, Replayed, WriteOptions,
};
use carbonreg_types::{Address, Timestamp};
use chrono::{SecondsFormat, Utc};
use log::{debug, info};

use crate::lock::JournalLock;
use crate::output;
use crate::path;

/// Result type of every subcommand.
pub type CommandResult = Result<(), Box<dyn Error>>;

/// Loads the registry config, falling back to defaults without `--config`.
pub fn load_config(config: Option<&str>) -> Result<RegistryConfig, Box<dyn Error>> {
    match config {
        Some(file) => {
            debug!("loading config from {}", file);
            RegistryConfig::from_path(file)
                .map_err(|e| format!("Failed to load config {}: {}", file, e).into())
        }
        None => Ok(RegistryConfig::default()),
    }
}

/// Rebuilds the registry from `journal_path`; a missing journal is empty.
pub fn replay_journal(
    journal_path: &Path,
    config: RegistryConfig,
) -> Result<Replayed, Box<dyn Error>> {
    if !journal_path.exists() {
        return Ok(Replayed {
            registry: Registry::new(config),
            records: 0,
        });
    }
    let mut reader = JournalReader::open(journal_path, ReadMode::Strict).map_err(|e| {
        let sanitized = path::sanitize_path_for_error(journal_path);
        format!("Failed to open journal file: {}: {}", sanitized, e)
    })?;
    Ok(replay(&mut reader, config)?)
}

/// Locks the sidecar of `journal_path`, exclusively for writers.
pub fn lock_journal(journal_path: &Path, exclusive: bool) -> Result<JournalLock, Box<dyn Error>> {
    let lock = if exclusive {
        JournalLock::exclusive(journal_path)
    } else {
        JournalLock::shared(journal_path)
    };
    lock.map_err(|e| {
        let sanitized = path::sanitize_path_for_error(journal_path);
        Box::<dyn Error>::from(format!("Failed to lock journal file: {}: {}", sanitized, e))
    })
}

/// Opens an existing journal and rebuilds the registry for a query.
pub fn load_registry(journal: &str, config: Option<&str>) -> Result<Registry, Box<dyn Error>> {
    let journal_path = path::validate_journal_path(journal, true)
        .map_err(|e| format!("Invalid journal path: {}", e))?;
    let config = load_config(config)?;
    let _lock = lock_journal(&journal_path, false)?;
    Ok(replay_journal(&journal_path, config)?.registry)
}

/// Applies `call` as `from` against the replayed state and journals it.
///
/// Nothing is written when the registry rejects the call. The journal lock
/// is held from replay until the record is synced, so concurrent commands
/// against one journal apply one after another.
pub fn execute(
    journal: &str,
    config: Option<&str>,
    from: Address,
    call: Call,
    json: bool,
) -> CommandResult {
    let journal_path = path::validate_journal_path(journal, false)
        .map_err(|e| format!("Invalid journal path: {}", e))?;
    let config = load_config(config)?;
    let lock = lock_journal(&journal_path, true)?;
    let mut replayed = replay_journal(&journal_path, config)?;

    let caller = Caller::new(from);
    let receipt = replayed.registry.apply(&caller, &call)?;

    let recorded_at = Timestamp::parse(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))?;
    let record = CallRecord::seal(replayed.next_sequence(), recorded_at, caller, call)?;
    let options = WriteOptions {
        sync: true,
        ..WriteOptions::default()
    };
    let mut writer = JournalWriter::open(&journal_path, options)?;
    writer.append_record(&record)?;
    writer.finish()?;
    drop(lock);
    info!(
        "appended record {} ({}) to {}",
        record.sequence,
        record.call.op(),
        path::sanitize_path_for_error(&journal_path)
    );

    output::print_applied(&record, &receipt, json)?;
    Ok(())
}
