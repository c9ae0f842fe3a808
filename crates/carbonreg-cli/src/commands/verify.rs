//! Verify command: check record ids, sequence and re-application.

use carbonreg_journal::{verify_journal, JournalReader, ReadMode};
use log::warn;

use super::{load_config, lock_journal, CommandResult};
use crate::output;
use crate::path;

pub fn run(journal: String, config: Option<String>, strict: bool, json: bool) -> CommandResult {
    let journal_path = path::validate_journal_path(&journal, true)
        .map_err(|e| format!("Invalid journal path: {}", e))?;
    let config = load_config(config.as_deref())?;
    let _lock = lock_journal(&journal_path, false)?;

    let mode = if strict {
        ReadMode::Strict
    } else {
        ReadMode::Permissive
    };
    let mut reader = JournalReader::open(&journal_path, mode).map_err(|e| {
        let sanitized = path::sanitize_path_for_error(&journal_path);
        format!("Failed to open journal file: {}: {}", sanitized, e)
    })?;
    let report = verify_journal(&mut reader, config)?;

    for check in report.records.iter().filter(|c| !c.is_ok()) {
        warn!("record {} ({}) failed verification", check.sequence, check.op);
    }

    if json {
        output::print_json(&report)?;
    } else {
        output::print_verify_header();
        for check in &report.records {
            println!("{}", output::format_verify_row(check));
        }
        println!();
        println!("records:      {}", report.records.len());
        println!("state digest: {}", report.state_digest);
    }

    if strict && !report.all_ok() {
        let failed = report.records.iter().filter(|c| !c.is_ok()).count();
        return Err(format!("{} of {} records failed verification", failed, report.records.len()).into());
    }

    Ok(())
}
