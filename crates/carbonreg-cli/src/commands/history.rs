//! History command: list journaled calls.

use carbonreg_journal::{JournalReader, ReadMode};

use super::{lock_journal, CommandResult};
use crate::output;
use crate::path;

pub fn run(journal: String, json: bool, max_records: Option<u64>) -> CommandResult {
    let journal_path = path::validate_journal_path(&journal, true)
        .map_err(|e| format!("Invalid journal path: {}", e))?;
    let _lock = lock_journal(&journal_path, false)?;

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).map_err(|e| {
        let sanitized = path::sanitize_path_for_error(&journal_path);
        format!("Failed to open journal file: {}: {}", sanitized, e)
    })?;

    if !json {
        output::print_history_header();
    }

    let mut count: u64 = 0;
    while let Some(record) = reader.read_record()? {
        if max_records.is_some_and(|max| count >= max) {
            break;
        }
        if json {
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}", output::format_history_row(&record));
        }
        count += 1;
    }

    Ok(())
}
