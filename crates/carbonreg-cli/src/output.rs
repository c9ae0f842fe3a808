//! Output formatting utilities.

use carbonreg_core::Receipt;
use carbonreg_journal::{CallRecord, RecordCheck};
use serde_json::json;

/// Prints a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the outcome of an applied call.
pub fn print_applied(
    record: &CallRecord,
    receipt: &Receipt,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        return print_json(&json!({
            "sequence": record.sequence,
            "record_id": record.record_id,
            "receipt": receipt,
        }));
    }
    println!("record {}: {}", record.sequence, describe_receipt(receipt));
    Ok(())
}

/// One-line summary of a receipt.
pub fn describe_receipt(receipt: &Receipt) -> String {
    match receipt {
        Receipt::SurveyorRegistered { surveyor } => format!("surveyor {} registered", surveyor),
        Receipt::CompanyRegistered { company, surveyor } => {
            format!("company {} queued for surveyor {}", company, surveyor)
        }
        Receipt::CreditInfoApproved { company, minted } => {
            format!("company {} verified, {} units minted", company, minted.len())
        }
        Receipt::CreditInfoRejected { company } => format!("company {} rejected", company),
        Receipt::ReceiveRequestRegistered {
            company,
            index,
            amount,
            requests_remaining,
        } => format!(
            "company {} requested {} units as request {} ({} requests left)",
            company, amount, index, requests_remaining
        ),
        Receipt::CreditsTransferred(transfer) => format!(
            "{} units moved from {} to {}: {}",
            transfer.units.len(),
            transfer.owner,
            transfer.requester,
            transfer
                .units
                .iter()
                .map(|u| u.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        ),
    }
}

/// Prints the history table header.
#[allow(clippy::print_literal)]
pub fn print_history_header() {
    println!(
        "{:<6} {:<21} {:<43} {}",
        "SEQ", "RECORDED_AT", "CALLER", "OP"
    );
    println!("{}", "-".repeat(100));
}

/// Formats a call record as a history row.
pub fn format_history_row(record: &CallRecord) -> String {
    format!(
        "{:<6} {:<21} {:<43} {}",
        record.sequence,
        truncate(record.recorded_at.as_str(), 21),
        record.caller,
        record.call.op()
    )
}

/// Prints the verification table header.
#[allow(clippy::print_literal)]
pub fn print_verify_header() {
    println!(
        "{:<6} {:<26} {:<9} {:<9} {}",
        "SEQ", "OP", "ID", "SEQUENCE", "APPLIED"
    );
    println!("{}", "-".repeat(80));
}

/// Formats one verification outcome as a table row.
pub fn format_verify_row(check: &RecordCheck) -> String {
    format!(
        "{:<6} {:<26} {:<9} {:<9} {}",
        check.sequence,
        check.op,
        verdict(check.id_valid),
        verdict(check.in_sequence),
        check.rejected.as_deref().unwrap_or("ok")
    )
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "INVALID"
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
