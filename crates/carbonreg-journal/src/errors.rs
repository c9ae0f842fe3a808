use carbonreg_core::RegistryError;
use carbonreg_types::ContentIdError;
use thiserror::Error;

/// Errors that can occur during journal operations.
#[derive(Error, Debug)]
pub enum JournalError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid file header (magic, version, or flags).
    #[error("invalid journal header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure (reserved bytes or length).
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload exceeds maximum size limit.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: u64,
        /// Maximum allowed size.
        max: u32,
    },
    /// Invalid UTF-8 in a call record payload.
    #[error("invalid UTF-8 in call record payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// Payload is not a well-formed call record.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// Record id could not be computed.
    #[error("record id computation failed: {0}")]
    ContentId(#[from] ContentIdError),
    /// Existing file is too short to hold a header.
    #[error("file is not empty; cannot initialize header")]
    FileNotEmpty,
    /// Truncated frame detected in strict mode.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
}

/// Errors that stop a journal replay.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// The journal could not be read.
    #[error(transparent)]
    Journal(#[from] JournalError),
    /// A record's stored id does not match its content.
    #[error("record {sequence}: record id does not match content")]
    RecordIdMismatch {
        /// Sequence number of the record.
        sequence: u64,
    },
    /// Records are missing, repeated or out of order.
    #[error("expected record {expected}, found record {found}")]
    SequenceGap {
        /// Next sequence number the replay expected.
        expected: u64,
        /// Sequence number actually read.
        found: u64,
    },
    /// A recorded call is rejected by the registry.
    #[error("record {sequence}: {source}")]
    Rejected {
        /// Sequence number of the record.
        sequence: u64,
        /// Registry rejection.
        source: RegistryError,
    },
}
