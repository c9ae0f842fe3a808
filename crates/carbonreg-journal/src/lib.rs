//! Append-only call journal for the carbon credit registry.
//!
//! Every successful mutating call is sealed into a [`CallRecord`] and
//! appended to a framed journal file. Registry state is never stored; it is
//! rebuilt by replaying the journal with [`replay`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use carbonreg_core::{Call, Caller, RegistryConfig};
//! use carbonreg_journal::{replay, CallRecord, JournalReader, JournalWriter, ReadMode, WriteOptions};
//! use carbonreg_types::{Address, DisplayName, Timestamp};
//!
//! let admin = Caller::new(Address::parse("0x0000000000000000000000000000000000000001")?);
//! let call = Call::RegisterSurveyor {
//!     address: Address::parse("0x00000000000000000000000000000000000000aa")?,
//!     name: DisplayName::parse("Greener")?,
//! };
//! let record = CallRecord::seal(1, Timestamp::parse("2024-01-01T00:00:00Z")?, admin, call)?;
//!
//! let mut writer = JournalWriter::open("registry.crj", WriteOptions::default())?;
//! writer.append_record(&record)?;
//! writer.finish()?;
//!
//! let mut reader = JournalReader::open("registry.crj", ReadMode::Strict)?;
//! let replayed = replay(&mut reader, RegistryConfig::default())?;
//! assert_eq!(replayed.registry.surveyor_names().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Format
//!
//! A 16 byte header (`CRJ1`, version `0x0001` little-endian, zero flags and
//! reserved bytes) followed by frames of a kind byte, three zero bytes, a
//! little-endian `u32` payload length and the payload.

#![deny(missing_docs)]

/// File header and frame encoding.
pub mod codec;
/// Error types for journal operations.
pub mod errors;
/// Journal reader implementation.
pub mod reader;
/// Sealed call records.
pub mod record;
/// Registry replay.
pub mod replay;
/// Whole-journal verification.
pub mod verification;
/// Journal writer implementation.
pub mod writer;

pub use codec::FrameKind;
pub use errors::{JournalError, ReplayError};
pub use reader::{JournalReader, ReadMode};
pub use record::CallRecord;
pub use replay::{replay, replay_into, Replayed};
pub use verification::{verify_journal, RecordCheck, VerificationReport};
pub use writer::{JournalWriter, WriteOptions};
