//! Sequential journal reading.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::codec::{self, FrameKind, FRAME_HEADER_SIZE, HEADER_SIZE};
use crate::errors::JournalError;
use crate::record::CallRecord;

/// How a reader treats a journal that ends mid-frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// A partial trailing frame is a [`JournalError::TruncatedFrame`].
    Strict,
    /// A partial trailing frame ends the journal.
    Permissive,
}

/// Forward-only reader over a journal file.
///
/// Frames of unknown kinds are skipped by [`JournalReader::read_record`], so
/// journals written by newer versions stay readable.
///
/// # Example
///
/// ```rust,no_run
/// use carbonreg_journal::{JournalReader, ReadMode};
///
/// let mut reader = JournalReader::open("registry.crj", ReadMode::Strict)?;
/// while let Some(record) = reader.read_record()? {
///     println!("{} {}", record.sequence, record.call.op());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JournalReader {
    input: BufReader<File>,
    mode: ReadMode,
    position: u64,
}

impl JournalReader {
    /// Opens a journal and checks its header.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::InvalidHeader`] for a file that is shorter
    /// than a header or not a journal.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, JournalError> {
        let mut input = BufReader::new(File::open(path)?);
        let mut header = [0u8; HEADER_SIZE];
        let got = read_up_to(&mut input, &mut header)?;
        if got < HEADER_SIZE {
            return Err(JournalError::InvalidHeader(format!(
                "file shorter than header: {} bytes",
                got
            )));
        }
        codec::check_file_header(&header)?;

        Ok(Self {
            input,
            mode,
            position: HEADER_SIZE as u64,
        })
    }

    /// Byte offset of the next frame.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read mode the reader was opened with.
    pub fn mode(&self) -> ReadMode {
        self.mode
    }

    /// Reads the next frame of any kind.
    ///
    /// Returns `Ok(None)` at end-of-file, and on truncation in permissive mode.
    pub fn read_frame(&mut self) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        let start = self.position;

        let mut header = [0u8; FRAME_HEADER_SIZE];
        match read_up_to(&mut self.input, &mut header)? {
            0 => return Ok(None),
            FRAME_HEADER_SIZE => {}
            _ => return self.truncated(start),
        }
        let (kind, len) = codec::decode_frame_header(&header, start)?;

        let mut payload = vec![0u8; len as usize];
        if read_up_to(&mut self.input, &mut payload)? < payload.len() {
            return self.truncated(start);
        }

        self.position = start + (FRAME_HEADER_SIZE + payload.len()) as u64;
        Ok(Some((kind, payload)))
    }

    fn truncated<T>(&self, offset: u64) -> Result<Option<T>, JournalError> {
        match self.mode {
            ReadMode::Permissive => {
                debug!("journal truncated at offset {}", offset);
                Ok(None)
            }
            ReadMode::Strict => Err(JournalError::TruncatedFrame { offset }),
        }
    }

    /// Reads the next call record, skipping unknown frame kinds.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] on invalid frames, malformed records, strict
    /// mode truncation and I/O failures.
    pub fn read_record(&mut self) -> Result<Option<CallRecord>, JournalError> {
        while let Some((kind, payload)) = self.read_frame()? {
            match kind {
                FrameKind::CallRecord => return codec::decode_record(&payload).map(Some),
                FrameKind::Unknown(byte) => {
                    debug!("skipping frame of kind 0x{:02x} ({} bytes)", byte, payload.len());
                }
            }
        }
        Ok(None)
    }

    /// Reads all remaining call records.
    pub fn read_all(&mut self) -> Result<Vec<CallRecord>, JournalError> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        Ok(records)
    }
}

/// Fills as much of `buf` as the input holds; a short count means end-of-file.
fn read_up_to(input: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
