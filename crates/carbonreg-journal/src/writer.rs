//! Appending call records to a journal file.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::codec::{self, FrameKind, HEADER_SIZE};
use crate::errors::JournalError;
use crate::record::CallRecord;

/// Options for journal writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each append (default: false).
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
    /// Whether to keep existing records (default: true).
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
            append: true,
        }
    }
}

/// Append-only writer of call records.
///
/// The writer does not check sequence numbers; callers obtain the next one
/// from [`replay`](crate::replay()) before sealing a record.
pub struct JournalWriter {
    file: File,
    sync: bool,
}

impl JournalWriter {
    /// Opens or creates a journal file for writing.
    ///
    /// An empty file gets a fresh header. An existing journal has its header
    /// checked and is then appended to, or cut back to the header when
    /// `options.append` is false.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::FileNotEmpty`] for a non-empty file too short
    /// to hold a header, and [`JournalError::InvalidHeader`] for a file that
    /// is not a journal.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let mut file = OpenOptions::new()
            .create(options.create)
            .read(true)
            .write(true)
            .open(path)?;

        match file.metadata()?.len() {
            0 => file.write_all(&codec::file_header())?,
            len if len < HEADER_SIZE as u64 => return Err(JournalError::FileNotEmpty),
            _ => {
                let mut header = [0u8; HEADER_SIZE];
                file.read_exact(&mut header)?;
                codec::check_file_header(&header)?;
                if !options.append {
                    file.set_len(HEADER_SIZE as u64)?;
                }
                file.seek(SeekFrom::End(0))?;
            }
        }

        let mut writer = Self {
            file,
            sync: options.sync,
        };
        writer.flush()?;
        Ok(writer)
    }

    /// Appends a sealed call record.
    pub fn append_record(&mut self, record: &CallRecord) -> Result<(), JournalError> {
        let frame = codec::encode_record(record)?;
        self.write_frame(&frame)
    }

    /// Appends a frame of any kind around `payload`.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        let frame = codec::encode_frame(kind, payload)?;
        self.write_frame(&frame)
    }

    /// A frame goes out in a single write, so an interrupted append leaves
    /// at most a truncated tail.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), JournalError> {
        self.file.write_all(frame)?;
        self.flush()
    }

    fn flush(&mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync_data()?;
        }
        Ok(())
    }

    /// Flushes and closes the file.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.flush()
    }
}

impl Drop for JournalWriter {
    fn drop(&mut self) {
        if self.sync {
            let _ = self.file.sync_data();
        }
    }
}
