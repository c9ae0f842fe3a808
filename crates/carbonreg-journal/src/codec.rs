//! Byte layout of a journal: the file header and call record frames.
//!
//! ```text
//! file   := header frame*
//! header := "CRJ1" version:u16le 0x00{10}
//! frame  := kind:u8 0x00{3} len:u32le payload[len]
//! ```
//!
//! Kind `0x01` carries the JSON of a [`CallRecord`]. Frames of any other kind
//! are preserved on disk and skipped by readers.

use crate::errors::JournalError;
use crate::record::CallRecord;

/// Journal file magic bytes.
pub const MAGIC: &[u8; 4] = b"CRJ1";

/// Format version written after the magic.
pub const VERSION: u16 = 0x0001;

/// File header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// Frame header size in bytes.
pub const FRAME_HEADER_SIZE: usize = 8;

/// Largest accepted payload: 1 MiB.
pub const MAX_PAYLOAD_SIZE: u32 = 1 << 20;

const KIND_CALL_RECORD: u8 = 0x01;

/// What a frame's payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// UTF-8 JSON of a sealed [`CallRecord`].
    CallRecord,
    /// Kind written by a newer format; readers skip it.
    Unknown(u8),
}

impl From<u8> for FrameKind {
    fn from(byte: u8) -> Self {
        match byte {
            KIND_CALL_RECORD => FrameKind::CallRecord,
            other => FrameKind::Unknown(other),
        }
    }
}

impl From<FrameKind> for u8 {
    fn from(kind: FrameKind) -> Self {
        match kind {
            FrameKind::CallRecord => KIND_CALL_RECORD,
            FrameKind::Unknown(byte) => byte,
        }
    }
}

/// Header bytes that open every journal file.
pub fn file_header() -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    header[..4].copy_from_slice(MAGIC);
    header[4..6].copy_from_slice(&VERSION.to_le_bytes());
    header
}

/// Checks magic, version and that the remaining ten bytes are zero.
pub fn check_file_header(header: &[u8; HEADER_SIZE]) -> Result<(), JournalError> {
    let (magic, rest) = header.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(JournalError::InvalidHeader(format!(
            "invalid magic: {:?}, expected {:?}",
            magic, MAGIC
        )));
    }
    let version = u16::from_le_bytes([rest[0], rest[1]]);
    if version != VERSION {
        return Err(JournalError::InvalidHeader(format!(
            "unsupported version: 0x{:04x}, expected 0x{:04x}",
            version, VERSION
        )));
    }
    if let Some(pos) = rest[2..].iter().position(|b| *b != 0) {
        return Err(JournalError::InvalidHeader(format!(
            "non-zero flag or reserved byte at {}",
            pos + 6
        )));
    }
    Ok(())
}

/// Frames `payload` as one contiguous buffer, header first.
pub fn encode_frame(kind: FrameKind, payload: &[u8]) -> Result<Vec<u8>, JournalError> {
    let len = u32::try_from(payload.len())
        .ok()
        .filter(|len| *len <= MAX_PAYLOAD_SIZE)
        .ok_or(JournalError::PayloadTooLarge {
            size: payload.len() as u64,
            max: MAX_PAYLOAD_SIZE,
        })?;

    let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
    frame.extend_from_slice(&[u8::from(kind), 0, 0, 0]);
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Parses the frame header found at byte `offset`, returning kind and
/// payload length.
pub fn decode_frame_header(
    header: &[u8; FRAME_HEADER_SIZE],
    offset: u64,
) -> Result<(FrameKind, u32), JournalError> {
    if header[1..4] != [0u8; 3] {
        return Err(JournalError::InvalidFrame {
            offset,
            reason: "non-zero reserved bytes".to_string(),
        });
    }
    let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if len > MAX_PAYLOAD_SIZE {
        return Err(JournalError::InvalidFrame {
            offset,
            reason: format!("payload size {} exceeds maximum {}", len, MAX_PAYLOAD_SIZE),
        });
    }
    Ok((FrameKind::from(header[0]), len))
}

/// Serializes `record` into a complete call record frame.
pub fn encode_record(record: &CallRecord) -> Result<Vec<u8>, JournalError> {
    encode_frame(FrameKind::CallRecord, &serde_json::to_vec(record)?)
}

/// Parses the payload of a call record frame.
pub fn decode_record(payload: &[u8]) -> Result<CallRecord, JournalError> {
    let text = std::str::from_utf8(payload)?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let header = file_header();
        assert_eq!(&header, b"CRJ1\x01\x00\0\0\0\0\0\0\0\0\0\0");
        check_file_header(&header).unwrap();
    }

    #[test]
    fn header_checks() {
        let mut bad_magic = file_header();
        bad_magic[0] = b'N';
        assert!(check_file_header(&bad_magic).is_err());

        let mut bad_version = file_header();
        bad_version[4] = 0x02;
        let err = check_file_header(&bad_version).unwrap_err();
        assert!(err.to_string().contains("version"));

        let mut flagged = file_header();
        flagged[6] = 0x01;
        let err = check_file_header(&flagged).unwrap_err();
        assert!(err.to_string().contains("at 6"));
    }

    #[test]
    fn frame_layout() {
        let frame = encode_frame(FrameKind::Unknown(0x09), &[0xAB; 0x0102]).unwrap();
        assert_eq!(&frame[..FRAME_HEADER_SIZE], &[0x09, 0, 0, 0, 0x02, 0x01, 0, 0]);
        assert_eq!(frame.len(), FRAME_HEADER_SIZE + 0x0102);

        let header: [u8; FRAME_HEADER_SIZE] = frame[..FRAME_HEADER_SIZE].try_into().unwrap();
        assert_eq!(
            decode_frame_header(&header, 16).unwrap(),
            (FrameKind::Unknown(0x09), 0x0102)
        );
    }

    #[test]
    fn oversized_payload_is_refused_before_encoding() {
        let payload = vec![0u8; MAX_PAYLOAD_SIZE as usize + 1];
        assert!(matches!(
            encode_frame(FrameKind::CallRecord, &payload),
            Err(JournalError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn declared_length_is_bounded() {
        let mut header = [0x01, 0, 0, 0, 0, 0, 0, 0];
        header[4..].copy_from_slice(&(MAX_PAYLOAD_SIZE + 1).to_le_bytes());
        match decode_frame_header(&header, 40) {
            Err(JournalError::InvalidFrame { offset, reason }) => {
                assert_eq!(offset, 40);
                assert!(reason.contains("exceeds"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn kind_byte_mapping() {
        assert_eq!(FrameKind::from(0x01), FrameKind::CallRecord);
        assert_eq!(FrameKind::from(0x7F), FrameKind::Unknown(0x7F));
        assert_eq!(u8::from(FrameKind::Unknown(0x7F)), 0x7F);
    }

    #[test]
    fn record_payload_must_be_utf8_json() {
        assert!(matches!(decode_record(&[0xFF]), Err(JournalError::InvalidUtf8(_))));
        assert!(matches!(decode_record(b"{}"), Err(JournalError::JsonParse(_))));
    }
}
