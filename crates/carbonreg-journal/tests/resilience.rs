use carbonreg_core::{Call, Caller, RegistryConfig};
use carbonreg_journal::codec::MAX_PAYLOAD_SIZE;
use carbonreg_journal::{
    replay, CallRecord, FrameKind, JournalError, JournalReader, JournalWriter, ReadMode,
    WriteOptions,
};
use carbonreg_types::{Address, DisplayName, Timestamp};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tempfile::TempDir;

fn make_record(sequence: u64) -> CallRecord {
    CallRecord::seal(
        sequence,
        Timestamp::parse("2024-01-01T00:00:00Z").unwrap(),
        Caller::new(Address::parse("0x0000000000000000000000000000000000000001").unwrap()),
        Call::RegisterSurveyor {
            address: Address::parse(format!("0x{:040x}", 100 + sequence)).unwrap(),
            name: DisplayName::parse(format!("Surveyor {}", sequence)).unwrap(),
        },
    )
    .unwrap()
}

fn write_two_records(journal_path: &std::path::Path) {
    let mut writer = JournalWriter::open(journal_path, WriteOptions::default()).unwrap();
    writer.append_record(&make_record(1)).unwrap();
    writer.append_record(&make_record(2)).unwrap();
    writer.finish().unwrap();
}

#[test]
fn test_payload_size_limit() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");

    let oversized_payload = vec![0u8; MAX_PAYLOAD_SIZE as usize + 1];
    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    let result = writer.append_raw(FrameKind::CallRecord, &oversized_payload);

    match result.unwrap_err() {
        JournalError::PayloadTooLarge { size, max } => {
            assert_eq!(size, MAX_PAYLOAD_SIZE as u64 + 1);
            assert_eq!(max, MAX_PAYLOAD_SIZE);
        }
        other => panic!("Expected PayloadTooLarge error, got {}", other),
    }
    // nothing but the header was written
    assert_eq!(fs::metadata(&journal_path).unwrap().len(), 16);
}

#[test]
fn test_max_payload_size_allowed() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");

    let max_payload = vec![0u8; MAX_PAYLOAD_SIZE as usize];
    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    writer.append_raw(FrameKind::Unknown(0x7F), &max_payload).unwrap();
    writer.finish().unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    let (kind, payload) = reader.read_frame().unwrap().unwrap();
    assert_eq!(kind, FrameKind::Unknown(0x7F));
    assert_eq!(payload.len(), MAX_PAYLOAD_SIZE as usize);
}

#[test]
fn test_unknown_frames_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");

    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    writer.append_raw(FrameKind::Unknown(0x02), b"future data").unwrap();
    writer.append_record(&make_record(1)).unwrap();
    writer.append_raw(FrameKind::Unknown(0x03), b"").unwrap();
    writer.finish().unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    let records = reader.read_all().unwrap();
    assert_eq!(records, vec![make_record(1)]);
}

#[test]
fn test_truncated_payload_strict_mode() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");
    write_two_records(&journal_path);

    let len = fs::metadata(&journal_path).unwrap().len();
    OpenOptions::new()
        .write(true)
        .open(&journal_path)
        .unwrap()
        .set_len(len - 5)
        .unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert!(reader.read_record().unwrap().is_some());
    match reader.read_record() {
        Err(JournalError::TruncatedFrame { .. }) => {}
        other => panic!("Expected TruncatedFrame, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_truncated_payload_permissive_mode() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");
    write_two_records(&journal_path);

    let len = fs::metadata(&journal_path).unwrap().len();
    OpenOptions::new()
        .write(true)
        .open(&journal_path)
        .unwrap()
        .set_len(len - 5)
        .unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Permissive).unwrap();
    let replayed = replay(&mut reader, RegistryConfig::default()).unwrap();
    assert_eq!(replayed.records, 1);
    assert_eq!(replayed.registry.surveyor_names().len(), 1);
}

#[test]
fn test_truncated_frame_header() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");
    write_two_records(&journal_path);

    let mut file = OpenOptions::new().append(true).open(&journal_path).unwrap();
    file.write_all(&[0x01, 0x00, 0x00]).unwrap();
    drop(file);

    let mut strict = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert!(strict.read_all().is_err());

    let mut permissive = JournalReader::open(&journal_path, ReadMode::Permissive).unwrap();
    assert_eq!(permissive.read_all().unwrap().len(), 2);
}

#[test]
fn test_reserved_bytes_must_be_zero() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");
    write_two_records(&journal_path);

    let mut bytes = fs::read(&journal_path).unwrap();
    bytes[16 + 2] = 0xFF;
    fs::write(&journal_path, &bytes).unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Permissive).unwrap();
    match reader.read_record() {
        Err(JournalError::InvalidFrame { offset, .. }) => assert_eq!(offset, 16),
        other => panic!("Expected InvalidFrame, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_invalid_header_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");
    fs::write(&journal_path, b"NRJ1\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00").unwrap();

    assert!(matches!(
        JournalReader::open(&journal_path, ReadMode::Strict),
        Err(JournalError::InvalidHeader(_))
    ));
    assert!(matches!(
        JournalWriter::open(&journal_path, WriteOptions::default()),
        Err(JournalError::InvalidHeader(_))
    ));
}

#[test]
fn test_short_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");
    fs::write(&journal_path, b"CRJ1").unwrap();

    assert!(matches!(
        JournalReader::open(&journal_path, ReadMode::Permissive),
        Err(JournalError::InvalidHeader(_))
    ));
    assert!(matches!(
        JournalWriter::open(&journal_path, WriteOptions::default()),
        Err(JournalError::FileNotEmpty)
    ));
}

#[test]
fn test_malformed_record_payload() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("test.crj");

    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    writer
        .append_raw(FrameKind::CallRecord, br#"{"sequence": 1}"#)
        .unwrap();
    writer.append_raw(FrameKind::CallRecord, &[0xFF, 0xFE]).unwrap();
    writer.finish().unwrap();

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert!(matches!(reader.read_record(), Err(JournalError::JsonParse(_))));
    assert!(matches!(reader.read_record(), Err(JournalError::InvalidUtf8(_))));
}
