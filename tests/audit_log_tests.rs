// Integration tests for the file-backed audit trail
//
// These tests verify that events are appended as JSON lines, in call order,
// and that redacted details never carry the raw text.

use aidstack_backend::audit::{redacted_text, AuditDetails, AuditEventType};
use aidstack_backend::{AuditEvent, AuditLogger};
use anyhow::Result;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_file_sink_appends_json_lines_in_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("audit.log");

    let logger = AuditLogger::to_file(&path)?;
    logger.record(AuditEventType::SessionCreated, AuditDetails::new(), None);
    logger.record(
        AuditEventType::UnauthorizedAccess,
        AuditDetails::new(),
        None,
    );
    logger.record(
        AuditEventType::SessionDestroyed,
        AuditDetails::new(),
        Some("0123456789abcdef".to_string()),
    );

    let contents = fs::read_to_string(&path)?;
    let events: Vec<AuditEvent> = contents
        .lines()
        .map(serde_json::from_str::<AuditEvent>)
        .collect::<Result<_, _>>()?;

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].event_type, AuditEventType::SessionCreated);
    assert_eq!(events[1].event_type, AuditEventType::UnauthorizedAccess);
    assert_eq!(events[2].event_type, AuditEventType::SessionDestroyed);
    assert_eq!(events[2].session_ref.as_deref(), Some("0123456789abcdef"));

    Ok(())
}

#[test]
fn test_reopening_file_appends_rather_than_truncates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("audit.log");

    AuditLogger::to_file(&path)?.record(AuditEventType::SessionCreated, AuditDetails::new(), None);
    AuditLogger::to_file(&path)?.record(AuditEventType::SessionCreated, AuditDetails::new(), None);

    let contents = fs::read_to_string(&path)?;
    assert_eq!(contents.lines().count(), 2);

    Ok(())
}

#[test]
fn test_redacted_transcription_is_not_written() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("audit.log");
    let transcription = "Jane Doe, DOB 1970-01-01, presents with chest pain";

    let logger = AuditLogger::to_file(&path)?;
    let mut details = AuditDetails::new();
    details.extend(redacted_text("transcription", transcription));
    logger.record(AuditEventType::TranscriptionProcessed, details, None);

    let contents = fs::read_to_string(&path)?;
    assert!(!contents.contains("Jane Doe"));
    assert!(contents.contains("transcription_hash"));
    assert!(contents.contains(&format!("\"length\":{}", transcription.chars().count())));

    Ok(())
}

#[test]
fn test_unwritable_path_fails_at_open() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("missing-dir").join("audit.log");

    assert!(AuditLogger::to_file(&path).is_err());
}

#[test]
fn test_non_ascii_length_counts_characters() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("audit.log");
    let transcription = "Patientin klagt über Übelkeit, 38,5 °C";

    let logger = AuditLogger::to_file(&path)?;
    let mut details = AuditDetails::new();
    details.extend(redacted_text("transcription", transcription));
    logger.record(AuditEventType::TranscriptionProcessed, details, None);

    let contents = fs::read_to_string(&path)?;
    let event: AuditEvent = serde_json::from_str(contents.trim_end())?;

    assert_eq!(event.detail("length"), Some(&serde_json::json!(38)));
    assert!(!contents.contains("Übelkeit"));

    Ok(())
}
