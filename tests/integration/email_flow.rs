//! Email orchestration flow with a substituted sender capability.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use mergemail::config::EmailConfig;
use mergemail::email::EmailSender;
use mergemail::error::{ErrorKind, MergeMailError, Result};
use mergemail::merge::LopdfMerger;
use mergemail::ops;
use tempfile::TempDir;

use crate::common::write_label_pdf;

/// Sender that records requests instead of touching the network.
#[derive(Default)]
struct RecordingSender {
    calls: RefCell<Vec<(EmailConfig, PathBuf)>>,
}

impl EmailSender for RecordingSender {
    fn send_with_attachment(&self, config: &EmailConfig, attachment: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((config.clone(), attachment.to_path_buf()));
        Ok(())
    }
}

fn valid_config() -> EmailConfig {
    EmailConfig {
        sender: "labels@example.com".to_string(),
        app_password: "abcd efgh ijkl mnop".to_string(),
        recipient: "warehouse@example.com".to_string(),
        subject: "Merged labels".to_string(),
    }
}

#[test]
fn test_merge_then_send_flow() {
    let dir = TempDir::new().unwrap();
    let input = write_label_pdf(dir.path(), "label.pdf", "Label");
    let output = dir.path().join("merged.pdf");

    ops::merge_labels(&LopdfMerger::new(), &[input], &output, None).unwrap();

    let sender = RecordingSender::default();
    ops::send_report(&sender, &valid_config(), &output).unwrap();

    let calls = sender.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, output);
}

#[test]
fn test_missing_attachment_rejected_before_sender_runs() {
    let sender = RecordingSender::default();
    let missing = Path::new("/nonexistent/merged.pdf");

    let result = ops::send_report(&sender, &valid_config(), missing);

    match result.unwrap_err() {
        MergeMailError::AttachmentNotFound { path } => assert_eq!(path, missing),
        other => panic!("expected AttachmentNotFound, got {other:?}"),
    }
    assert!(sender.calls.borrow().is_empty());
}

#[test]
fn test_missing_attachment_not_masked_by_incomplete_config() {
    let sender = RecordingSender::default();

    let result = ops::send_report(
        &sender,
        &EmailConfig::default(),
        Path::new("/nonexistent/merged.pdf"),
    );

    assert!(matches!(
        result.unwrap_err(),
        MergeMailError::AttachmentNotFound { .. }
    ));
}

#[test]
fn test_each_missing_config_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let attachment = dir.path().join("merged.pdf");
    std::fs::write(&attachment, b"payload").unwrap();

    for field in ["sender", "app_password", "recipient", "subject"] {
        let mut config = valid_config();
        match field {
            "sender" => config.sender.clear(),
            "app_password" => config.app_password.clear(),
            "recipient" => config.recipient.clear(),
            _ => config.subject.clear(),
        }

        let sender = RecordingSender::default();
        let err = ops::send_report(&sender, &config, &attachment).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        match err {
            MergeMailError::IncompleteEmailConfig { missing } => assert_eq!(missing, field),
            other => panic!("expected IncompleteEmailConfig, got {other:?}"),
        }
        assert!(sender.calls.borrow().is_empty());
    }
}

#[test]
fn test_config_loaded_from_file_drives_send() {
    let dir = TempDir::new().unwrap();
    let attachment = dir.path().join("merged.pdf");
    std::fs::write(&attachment, b"payload").unwrap();

    let config_path = dir.path().join("config.ini");
    std::fs::write(
        &config_path,
        "sender = labels@example.com\n\
         app_password = abcd efgh ijkl mnop\n\
         recipient = warehouse@example.com\n\
         subject = Merged labels\n",
    )
    .unwrap();

    let config = EmailConfig::from_file(&config_path).unwrap();
    let sender = RecordingSender::default();
    ops::send_report(&sender, &config, &attachment).unwrap();

    let calls = sender.calls.borrow();
    assert_eq!(calls[0].0, valid_config());
}

#[test]
fn test_sender_failure_passes_through_unchanged() {
    struct FailingSender;
    impl EmailSender for FailingSender {
        fn send_with_attachment(&self, _config: &EmailConfig, _attachment: &Path) -> Result<()> {
            Err(MergeMailError::ConnectionLost)
        }
    }

    let dir = TempDir::new().unwrap();
    let attachment = dir.path().join("merged.pdf");
    std::fs::write(&attachment, b"payload").unwrap();

    let err = ops::send_report(&FailingSender, &valid_config(), &attachment).unwrap_err();

    assert!(matches!(err, MergeMailError::ConnectionLost));
    assert_eq!(err.kind(), ErrorKind::Email);
}
