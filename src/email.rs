//! Email send capability.
//!
//! Sends the merged PDF as a single attachment over SMTP with implicit TLS,
//! behind the [`EmailSender`] trait so tests can substitute a fake. The
//! production implementation is [`SmtpEmailSender`], built on `lettre`'s
//! blocking transport against the Gmail submission endpoint
//! (`smtp.gmail.com:465`), authenticating with the sender address and an
//! app-specific password.
//!
//! The attachment is read before any connection is opened; a read failure is
//! reported as its own error and never reaches the network. Exactly one send
//! attempt is made per call; timeouts are the transport's defaults.

use std::fs;
use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Code;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::EmailConfig;
use crate::error::{MergeMailError, Result};

/// Mail submission endpoint.
const SMTP_HOST: &str = "smtp.gmail.com";
const SMTP_PORT: u16 = 465;

/// Fixed body text; the message exists to carry the attachment.
const BODY: &str = "The merged label PDF is attached.";

/// The email send contract.
pub trait EmailSender {
    /// Send one message with `attachment` to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the attachment cannot be read, the message cannot
    /// be assembled, or the transport fails.
    fn send_with_attachment(&self, config: &EmailConfig, attachment: &Path) -> Result<()>;
}

/// Production sender using `lettre` over SMTP with implicit TLS.
///
/// Holds no state between calls; each send opens and tears down its own
/// connection.
#[derive(Debug, Clone, Default)]
pub struct SmtpEmailSender;

impl SmtpEmailSender {
    /// Create a new sender.
    pub fn new() -> Self {
        Self
    }
}

impl EmailSender for SmtpEmailSender {
    fn send_with_attachment(&self, config: &EmailConfig, attachment: &Path) -> Result<()> {
        let message = build_message(config, attachment)?;

        let credentials = Credentials::new(config.sender.clone(), config.app_password.clone());
        let transport = SmtpTransport::relay(SMTP_HOST)
            .map_err(classify_smtp_error)?
            .port(SMTP_PORT)
            .credentials(credentials)
            .build();

        info!(recipient = %config.recipient, attachment = %attachment.display(), "sending message");

        transport.send(&message).map_err(classify_smtp_error)?;

        info!("message accepted by server");

        Ok(())
    }
}

/// Assemble the message: fixed text body plus one PDF attachment whose
/// filename is the base name of `attachment`.
fn build_message(config: &EmailConfig, attachment: &Path) -> Result<Message> {
    let from = config
        .sender
        .parse::<Mailbox>()
        .map_err(|e| MergeMailError::message_build(format!("invalid sender address: {e}")))?;
    let to = config
        .recipient
        .parse::<Mailbox>()
        .map_err(|e| MergeMailError::message_build(format!("invalid recipient address: {e}")))?;

    // Distinct failure domain from the network send: read the file first.
    let data = fs::read(attachment).map_err(|e| MergeMailError::AttachmentUnreadable {
        path: attachment.to_path_buf(),
        source: e,
    })?;

    let file_name = attachment
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment.pdf".to_string());

    let content_type = ContentType::parse("application/pdf")
        .map_err(|e| MergeMailError::message_build(e.to_string()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(config.subject.clone())
        .multipart(
            MultiPart::mixed()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(String::from(BODY)),
                )
                .singlepart(Attachment::new(file_name).body(data, content_type)),
        )
        .map_err(|e| MergeMailError::message_build(e.to_string()))
}

/// Map a transport failure onto the crate's error taxonomy.
///
/// A rejected login surfaces as a permanent response with an auth-related
/// reply code; a dropped connection surfaces as an I/O error somewhere in
/// the cause chain. Everything else keeps the server's own message.
fn classify_smtp_error(err: lettre::transport::smtp::Error) -> MergeMailError {
    if err.is_permanent() {
        return classify_permanent_reply(err.status(), err.to_string());
    }

    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return MergeMailError::ConnectionLost;
        }
        source = cause.source();
    }

    MergeMailError::transport(err.to_string())
}

/// Classify a permanent 5xx rejection by its reply code.
///
/// Only the auth-related codes (530 authentication required, 534 mechanism
/// too weak, 535 credentials rejected) mean the login was refused; a
/// permanent rejection after a successful login (recipient refused, message
/// too large) is reported with the server's reason instead.
fn classify_permanent_reply(code: Option<Code>, reason: String) -> MergeMailError {
    let login_rejected =
        code.is_some_and(|code| matches!(code.to_string().as_str(), "530" | "534" | "535"));

    if login_rejected {
        MergeMailError::AuthenticationFailed
    } else {
        MergeMailError::transport(reason)
    }
}
