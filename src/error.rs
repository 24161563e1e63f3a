//! Error types for mergemail.
//!
//! Every failure in this crate is one of a closed set of variants, each
//! carrying the offending path and underlying cause where applicable.
//! Variants fall into three categories, surfaced via [`MergeMailError::kind`]:
//!
//! - **Invalid input**: a precondition violated before any I/O happened.
//!   The caller can correct the arguments and retry.
//! - **Merge**: an I/O or format failure while reading an input document or
//!   persisting the merged output.
//! - **Email**: a failure reading the attachment, building the message, or
//!   talking to the mail server.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for mergemail operations.
pub type Result<T> = std::result::Result<T, MergeMailError>;

/// Coarse error category, matching the three failure domains of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied arguments violated a precondition.
    InvalidInput,
    /// Reading an input PDF or writing the merged output failed.
    Merge,
    /// Reading the attachment or sending the message failed.
    Email,
}

/// Main error type for mergemail operations.
#[derive(Debug, Error)]
pub enum MergeMailError {
    /// No input files were supplied to the merge.
    #[error("file list must not be empty")]
    EmptyInput,

    /// The output path does not carry a `.pdf` extension.
    #[error("output path must be a .pdf file: {}", path.display())]
    NotPdfOutput {
        /// The rejected output path.
        path: PathBuf,
    },

    /// The attachment to send does not exist.
    #[error("attachment not found: {}", path.display())]
    AttachmentNotFound {
        /// The missing attachment path.
        path: PathBuf,
    },

    /// A required email configuration key is absent or empty.
    #[error("email configuration is incomplete: missing '{missing}'")]
    IncompleteEmailConfig {
        /// Name of the first missing or empty key.
        missing: String,
    },

    /// The email configuration file could not be read.
    #[error("failed to read email configuration: {}", path.display())]
    ConfigUnreadable {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The email configuration file could not be parsed.
    #[error("failed to parse email configuration: {}\n  {reason}", path.display())]
    ConfigParse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Details about what was malformed.
        reason: String,
    },

    /// An input document could not be opened or read as a PDF.
    #[error("failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the offending input.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// An input document parsed but contains no pages.
    #[error("PDF has no pages: {}", path.display())]
    NoPages {
        /// Path to the offending input.
        path: PathBuf,
    },

    /// The merged document could not be persisted to the output path.
    #[error("failed to save merged PDF: {}\n  Reason: {reason}", path.display())]
    FailedToSave {
        /// The output path being written.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// The attachment file exists but could not be read.
    #[error("failed to read attachment: {}", path.display())]
    AttachmentUnreadable {
        /// Path to the attachment.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The message could not be assembled (bad address, MIME failure).
    #[error("failed to build email message: {reason}")]
    MessageBuild {
        /// Details about the failure.
        reason: String,
    },

    /// The mail server rejected the login.
    #[error("authentication failed; check sender address or app credential")]
    AuthenticationFailed,

    /// The connection to the mail server dropped mid-session.
    #[error("lost connection to mail server")]
    ConnectionLost,

    /// Any other transport or protocol failure.
    #[error("failed to send email: {reason}")]
    Transport {
        /// Details from the transport.
        reason: String,
    },
}

impl MergeMailError {
    /// Category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput
            | Self::NotPdfOutput { .. }
            | Self::AttachmentNotFound { .. }
            | Self::IncompleteEmailConfig { .. }
            | Self::ConfigUnreadable { .. }
            | Self::ConfigParse { .. } => ErrorKind::InvalidInput,
            Self::FailedToLoadPdf { .. } | Self::NoPages { .. } | Self::FailedToSave { .. } => {
                ErrorKind::Merge
            }
            Self::AttachmentUnreadable { .. }
            | Self::MessageBuild { .. }
            | Self::AuthenticationFailed
            | Self::ConnectionLost
            | Self::Transport { .. } => ErrorKind::Email,
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidInput => 1,
            ErrorKind::Merge => 2,
            ErrorKind::Email => 3,
        }
    }

    /// Create a `FailedToLoadPdf` error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a `FailedToSave` error.
    pub fn failed_to_save(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToSave {
            path,
            reason: reason.into(),
        }
    }

    /// Create a `MessageBuild` error.
    pub fn message_build(reason: impl Into<String>) -> Self {
        Self::MessageBuild {
            reason: reason.into(),
        }
    }

    /// Create a `Transport` error.
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }
}
