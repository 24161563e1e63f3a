//! mergemail - Merge label PDFs into one document and send it by email.
//!
//! This library is the core of a small label-processing utility: given an
//! ordered list of label PDFs it concatenates them into a single output PDF
//! with progress reporting, and can then send that output as an email
//! attachment over SMTP with TLS. It provides:
//!
//! - Input validation with a closed error taxonomy
//! - Order-preserving PDF merging with an atomic save
//! - Progress callbacks suitable for worker threads
//! - One-shot email delivery with a single attachment
//!
//! # Examples
//!
//! ## Merge and send
//!
//! ```no_run
//! use mergemail::config::EmailConfig;
//! use mergemail::email::SmtpEmailSender;
//! use mergemail::merge::LopdfMerger;
//! use mergemail::ops;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let output = Path::new("merged.pdf");
//!
//! ops::merge_labels(
//!     &LopdfMerger::new(),
//!     &inputs,
//!     output,
//!     Some(&mut |completed, total| println!("{completed}/{total}")),
//! )?;
//!
//! let config = EmailConfig::from_file(Path::new("config.ini"))?;
//! ops::send_report(&SmtpEmailSender::new(), &config, output)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Substituting a capability
//!
//! Both operations are defined against narrow traits
//! ([`merge::PdfMerger`], [`email::EmailSender`]) with one production
//! implementation each, so tests and alternative backends plug in without
//! touching the orchestration layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod email;
pub mod error;
pub mod merge;
pub mod ops;

// Re-export commonly used types
pub use config::EmailConfig;
pub use error::{ErrorKind, MergeMailError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
