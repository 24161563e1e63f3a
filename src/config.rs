//! Email configuration loading and validation.
//!
//! The sending side needs exactly four values: the sender address, an
//! app-specific credential for that address, the recipient address, and a
//! subject line. They are typically kept in a small configuration file next
//! to the application. Two formats are accepted:
//!
//! - JSON: `{"sender": "...", "app_password": "...", ...}`
//! - INI-style `key = value` lines; section headers and `#`/`;` comments
//!   are ignored.
//!
//! Only presence and non-emptiness of the four keys is validated here; the
//! values themselves (address syntax, credential format) are the mail
//! server's business.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{MergeMailError, Result};

/// The four values required to send the merged PDF by email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Sender address, also used as the SMTP login name.
    pub sender: String,

    /// App-specific password for the sender account.
    pub app_password: String,

    /// Recipient address.
    pub recipient: String,

    /// Subject line for the outgoing message.
    pub subject: String,
}

impl EmailConfig {
    /// Load a configuration from a file.
    ///
    /// The format is detected from the content: documents starting with `{`
    /// are parsed as JSON, everything else as INI-style `key = value` lines.
    /// Missing keys are left empty; completeness is checked at send time via
    /// [`EmailConfig::validate`], so a partial file loads without error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MergeMailError::ConfigUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        if content.trim_start().starts_with('{') {
            serde_json::from_str(&content).map_err(|e| MergeMailError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        } else {
            Ok(Self::from_ini(&content))
        }
    }

    /// Parse INI-style `key = value` lines.
    ///
    /// Unknown keys, section headers, comments, and blank lines are ignored.
    fn from_ini(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with(';')
                || line.starts_with('[')
            {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();

            match key.trim() {
                "sender" => config.sender = value,
                "app_password" => config.app_password = value,
                "recipient" => config.recipient = value,
                "subject" => config.subject = value,
                _ => {}
            }
        }

        config
    }

    /// Check that all four required keys are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`MergeMailError::IncompleteEmailConfig`] naming the first
    /// missing or empty key.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("sender", &self.sender),
            ("app_password", &self.app_password),
            ("recipient", &self.recipient),
            ("subject", &self.subject),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(MergeMailError::IncompleteEmailConfig {
                    missing: name.to_string(),
                });
            }
        }

        Ok(())
    }
}
