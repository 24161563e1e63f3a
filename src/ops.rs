//! Orchestration entry points.
//!
//! Thin validation-and-delegation layers between a presentation shell and
//! the two capabilities. Each function checks its preconditions locally,
//! synchronously, and without side effects, then hands the request to the
//! capability and passes its result through unchanged. No retries, no
//! swallowed errors.

use std::path::{Path, PathBuf};

use crate::config::EmailConfig;
use crate::email::EmailSender;
use crate::error::{MergeMailError, Result};
use crate::merge::{PdfMerger, Progress};

/// Merge `inputs`, in order, into `output`.
///
/// Preconditions, checked before any I/O:
/// - `inputs` must be non-empty.
/// - `output` must end in `.pdf` (ASCII case-insensitive).
///
/// # Errors
///
/// Returns an invalid-input error for a violated precondition, otherwise
/// whatever the merger returns.
pub fn merge_labels<M: PdfMerger + ?Sized>(
    merger: &M,
    inputs: &[PathBuf],
    output: &Path,
    on_progress: Option<Progress<'_>>,
) -> Result<()> {
    if inputs.is_empty() {
        return Err(MergeMailError::EmptyInput);
    }

    if !has_pdf_extension(output) {
        return Err(MergeMailError::NotPdfOutput {
            path: output.to_path_buf(),
        });
    }

    merger.merge_pdfs(inputs, output, on_progress)
}

/// Send `attachment` using `config`.
///
/// Preconditions, checked before any I/O beyond the existence probe:
/// - `attachment` must exist (checked first, so a missing file is never
///   masked by a configuration problem).
/// - all four configuration keys must be present and non-empty.
///
/// # Errors
///
/// Returns an invalid-input error for a violated precondition, otherwise
/// whatever the sender returns.
pub fn send_report<S: EmailSender + ?Sized>(
    sender: &S,
    config: &EmailConfig,
    attachment: &Path,
) -> Result<()> {
    if !attachment.exists() {
        return Err(MergeMailError::AttachmentNotFound {
            path: attachment.to_path_buf(),
        });
    }

    config.validate()?;

    sender.send_with_attachment(config, attachment)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
