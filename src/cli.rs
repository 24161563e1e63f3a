//! CLI argument parsing for mergemail.
//!
//! This module defines the command-line interface structure using `clap`
//! and the expansion of directory arguments into their contained PDFs.

use clap::Parser;
use std::path::PathBuf;
use walkdir::WalkDir;

use mergemail::error::{MergeMailError, Result};

/// Merge label PDFs into a single document and optionally email the result.
///
/// Inputs may be individual PDF files or directories; directories are
/// expanded recursively to the `.pdf` files they contain, in sorted order.
/// Files are merged in the order they end up in after expansion.
#[derive(Parser, Debug)]
#[command(name = "mergemail")]
#[command(version)]
#[command(about = "Merge label PDFs into a single document", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files or label folders to merge (in order)
    ///
    /// Examples:
    ///   mergemail labels/ -o merged.pdf
    ///   mergemail a.pdf b.pdf -o merged.pdf --email-config config.ini
    #[arg(required = true, value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Email configuration file; when given, the merged PDF is sent
    /// as an attachment after a successful merge
    ///
    /// The file must define four keys: sender, app_password, recipient,
    /// subject. Both `key = value` lines and JSON are accepted.
    #[arg(long, value_name = "FILE")]
    pub email_config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Expand the input arguments into a flat, ordered list of PDF files.
    ///
    /// Plain files are kept as-is (in argument order); each directory is
    /// replaced by its `.pdf` files, discovered recursively and sorted by
    /// path so category folders merge deterministically. Directory entries
    /// that cannot be read are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MergeMailError::EmptyInput`] if expansion yields no files.
    pub fn expand_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in &self.inputs {
            if input.is_dir() {
                let mut found: Vec<PathBuf> = WalkDir::new(input)
                    .into_iter()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file())
                    .map(|entry| entry.into_path())
                    .filter(|path| {
                        path.extension()
                            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
                    })
                    .collect();
                found.sort();
                files.append(&mut found);
            } else {
                files.push(input.clone());
            }
        }

        if files.is_empty() {
            return Err(MergeMailError::EmptyInput);
        }

        Ok(files)
    }
}
