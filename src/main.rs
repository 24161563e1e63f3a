//! mergemail - Merge label PDFs into a single document and email the result.

mod cli;

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use mergemail::config::EmailConfig;
use mergemail::email::SmtpEmailSender;
use mergemail::error::MergeMailError;
use mergemail::merge::LopdfMerger;
use mergemail::ops;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
fn run(cli: Cli) -> Result<(), MergeMailError> {
    let inputs = cli.expand_inputs()?;
    let quiet = cli.quiet;

    if !quiet {
        println!("Merging {} document(s)...", inputs.len());
    }

    let mut print_progress = |completed: usize, total: usize| {
        if !quiet {
            println!("  [{completed}/{total}]");
        }
    };

    ops::merge_labels(
        &LopdfMerger::new(),
        &inputs,
        &cli.output,
        Some(&mut print_progress),
    )?;

    if !quiet {
        println!("Created {}", cli.output.display());
    }

    if let Some(config_path) = &cli.email_config {
        let config = EmailConfig::from_file(config_path)?;

        if !quiet {
            println!("Sending {} to {}...", cli.output.display(), config.recipient);
        }

        ops::send_report(&SmtpEmailSender::new(), &config, &cli.output)?;

        if !quiet {
            println!("Sent.");
        }
    }

    Ok(())
}
