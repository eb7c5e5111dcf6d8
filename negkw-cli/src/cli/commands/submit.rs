//! `negkw submit`

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use dialoguer::Confirm;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use negkw::api::{ConcurrencyLimiter, HttpKeywordClient};
use negkw::config::Config;
use negkw::export::export_failures_csv;
use negkw::ingest::load_groups;
use negkw::keywords::BatchSubmitter;

use crate::cli::output;

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Spreadsheet, CSV, or a groups .json written by `negkw preview --output`
    pub file: PathBuf,

    /// Override the batch add endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Maximum requests in flight (0 = no limit)
    #[arg(long, value_name = "N")]
    pub max_concurrent: Option<usize>,

    /// Submit without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Also write failed groups to this CSV file
    #[arg(long, value_name = "PATH")]
    pub failures_out: Option<PathBuf>,
}

/// Returns a failure exit code when any group was rejected
pub async fn handle_submit_command(args: SubmitArgs, mut config: Config) -> Result<ExitCode> {
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint.trim().to_string();
    }
    if let Some(max) = args.max_concurrent {
        config.set_max_concurrent(max);
    }
    config.validate()?;

    let normalized = load_groups(&args.file)?;
    println!("{}", output::normalize_summary(&normalized));

    if normalized.groups.is_empty() {
        println!("{}", "Nothing to submit.".yellow());
        return Ok(ExitCode::SUCCESS);
    }

    if !args.yes {
        let prompt = format!(
            "Submit {} groups to {}?",
            normalized.groups.len(),
            config.endpoint
        );
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let client = HttpKeywordClient::new(
        config.endpoint.as_str(),
        config.request_timeout(),
        &config.user_agent,
    )?;
    let submitter = BatchSubmitter::new(
        client,
        ConcurrencyLimiter::new(config.concurrency.clone()),
    );

    println!("Submitting to {}...", config.endpoint.cyan());
    let report = submitter.submit(&normalized.groups).await;
    println!();
    output::print_report(&report);

    if let Some(path) = args.failures_out {
        if report.failure_count() > 0 {
            export_failures_csv(&report, &path)?;
            println!(
                "Failures saved to: {}",
                path.display().to_string().bright_green()
            );
        }
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn confirm(prompt: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        bail!("Not running in a terminal; pass --yes to submit without confirmation");
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}
