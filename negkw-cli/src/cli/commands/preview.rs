//! `negkw preview`

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::fs;
use std::path::PathBuf;

use negkw::ingest::load_groups;

use crate::cli::output;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Spreadsheet (.xlsx, .xls, .ods) or CSV file
    pub file: PathBuf,

    /// Write the groups as JSON to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,
}

pub fn handle_preview_command(args: PreviewArgs) -> Result<()> {
    let normalized = load_groups(&args.file)?;

    let json = if args.compact {
        serde_json::to_string(&normalized.groups)
    } else {
        serde_json::to_string_pretty(&normalized.groups)
    }
    .context("Failed to format request groups")?;

    // Summary goes to stderr so stdout stays valid JSON
    eprintln!("{}", output::normalize_summary(&normalized));

    match args.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("Failed to write output to: {}", path.display()))?;
            eprintln!(
                "Groups saved to: {}",
                path.display().to_string().bright_green()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
