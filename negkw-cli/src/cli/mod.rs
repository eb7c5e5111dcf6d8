//! Command-line interface

pub mod commands;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use commands::{PreviewArgs, SubmitArgs, TemplateArgs};

#[derive(Parser, Debug)]
#[command(name = "negkw", version, about = "Bulk upload negative keywords from a spreadsheet")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (defaults to <config dir>/negkw/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an Excel template with the required columns and example rows
    Template(TemplateArgs),
    /// Show the request groups a spreadsheet produces
    Preview(PreviewArgs),
    /// Submit all groups of a spreadsheet (or exported groups file)
    Submit(SubmitArgs),
}
