mod cli;

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::process::ExitCode;

use cli::commands::{handle_preview_command, handle_submit_command, handle_template_command};
use cli::{Cli, Commands};
use negkw::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            log::debug!("Command failed: {:?}", err);
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Template(args) => {
            handle_template_command(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Preview(args) => {
            handle_preview_command(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Submit(args) => {
            let config = Config::load(cli.config.as_deref())?;
            handle_submit_command(args, config).await
        }
    }
}
