//! `negkw template`

use anyhow::{Result, bail};
use clap::Args;
use colored::*;
use std::path::PathBuf;

use negkw::export::{TEMPLATE_FILE_NAME, write_template};

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Where to write the template
    #[arg(short, long, value_name = "PATH", default_value = TEMPLATE_FILE_NAME)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn handle_template_command(args: TemplateArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists; use --force to overwrite it",
            args.output.display()
        );
    }

    write_template(&args.output)?;

    println!(
        "Template written to {}",
        args.output.display().to_string().bright_green()
    );
    println!("Fill in one negative keyword per row, then run `negkw preview` or `negkw submit`.");
    Ok(())
}
