//! Remass CLI Binary
//!
//! Command-line interface for rebuilding a tablet's document hierarchy.

use anyhow::Context;
use clap::Parser;
use remass::logging::init_logging;
use remass::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut context = CliContext::new(cli.dir.clone(), cli.config.clone())
        .context("Error loading configuration")?;
    context.apply_cli_overrides(cli);
    init_logging(Some(&context.config().logging)).context("Error initializing logging")?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
