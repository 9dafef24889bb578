//! fsv CLI Binary

use anyhow::Context;
use clap::Parser;
use fsv::logging::init_logging;
use fsv::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: Cli) -> anyhow::Result<i32> {
    let context = CliContext::new(cli.config.clone()).context("loading configuration")?;

    let mut logging = context.config().logging.clone();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    if let Some(output) = cli.log_output {
        logging.output = output;
    }
    init_logging(Some(&logging)).context("initializing logging")?;

    let output = context.execute(&cli.command)?;
    if !output.text.is_empty() {
        println!("{}", output.text);
    }
    Ok(output.status)
}

fn main() {
    match run(Cli::parse()) {
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
