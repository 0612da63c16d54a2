mod cli;
mod platform;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    platform::logging::initialize(&cli);
    platform::run_app(cli)
}
