#[macro_use]
extern crate tracing;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use stackit_client::entities::config::cli::{Env, args::CliArgs};

use crate::context::CliContext;

mod command;
mod config;
mod context;
mod printer;

async fn app() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();
  let args = CliArgs::parse();
  let env = envy::from_env::<Env>()
    .context("Failed to parse STACKIT CLI environment")?;
  let config = config::load(&args, env)?;
  logger::init(&config.cli_logging)?;
  let ctx = CliContext::new(config, args.assume_yes);
  command::handle(&ctx, &args.command).await
}

async fn run() -> anyhow::Result<()> {
  let mut term_signal = tokio::signal::unix::signal(
    tokio::signal::unix::SignalKind::terminate(),
  )?;
  tokio::select! {
    res = app() => res,
    _ = term_signal.recv() => Ok(()),
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  match run().await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{}: {e:#}", "ERROR".red());
      ExitCode::FAILURE
    }
  }
}
