use anyhow::Context;
use stackit_client::entities::config::cli::args::Command;

use crate::context::CliContext;

pub mod opensearch;
pub mod postgresflex;
pub mod project;
pub mod secrets_manager;

pub async fn handle(
  ctx: &CliContext,
  command: &Command,
) -> anyhow::Result<()> {
  match command {
    Command::Config {
      all_profiles,
      unsanitized,
    } => print_config(ctx, *all_profiles, *unsanitized),
    Command::OpenSearch { command } => {
      opensearch::handle(ctx, command).await
    }
    Command::PostgresFlex { command } => {
      postgresflex::handle(ctx, command).await
    }
    Command::Project { command } => project::handle(ctx, command).await,
    Command::SecretsManager { command } => {
      secrets_manager::handle(ctx, command).await
    }
  }
}

fn print_config(
  ctx: &CliContext,
  all_profiles: bool,
  unsanitized: bool,
) -> anyhow::Result<()> {
  let mut config = if unsanitized {
    ctx.config.clone()
  } else {
    ctx.config.sanitized()
  };
  if !all_profiles {
    config.profile = Default::default();
  }
  println!(
    "{}",
    serde_json::to_string_pretty(&config)
      .context("Failed to serialize config for pretty print")?
  );
  Ok(())
}

/// Quotes like `%q`.
fn quoted(value: &str) -> String {
  format!("{value:?}")
}
