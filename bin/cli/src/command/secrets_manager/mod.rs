use stackit_client::entities::config::cli::args::secrets_manager::{
  SecretsManagerCommand, SecretsManagerUserCommand,
};

use crate::context::CliContext;

mod describe;

pub async fn handle(
  ctx: &CliContext,
  command: &SecretsManagerCommand,
) -> anyhow::Result<()> {
  match command {
    SecretsManagerCommand::User { command } => match command {
      SecretsManagerUserCommand::Describe(args) => {
        describe::handle(ctx, args).await
      }
    },
  }
}
