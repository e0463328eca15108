use stackit_client::entities::config::cli::args::postgresflex::{
  PostgresFlexCommand, PostgresFlexInstanceCommand,
};

use crate::context::CliContext;

mod clone;

pub async fn handle(
  ctx: &CliContext,
  command: &PostgresFlexCommand,
) -> anyhow::Result<()> {
  match command {
    PostgresFlexCommand::Instance { command } => match command {
      PostgresFlexInstanceCommand::Clone(args) => {
        clone::handle(ctx, args).await
      }
    },
  }
}
