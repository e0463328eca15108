use stackit_client::entities::config::cli::args::opensearch::{
  OpenSearchCommand, OpenSearchInstanceCommand,
};

use crate::context::CliContext;

mod update;

pub async fn handle(
  ctx: &CliContext,
  command: &OpenSearchCommand,
) -> anyhow::Result<()> {
  match command {
    OpenSearchCommand::Instance { command } => match command {
      OpenSearchInstanceCommand::Update(args) => {
        update::handle(ctx, args).await
      }
    },
  }
}
