use stackit_client::entities::config::cli::args::project::{
  ProjectCommand, ProjectMemberCommand,
};

use crate::context::CliContext;

mod remove;

pub async fn handle(
  ctx: &CliContext,
  command: &ProjectCommand,
) -> anyhow::Result<()> {
  match command {
    ProjectCommand::Member { command } => match command {
      ProjectMemberCommand::Remove(args) => {
        remove::handle(ctx, args).await
      }
    },
  }
}
