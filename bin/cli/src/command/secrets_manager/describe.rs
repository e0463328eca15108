use anyhow::Context;
use stackit_client::{
  api::secretsmanager::SecretsManagerApi,
  entities::{
    config::cli::args::secrets_manager::DescribeUser,
    secretsmanager::User,
  },
};

use crate::{context::CliContext, printer::Printer};

#[derive(Debug, Clone, PartialEq)]
pub struct InputModel {
  pub project_id: String,
  pub instance_id: String,
  pub user_id: String,
}

pub async fn handle(
  ctx: &CliContext,
  args: &DescribeUser,
) -> anyhow::Result<()> {
  let model = parse_input(ctx.config.project_id.as_deref(), args)?;
  let client = ctx.client()?;
  let user = get_user(&client, &model).await?;
  print_user(&ctx.printer, &user)
}

pub fn parse_input(
  project_id: Option<&str>,
  args: &DescribeUser,
) -> flags::Result<InputModel> {
  let user_id = flags::uuid_arg("USER_ID", &args.user_id)?;
  let project_id = flags::project_id("project-id", project_id)?;
  let model = InputModel {
    project_id,
    instance_id: flags::required_uuid(
      "instance-id",
      args.instance_id.as_deref(),
    )?,
    user_id,
  };
  debug!("parsed input values: {model:?}");
  Ok(model)
}

async fn get_user<C: SecretsManagerApi>(
  client: &C,
  model: &InputModel,
) -> anyhow::Result<User> {
  client
    .get_user(&model.project_id, &model.instance_id, &model.user_id)
    .await
    .context("Failed to get Secrets Manager user")
}

fn print_user(printer: &Printer, user: &User) -> anyhow::Result<()> {
  if printer.structured(user, "Secrets Manager user")? {
    return Ok(());
  }
  printer.details(detail_rows(user));
  Ok(())
}

/// Empty description and password are left out.
fn detail_rows(user: &User) -> Vec<(&'static str, String)> {
  let mut rows = vec![
    ("ID", user.id.clone().unwrap_or_default()),
    ("USERNAME", user.username.clone().unwrap_or_default()),
  ];
  if let Some(description) =
    user.description.as_ref().filter(|d| !d.is_empty())
  {
    rows.push(("DESCRIPTION", description.clone()));
  }
  if let Some(password) = user.password.as_ref().filter(|p| !p.is_empty())
  {
    rows.push(("PASSWORD", password.clone()));
  }
  rows.push((
    "WRITE ACCESS",
    user.write.map(|w| w.to_string()).unwrap_or_default(),
  ));
  rows
}
