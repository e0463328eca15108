use mutation::{Mutation, label_or_id};
use stackit_client::{
  api::{
    authorization::{AuthorizationApi, RemoveMembers},
    resourcemanager::ResourceManagerApi,
  },
  entities::{
    authorization::{Member, MembersResponse, RemoveMembersPayload},
    config::cli::args::project::RemoveMember,
  },
};

use crate::{command::quoted, context::CliContext};

#[derive(Debug, Clone, PartialEq)]
pub struct InputModel {
  pub project_id: String,
  pub subject: String,
  pub role: String,
  pub force: bool,
}

pub async fn handle(
  ctx: &CliContext,
  args: &RemoveMember,
) -> anyhow::Result<()> {
  let model = parse_input(ctx.config.project_id.as_deref(), args)?;
  let client = ctx.client()?;
  run(ctx, &client, model).await
}

pub fn parse_input(
  project_id: Option<&str>,
  args: &RemoveMember,
) -> flags::Result<InputModel> {
  let subject = flags::text_arg("SUBJECT", &args.subject)?;
  let project_id = flags::project_id("project-id", project_id)?;
  let model = InputModel {
    project_id,
    subject,
    role: flags::required_string("role", args.role.as_deref())?,
    force: args.force,
  };
  debug!("parsed input values: {model:?}");
  Ok(model)
}

fn build_request(model: &InputModel) -> RemoveMembers {
  RemoveMembers {
    resource_id: model.project_id.clone(),
    payload: RemoveMembersPayload {
      members: vec![Member {
        subject: model.subject.clone(),
        role: model.role.clone(),
      }],
      resource_type: RemoveMembersPayload::PROJECT.to_string(),
      force_remove: Some(model.force),
    },
  }
}

async fn run<C: AuthorizationApi + ResourceManagerApi>(
  ctx: &CliContext,
  client: &C,
  model: InputModel,
) -> anyhow::Result<()> {
  let request = build_request(&model);
  debug!("assembled request: {request:?}");

  let project_label = label_or_id(&model.project_id, || async {
    client
      .get_project(&model.project_id)
      .await
      .map(|project| project.name)
      .map_err(anyhow::Error::from)
  })
  .await;

  let mutation = RemoveMemberMutation { client, request };
  ctx
    .executor()
    .execute(&prompt(&model, &project_label), &mutation)
    .await?;

  ctx.printer.info(&format!(
    "Removed the role {} from {} on project {}",
    quoted(&model.role),
    model.subject,
    quoted(&project_label)
  ));
  Ok(())
}

fn prompt(model: &InputModel, project_label: &str) -> String {
  let prompt = format!(
    "Are you sure you want to remove the role {} from {} on project {}?",
    quoted(&model.role),
    model.subject,
    quoted(project_label)
  );
  if model.force {
    format!(
      "{prompt} This will also remove other roles of the subject that would stop the removal of the requested role"
    )
  } else {
    prompt
  }
}

struct RemoveMemberMutation<'a, C> {
  client: &'a C,
  request: RemoveMembers,
}

/// Membership changes apply immediately, so there is nothing to wait on.
impl<C: AuthorizationApi> Mutation for RemoveMemberMutation<'_, C> {
  type Response = MembersResponse;
  type Final = ();

  fn operation(&self) -> String {
    String::from("remove member")
  }

  async fn submit(&self) -> anyhow::Result<MembersResponse> {
    Ok(self.client.remove_members(&self.request).await?)
  }
}
