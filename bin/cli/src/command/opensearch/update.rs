use flags::Field;
use mutation::{
  EmptyUpdatePolicy, Mutation, NamedReference, ResolveError,
  SelectiveUpdate, build_request, label_or_id,
  resolve::{ReferenceKind, resolve_id},
};
use stackit_client::{
  api::opensearch::{OpenSearchApi, PartialUpdateInstance},
  entities::{
    config::cli::args::opensearch::UpdateInstance,
    opensearch::{Instance, InstanceParameters, PartialUpdateInstancePayload},
  },
  wait::{self, WaitOptions},
};

use crate::{command::quoted, context::CliContext};

const PLAN: ReferenceKind = ReferenceKind {
  entry: "plan",
  key: "version",
};

#[derive(Debug, Clone, PartialEq)]
pub struct InputModel {
  pub project_id: String,
  pub instance_id: String,
  pub enable_monitoring: Field<bool>,
  pub graphite: Field<String>,
  pub metrics_frequency: Field<i64>,
  pub metrics_prefix: Field<String>,
  pub monitoring_instance_id: Field<String>,
  pub plugin: Field<Vec<String>>,
  pub acl: Field<Vec<String>>,
  pub syslog: Field<Vec<String>>,
  pub plan_id: Field<String>,
  /// `--plan-name` + `--version`, used when `--plan-id` is not given.
  pub plan: Option<NamedReference>,
}

pub async fn handle(
  ctx: &CliContext,
  args: &UpdateInstance,
) -> anyhow::Result<()> {
  let model = parse_input(ctx.config.project_id.as_deref(), args)?;
  let client = ctx.client()?;
  run(ctx, &client, model).await
}

pub fn parse_input(
  project_id: Option<&str>,
  args: &UpdateInstance,
) -> flags::Result<InputModel> {
  let instance_id = flags::uuid_arg("INSTANCE_ID", &args.instance_id)?;
  let project_id = flags::project_id("project-id", project_id)?;
  let plan = flags::pair(
    ("plan-name", args.plan_name.as_deref()),
    ("version", args.plan_version.as_deref()),
  )?
  .map(|(name, key)| NamedReference { name, key });

  let model = InputModel {
    project_id,
    instance_id,
    enable_monitoring: flags::boolean(
      "enable-monitoring",
      args.enable_monitoring.as_deref(),
    )?,
    graphite: flags::string(args.graphite.as_deref()),
    metrics_frequency: flags::int64(
      "metrics-frequency",
      args.metrics_frequency.as_deref(),
    )?,
    metrics_prefix: flags::string(args.metrics_prefix.as_deref()),
    monitoring_instance_id: flags::uuid(
      "monitoring-instance-id",
      args.monitoring_instance_id.as_deref(),
    )?,
    plugin: flags::string_list(args.plugin.as_deref()),
    acl: flags::string_list(args.acl.as_deref()),
    syslog: flags::string_list(args.syslog.as_deref()),
    plan_id: flags::uuid("plan-id", args.plan_id.as_deref())?,
    plan,
  };
  debug!("parsed input values: {model:?}");
  Ok(model)
}

async fn run<C: OpenSearchApi>(
  ctx: &CliContext,
  client: &C,
  model: InputModel,
) -> anyhow::Result<()> {
  let request = build_request(model, client).await?;

  let label = label_or_id(&request.instance_id, || async {
    client
      .get_instance(&request.project_id, &request.instance_id)
      .await
      .map(|instance| instance.name)
      .map_err(anyhow::Error::from)
  })
  .await;

  let prompt = format!(
    "Are you sure you want to update instance {}?",
    quoted(&label)
  );
  let mutation = UpdateInstanceMutation {
    client,
    request,
    wait_options: ctx.wait_options(),
  };
  let outcome = ctx.executor().execute(&prompt, &mutation).await?;

  ctx.printer.info(&message(&label, outcome.is_triggered()));
  Ok(())
}

fn message(label: &str, triggered: bool) -> String {
  let operation_state = if triggered {
    "Triggered update of"
  } else {
    "Updated"
  };
  format!("{operation_state} instance {}", quoted(label))
}

impl<C: OpenSearchApi> SelectiveUpdate<C> for InputModel {
  type Request = PartialUpdateInstance;

  const EMPTY_UPDATE: EmptyUpdatePolicy = EmptyUpdatePolicy::Reject;

  fn has_changes(&self) -> bool {
    mutation::any_set!(
      self.enable_monitoring,
      self.graphite,
      self.metrics_frequency,
      self.metrics_prefix,
      self.monitoring_instance_id,
      self.plugin,
      self.acl,
      self.syslog,
      self.plan_id,
    ) || self.plan.is_some()
  }

  async fn resolve(self, client: &C) -> Result<Self, ResolveError> {
    let plan_id = resolve_id(
      self.plan_id.clone(),
      self.plan.as_ref(),
      PLAN,
      "list OpenSearch offerings",
      || async {
        client
          .list_offerings(&self.project_id)
          .await
          .map(|res| res.offerings)
          .map_err(anyhow::Error::from)
      },
    )
    .await?;
    Ok(InputModel { plan_id, ..self })
  }

  fn assemble(&self) -> PartialUpdateInstance {
    PartialUpdateInstance {
      project_id: self.project_id.clone(),
      instance_id: self.instance_id.clone(),
      payload: PartialUpdateInstancePayload {
        parameters: InstanceParameters {
          enable_monitoring: self.enable_monitoring.clone().into(),
          graphite: self.graphite.clone().into(),
          metrics_frequency: self.metrics_frequency.clone().into(),
          metrics_prefix: self.metrics_prefix.clone().into(),
          monitoring_instance_id: self
            .monitoring_instance_id
            .clone()
            .into(),
          plugins: self.plugin.clone().into(),
          sgw_acl: self.acl.as_ref().map(|acl| acl.join(",")).into(),
          syslog: self.syslog.clone().into(),
        },
        plan_id: self.plan_id.clone().into(),
      },
    }
  }
}

struct UpdateInstanceMutation<'a, C> {
  client: &'a C,
  request: PartialUpdateInstance,
  wait_options: WaitOptions,
}

impl<C: OpenSearchApi> Mutation for UpdateInstanceMutation<'_, C> {
  type Response = ();
  type Final = Instance;

  fn operation(&self) -> String {
    String::from("update OpenSearch instance")
  }

  async fn submit(&self) -> anyhow::Result<()> {
    self.client.partial_update_instance(&self.request).await?;
    Ok(())
  }

  fn tracked_id(&self, _: &()) -> Option<String> {
    Some(self.request.instance_id.clone())
  }

  fn wait_operation(&self) -> String {
    String::from("wait for OpenSearch instance update")
  }

  async fn wait(&self, instance_id: &str) -> anyhow::Result<Instance> {
    let instance = wait::opensearch_partial_update(
      self.client,
      &self.request.project_id,
      instance_id,
      self.wait_options,
    )
    .await?;
    Ok(instance)
  }
}
