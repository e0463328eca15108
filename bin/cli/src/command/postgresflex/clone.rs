use flags::Field;
use mutation::{
  EmptyUpdatePolicy, Mutation, SelectiveUpdate, ValidationError,
  build_request, label_or_id, validate::validate_pair,
};
use stackit_client::{
  api::postgresflex::{CloneInstance, PostgresFlexApi},
  entities::{
    config::cli::args::postgresflex::CloneInstance as CloneInstanceArgs,
    postgresflex::{CloneInstancePayload, CloneInstanceResponse, Instance},
  },
  wait::{self, WaitOptions},
};

use crate::{command::quoted, context::CliContext};

#[derive(Debug, Clone, PartialEq)]
pub struct InputModel {
  pub project_id: String,
  pub region: String,
  pub instance_id: String,
  /// Normalized to the date-time flag layout.
  pub recovery_date: String,
  pub storage_class: Field<String>,
  pub storage_size: Field<i64>,
}

pub async fn handle(
  ctx: &CliContext,
  args: &CloneInstanceArgs,
) -> anyhow::Result<()> {
  let model =
    parse_input(ctx.config.project_id.as_deref(), ctx.region(), args)?;
  let client = ctx.client()?;
  run(ctx, &client, model).await
}

pub fn parse_input(
  project_id: Option<&str>,
  region: &str,
  args: &CloneInstanceArgs,
) -> flags::Result<InputModel> {
  let instance_id = flags::uuid_arg("INSTANCE_ID", &args.instance_id)?;
  let project_id = flags::project_id("project-id", project_id)?;
  let Field::Set(recovery_timestamp) = flags::date_time(
    "recovery-timestamp",
    args.recovery_timestamp.as_deref(),
  )?
  else {
    return Err(flags::Error::MissingFlag {
      flag: "recovery-timestamp",
    });
  };

  let model = InputModel {
    project_id,
    region: region.to_string(),
    instance_id,
    recovery_date: flags::format_date_time(&recovery_timestamp),
    storage_class: flags::string(args.storage_class.as_deref()),
    storage_size: flags::int64(
      "storage-size",
      args.storage_size.as_deref(),
    )?,
  };
  debug!("parsed input values: {model:?}");
  Ok(model)
}

async fn run<C: PostgresFlexApi>(
  ctx: &CliContext,
  client: &C,
  model: InputModel,
) -> anyhow::Result<()> {
  let request = build_request(model, client).await?;

  let label = label_or_id(&request.instance_id, || async {
    client
      .get_instance(&request.project_id, &request.region, &request.instance_id)
      .await
      .map(|res| res.item.and_then(|instance| instance.name))
      .map_err(anyhow::Error::from)
  })
  .await;

  let prompt = format!(
    "Are you sure you want to clone instance {}?",
    quoted(&label)
  );
  let mutation = CloneInstanceMutation {
    client,
    request,
    wait_options: ctx.wait_options(),
  };
  let outcome = ctx.executor().execute(&prompt, &mutation).await?;

  let response = outcome.response();
  if ctx
    .printer
    .structured(response, "PostgreSQL Flex instance clone")?
  {
    return Ok(());
  }
  let new_instance_id = response.instance_id.as_deref().unwrap_or_default();
  ctx.printer.info(&message(
    &label,
    new_instance_id,
    outcome.is_triggered(),
  ));
  Ok(())
}

fn message(label: &str, new_instance_id: &str, triggered: bool) -> String {
  let operation_state = if triggered {
    "Triggered cloning of"
  } else {
    "Cloned"
  };
  format!(
    "{operation_state} instance from instance {}. New Instance ID: {new_instance_id}",
    quoted(label)
  )
}

impl<C: PostgresFlexApi> SelectiveUpdate<C> for InputModel {
  type Request = CloneInstance;

  // The recovery timestamp alone makes a meaningful clone.
  const EMPTY_UPDATE: EmptyUpdatePolicy = EmptyUpdatePolicy::Allow;

  fn has_changes(&self) -> bool {
    mutation::any_set!(self.storage_class, self.storage_size)
  }

  /// The storage flags inherit the current instance storage,
  /// the effective pair must be offered for the instance flavor.
  async fn validate(&self, client: &C) -> Result<(), ValidationError> {
    if !mutation::any_set!(self.storage_class, self.storage_size) {
      return Ok(());
    }
    let instance = client
      .get_instance(&self.project_id, &self.region, &self.instance_id)
      .await
      .map_err(|e| ValidationError::Snapshot {
        what: "get PostgreSQL Flex instance",
        source: e.into(),
      })?
      .item
      .unwrap_or_default();
    let flavor_id = instance
      .flavor_id()
      .ok_or(ValidationError::MissingCurrent { field: "flavor" })?;
    let storages = client
      .list_storages(&self.project_id, &self.region, flavor_id)
      .await
      .map_err(|e| ValidationError::Snapshot {
        what: "get PostgreSQL Flex storages",
        source: e.into(),
      })?;
    validate_pair(
      (&self.storage_class, &self.storage_size),
      (instance.storage_class(), instance.storage_size()),
      &storages,
      &format!("flavor '{flavor_id}'"),
      &storages.describe(),
    )
  }

  fn assemble(&self) -> CloneInstance {
    CloneInstance {
      project_id: self.project_id.clone(),
      region: self.region.clone(),
      instance_id: self.instance_id.clone(),
      payload: CloneInstancePayload {
        class: self.storage_class.clone().into(),
        size: self.storage_size.clone().into(),
        timestamp: Some(self.recovery_date.clone()),
      },
    }
  }
}

struct CloneInstanceMutation<'a, C> {
  client: &'a C,
  request: CloneInstance,
  wait_options: WaitOptions,
}

impl<C: PostgresFlexApi> Mutation for CloneInstanceMutation<'_, C> {
  type Response = CloneInstanceResponse;
  type Final = Instance;

  fn operation(&self) -> String {
    String::from("clone PostgreSQL Flex instance")
  }

  async fn submit(&self) -> anyhow::Result<CloneInstanceResponse> {
    let response = self.client.clone_instance(&self.request).await?;
    anyhow::ensure!(
      response.instance_id.is_some(),
      "Response is missing the new instance id"
    );
    Ok(response)
  }

  /// The clone is tracked as a new instance being created.
  fn tracked_id(&self, response: &CloneInstanceResponse) -> Option<String> {
    response.instance_id.clone()
  }

  fn wait_operation(&self) -> String {
    String::from("wait for PostgreSQL Flex instance cloning")
  }

  async fn wait(&self, instance_id: &str) -> anyhow::Result<Instance> {
    let instance = wait::postgresflex_create(
      self.client,
      &self.request.project_id,
      &self.request.region,
      instance_id,
      self.wait_options,
    )
    .await?;
    Ok(instance)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};

  use clap::Parser;
  use mutation::{ExecutionError, PipelineError};
  use stackit_client::{
    ApiError,
    entities::{
      config::cli::{
        CliConfig,
        args::{
          CliArgs, Command,
          postgresflex::{PostgresFlexCommand, PostgresFlexInstanceCommand},
        },
      },
      postgresflex::{
        Flavor, InstanceResponse, ListStoragesResponse, Storage,
        StorageRange,
      },
    },
  };

  use super::*;

  const PROJECT_ID: &str = "11111111-1111-4111-8111-111111111111";
  const INSTANCE_ID: &str = "22222222-2222-4222-8222-222222222222";
  const NEW_INSTANCE_ID: &str = "33333333-3333-4333-8333-333333333333";
  const RECOVERY_TIMESTAMP: &str = "2024-03-28T16:39:00+00:00";

  fn parse(flags: &[&str]) -> flags::Result<InputModel> {
    let mut argv = vec![
      "stackit",
      "postgresflex",
      "instance",
      "clone",
      INSTANCE_ID,
      "--project-id",
      PROJECT_ID,
    ];
    argv.extend_from_slice(flags);
    let args = CliArgs::try_parse_from(argv).unwrap();
    let Command::PostgresFlex {
      command:
        PostgresFlexCommand::Instance {
          command: PostgresFlexInstanceCommand::Clone(clone),
        },
    } = args.command
    else {
      panic!("expected postgresflex instance clone");
    };
    parse_input(args.project_id.as_deref(), "eu01", &clone)
  }

  fn fixture_model(mods: impl FnOnce(&mut InputModel)) -> InputModel {
    let mut model = InputModel {
      project_id: PROJECT_ID.to_string(),
      region: String::from("eu01"),
      instance_id: INSTANCE_ID.to_string(),
      recovery_date: RECOVERY_TIMESTAMP.to_string(),
      storage_class: Field::Set(String::from("premium-perf6")),
      storage_size: Field::Set(10),
    };
    mods(&mut model);
    model
  }

  #[test]
  fn parses_flags() {
    let model = parse(&[
      "--recovery-timestamp",
      RECOVERY_TIMESTAMP,
      "--storage-class",
      "premium-perf6",
      "--storage-size",
      "10",
    ])
    .unwrap();
    assert_eq!(model, fixture_model(|_| {}));
  }

  #[test]
  fn timestamp_is_normalized() {
    let model =
      parse(&["--recovery-timestamp", "2024-03-28T18:39:00+02:00"]).unwrap();
    assert_eq!(model.recovery_date, "2024-03-28T18:39:00+02:00");
    assert_eq!(model.storage_class, Field::Unset);
    assert_eq!(model.storage_size, Field::Unset);
  }

  #[test]
  fn recovery_timestamp_is_required() {
    assert_eq!(
      parse(&[]).unwrap_err(),
      flags::Error::MissingFlag {
        flag: "recovery-timestamp"
      }
    );
    assert!(matches!(
      parse(&["--recovery-timestamp", "2024-03-28"]),
      Err(flags::Error::InvalidFlag {
        flag: "recovery-timestamp",
        ..
      })
    ));
  }

  #[derive(Default)]
  struct FakeClient {
    instance_status: &'static str,
    instance_calls: Cell<usize>,
    storage_calls: Cell<usize>,
    clones: RefCell<Vec<CloneInstance>>,
  }

  impl PostgresFlexApi for FakeClient {
    async fn get_instance(
      &self,
      _: &str,
      _: &str,
      instance_id: &str,
    ) -> Result<InstanceResponse, ApiError> {
      self.instance_calls.set(self.instance_calls.get() + 1);
      Ok(InstanceResponse {
        item: Some(Instance {
          id: Some(instance_id.to_string()),
          name: Some(String::from("example-name")),
          status: Some(self.instance_status.to_string()),
          flavor: Some(Flavor {
            id: Some(String::from("example-flavor")),
            ..Default::default()
          }),
          storage: Some(Storage {
            class: Some(String::from("premium-perf2")),
            size: Some(100),
          }),
          ..Default::default()
        }),
      })
    }

    async fn list_storages(
      &self,
      _: &str,
      _: &str,
      flavor_id: &str,
    ) -> Result<ListStoragesResponse, ApiError> {
      self.storage_calls.set(self.storage_calls.get() + 1);
      assert_eq!(flavor_id, "example-flavor");
      Ok(ListStoragesResponse {
        storage_classes: vec![
          String::from("premium-perf2"),
          String::from("premium-perf6"),
        ],
        storage_range: Some(StorageRange { min: 5, max: 100 }),
      })
    }

    async fn clone_instance(
      &self,
      request: &CloneInstance,
    ) -> Result<CloneInstanceResponse, ApiError> {
      self.clones.borrow_mut().push(request.clone());
      Ok(CloneInstanceResponse {
        instance_id: Some(NEW_INSTANCE_ID.to_string()),
      })
    }
  }

  fn ctx(async_mode: bool) -> CliContext {
    CliContext::new(
      CliConfig {
        async_mode,
        ..Default::default()
      },
      true,
    )
  }

  #[tokio::test]
  async fn no_storage_flags_skip_validation() {
    let client = FakeClient::default();
    let model = fixture_model(|m| {
      m.storage_class = Field::Unset;
      m.storage_size = Field::Unset;
    });
    let request = build_request(model, &client).await.unwrap();
    assert_eq!(
      request.payload,
      CloneInstancePayload {
        class: None,
        size: None,
        timestamp: Some(RECOVERY_TIMESTAMP.to_string()),
      }
    );
    assert_eq!(client.instance_calls.get(), 0);
    assert_eq!(client.storage_calls.get(), 0);
  }

  #[tokio::test]
  async fn single_flag_is_validated_with_current_value() {
    let client = FakeClient::default();
    // class only, the current size 100 is in range
    let model = fixture_model(|m| m.storage_size = Field::Unset);
    let request = build_request(model, &client).await.unwrap();
    assert_eq!(request.payload.class.as_deref(), Some("premium-perf6"));
    assert_eq!(request.payload.size, None);
    assert_eq!(client.instance_calls.get(), 1);
    assert_eq!(client.storage_calls.get(), 1);
  }

  #[tokio::test]
  async fn invalid_combination() {
    let client = FakeClient::default();
    let model = fixture_model(|m| {
      m.storage_class = Field::Unset;
      m.storage_size = Field::Set(200);
    });
    let err = build_request(model, &client).await.unwrap_err();
    assert_eq!(
      err.to_string(),
      "Invalid combination (storage class: premium-perf2, storage size: 200) for flavor 'example-flavor' (storage classes: premium-perf2, premium-perf6, storage size range: 5 - 100)"
    );
    assert!(matches!(
      err,
      PipelineError::Validation(ValidationError::InvalidCombination { .. })
    ));
  }

  #[tokio::test]
  async fn waits_on_new_instance() {
    let client = FakeClient {
      instance_status: Instance::READY,
      ..Default::default()
    };
    run(&ctx(false), &client, fixture_model(|_| {}))
      .await
      .unwrap();
    assert_eq!(client.clones.borrow().len(), 1);
    // validation, label lookup, then one wait poll
    assert_eq!(client.instance_calls.get(), 3);
  }

  #[tokio::test]
  async fn clone_failure_while_waiting() {
    let client = FakeClient {
      instance_status: Instance::FAILURE,
      ..Default::default()
    };
    let err = run(&ctx(false), &client, fixture_model(|_| {}))
      .await
      .unwrap_err();
    assert!(matches!(
      err.downcast_ref::<ExecutionError>(),
      Some(ExecutionError::Wait { .. })
    ));
    assert_eq!(
      format!("{err:#}"),
      format!(
        "Failed to wait for PostgreSQL Flex instance cloning: create failed for instance with id {NEW_INSTANCE_ID}"
      )
    );
    assert_eq!(client.clones.borrow().len(), 1);
  }

  #[test]
  fn output_message() {
    assert_eq!(
      message("example-name", NEW_INSTANCE_ID, false),
      format!(
        "Cloned instance from instance \"example-name\". New Instance ID: {NEW_INSTANCE_ID}"
      )
    );
    assert_eq!(
      message("example-name", NEW_INSTANCE_ID, true),
      format!(
        "Triggered cloning of instance from instance \"example-name\". New Instance ID: {NEW_INSTANCE_ID}"
      )
    );
  }
}
