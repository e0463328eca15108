use anyhow::{Context, anyhow};
use colored::Colorize;
use serde_json::{Map, Value};
use stackit_client::entities::{
  config::cli::{CliConfig, Env, ServiceEndpoints, args::CliArgs},
  logger::LogConfig,
};

/// Builds the final config, once at startup.
///
/// Priority, lowest first: config files, the selected profile,
/// `STACKIT_CLI_*` environment variables, command line flags.
pub fn load(args: &CliArgs, env: Env) -> anyhow::Result<CliConfig> {
  let config_paths = args
    .config_path
    .clone()
    .unwrap_or_else(|| env.stackit_cli_config_paths.clone());
  let debug_startup =
    args.debug_startup.unwrap_or(env.stackit_cli_debug_startup);

  if debug_startup {
    eprintln!(
      "{}: STACKIT CLI version: {}",
      "DEBUG".cyan(),
      env!("CARGO_PKG_VERSION").blue().bold()
    );
    eprintln!(
      "{}: {}: {config_paths:?}",
      "DEBUG".cyan(),
      "Config Paths".dimmed(),
    );
  }

  let config_keywords = args
    .config_keyword
    .clone()
    .unwrap_or_else(|| env.stackit_cli_config_keywords.clone());
  if debug_startup {
    eprintln!(
      "{}: {}: {config_keywords:?}",
      "DEBUG".cyan(),
      "Config File Keywords".dimmed(),
    );
  }

  let merge_nested = env.stackit_cli_merge_nested_config;
  let extend_array = env.stackit_cli_extend_config_arrays;

  let unparsed_config = (config::ConfigLoader {
    paths: &config_paths,
    match_wildcards: &config_keywords,
    merge_nested,
    extend_array,
    debug_print: debug_startup,
  })
  .load::<Map<String, Value>>()
  .context("Failed to load config files")?;

  let default_profile = serde_json::from_value::<CliConfig>(
    Value::Object(unparsed_config.clone()),
  )
  .context("Failed to parse config")?
  .default_profile;

  let profile = args
    .profile
    .clone()
    .or_else(|| env.stackit_cli_default_profile.clone())
    .or(default_profile)
    .filter(|profile| !profile.is_empty());

  let unparsed_config = match &profile {
    Some(profile) => apply_profile(
      unparsed_config,
      profile,
      merge_nested,
      extend_array,
    )?,
    None => unparsed_config,
  };

  let config =
    serde_json::from_value::<CliConfig>(Value::Object(unparsed_config))
      .context("Failed to parse final config")?;

  Ok(apply_overrides(config, env, args))
}

/// Layers the `[[profile]]` matching `profile` (by name or alias)
/// over the top level config.
fn apply_profile(
  mut unparsed_config: Map<String, Value>,
  profile: &str,
  merge_nested: bool,
  extend_array: bool,
) -> anyhow::Result<Map<String, Value>> {
  let profiles = match unparsed_config.remove("profile") {
    Some(Value::Array(profiles)) => profiles,
    Some(_) => return Err(anyhow!("`profile` in config is not an array")),
    None => {
      return Err(anyhow!(
        "Profile '{profile}' was requested, but the config has no profiles"
      ));
    }
  };
  let mut available = Vec::new();
  for profile_config in profiles {
    let parsed =
      serde_json::from_value::<CliConfig>(profile_config.clone())
        .context("Failed to parse profile config")?;
    if !parsed.matches_profile(profile) {
      available.push(parsed.config_profile);
      continue;
    }
    let Value::Object(profile_config) = profile_config else {
      return Err(anyhow!("Profile '{profile}' is not an object"));
    };
    return config::merge_objects(
      unparsed_config,
      profile_config,
      merge_nested,
      extend_array,
    )
    .with_context(|| format!("Failed to apply profile '{profile}'"));
  }
  Err(anyhow!(
    "No profile matching '{profile}' was found. Available: {}",
    available.join(", ")
  ))
}

fn apply_overrides(
  config: CliConfig,
  env: Env,
  args: &CliArgs,
) -> CliConfig {
  let config_profile = if config.config_profile.is_empty() {
    String::from("None")
  } else {
    config.config_profile
  };
  CliConfig {
    config_profile,
    config_aliases: config.config_aliases,
    default_profile: config.default_profile,
    project_id: args
      .project_id
      .clone()
      .or(env.stackit_cli_project_id)
      .or(config.project_id),
    region: args
      .region
      .clone()
      .or(env.stackit_cli_region)
      .unwrap_or(config.region),
    access_token: env.stackit_cli_access_token.or(config.access_token),
    endpoints: ServiceEndpoints {
      opensearch: env
        .stackit_cli_opensearch_endpoint
        .or(config.endpoints.opensearch),
      postgresflex: env
        .stackit_cli_postgresflex_endpoint
        .or(config.endpoints.postgresflex),
      secrets_manager: env
        .stackit_cli_secrets_manager_endpoint
        .or(config.endpoints.secrets_manager),
      authorization: env
        .stackit_cli_authorization_endpoint
        .or(config.endpoints.authorization),
      resource_manager: env
        .stackit_cli_resource_manager_endpoint
        .or(config.endpoints.resource_manager),
    },
    async_mode: args.async_mode
      || env.stackit_cli_async.unwrap_or(config.async_mode),
    output_format: args
      .output_format
      .or(env.stackit_cli_output_format)
      .unwrap_or(config.output_format),
    table_borders: env
      .stackit_cli_table_borders
      .or(config.table_borders),
    wait_timeout_secs: env
      .stackit_cli_wait_timeout_secs
      .unwrap_or(config.wait_timeout_secs),
    wait_interval_secs: env
      .stackit_cli_wait_interval_secs
      .unwrap_or(config.wait_interval_secs),
    cli_logging: LogConfig {
      level: args
        .verbosity
        .or(env.stackit_cli_logging_level)
        .unwrap_or(config.cli_logging.level),
      stdio: env
        .stackit_cli_logging_stdio
        .unwrap_or(config.cli_logging.stdio),
      pretty: env
        .stackit_cli_logging_pretty
        .unwrap_or(config.cli_logging.pretty),
      location: config.cli_logging.location,
    },
    profile: config.profile,
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use clap::Parser;
  use stackit_client::entities::{
    config::cli::args::CliFormat, logger::LogLevel,
  };

  use super::*;

  const CONFIG: &str = r#"
    default_profile = "staging"
    region = "eu01"
    project_id = "11111111-1111-1111-1111-111111111111"

    [endpoints]
    opensearch = "https://opensearch.example.com"

    [[profile]]
    name = "staging"
    aliases = ["stg"]
    project_id = "22222222-2222-2222-2222-222222222222"

    [[profile]]
    name = "prod"
    region = "eu02"
  "#;

  /// An [Env] with every override unset and config files
  /// read from `dir`.
  fn env(dir: &std::path::Path) -> Env {
    let vars = vec![(
      String::from("STACKIT_CLI_CONFIG_PATHS"),
      dir.to_string_lossy().to_string(),
    )];
    envy::from_iter(vars).unwrap()
  }

  fn load_with(args: &[&str]) -> anyhow::Result<CliConfig> {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stackit.cli.toml"), CONFIG).unwrap();
    let args = CliArgs::try_parse_from(args).unwrap();
    load(&args, env(dir.path()))
  }

  #[test]
  fn default_profile_applies() {
    let config = load_with(&["stackit", "config"]).unwrap();
    assert_eq!(config.config_profile, "staging");
    assert_eq!(
      config.project_id.as_deref(),
      Some("22222222-2222-2222-2222-222222222222")
    );
    assert_eq!(
      config.endpoints.opensearch.as_deref(),
      Some("https://opensearch.example.com")
    );
  }

  #[test]
  fn profile_by_alias_and_flags_win() {
    let config = load_with(&[
      "stackit",
      "config",
      "-p",
      "prod",
      "--region",
      "eu03",
      "--async",
      "-o",
      "json",
      "--verbosity",
      "debug",
    ])
    .unwrap();
    assert_eq!(config.config_profile, "prod");
    assert_eq!(config.region, "eu03");
    assert!(config.async_mode);
    assert_eq!(config.output_format, CliFormat::Json);
    assert_eq!(config.cli_logging.level, LogLevel::Debug);

    let config = load_with(&["stackit", "config", "-p", "stg"]).unwrap();
    assert_eq!(config.config_profile, "staging");
  }

  #[test]
  fn unknown_profile_is_an_error() {
    let err = load_with(&["stackit", "config", "-p", "dev"]).unwrap_err();
    assert_eq!(
      err.to_string(),
      "No profile matching 'dev' was found. Available: staging, prod"
    );
  }
}
