use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
  Service,
  deserializers::string_list_deserializer,
  entities::{
    config::empty_or_redacted,
    logger::{LogConfig, LogLevel, StdioLogMode},
  },
};

use self::args::CliFormat;

pub mod args;

/// # STACKIT CLI Environment Variables
///
/// Every variable overrides the matching [CliConfig] field,
/// and is itself overridden by the matching command line flag.
/// Also read from a `.env` file in the working directory.
#[derive(Debug, Clone, Deserialize)]
pub struct Env {
  // ============
  // Config files
  // ============
  /// Specify the config paths (files or folders) used to build up the
  /// final [CliConfig].
  /// If not provided, will use "$HOME/.config/stackit" and ".".
  ///
  /// Note. This is overridden if the equivalent arg is passed in [CliArgs](args::CliArgs).
  #[serde(
    default = "default_config_paths",
    alias = "stackit_cli_config_path"
  )]
  pub stackit_cli_config_paths: Vec<PathBuf>,
  /// If specifying folders, use this to narrow down which
  /// files will be matched to parse into the final [CliConfig].
  ///
  /// Note. This is overridden if the equivalent arg is passed in [CliArgs](args::CliArgs).
  #[serde(
    default = "default_config_keywords",
    alias = "stackit_cli_config_keyword"
  )]
  pub stackit_cli_config_keywords: Vec<String>,
  /// Will merge nested config objects (eg. endpoints) across multiple
  /// config files. Default: `true`
  #[serde(default = "super::default_merge_nested_config")]
  pub stackit_cli_merge_nested_config: bool,
  /// Will extend config arrays (eg profiles) across multiple config files.
  /// Default: `true`
  #[serde(default = "super::default_extend_config_arrays")]
  pub stackit_cli_extend_config_arrays: bool,
  /// Extra logs during cli config load.
  #[serde(default)]
  pub stackit_cli_debug_startup: bool,
  /// Override `default_profile`.
  pub stackit_cli_default_profile: Option<String>,

  // ========
  // Settings
  // ========
  /// Override `project_id`
  pub stackit_cli_project_id: Option<String>,
  /// Override `region`
  pub stackit_cli_region: Option<String>,
  /// Override `access_token`
  #[serde(alias = "stackit_cli_token")]
  pub stackit_cli_access_token: Option<String>,
  /// Override `async`
  pub stackit_cli_async: Option<bool>,
  /// Override `output_format`
  pub stackit_cli_output_format: Option<CliFormat>,
  /// Override `table_borders`
  pub stackit_cli_table_borders: Option<CliTableBorders>,
  /// Override `wait_timeout_secs`
  pub stackit_cli_wait_timeout_secs: Option<u64>,
  /// Override `wait_interval_secs`
  pub stackit_cli_wait_interval_secs: Option<u64>,

  // ENDPOINTS
  /// Override `endpoints.opensearch`
  pub stackit_cli_opensearch_endpoint: Option<String>,
  /// Override `endpoints.postgresflex`
  pub stackit_cli_postgresflex_endpoint: Option<String>,
  /// Override `endpoints.secrets_manager`
  pub stackit_cli_secrets_manager_endpoint: Option<String>,
  /// Override `endpoints.authorization`
  pub stackit_cli_authorization_endpoint: Option<String>,
  /// Override `endpoints.resource_manager`
  pub stackit_cli_resource_manager_endpoint: Option<String>,

  // LOGGING
  /// Override `cli_logging.level`
  pub stackit_cli_logging_level: Option<LogLevel>,
  /// Override `cli_logging.stdio`
  pub stackit_cli_logging_stdio: Option<StdioLogMode>,
  /// Override `cli_logging.pretty`
  pub stackit_cli_logging_pretty: Option<bool>,
}

fn default_config_paths() -> Vec<PathBuf> {
  match std::env::var_os("HOME") {
    Some(home) => vec![
      PathBuf::from(home).join(".config/stackit"),
      PathBuf::from("."),
    ],
    None => vec![PathBuf::from(".")],
  }
}

fn default_config_keywords() -> Vec<String> {
  vec![String::from("*stackit.cli*.*")]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
  /// Optional. Only relevant for top level CLI config.
  /// Set a default profile to be used when none is provided.
  #[serde(
    default,
    alias = "default",
    skip_serializing_if = "Option::is_none"
  )]
  pub default_profile: Option<String>,
  /// Optional. The profile name. (alias: `name`)
  /// Configure profiles with name in the stackit.cli.toml,
  /// and select them using `stackit -p profile-name ...`.
  #[serde(
    default,
    alias = "name",
    skip_serializing_if = "String::is_empty"
  )]
  pub config_profile: String,
  /// Optional. The profile aliases. (aliases: `aliases`, `alias`)
  #[serde(
    default,
    alias = "aliases",
    alias = "alias",
    deserialize_with = "string_list_deserializer",
    skip_serializing_if = "Vec::is_empty"
  )]
  pub config_aliases: Vec<String>,
  /// The project commands operate on when `--project-id` is not passed.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub project_id: Option<String>,
  /// The region for regional services. Default: `eu01`
  #[serde(default = "default_region")]
  pub region: String,
  /// Bearer token sent with every request. (alias: `token`)
  #[serde(
    default,
    alias = "token",
    skip_serializing_if = "Option::is_none"
  )]
  pub access_token: Option<String>,
  /// Custom service base urls.
  #[serde(default, skip_serializing_if = "ServiceEndpoints::is_empty")]
  pub endpoints: ServiceEndpoints,
  /// Don't wait for long running operations by default.
  #[serde(default, rename = "async")]
  pub async_mode: bool,
  /// The default output format.
  #[serde(default)]
  pub output_format: CliFormat,
  /// The format for the tables.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub table_borders: Option<CliTableBorders>,
  /// Give up waiting on an operation after this long.
  /// Default: `2700` (45 minutes)
  #[serde(default = "default_wait_timeout_secs")]
  pub wait_timeout_secs: u64,
  /// Poll the operation state this often. Default: `5`
  #[serde(default = "default_wait_interval_secs")]
  pub wait_interval_secs: u64,
  /// Logging configuration
  #[serde(default, skip_serializing_if = "LogConfig::is_default")]
  pub cli_logging: LogConfig,
  /// Configure additional profiles.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub profile: Vec<CliConfig>,
}

fn default_region() -> String {
  String::from("eu01")
}

fn default_wait_timeout_secs() -> u64 {
  45 * 60
}

fn default_wait_interval_secs() -> u64 {
  5
}

impl Default for CliConfig {
  fn default() -> Self {
    Self {
      default_profile: Default::default(),
      config_profile: Default::default(),
      config_aliases: Default::default(),
      project_id: Default::default(),
      region: default_region(),
      access_token: Default::default(),
      endpoints: Default::default(),
      async_mode: Default::default(),
      output_format: Default::default(),
      table_borders: Default::default(),
      wait_timeout_secs: default_wait_timeout_secs(),
      wait_interval_secs: default_wait_interval_secs(),
      cli_logging: Default::default(),
      profile: Default::default(),
    }
  }
}

impl CliConfig {
  /// Whether `-p <profile>` selects this profile.
  pub fn matches_profile(&self, profile: &str) -> bool {
    self.config_profile == profile
      || self.config_aliases.iter().any(|alias| alias == profile)
  }

  pub fn sanitized(&self) -> CliConfig {
    CliConfig {
      access_token: self
        .access_token
        .as_deref()
        .map(empty_or_redacted),
      profile: self
        .profile
        .iter()
        .map(CliConfig::sanitized)
        .collect(),
      ..self.clone()
    }
  }
}

/// Base url overrides, eg. for a staging environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub opensearch: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub postgresflex: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub secrets_manager: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub authorization: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resource_manager: Option<String>,
}

impl ServiceEndpoints {
  pub fn is_empty(&self) -> bool {
    self == &ServiceEndpoints::default()
  }

  /// The custom url for `service` if set, otherwise the public one.
  pub fn base_url(&self, service: Service) -> &str {
    let custom = match service {
      Service::OpenSearch => &self.opensearch,
      Service::PostgresFlex => &self.postgresflex,
      Service::SecretsManager => &self.secrets_manager,
      Service::Authorization => &self.authorization,
      Service::ResourceManager => &self.resource_manager,
    };
    custom
      .as_deref()
      .map(|url| url.trim_end_matches('/'))
      .unwrap_or(service.default_base_url())
  }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum CliTableBorders {
  /// Only horizontal borders. Default.
  #[default]
  Horizontal,
  /// Only vertical borders.
  Vertical,
  /// Only borders around the outside of the table.
  Outside,
  /// Only borders horizontally / vertically between the rows / columns.
  Inside,
  /// All borders
  All,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_from_empty_file() {
    let config: CliConfig = toml::from_str("").unwrap();
    assert_eq!(config.region, "eu01");
    assert_eq!(config.wait_interval_secs, 5);
    assert!(!config.async_mode);
    assert!(config.project_id.is_none());
  }

  #[test]
  fn profile_matches_name_or_alias() {
    let config: CliConfig = toml::from_str(
      r#"
        name = "staging"
        aliases = "stg, s"
        async = true
      "#,
    )
    .unwrap();
    assert!(config.async_mode);
    assert!(config.matches_profile("staging"));
    assert!(config.matches_profile("s"));
    assert!(!config.matches_profile("prod"));
  }

  #[test]
  fn endpoint_override_wins() {
    let endpoints = ServiceEndpoints {
      opensearch: Some(String::from("http://localhost:8080/")),
      ..Default::default()
    };
    assert_eq!(
      endpoints.base_url(Service::OpenSearch),
      "http://localhost:8080"
    );
    assert_eq!(
      endpoints.base_url(Service::PostgresFlex),
      "https://postgres-flex-service.api.stackit.cloud"
    );
  }

  #[test]
  fn sanitized_hides_tokens_in_profiles() {
    let config = CliConfig {
      access_token: Some(String::from("secret")),
      profile: vec![CliConfig {
        access_token: Some(String::from("other-secret")),
        ..Default::default()
      }],
      ..Default::default()
    };
    let sanitized = config.sanitized();
    assert_eq!(
      sanitized.access_token.as_deref(),
      Some("##############")
    );
    assert_eq!(
      sanitized.profile[0].access_token.as_deref(),
      Some("##############")
    );
  }
}
