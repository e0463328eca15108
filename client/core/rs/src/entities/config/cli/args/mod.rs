//! Module for parsing the STACKIT CLI arguments.
//!
//! Command flags are kept as the raw strings the user typed.
//! Turning them into typed input models is up to the command,
//! so decode errors can name the offending flag.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::entities::logger::LogLevel;

pub mod opensearch;
pub mod postgresflex;
pub mod project;
pub mod secrets_manager;

#[derive(Debug, clap::Parser)]
#[command(
  name = "stackit",
  version,
  about = "Manage STACKIT resources using the command line.",
  author
)]
pub struct CliArgs {
  /// The command to run
  #[command(subcommand)]
  pub command: Command,

  /// Project ID
  #[arg(long, global = true)]
  pub project_id: Option<String>,

  /// Target region for region-specific requests
  #[arg(long, global = true)]
  pub region: Option<String>,

  /// Output format. Default: table
  #[arg(long, short = 'o', global = true)]
  pub output_format: Option<CliFormat>,

  /// If set, skips all confirmation prompts
  #[arg(long, short = 'y', global = true, default_value_t = false)]
  pub assume_yes: bool,

  /// If set, runs the command asynchronously
  #[arg(long = "async", global = true, default_value_t = false)]
  pub async_mode: bool,

  /// Verbosity of the CLI. Overrides the configured log level.
  #[arg(long, global = true)]
  pub verbosity: Option<LogLevel>,

  /// Choose a custom [[profile]] name / alias set in a `stackit.cli.toml` file.
  #[arg(long, short = 'p', global = true)]
  pub profile: Option<String>,

  /// Sets the path of a config file or directory to use.
  /// Can use multiple times
  #[arg(long, short = 'c', global = true)]
  pub config_path: Option<Vec<PathBuf>>,

  /// Sets the keywords to match directory cli config file names on.
  /// Supports wildcard syntax.
  /// Can use multiple times to match multiple patterns independently.
  #[arg(long, short = 'm', global = true)]
  pub config_keyword: Option<Vec<String>>,

  /// Whether to debug print on configuration load (on startup)
  #[arg(alias = "debug", long, short = 'd', global = true)]
  pub debug_startup: Option<bool>,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
  /// Print the CLI config being used. (aliases: `cfg`, `cf`)
  #[clap(alias = "cfg", alias = "cf")]
  Config {
    /// Whether to print the additional profiles picked up
    #[arg(long, short = 'a', default_value_t = false)]
    all_profiles: bool,

    /// Whether to print unsanitized config,
    /// including sensitive credentials.
    #[arg(long, action)]
    unsanitized: bool,
  },

  /// Provides functionality for OpenSearch.
  #[clap(name = "opensearch")]
  OpenSearch {
    #[command(subcommand)]
    command: opensearch::OpenSearchCommand,
  },

  /// Provides functionality for PostgreSQL Flex.
  #[clap(name = "postgresflex")]
  PostgresFlex {
    #[command(subcommand)]
    command: postgresflex::PostgresFlexCommand,
  },

  /// Manages projects.
  Project {
    #[command(subcommand)]
    command: project::ProjectCommand,
  },

  /// Provides functionality for Secrets Manager.
  SecretsManager {
    #[command(subcommand)]
    command: secrets_manager::SecretsManagerCommand,
  },
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CliFormat {
  /// Table output format. Default. (alias: `t`)
  #[default]
  #[clap(alias = "t")]
  Table,
  /// Json output format. (alias: `j`)
  #[clap(alias = "j")]
  Json,
  /// Yaml output format. (alias: `y`)
  #[clap(alias = "y")]
  Yaml,
}
