use clap::ArgAction;

#[derive(Debug, Clone, clap::Subcommand)]
pub enum OpenSearchCommand {
  /// Provides functionality for OpenSearch instances.
  Instance {
    #[command(subcommand)]
    command: OpenSearchInstanceCommand,
  },
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum OpenSearchInstanceCommand {
  /// Updates an OpenSearch instance.
  ///
  /// Only the passed flags are changed, everything else keeps its current value.
  Update(UpdateInstance),
}

#[derive(Debug, Clone, clap::Parser)]
pub struct UpdateInstance {
  /// The instance ID.
  #[arg(value_name = "INSTANCE_ID")]
  pub instance_id: String,
  /// Enable monitoring. Takes an optional `=true` / `=false`.
  #[arg(
    long,
    num_args = 0..=1,
    require_equals = true,
    default_missing_value = "true"
  )]
  pub enable_monitoring: Option<String>,
  /// Graphite host
  #[arg(long)]
  pub graphite: Option<String>,
  /// Metrics frequency
  #[arg(long)]
  pub metrics_frequency: Option<String>,
  /// Metrics prefix
  #[arg(long)]
  pub metrics_prefix: Option<String>,
  /// Monitoring instance ID
  #[arg(long)]
  pub monitoring_instance_id: Option<String>,
  /// Plugin. Can use multiple times and / or pass a comma separated list.
  #[arg(long, action = ArgAction::Append)]
  pub plugin: Option<Vec<String>>,
  /// List of IP networks in CIDR notation which are allowed to access this instance.
  /// Can use multiple times and / or pass a comma separated list.
  #[arg(long, action = ArgAction::Append)]
  pub acl: Option<Vec<String>>,
  /// Syslog. Can use multiple times and / or pass a comma separated list.
  #[arg(long, action = ArgAction::Append)]
  pub syslog: Option<Vec<String>>,
  /// Plan ID
  #[arg(long)]
  pub plan_id: Option<String>,
  /// Plan name. Used with `--version` instead of `--plan-id`.
  #[arg(long)]
  pub plan_name: Option<String>,
  /// Instance OpenSearch version. Used with `--plan-name`.
  #[arg(long = "version")]
  pub plan_version: Option<String>,
}
