#[derive(Debug, Clone, clap::Subcommand)]
pub enum PostgresFlexCommand {
  /// Provides functionality for PostgreSQL Flex instances.
  Instance {
    #[command(subcommand)]
    command: PostgresFlexInstanceCommand,
  },
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum PostgresFlexInstanceCommand {
  /// Clones a PostgreSQL Flex instance from a selected point in time.
  ///
  /// The clone keeps the settings of the source instance
  /// unless the storage flags are passed.
  Clone(CloneInstance),
}

#[derive(Debug, Clone, clap::Parser)]
pub struct CloneInstance {
  /// The instance ID.
  #[arg(value_name = "INSTANCE_ID")]
  pub instance_id: String,
  /// Recovery timestamp for the instance, in the layout
  /// YYYY-MM-DDTHH:mm:ss±HH:mm, eg. 2006-01-02T15:04:05-07:00
  #[arg(long)]
  pub recovery_timestamp: Option<String>,
  /// Storage class. Defaults to the source instance's storage class.
  #[arg(long)]
  pub storage_class: Option<String>,
  /// Storage size (in GB). Defaults to the source instance's storage size.
  #[arg(long)]
  pub storage_size: Option<String>,
}
