#[derive(Debug, Clone, clap::Subcommand)]
pub enum SecretsManagerCommand {
  /// Provides functionality for Secrets Manager users.
  User {
    #[command(subcommand)]
    command: SecretsManagerUserCommand,
  },
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum SecretsManagerUserCommand {
  /// Shows details of a Secrets Manager user.
  Describe(DescribeUser),
}

#[derive(Debug, Clone, clap::Parser)]
pub struct DescribeUser {
  /// The user ID.
  #[arg(value_name = "USER_ID")]
  pub user_id: String,
  /// ID of the instance
  #[arg(long)]
  pub instance_id: Option<String>,
}
