#[derive(Debug, Clone, clap::Subcommand)]
pub enum ProjectCommand {
  /// Manages project members.
  Member {
    #[command(subcommand)]
    command: ProjectMemberCommand,
  },
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum ProjectMemberCommand {
  /// Removes a member from a project.
  ///
  /// A member is a combination of a subject (user, service account or client) and a role.
  /// The subject is usually an email address for users, or the name for clients.
  Remove(RemoveMember),
}

#[derive(Debug, Clone, clap::Parser)]
pub struct RemoveMember {
  /// The subject to remove the role from.
  #[arg(value_name = "SUBJECT")]
  pub subject: String,
  /// The role to be removed from the subject
  #[arg(long)]
  pub role: Option<String>,
  /// Also remove the other roles of the subject
  /// which would stop the removal of the requested role.
  #[arg(long, default_value_t = false)]
  pub force: bool,
}
