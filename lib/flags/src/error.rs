#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
  #[error("Argument {arg} must be provided")]
  MissingArgument { arg: &'static str },

  #[error("Argument {arg} with value '{value}' is invalid | {details}")]
  InvalidArgument {
    arg: &'static str,
    value: String,
    details: String,
  },

  #[error(
    "Project ID is not set. Pass '--project-id' or set 'project_id' in the CLI config"
  )]
  ProjectIdNotSet,

  #[error("Required flag '--{flag}' is not set")]
  MissingFlag { flag: &'static str },

  #[error("Flag '--{flag}' has invalid value '{value}' | {details}")]
  InvalidFlag {
    flag: &'static str,
    value: String,
    details: String,
  },

  #[error("Flags '--{first}' and '--{second}' must be provided together")]
  RequiredTogether {
    first: &'static str,
    second: &'static str,
  },
}
