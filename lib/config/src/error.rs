use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Config keyword '{keyword}' is not a valid wildcard")]
  InvalidWildcard { keyword: String },

  #[error("Failed to read config directory {path:?}")]
  ReadDir {
    path: PathBuf,
    #[source]
    e: std::io::Error,
  },

  #[error("Failed to read config file {path:?}")]
  ReadFile {
    path: PathBuf,
    #[source]
    e: std::io::Error,
  },

  #[error("Invalid environment variable pattern")]
  EnvPattern(#[source] regex::Error),

  #[error("Config file {path:?} references unset environment variable '{var}'")]
  MissingEnvVar { path: PathBuf, var: String },

  #[error("Failed to parse toml config file {path:?}")]
  ParseToml {
    path: PathBuf,
    #[source]
    e: toml::de::Error,
  },

  #[error("Failed to parse yaml config file {path:?}")]
  ParseYaml {
    path: PathBuf,
    #[source]
    e: serde_yaml_ng::Error,
  },

  #[error("Failed to parse json config file {path:?}")]
  ParseJson {
    path: PathBuf,
    #[source]
    e: serde_json::Error,
  },

  #[error("Unsupported config file type {path:?}, use toml, yaml or json")]
  UnsupportedFileType { path: PathBuf },

  #[error("Config field '{key}' is an object in one file but not in another")]
  ObjectFieldTypeMismatch { key: String },

  #[error("Config field '{key}' is an array in one file but not in another")]
  ArrayFieldTypeMismatch { key: String },

  #[error("Config is not an object")]
  ValueIsNotObject,

  #[error("Failed to parse merged config")]
  ParseFinal(#[source] serde_json::Error),
}
