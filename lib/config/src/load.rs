use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Config files directly inside `dir` whose name matches one of
/// `wildcards`, with the index of the first matching wildcard.
/// With no wildcards every file matches.
pub fn matching_files(
  dir: &Path,
  wildcards: &[wildcard::Wildcard],
) -> Result<Vec<(usize, PathBuf)>> {
  let read_dir = std::fs::read_dir(dir).map_err(|e| Error::ReadDir {
    path: dir.to_path_buf(),
    e,
  })?;
  let mut files = Vec::new();
  for entry in read_dir.flatten() {
    if !entry.file_type().is_ok_and(|t| t.is_file()) {
      continue;
    }
    let file_name = entry.file_name();
    let Some(file_name) = file_name.to_str() else {
      continue;
    };
    let index = if wildcards.is_empty() {
      0
    } else {
      match wildcards
        .iter()
        .position(|wc| wc.is_match(file_name.as_bytes()))
      {
        Some(index) => index,
        None => continue,
      }
    };
    files.push((index, entry.path()));
  }
  // Lower wildcard index first, then by name,
  // so later entries take priority when merged.
  files.sort();
  Ok(files)
}

/// Reads, interpolates and parses one config file by extension.
pub fn parse_file(path: &Path) -> Result<Map<String, Value>> {
  let contents =
    std::fs::read_to_string(path).map_err(|e| Error::ReadFile {
      path: path.to_path_buf(),
      e,
    })?;
  let contents = interpolate_env(&contents, path)?;
  let value = match path.extension().and_then(|e| e.to_str()) {
    Some("toml") => {
      toml::from_str(&contents).map_err(|e| Error::ParseToml {
        path: path.to_path_buf(),
        e,
      })?
    }
    Some("yaml" | "yml") => serde_yaml_ng::from_str(&contents)
      .map_err(|e| Error::ParseYaml {
        path: path.to_path_buf(),
        e,
      })?,
    Some("json") => {
      serde_json::from_str(&contents).map_err(|e| Error::ParseJson {
        path: path.to_path_buf(),
        e,
      })?
    }
    _ => {
      return Err(Error::UnsupportedFileType {
        path: path.to_path_buf(),
      });
    }
  };
  match value {
    Value::Object(object) => Ok(object),
    // Empty yaml files parse to null.
    Value::Null => Ok(Map::new()),
    _ => Err(Error::ValueIsNotObject),
  }
}

/// Replaces `${VAR}` with the value of `VAR`.
/// Bare `$VAR` is left untouched.
fn interpolate_env(input: &str, path: &Path) -> Result<String> {
  let re = regex::Regex::new(r"\$\{([A-Za-z0-9_]+)\}")
    .map_err(Error::EnvPattern)?;
  let mut res = String::with_capacity(input.len());
  let mut last = 0;
  for caps in re.captures_iter(input) {
    let (Some(whole), Some(var)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    let value =
      std::env::var(var.as_str()).map_err(|_| Error::MissingEnvVar {
        path: path.to_path_buf(),
        var: var.as_str().to_string(),
      })?;
    res.push_str(&input[last..whole.start()]);
    res.push_str(&value);
    last = whole.end();
  }
  res.push_str(&input[last..]);
  Ok(res)
}
