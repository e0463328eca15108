//! # STACKIT CLI Config
//!
//! Finds and parses the CLI config files (toml, yaml or json),
//! interpolating environment variables (only `${VAR}` syntax),
//! and merges them together into a final configuration object.

use std::path::PathBuf;

use colored::Colorize;
use indexmap::IndexSet;
use serde::de::DeserializeOwned;

mod error;
mod load;
mod merge;

pub use error::Error;
pub use merge::merge_objects;

pub type Result<T> = ::core::result::Result<T, Error>;

/// Set the configuration for loading config files.
pub struct ConfigLoader<'a> {
  /// Paths to either files or directories
  /// to include in the final configuration.
  ///
  /// Paths coming later (higher index) override
  /// configuration in earlier paths. Missing paths are skipped.
  pub paths: &'a [PathBuf],
  /// Wildcard patterns to match file names in given directories.
  /// Explicit file paths are always included.
  pub match_wildcards: &'a [String],
  /// Whether to merge nested config objects.
  /// Otherwise, the object is replaced at the top-level key
  /// by the highest priority config file in which it is specified.
  pub merge_nested: bool,
  /// Whether to extend arrays across configuration files.
  /// Otherwise, the array is replaced at the top-level key
  /// by the highest priority config file in which it is specified.
  pub extend_array: bool,
  /// Print the files found to stderr.
  ///
  /// Note. This is different than the application log level,
  /// logging is not set up yet while the config loads.
  pub debug_print: bool,
}

impl ConfigLoader<'_> {
  pub fn load<T: DeserializeOwned>(self) -> Result<T> {
    let files = self.find_files()?;
    if self.debug_print {
      eprintln!(
        "{}: {}: {files:?}",
        "DEBUG".cyan(),
        "Found Files".dimmed()
      );
    }
    let mut target = serde_json::Map::new();
    for file in &files {
      target = merge_objects(
        target,
        load::parse_file(file)?,
        self.merge_nested,
        self.extend_array,
      )?;
    }
    serde_json::from_value(serde_json::Value::Object(target))
      .map_err(Error::ParseFinal)
  }

  /// All files to load, lowest priority first.
  fn find_files(&self) -> Result<Vec<PathBuf>> {
    let wildcards = self
      .match_wildcards
      .iter()
      .map(|keyword| {
        wildcard::Wildcard::new(keyword.as_bytes()).map_err(|_| {
          Error::InvalidWildcard {
            keyword: keyword.clone(),
          }
        })
      })
      .collect::<Result<Vec<_>>>()?;
    let mut files = IndexSet::new();
    for path in self.paths {
      let Ok(metadata) = std::fs::metadata(path) else {
        continue;
      };
      let found = if metadata.is_dir() {
        load::matching_files(path, &wildcards)?
          .into_iter()
          .map(|(_, path)| path)
          .collect()
      } else {
        vec![path.clone()]
      };
      for path in found {
        let path = path.canonicalize().unwrap_or(path);
        // A path seen again moves to the back, taking priority.
        files.shift_remove(&path);
        files.insert(path);
      }
    }
    Ok(files.into_iter().collect())
  }
}
