use std::io::Write;

use anyhow::Context;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Table};
use mutation::Prompt;
use serde::Serialize;
use stackit_client::entities::config::cli::{
  CliTableBorders, args::CliFormat,
};

/// Renders command results in the configured output format,
/// and asks for confirmation on stdin.
pub struct Printer {
  format: CliFormat,
  table_borders: Option<CliTableBorders>,
}

impl Printer {
  pub fn new(
    format: CliFormat,
    table_borders: Option<CliTableBorders>,
  ) -> Printer {
    Printer {
      format,
      table_borders,
    }
  }

  pub fn format(&self) -> CliFormat {
    self.format
  }

  /// Human readable status, to stderr.
  pub fn info(&self, message: &str) {
    eprintln!("{message}");
  }

  /// `json` / `yaml` output of `value` to stdout.
  /// Returns `false` for the table format, leaving it to the caller.
  pub fn structured<T: Serialize>(
    &self,
    value: &T,
    what: &str,
  ) -> anyhow::Result<bool> {
    let output = match self.format {
      CliFormat::Table => return Ok(false),
      CliFormat::Json => serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to marshal {what}"))?,
      CliFormat::Yaml => serde_yaml_ng::to_string(value)
        .with_context(|| format!("Failed to marshal {what}"))?,
    };
    println!("{output}");
    Ok(true)
  }

  /// Prints two column `KEY | value` rows.
  pub fn details(&self, rows: Vec<(&str, String)>) {
    let mut table = self.table();
    for (key, value) in rows {
      table.add_row(vec![
        Cell::new(key).add_attribute(Attribute::Bold),
        Cell::new(value),
      ]);
    }
    println!("{table}");
  }

  fn table(&self) -> Table {
    let preset = {
      use comfy_table::presets::*;
      match self.table_borders {
        None | Some(CliTableBorders::Horizontal) => UTF8_HORIZONTAL_ONLY,
        Some(CliTableBorders::Vertical) => UTF8_FULL_CONDENSED,
        Some(CliTableBorders::Inside) => UTF8_NO_BORDERS,
        Some(CliTableBorders::Outside) => UTF8_BORDERS_ONLY,
        Some(CliTableBorders::All) => UTF8_FULL,
      }
    };
    let mut table = Table::new();
    table.load_preset(preset);
    table
  }
}

impl Prompt for Printer {
  fn confirm(&self, prompt: &str) -> anyhow::Result<bool> {
    eprint!("{prompt} {} ", "[y/N]".dimmed());
    std::io::stderr().flush().context("Failed to flush stderr")?;
    let mut answer = String::new();
    std::io::stdin()
      .read_line(&mut answer)
      .context("Failed to read answer from stdin")?;
    Ok(is_confirmed(&answer))
  }
}

fn is_confirmed(answer: &str) -> bool {
  matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_yes_confirms() {
    assert!(is_confirmed("y\n"));
    assert!(is_confirmed(" YES \n"));
    assert!(!is_confirmed("\n"));
    assert!(!is_confirmed("n\n"));
    assert!(!is_confirmed("yep\n"));
  }

  #[test]
  fn table_format_is_left_to_caller() {
    let printer = Printer::new(CliFormat::Table, None);
    assert!(!printer.structured(&"value", "value").unwrap());
    let printer = Printer::new(CliFormat::Json, None);
    assert!(printer.structured(&"value", "value").unwrap());
  }
}
