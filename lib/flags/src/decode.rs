use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::{Error, Field, Result};

/// The only accepted layout for date-time flags,
/// eg. `2023-04-17T09:28:00+00:00`.
pub const DATE_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%:z";
/// [DATE_TIME_LAYOUT] as shown to users.
pub const DATE_TIME_LAYOUT_HINT: &str = "YYYY-MM-DDTHH:mm:ss±HH:mm";

pub fn validate_uuid(value: &str) -> ::core::result::Result<(), String> {
  Uuid::try_parse(value)
    .map(|_| ())
    .map_err(|e| format!("parse \"{value}\" as UUID: {e}"))
}

/// Positional argument which must be a UUID.
/// Checked before any flag of the command is looked at.
pub fn uuid_arg(arg: &'static str, raw: &str) -> Result<String> {
  if raw.is_empty() {
    return Err(Error::MissingArgument { arg });
  }
  validate_uuid(raw).map_err(|details| Error::InvalidArgument {
    arg,
    value: raw.to_string(),
    details,
  })?;
  Ok(raw.to_string())
}

/// Positional argument taken as free text, only rejected when empty.
pub fn text_arg(arg: &'static str, raw: &str) -> Result<String> {
  if raw.trim().is_empty() {
    return Err(Error::MissingArgument { arg });
  }
  Ok(raw.to_string())
}

/// The project id may come from `--project-id` or the CLI config,
/// it gets its own error so the user knows about both.
pub fn project_id(flag: &'static str, raw: Option<&str>) -> Result<String> {
  match raw {
    None | Some("") => Err(Error::ProjectIdNotSet),
    Some(raw) => required_uuid(flag, Some(raw)),
  }
}

pub fn required_uuid(flag: &'static str, raw: Option<&str>) -> Result<String> {
  match uuid(flag, raw)? {
    Field::Set(value) => Ok(value),
    Field::Unset => Err(Error::MissingFlag { flag }),
  }
}

pub fn required_string(
  flag: &'static str,
  raw: Option<&str>,
) -> Result<String> {
  match raw {
    Some(raw) if !raw.is_empty() => Ok(raw.to_string()),
    _ => Err(Error::MissingFlag { flag }),
  }
}

pub fn string(raw: Option<&str>) -> Field<String> {
  raw.map(str::to_string).into()
}

pub fn uuid(flag: &'static str, raw: Option<&str>) -> Result<Field<String>> {
  let Some(raw) = raw else {
    return Ok(Field::Unset);
  };
  validate_uuid(raw).map_err(|details| Error::InvalidFlag {
    flag,
    value: raw.to_string(),
    details,
  })?;
  Ok(Field::Set(raw.to_string()))
}

pub fn int64(flag: &'static str, raw: Option<&str>) -> Result<Field<i64>> {
  let Some(raw) = raw else {
    return Ok(Field::Unset);
  };
  raw
    .trim()
    .parse::<i64>()
    .map(Field::Set)
    .map_err(|e| Error::InvalidFlag {
      flag,
      value: raw.to_string(),
      details: format!("parse as integer: {e}"),
    })
}

pub fn boolean(flag: &'static str, raw: Option<&str>) -> Result<Field<bool>> {
  let Some(raw) = raw else {
    return Ok(Field::Unset);
  };
  match raw {
    "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(Field::Set(true)),
    "0" | "f" | "F" | "false" | "FALSE" | "False" => {
      Ok(Field::Set(false))
    }
    _ => Err(Error::InvalidFlag {
      flag,
      value: raw.to_string(),
      details: String::from("expected true or false"),
    }),
  }
}

pub fn date_time(
  flag: &'static str,
  raw: Option<&str>,
) -> Result<Field<DateTime<FixedOffset>>> {
  let Some(raw) = raw else {
    return Ok(Field::Unset);
  };
  DateTime::parse_from_str(raw, DATE_TIME_LAYOUT)
    .map(Field::Set)
    .map_err(|e| Error::InvalidFlag {
      flag,
      value: raw.to_string(),
      details: format!(
        "expected date-time with layout {DATE_TIME_LAYOUT_HINT}, eg. 2006-01-02T15:04:05-07:00: {e}"
      ),
    })
}

pub fn format_date_time(value: &DateTime<FixedOffset>) -> String {
  value.format(DATE_TIME_LAYOUT).to_string()
}

/// Accumulates every occurrence of a repeatable flag.
///
/// Each occurrence is split on commas and appended in order,
/// so `--x a,b --x c` equals `--x a --x b --x c`.
/// Duplicates are kept. An empty occurrence adds nothing, which makes
/// `--x ""` an explicit request for an empty list.
pub fn string_list(raw: Option<&[String]>) -> Field<Vec<String>> {
  let Some(occurrences) = raw else {
    return Field::Unset;
  };
  let values = occurrences
    .iter()
    .filter(|occurrence| !occurrence.is_empty())
    .flat_map(|occurrence| occurrence.split(','))
    .map(str::to_string)
    .collect();
  Field::Set(values)
}

/// Both flags of a pair must be given, or neither.
pub fn pair(
  (first, first_raw): (&'static str, Option<&str>),
  (second, second_raw): (&'static str, Option<&str>),
) -> Result<Option<(String, String)>> {
  match (first_raw, second_raw) {
    (None, None) => Ok(None),
    (Some(first_value), Some(second_value)) => {
      Ok(Some((first_value.to_string(), second_value.to_string())))
    }
    _ => Err(Error::RequiredTogether { first, second }),
  }
}
