//! Checks correlated fields against live service constraints.
//!
//! Fields left unset on the input model inherit the resource's current
//! value, so validation always runs on the effective pair.

use std::fmt::Display;

use flags::Field;

/// A service provided table of legal value pairs,
/// eg. the storage options allowed for a flavor.
pub trait PairConstraints {
  type First: Display;
  type Second: Display;
  /// eg. `storage class`
  const FIRST: &'static str;
  /// eg. `storage size`
  const SECOND: &'static str;
  fn allows(&self, first: &Self::First, second: &Self::Second) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
  #[error("Failed to {what}")]
  Snapshot {
    what: &'static str,
    #[source]
    source: anyhow::Error,
  },

  #[error("Resource has no current {field} to validate against")]
  MissingCurrent { field: &'static str },

  #[error(
    "Invalid combination ({first_label}: {first}, {second_label}: {second}) for {scope}{details}"
  )]
  InvalidCombination {
    first_label: &'static str,
    first: String,
    second_label: &'static str,
    second: String,
    scope: String,
    details: String,
  },
}

/// The requested value when set, otherwise the live one.
pub fn effective<'a, T>(
  requested: &'a Field<T>,
  current: Option<&'a T>,
) -> Option<&'a T> {
  requested.get().or(current)
}

/// Validates the effective `(first, second)` pair against `constraints`.
///
/// `scope` names what the constraints apply to (eg. `flavor 'xyz'`)
/// and `details` is appended to the error to show what is allowed.
pub fn validate_pair<C: PairConstraints>(
  requested: (&Field<C::First>, &Field<C::Second>),
  current: (Option<&C::First>, Option<&C::Second>),
  constraints: &C,
  scope: &str,
  details: &str,
) -> Result<(), ValidationError> {
  let first = effective(requested.0, current.0)
    .ok_or(ValidationError::MissingCurrent { field: C::FIRST })?;
  let second = effective(requested.1, current.1)
    .ok_or(ValidationError::MissingCurrent { field: C::SECOND })?;
  if constraints.allows(first, second) {
    return Ok(());
  }
  Err(ValidationError::InvalidCombination {
    first_label: C::FIRST,
    first: first.to_string(),
    second_label: C::SECOND,
    second: second.to_string(),
    scope: scope.to_string(),
    details: if details.is_empty() {
      String::new()
    } else {
      format!(" ({details})")
    },
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  struct StorageTable(Vec<(String, i64)>);

  impl PairConstraints for StorageTable {
    type First = String;
    type Second = i64;
    const FIRST: &'static str = "storage class";
    const SECOND: &'static str = "storage size";
    fn allows(&self, first: &String, second: &i64) -> bool {
      self.0.iter().any(|(a, b)| a == first && b == second)
    }
  }

  fn table() -> StorageTable {
    StorageTable(vec![
      (String::from("premium"), 10),
      (String::from("premium"), 20),
      (String::from("standard"), 10),
    ])
  }

  #[test]
  fn missing_field_inherits_current_value() {
    // size unset, current size is 20: effective pair (premium, 20)
    validate_pair(
      (&Field::Set(String::from("premium")), &Field::Unset),
      (Some(&String::from("standard")), Some(&20)),
      &table(),
      "flavor 'small'",
      "",
    )
    .unwrap();
  }

  #[test]
  fn combined_pair_is_checked_not_each_field() {
    // class alone and size alone are both known,
    // but (standard, 20) is not in the table.
    let err = validate_pair(
      (&Field::Set(String::from("standard")), &Field::Unset),
      (Some(&String::from("premium")), Some(&20)),
      &table(),
      "flavor 'small'",
      "",
    )
    .unwrap_err();
    let ValidationError::InvalidCombination {
      first, second, scope, ..
    } = err
    else {
      panic!("expected invalid combination, got {err:?}");
    };
    assert_eq!(first, "standard");
    assert_eq!(second, "20");
    assert_eq!(scope, "flavor 'small'");
  }

  #[test]
  fn no_current_value() {
    let err = validate_pair(
      (&Field::Set(String::from("premium")), &Field::Unset),
      (None, None),
      &table(),
      "flavor 'small'",
      "",
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::MissingCurrent { .. }));
  }

  #[test]
  fn requested_values_win() {
    validate_pair(
      (&Field::Set(String::from("standard")), &Field::Set(10)),
      (Some(&String::from("unknown")), Some(&999)),
      &table(),
      "flavor 'small'",
      "",
    )
    .unwrap();
  }
}
