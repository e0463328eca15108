//! Request assembly rules shared by all partial update commands.
//!
//! Assembling itself is per command (the payload shapes differ), but
//! every payload maps unset fields to omitted keys and set fields,
//! zero values included, to explicit ones. What differs is whether an
//! update which changes nothing may be sent at all.

use crate::PipelineError;

/// What to do when the user passed none of the optional flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum EmptyUpdatePolicy {
  /// Send the structurally valid, empty bodied request.
  Allow,
  /// Fail before any network call is made.
  Reject,
}

impl EmptyUpdatePolicy {
  pub fn check(self, has_changes: bool) -> Result<(), PipelineError> {
    match (self, has_changes) {
      (EmptyUpdatePolicy::Reject, false) => {
        Err(PipelineError::NothingToUpdate)
      }
      _ => Ok(()),
    }
  }
}

/// `true` if any of the given fields is set.
#[macro_export]
macro_rules! any_set {
  ($($field:expr),+ $(,)?) => {
    false $(|| $field.is_set())+
  };
}

#[cfg(test)]
mod tests {
  use flags::Field;

  use super::*;

  #[test]
  fn reject_fails_without_changes() {
    assert!(matches!(
      EmptyUpdatePolicy::Reject.check(false),
      Err(PipelineError::NothingToUpdate)
    ));
    assert!(EmptyUpdatePolicy::Reject.check(true).is_ok());
  }

  #[test]
  fn allow_always_passes() {
    assert!(EmptyUpdatePolicy::Allow.check(false).is_ok());
    assert!(EmptyUpdatePolicy::Allow.check(true).is_ok());
  }

  #[test]
  fn any_set_sees_zero_values() {
    let unset = Field::<String>::Unset;
    let zero = Field::Set(0i64);
    assert!(!any_set!(unset));
    assert!(any_set!(unset, zero));
  }
}
