use serde_json::{Map, Value};

use crate::{Error, Result};

/// Layers `source` over `target`.
///
/// - Scalars in `source` replace the ones in `target`.
/// - Objects present in both are merged recursively if `merge_nested`,
///   otherwise replaced.
/// - Arrays present in both are concatenated (target first) if
///   `extend_array`, otherwise replaced.
/// - A field which is an object / array on one side only is an error.
pub fn merge_objects(
  mut target: Map<String, Value>,
  source: Map<String, Value>,
  merge_nested: bool,
  extend_array: bool,
) -> Result<Map<String, Value>> {
  for (key, value) in source {
    let merged = match (target.remove(&key), value) {
      (None, value) => value,
      (Some(Value::Object(curr)), Value::Object(value))
        if merge_nested =>
      {
        Value::Object(merge_objects(
          curr,
          value,
          merge_nested,
          extend_array,
        )?)
      }
      (Some(Value::Object(_)), _) if merge_nested => {
        return Err(Error::ObjectFieldTypeMismatch { key });
      }
      (Some(Value::Array(mut curr)), Value::Array(value))
        if extend_array =>
      {
        curr.extend(value);
        Value::Array(curr)
      }
      (Some(Value::Array(_)), _) if extend_array => {
        return Err(Error::ArrayFieldTypeMismatch { key });
      }
      (Some(_), value) => value,
    };
    target.insert(key, merged);
  }
  Ok(target)
}
