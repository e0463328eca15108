use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional attribute of an input model.
///
/// `Unset` means the flag was never passed, and the attribute must be
/// left out of any request so the service keeps its current value.
/// `Set` holds whatever the user passed, including zero values like
/// `""`, `0` or `false`, which must still reach the service.
///
/// When used inside a serializable struct, pair it with
/// `#[serde(default, skip_serializing_if = "Field::is_unset")]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Field<T> {
  #[default]
  Unset,
  Set(T),
}

impl<T> Field<T> {
  pub fn is_set(&self) -> bool {
    matches!(self, Field::Set(_))
  }

  pub fn is_unset(&self) -> bool {
    matches!(self, Field::Unset)
  }

  pub fn as_ref(&self) -> Field<&T> {
    match self {
      Field::Set(value) => Field::Set(value),
      Field::Unset => Field::Unset,
    }
  }

  pub fn get(&self) -> Option<&T> {
    match self {
      Field::Set(value) => Some(value),
      Field::Unset => None,
    }
  }

  pub fn into_option(self) -> Option<T> {
    match self {
      Field::Set(value) => Some(value),
      Field::Unset => None,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
    match self {
      Field::Set(value) => Field::Set(f(value)),
      Field::Unset => Field::Unset,
    }
  }

  /// Keeps `self` when set, otherwise falls back to `other`.
  pub fn or(self, other: Field<T>) -> Field<T> {
    match self {
      Field::Set(_) => self,
      Field::Unset => other,
    }
  }
}

impl<T> From<Option<T>> for Field<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(value) => Field::Set(value),
      None => Field::Unset,
    }
  }
}

impl<T> From<Field<T>> for Option<T> {
  fn from(value: Field<T>) -> Self {
    value.into_option()
  }
}

impl<T: Serialize> Serialize for Field<T> {
  fn serialize<S: Serializer>(
    &self,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match self {
      Field::Set(value) => value.serialize(serializer),
      Field::Unset => serializer.serialize_none(),
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
  fn deserialize<D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Self, D::Error> {
    Option::<T>::deserialize(deserializer).map(Field::from)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Serialize, Deserialize, Debug, PartialEq)]
  struct Parameters {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    graphite: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    metrics_frequency: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    enable_monitoring: Field<bool>,
  }

  #[test]
  fn unset_fields_are_omitted() {
    let params = Parameters {
      graphite: Field::Unset,
      metrics_frequency: Field::Set(100),
      enable_monitoring: Field::Unset,
    };
    assert_eq!(
      serde_json::to_value(&params).unwrap(),
      serde_json::json!({ "metrics_frequency": 100 })
    );
  }

  #[test]
  fn zero_values_are_kept() {
    let params = Parameters {
      graphite: Field::Set(String::new()),
      metrics_frequency: Field::Set(0),
      enable_monitoring: Field::Set(false),
    };
    assert_eq!(
      serde_json::to_value(&params).unwrap(),
      serde_json::json!({
        "graphite": "",
        "metrics_frequency": 0,
        "enable_monitoring": false
      })
    );
  }

  #[test]
  fn missing_keys_deserialize_unset() {
    let params: Parameters =
      serde_json::from_str(r#"{ "graphite": "" }"#).unwrap();
    assert_eq!(params.graphite, Field::Set(String::new()));
    assert!(params.metrics_frequency.is_unset());
    assert!(params.enable_monitoring.is_unset());
  }

  #[test]
  fn or_prefers_set_value() {
    assert_eq!(Field::Set(1).or(Field::Set(2)), Field::Set(1));
    assert_eq!(Field::Unset.or(Field::Set(2)), Field::Set(2));
    assert_eq!(Field::<i64>::Unset.or(Field::Unset), Field::Unset);
  }
}
