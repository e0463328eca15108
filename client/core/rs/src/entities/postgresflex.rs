use mutation::validate::PairConstraints;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub item: Option<Instance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub replicas: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub flavor: Option<Flavor>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub storage: Option<Storage>,
}

impl Instance {
  pub const READY: &'static str = "Ready";
  pub const FAILURE: &'static str = "Failure";

  pub fn flavor_id(&self) -> Option<&str> {
    self.flavor.as_ref()?.id.as_deref()
  }

  pub fn storage_class(&self) -> Option<&String> {
    self.storage.as_ref()?.class.as_ref()
  }

  pub fn storage_size(&self) -> Option<&i64> {
    self.storage.as_ref()?.size.as_ref()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flavor {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cpu: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub memory: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storage {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub class: Option<String>,
  /// In GB.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub size: Option<i64>,
}

/// Storage options available for one flavor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStoragesResponse {
  #[serde(default)]
  pub storage_classes: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub storage_range: Option<StorageRange>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageRange {
  pub min: i64,
  pub max: i64,
}

impl ListStoragesResponse {
  /// Human readable summary of what is allowed,
  /// eg. `storage classes: premium-perf2, premium-perf6, storage size range: 5 - 4000`
  pub fn describe(&self) -> String {
    let classes = if self.storage_classes.is_empty() {
      String::from("none")
    } else {
      self.storage_classes.join(", ")
    };
    match self.storage_range {
      Some(StorageRange { min, max }) => format!(
        "storage classes: {classes}, storage size range: {min} - {max}"
      ),
      None => format!("storage classes: {classes}"),
    }
  }
}

impl PairConstraints for ListStoragesResponse {
  type First = String;
  type Second = i64;
  const FIRST: &'static str = "storage class";
  const SECOND: &'static str = "storage size";

  fn allows(&self, class: &String, size: &i64) -> bool {
    let class_allowed = self
      .storage_classes
      .iter()
      .any(|allowed| allowed.eq_ignore_ascii_case(class));
    let size_allowed = match self.storage_range {
      Some(StorageRange { min, max }) => (min..=max).contains(size),
      None => false,
    };
    class_allowed && size_allowed
  }
}

/// Fields left unset fall back to the source instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloneInstancePayload {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub class: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub size: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneInstanceResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instance_id: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn storages() -> ListStoragesResponse {
    ListStoragesResponse {
      storage_classes: vec![
        String::from("premium-perf2-stackit"),
        String::from("premium-perf6-stackit"),
      ],
      storage_range: Some(StorageRange { min: 5, max: 100 }),
    }
  }

  #[test]
  fn class_match_ignores_case() {
    assert!(
      storages().allows(&String::from("Premium-Perf6-Stackit"), &10)
    );
  }

  #[test]
  fn size_must_be_in_range() {
    let storages = storages();
    let class = String::from("premium-perf2-stackit");
    assert!(storages.allows(&class, &5));
    assert!(storages.allows(&class, &100));
    assert!(!storages.allows(&class, &4));
    assert!(!storages.allows(&class, &101));
  }

  #[test]
  fn no_range_allows_nothing() {
    let storages = ListStoragesResponse {
      storage_range: None,
      ..storages()
    };
    assert!(!storages.allows(&String::from("premium-perf2-stackit"), &10));
  }

  #[test]
  fn describe_lists_options() {
    assert_eq!(
      storages().describe(),
      "storage classes: premium-perf2-stackit, premium-perf6-stackit, storage size range: 5 - 100"
    );
  }
}
