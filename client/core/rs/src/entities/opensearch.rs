use mutation::resolve::{ListingEntry, ListingGroup};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instance_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plan_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_operation: Option<LastOperation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastOperation {
  #[serde(default, rename = "type")]
  pub kind: String,
  #[serde(default)]
  pub state: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub description: String,
}

impl LastOperation {
  pub const UPDATE: &'static str = "update";
  pub const SUCCEEDED: &'static str = "succeeded";
  pub const FAILED: &'static str = "failed";
  pub const IN_PROGRESS: &'static str = "in progress";
}

/// The body of a partial instance update.
/// `parameters` is always sent, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialUpdateInstancePayload {
  pub parameters: InstanceParameters,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plan_id: Option<String>,
}

/// Only the present fields are serialized,
/// the service keeps the current value of every omitted one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceParameters {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub enable_monitoring: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub graphite: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub metrics_frequency: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub metrics_prefix: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub monitoring_instance_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plugins: Option<Vec<String>>,
  /// Comma separated list of CIDR ranges.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sgw_acl: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub syslog: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOfferingsResponse {
  #[serde(default)]
  pub offerings: Vec<Offering>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offering {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
  #[serde(default)]
  pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// Offerings are grouped by version, plans are matched by name.
impl ListingGroup for Offering {
  type Entry = Plan;

  fn key(&self) -> Option<&str> {
    self.version.as_deref()
  }

  fn entries(&self) -> &[Plan] {
    &self.plans
  }
}

impl ListingEntry for Plan {
  fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn empty_update_keeps_parameters_object() {
    let payload = PartialUpdateInstancePayload::default();
    assert_eq!(
      serde_json::to_value(&payload).unwrap(),
      json!({ "parameters": {} })
    );
  }

  #[test]
  fn zero_values_are_sent() {
    let payload = PartialUpdateInstancePayload {
      parameters: InstanceParameters {
        enable_monitoring: Some(false),
        graphite: Some(String::new()),
        metrics_frequency: Some(0),
        plugins: Some(vec![]),
        ..Default::default()
      },
      plan_id: None,
    };
    assert_eq!(
      serde_json::to_value(&payload).unwrap(),
      json!({
        "parameters": {
          "enable_monitoring": false,
          "graphite": "",
          "metrics_frequency": 0,
          "plugins": [],
        }
      })
    );
  }

  #[test]
  fn offerings_without_plans() {
    let res: ListOfferingsResponse = serde_json::from_value(json!({
      "offerings": [{ "name": "opensearch", "version": "2" }]
    }))
    .unwrap();
    assert_eq!(res.offerings[0].key(), Some("2"));
    assert!(res.offerings[0].entries().is_empty());
  }
}
