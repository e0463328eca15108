use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMembersPayload {
  pub members: Vec<Member>,
  pub resource_type: String,
  /// Also remove the roles blocking the removal of the requested one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub force_remove: Option<bool>,
}

impl RemoveMembersPayload {
  pub const PROJECT: &'static str = "project";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
  pub subject: String,
  pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resource_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resource_type: Option<String>,
  #[serde(default)]
  pub members: Vec<Member>,
}
