use reqwest::Method;

use crate::{
  ApiError, Service, StackitClient,
  entities::authorization::{MembersResponse, RemoveMembersPayload},
};

/// `POST /v2/{resource_id}/members/remove`
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveMembers {
  pub resource_id: String,
  pub payload: RemoveMembersPayload,
}

pub trait AuthorizationApi {
  /// Completes synchronously, there is nothing to wait on.
  async fn remove_members(
    &self,
    request: &RemoveMembers,
  ) -> Result<MembersResponse, ApiError>;
}

impl AuthorizationApi for StackitClient {
  async fn remove_members(
    &self,
    RemoveMembers {
      resource_id,
      payload,
    }: &RemoveMembers,
  ) -> Result<MembersResponse, ApiError> {
    self
      .send(
        Method::POST,
        Service::Authorization,
        &format!("/v2/{resource_id}/members/remove"),
        payload,
      )
      .await
  }
}
