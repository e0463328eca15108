use reqwest::Method;

use crate::{
  ApiError, Service, StackitClient,
  entities::opensearch::{
    Instance, ListOfferingsResponse, PartialUpdateInstancePayload,
  },
};

/// `PATCH /v1/projects/{project_id}/instances/{instance_id}`
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdateInstance {
  pub project_id: String,
  pub instance_id: String,
  pub payload: PartialUpdateInstancePayload,
}

pub trait OpenSearchApi {
  async fn get_instance(
    &self,
    project_id: &str,
    instance_id: &str,
  ) -> Result<Instance, ApiError>;

  async fn list_offerings(
    &self,
    project_id: &str,
  ) -> Result<ListOfferingsResponse, ApiError>;

  /// Accepted asynchronously,
  /// track it on the instance's `last_operation`.
  async fn partial_update_instance(
    &self,
    request: &PartialUpdateInstance,
  ) -> Result<(), ApiError>;
}

impl OpenSearchApi for StackitClient {
  async fn get_instance(
    &self,
    project_id: &str,
    instance_id: &str,
  ) -> Result<Instance, ApiError> {
    self
      .get(
        Service::OpenSearch,
        &format!("/v1/projects/{project_id}/instances/{instance_id}"),
      )
      .await
  }

  async fn list_offerings(
    &self,
    project_id: &str,
  ) -> Result<ListOfferingsResponse, ApiError> {
    self
      .get(
        Service::OpenSearch,
        &format!("/v1/projects/{project_id}/offerings"),
      )
      .await
  }

  async fn partial_update_instance(
    &self,
    PartialUpdateInstance {
      project_id,
      instance_id,
      payload,
    }: &PartialUpdateInstance,
  ) -> Result<(), ApiError> {
    self
      .send_accepted(
        Method::PATCH,
        Service::OpenSearch,
        &format!("/v1/projects/{project_id}/instances/{instance_id}"),
        payload,
      )
      .await
  }
}
