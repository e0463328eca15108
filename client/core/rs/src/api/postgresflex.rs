use reqwest::Method;

use crate::{
  ApiError, Service, StackitClient,
  entities::postgresflex::{
    CloneInstancePayload, CloneInstanceResponse, InstanceResponse,
    ListStoragesResponse,
  },
};

/// `POST /v2/projects/{project_id}/regions/{region}/clone/{instance_id}`
#[derive(Debug, Clone, PartialEq)]
pub struct CloneInstance {
  pub project_id: String,
  pub region: String,
  pub instance_id: String,
  pub payload: CloneInstancePayload,
}

pub trait PostgresFlexApi {
  async fn get_instance(
    &self,
    project_id: &str,
    region: &str,
    instance_id: &str,
  ) -> Result<InstanceResponse, ApiError>;

  /// The storage options available for `flavor_id`.
  async fn list_storages(
    &self,
    project_id: &str,
    region: &str,
    flavor_id: &str,
  ) -> Result<ListStoragesResponse, ApiError>;

  /// Responds with the id of the new instance,
  /// which is created asynchronously.
  async fn clone_instance(
    &self,
    request: &CloneInstance,
  ) -> Result<CloneInstanceResponse, ApiError>;
}

impl PostgresFlexApi for StackitClient {
  async fn get_instance(
    &self,
    project_id: &str,
    region: &str,
    instance_id: &str,
  ) -> Result<InstanceResponse, ApiError> {
    self
      .get(
        Service::PostgresFlex,
        &format!(
          "/v2/projects/{project_id}/regions/{region}/instances/{instance_id}"
        ),
      )
      .await
  }

  async fn list_storages(
    &self,
    project_id: &str,
    region: &str,
    flavor_id: &str,
  ) -> Result<ListStoragesResponse, ApiError> {
    self
      .get(
        Service::PostgresFlex,
        &format!(
          "/v2/projects/{project_id}/regions/{region}/storages/{flavor_id}"
        ),
      )
      .await
  }

  async fn clone_instance(
    &self,
    CloneInstance {
      project_id,
      region,
      instance_id,
      payload,
    }: &CloneInstance,
  ) -> Result<CloneInstanceResponse, ApiError> {
    self
      .send(
        Method::POST,
        Service::PostgresFlex,
        &format!(
          "/v2/projects/{project_id}/regions/{region}/clone/{instance_id}"
        ),
        payload,
      )
      .await
  }
}
