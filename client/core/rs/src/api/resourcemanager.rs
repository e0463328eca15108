use crate::{
  ApiError, Service, StackitClient,
  entities::resourcemanager::Project,
};

pub trait ResourceManagerApi {
  async fn get_project(&self, project_id: &str)
  -> Result<Project, ApiError>;
}

impl ResourceManagerApi for StackitClient {
  async fn get_project(
    &self,
    project_id: &str,
  ) -> Result<Project, ApiError> {
    self
      .get(
        Service::ResourceManager,
        &format!("/v2/projects/{project_id}"),
      )
      .await
  }
}
