use crate::{
  ApiError, Service, StackitClient, entities::secretsmanager::User,
};

pub trait SecretsManagerApi {
  async fn get_user(
    &self,
    project_id: &str,
    instance_id: &str,
    user_id: &str,
  ) -> Result<User, ApiError>;
}

impl SecretsManagerApi for StackitClient {
  async fn get_user(
    &self,
    project_id: &str,
    instance_id: &str,
    user_id: &str,
  ) -> Result<User, ApiError> {
    self
      .get(
        Service::SecretsManager,
        &format!(
          "/v1/projects/{project_id}/instances/{instance_id}/users/{user_id}"
        ),
      )
      .await
  }
}
