//! # STACKIT client
//!
//! Typed access to the STACKIT services used by the `stackit` CLI.
//!
//! - [entities] hold the wire types and the CLI configuration.
//! - [api] holds one narrow capability trait per service, eg.
//!   [OpenSearchApi](api::opensearch::OpenSearchApi). Commands only
//!   depend on the traits they need, so they can be tested with fakes.
//! - [StackitClient] implements every capability over HTTP.
//! - [wait] polls long running operations until they finish.

// Futures are awaited in place, never spawned.
#![allow(async_fn_in_trait)]

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::entities::config::cli::ServiceEndpoints;

pub mod api;
pub mod deserializers;
pub mod entities;
pub mod wait;

mod error;

pub use error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Service {
  OpenSearch,
  PostgresFlex,
  SecretsManager,
  Authorization,
  ResourceManager,
}

impl Service {
  pub fn default_base_url(self) -> &'static str {
    match self {
      Service::OpenSearch => "https://opensearch.api.stackit.cloud",
      Service::PostgresFlex => {
        "https://postgres-flex-service.api.stackit.cloud"
      }
      Service::SecretsManager => {
        "https://secrets-manager.api.stackit.cloud"
      }
      Service::Authorization => "https://authorization.api.stackit.cloud",
      Service::ResourceManager => {
        "https://resource-manager.api.stackit.cloud"
      }
    }
  }
}

#[derive(Clone)]
pub struct StackitClient {
  reqwest: reqwest::Client,
  access_token: Option<String>,
  endpoints: ServiceEndpoints,
}

impl StackitClient {
  pub fn new(
    access_token: Option<String>,
    endpoints: ServiceEndpoints,
  ) -> Result<StackitClient, ApiError> {
    let reqwest = reqwest::Client::builder()
      .user_agent(concat!("stackit-cli/", env!("CARGO_PKG_VERSION")))
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(ApiError::Request)?;
    Ok(StackitClient {
      reqwest,
      access_token,
      endpoints,
    })
  }

  fn request(
    &self,
    method: Method,
    service: Service,
    path: &str,
  ) -> RequestBuilder {
    let url = format!("{}{path}", self.endpoints.base_url(service));
    debug!("{service} | {method} {url}");
    let req = self.reqwest.request(method, url);
    match &self.access_token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  async fn get<T: DeserializeOwned>(
    &self,
    service: Service,
    path: &str,
  ) -> Result<T, ApiError> {
    execute(self.request(Method::GET, service, path))
      .await?
      .json()
      .await
      .map_err(ApiError::Decode)
  }

  async fn send<B: Serialize, T: DeserializeOwned>(
    &self,
    method: Method,
    service: Service,
    path: &str,
    body: &B,
  ) -> Result<T, ApiError> {
    execute(self.request(method, service, path).json(body))
      .await?
      .json()
      .await
      .map_err(ApiError::Decode)
  }

  /// For endpoints answering `202 Accepted` without a body.
  async fn send_accepted<B: Serialize>(
    &self,
    method: Method,
    service: Service,
    path: &str,
    body: &B,
  ) -> Result<(), ApiError> {
    execute(self.request(method, service, path).json(body)).await?;
    Ok(())
  }
}

async fn execute(
  req: RequestBuilder,
) -> Result<reqwest::Response, ApiError> {
  let res = req.send().await.map_err(ApiError::Request)?;
  let status = res.status();
  if status.is_success() {
    return Ok(res);
  }
  let body = res.text().await.unwrap_or_default();
  Err(ApiError::Status {
    status: status.as_u16(),
    body,
  })
}
