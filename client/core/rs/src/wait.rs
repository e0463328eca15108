//! Polls long running operations until they reach a terminal state.
//!
//! Polling only ever reads state, it never resubmits the operation.
//! Gateway errors (502 / 503 / 504) are retried a few times in a row
//! before giving up, any other API error stops the wait.

use std::{future::Future, time::Duration};

use tokio::time::Instant;
use tracing::debug;

use crate::{
  ApiError,
  api::{opensearch::OpenSearchApi, postgresflex::PostgresFlexApi},
  entities::{
    opensearch::{self, LastOperation},
    postgresflex,
  },
};

pub const MAX_TRANSIENT_ERRORS: usize = 5;

#[derive(Debug)]
pub enum WaitStatus<T> {
  Pending,
  Done(T),
  /// Terminal failure, with a description.
  Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
  /// Delay between two state checks.
  pub interval: Duration,
  /// Deadline for the whole wait, measured from the first check.
  pub timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum WaitError {
  #[error("{0}")]
  Failed(String),
  #[error("Operation did not finish within {0:?}")]
  Timeout(Duration),
  #[error(transparent)]
  Api(#[from] ApiError),
}

pub struct WaitHandler<F> {
  check: F,
  options: WaitOptions,
}

impl<F, Fut, T> WaitHandler<F>
where
  F: FnMut() -> Fut,
  Fut: Future<Output = Result<WaitStatus<T>, ApiError>>,
{
  pub fn new(check: F, options: WaitOptions) -> WaitHandler<F> {
    WaitHandler { check, options }
  }

  pub async fn wait(mut self) -> Result<T, WaitError> {
    let deadline = Instant::now() + self.options.timeout;
    let mut transient_errors = 0;
    loop {
      match (self.check)().await {
        Ok(WaitStatus::Done(state)) => return Ok(state),
        Ok(WaitStatus::Failed(e)) => return Err(WaitError::Failed(e)),
        Ok(WaitStatus::Pending) => transient_errors = 0,
        Err(e)
          if e.is_transient() && transient_errors < MAX_TRANSIENT_ERRORS =>
        {
          transient_errors += 1;
          debug!(
            "transient error while waiting ({transient_errors}/{MAX_TRANSIENT_ERRORS}): {e}"
          );
        }
        Err(e) => return Err(e.into()),
      }
      let now = Instant::now();
      if now >= deadline {
        return Err(WaitError::Timeout(self.options.timeout));
      }
      tokio::time::sleep(self.options.interval.min(deadline - now))
        .await;
    }
  }
}

/// Waits until the instance's last operation is a
/// successful `update`.
pub async fn opensearch_partial_update<C: OpenSearchApi>(
  client: &C,
  project_id: &str,
  instance_id: &str,
  options: WaitOptions,
) -> Result<opensearch::Instance, WaitError> {
  WaitHandler::new(
    move || async move {
      let instance = client.get_instance(project_id, instance_id).await?;
      let Some(operation) = &instance.last_operation else {
        return Ok(WaitStatus::Pending);
      };
      if operation.kind != LastOperation::UPDATE {
        return Ok(WaitStatus::Pending);
      }
      match operation.state.as_str() {
        LastOperation::SUCCEEDED => {}
        LastOperation::FAILED => {
          return Ok(WaitStatus::Failed(format!(
            "update failed for instance with id {instance_id}: {}",
            operation.description
          )));
        }
        _ => return Ok(WaitStatus::Pending),
      }
      Ok(WaitStatus::Done(instance))
    },
    options,
  )
  .wait()
  .await
}

/// Waits until a created (or cloned) instance is `Ready`.
pub async fn postgresflex_create<C: PostgresFlexApi>(
  client: &C,
  project_id: &str,
  region: &str,
  instance_id: &str,
  options: WaitOptions,
) -> Result<postgresflex::Instance, WaitError> {
  WaitHandler::new(
    move || async move {
      let res = client
        .get_instance(project_id, region, instance_id)
        .await?;
      let Some(instance) = res.item else {
        return Ok(WaitStatus::Pending);
      };
      match instance.status.as_deref() {
        Some(postgresflex::Instance::READY) => {}
        Some(postgresflex::Instance::FAILURE) => {
          return Ok(WaitStatus::Failed(format!(
            "create failed for instance with id {instance_id}"
          )));
        }
        _ => return Ok(WaitStatus::Pending),
      }
      Ok(WaitStatus::Done(instance))
    },
    options,
  )
  .wait()
  .await
}
