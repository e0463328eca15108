use std::fmt::Debug;

use tracing::debug;

use crate::{EmptyUpdatePolicy, ResolveError, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
  #[error(transparent)]
  Reference(#[from] ResolveError),
  #[error(transparent)]
  Validation(#[from] ValidationError),
  #[error("Nothing to update, pass at least one flag to change")]
  NothingToUpdate,
}

/// Implemented by a command's input model to plug into [build_request].
///
/// `C` is the narrow client capability the command needs for its
/// lookups, so tests can pass a fake.
pub trait SelectiveUpdate<C>: Debug + Sized {
  type Request: Debug;

  const EMPTY_UPDATE: EmptyUpdatePolicy;

  /// Whether any optional field is set.
  fn has_changes(&self) -> bool;

  /// Fill canonical ids from symbolic references.
  async fn resolve(self, _client: &C) -> Result<Self, ResolveError> {
    Ok(self)
  }

  /// Check the effective field values against live constraints.
  async fn validate(&self, _client: &C) -> Result<(), ValidationError> {
    Ok(())
  }

  /// Build the payload from the final model. Unset fields are omitted.
  fn assemble(&self) -> Self::Request;
}

/// Runs resolve -> validate -> assemble in order.
/// An empty update is rejected up front if the policy says so.
pub async fn build_request<C, U: SelectiveUpdate<C>>(
  model: U,
  client: &C,
) -> Result<U::Request, PipelineError> {
  U::EMPTY_UPDATE.check(model.has_changes())?;
  let model = model.resolve(client).await?;
  debug!("resolved input values: {model:?}");
  model.validate(client).await?;
  let request = model.assemble();
  debug!("assembled request: {request:?}");
  Ok(request)
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use flags::Field;

  use super::*;

  #[derive(Default)]
  struct Client {
    resolve_calls: Cell<usize>,
    validate_calls: Cell<usize>,
  }

  #[derive(Debug)]
  struct Model {
    name: Field<String>,
  }

  impl SelectiveUpdate<Client> for Model {
    type Request = Option<String>;
    const EMPTY_UPDATE: EmptyUpdatePolicy = EmptyUpdatePolicy::Reject;
    fn has_changes(&self) -> bool {
      crate::any_set!(self.name)
    }
    async fn resolve(self, client: &Client) -> Result<Self, ResolveError> {
      client.resolve_calls.set(client.resolve_calls.get() + 1);
      Ok(self)
    }
    async fn validate(
      &self,
      client: &Client,
    ) -> Result<(), ValidationError> {
      client.validate_calls.set(client.validate_calls.get() + 1);
      Ok(())
    }
    fn assemble(&self) -> Self::Request {
      self.name.clone().into()
    }
  }

  #[tokio::test]
  async fn rejects_before_any_lookup() {
    let client = Client::default();
    let err = build_request(Model { name: Field::Unset }, &client)
      .await
      .unwrap_err();
    assert!(matches!(err, PipelineError::NothingToUpdate));
    assert_eq!(client.resolve_calls.get(), 0);
    assert_eq!(client.validate_calls.get(), 0);
  }

  #[tokio::test]
  async fn runs_every_stage() {
    let client = Client::default();
    let request = build_request(
      Model {
        name: Field::Set(String::new()),
      },
      &client,
    )
    .await
    .unwrap();
    assert_eq!(request, Some(String::new()));
    assert_eq!(client.resolve_calls.get(), 1);
    assert_eq!(client.validate_calls.get(), 1);
  }

  #[derive(Debug)]
  struct NoLookups {
    name: Field<String>,
  }

  impl SelectiveUpdate<Client> for NoLookups {
    type Request = Option<String>;
    const EMPTY_UPDATE: EmptyUpdatePolicy = EmptyUpdatePolicy::Allow;
    fn has_changes(&self) -> bool {
      crate::any_set!(self.name)
    }
    fn assemble(&self) -> Self::Request {
      self.name.clone().into()
    }
  }

  #[tokio::test]
  async fn default_stages_pass_through() {
    let client = Client::default();
    let request = build_request(NoLookups { name: Field::Unset }, &client)
      .await
      .unwrap();
    assert_eq!(request, None);
  }
}
