//! Confirms, submits and optionally waits on a mutating request.
//!
//! ```text
//! Built -> Confirmed -> Submitted -> SyncDone
//!                                 -> Waiting -> WaitDone
//! (any step) -> Failed
//! ```
//!
//! The request is submitted exactly once. Retries only ever happen
//! inside the wait step's polling.

use std::future::Future;

use tracing::debug;

/// Interactive confirmation.
pub trait Prompt {
  /// `Ok(false)` means the user declined.
  fn confirm(&self, prompt: &str) -> anyhow::Result<bool>;
}

/// A mutating request ready to be sent.
pub trait Mutation {
  type Response;
  type Final;

  /// Used to wrap submit errors, eg. `update OpenSearch instance`.
  fn operation(&self) -> String;

  async fn submit(&self) -> anyhow::Result<Self::Response>;

  /// The id to wait on, or `None` when the operation
  /// is already complete once the service accepts it.
  /// Default: `None`
  fn tracked_id(&self, _response: &Self::Response) -> Option<String> {
    None
  }

  /// Used to wrap wait errors, eg. `wait for OpenSearch instance update`.
  fn wait_operation(&self) -> String {
    format!("wait for {}", self.operation())
  }

  /// Blocks until the tracked operation reaches a terminal state,
  /// erroring on terminal failure or deadline.
  /// Only called when [Mutation::tracked_id] returns an id.
  async fn wait(&self, tracked_id: &str) -> anyhow::Result<Self::Final> {
    anyhow::bail!(
      "{} has no operation to wait on ({tracked_id})",
      self.operation()
    )
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ExecutionState {
  Built,
  Confirmed,
  Submitted,
  SyncDone,
  Waiting,
  WaitDone,
  Failed,
}

#[derive(Debug)]
pub enum Outcome<R, F> {
  /// Async mode, the service accepted the request
  /// but it may still be in progress.
  Triggered(R),
  /// Nothing to wait on, the service completed the request.
  Done(R),
  /// Waited until the tracked operation succeeded.
  Completed { response: R, state: F },
}

impl<R, F> Outcome<R, F> {
  pub fn is_triggered(&self) -> bool {
    matches!(self, Outcome::Triggered(_))
  }

  pub fn response(&self) -> &R {
    match self {
      Outcome::Triggered(response)
      | Outcome::Done(response)
      | Outcome::Completed { response, .. } => response,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
  #[error("Operation cancelled")]
  Aborted,
  #[error("Failed to read confirmation")]
  Prompt(#[source] anyhow::Error),
  #[error("Failed to {operation}")]
  Submit {
    operation: String,
    #[source]
    source: anyhow::Error,
  },
  #[error("Failed to {operation}")]
  Wait {
    operation: String,
    #[source]
    source: anyhow::Error,
  },
}

pub struct Executor<'a, P> {
  prompt: &'a P,
  assume_yes: bool,
  async_mode: bool,
}

impl<'a, P: Prompt> Executor<'a, P> {
  pub fn new(prompt: &'a P) -> Self {
    Self {
      prompt,
      assume_yes: false,
      async_mode: false,
    }
  }

  /// Skip the confirmation prompt.
  pub fn assume_yes(mut self, assume_yes: bool) -> Self {
    self.assume_yes = assume_yes;
    self
  }

  /// Return right after the service accepts the request.
  pub fn async_mode(mut self, async_mode: bool) -> Self {
    self.async_mode = async_mode;
    self
  }

  pub async fn execute<M: Mutation>(
    &self,
    confirmation: &str,
    mutation: &M,
  ) -> Result<Outcome<M::Response, M::Final>, ExecutionError> {
    let mut state = ExecutionState::Built;

    if !self.assume_yes {
      let confirmed = self.prompt.confirm(confirmation).map_err(|e| {
        transition(&mut state, ExecutionState::Failed);
        ExecutionError::Prompt(e)
      })?;
      if !confirmed {
        transition(&mut state, ExecutionState::Failed);
        return Err(ExecutionError::Aborted);
      }
    }
    transition(&mut state, ExecutionState::Confirmed);

    let response = mutation.submit().await.map_err(|source| {
      transition(&mut state, ExecutionState::Failed);
      ExecutionError::Submit {
        operation: mutation.operation(),
        source,
      }
    })?;
    transition(&mut state, ExecutionState::Submitted);

    if self.async_mode {
      transition(&mut state, ExecutionState::SyncDone);
      return Ok(Outcome::Triggered(response));
    }

    let Some(tracked_id) = mutation.tracked_id(&response) else {
      transition(&mut state, ExecutionState::SyncDone);
      return Ok(Outcome::Done(response));
    };

    transition(&mut state, ExecutionState::Waiting);
    let final_state =
      mutation.wait(&tracked_id).await.map_err(|source| {
        transition(&mut state, ExecutionState::Failed);
        ExecutionError::Wait {
          operation: mutation.wait_operation(),
          source,
        }
      })?;
    transition(&mut state, ExecutionState::WaitDone);

    Ok(Outcome::Completed {
      response,
      state: final_state,
    })
  }
}

fn transition(state: &mut ExecutionState, next: ExecutionState) {
  debug!("execution state: {state} -> {next}");
  *state = next;
}

/// Best effort human label for a resource.
/// Any lookup failure falls back to the raw id.
pub async fn label_or_id<F, Fut>(id: &str, lookup: F) -> String
where
  F: FnOnce() -> Fut,
  Fut: Future<Output = anyhow::Result<Option<String>>>,
{
  match lookup().await {
    Ok(Some(label)) if !label.is_empty() => label,
    Ok(_) => id.to_string(),
    Err(e) => {
      debug!("get resource label for {id}: {e:#}");
      id.to_string()
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};

  use super::*;

  struct FakePrompt {
    answer: bool,
    prompts: RefCell<Vec<String>>,
  }

  impl FakePrompt {
    fn answering(answer: bool) -> Self {
      Self {
        answer,
        prompts: Default::default(),
      }
    }
  }

  impl Prompt for FakePrompt {
    fn confirm(&self, prompt: &str) -> anyhow::Result<bool> {
      self.prompts.borrow_mut().push(prompt.to_string());
      Ok(self.answer)
    }
  }

  #[derive(Default)]
  struct FakeMutation {
    fail_submit: bool,
    fail_wait: bool,
    untracked: bool,
    submits: Cell<usize>,
    waits: RefCell<Vec<String>>,
  }

  impl Mutation for FakeMutation {
    type Response = String;
    type Final = &'static str;

    fn operation(&self) -> String {
      String::from("update instance")
    }

    async fn submit(&self) -> anyhow::Result<String> {
      self.submits.set(self.submits.get() + 1);
      if self.fail_submit {
        anyhow::bail!("500 Internal Server Error");
      }
      Ok(String::from("tracked-id"))
    }

    fn tracked_id(&self, response: &String) -> Option<String> {
      (!self.untracked).then(|| response.clone())
    }

    fn wait_operation(&self) -> String {
      String::from("wait for instance update")
    }

    async fn wait(&self, tracked_id: &str) -> anyhow::Result<&'static str> {
      self.waits.borrow_mut().push(tracked_id.to_string());
      if self.fail_wait {
        anyhow::bail!("operation failed");
      }
      Ok("succeeded")
    }
  }

  #[tokio::test]
  async fn declined_prompt_submits_nothing() {
    let prompt = FakePrompt::answering(false);
    let mutation = FakeMutation::default();
    let err = Executor::new(&prompt)
      .execute("Are you sure?", &mutation)
      .await
      .unwrap_err();
    assert!(matches!(err, ExecutionError::Aborted));
    assert_eq!(mutation.submits.get(), 0);
    assert_eq!(prompt.prompts.borrow().as_slice(), ["Are you sure?"]);
  }

  #[tokio::test]
  async fn assume_yes_skips_prompt() {
    let prompt = FakePrompt::answering(false);
    let mutation = FakeMutation::default();
    let outcome = Executor::new(&prompt)
      .assume_yes(true)
      .execute("Are you sure?", &mutation)
      .await
      .unwrap();
    assert!(matches!(
      outcome,
      Outcome::Completed {
        state: "succeeded",
        ..
      }
    ));
    assert!(prompt.prompts.borrow().is_empty());
    assert_eq!(mutation.submits.get(), 1);
    assert_eq!(mutation.waits.borrow().as_slice(), ["tracked-id"]);
  }

  #[tokio::test]
  async fn async_mode_does_not_wait() {
    let prompt = FakePrompt::answering(true);
    let mutation = FakeMutation::default();
    let outcome = Executor::new(&prompt)
      .async_mode(true)
      .execute("Are you sure?", &mutation)
      .await
      .unwrap();
    assert!(outcome.is_triggered());
    assert_eq!(outcome.response(), "tracked-id");
    assert!(mutation.waits.borrow().is_empty());
  }

  #[tokio::test]
  async fn untracked_operation_is_done() {
    let prompt = FakePrompt::answering(true);
    let mutation = FakeMutation {
      untracked: true,
      ..Default::default()
    };
    let outcome = Executor::new(&prompt)
      .execute("Are you sure?", &mutation)
      .await
      .unwrap();
    assert!(matches!(outcome, Outcome::Done(_)));
    assert!(mutation.waits.borrow().is_empty());
  }

  struct UntrackedMutation {
    submits: Cell<usize>,
  }

  impl Mutation for UntrackedMutation {
    type Response = ();
    type Final = ();

    fn operation(&self) -> String {
      String::from("remove member")
    }

    async fn submit(&self) -> anyhow::Result<()> {
      self.submits.set(self.submits.get() + 1);
      Ok(())
    }
  }

  #[tokio::test]
  async fn untracked_by_default() {
    let prompt = FakePrompt::answering(true);
    let mutation = UntrackedMutation {
      submits: Cell::new(0),
    };
    let outcome = Executor::new(&prompt)
      .execute("Are you sure?", &mutation)
      .await
      .unwrap();
    assert!(matches!(outcome, Outcome::Done(())));
    assert_eq!(mutation.submits.get(), 1);
    assert_eq!(mutation.wait_operation(), "wait for remove member");
    assert!(mutation.wait("some-id").await.is_err());
  }

  #[tokio::test]
  async fn submit_failure_is_wrapped_once() {
    let prompt = FakePrompt::answering(true);
    let mutation = FakeMutation {
      fail_submit: true,
      ..Default::default()
    };
    let err = Executor::new(&prompt)
      .execute("Are you sure?", &mutation)
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "Failed to update instance");
    assert_eq!(mutation.submits.get(), 1);
    assert!(mutation.waits.borrow().is_empty());
  }

  #[tokio::test]
  async fn wait_failure_after_submit() {
    let prompt = FakePrompt::answering(true);
    let mutation = FakeMutation {
      fail_wait: true,
      ..Default::default()
    };
    let err = Executor::new(&prompt)
      .execute("Are you sure?", &mutation)
      .await
      .unwrap_err();
    let ExecutionError::Wait { operation, source } = err else {
      panic!("expected wait error, got {err:?}");
    };
    assert_eq!(operation, "wait for instance update");
    assert_eq!(source.to_string(), "operation failed");
    assert_eq!(mutation.submits.get(), 1);
  }

  #[tokio::test]
  async fn label_falls_back_to_id() {
    let label = label_or_id("some-id", || async {
      Err(anyhow::anyhow!("not found"))
    })
    .await;
    assert_eq!(label, "some-id");

    let label =
      label_or_id("some-id", || async { Ok(Some(String::from("name"))) })
        .await;
    assert_eq!(label, "name");

    let label = label_or_id("some-id", || async { Ok(None) }).await;
    assert_eq!(label, "some-id");
  }
}
