//! # Mutation
//!
//! The shared pipeline behind every command that changes a resource:
//!
//! 1. [resolve] symbolic references (eg. plan name + version) into ids.
//! 2. [validate] correlated fields against live service constraints.
//! 3. [assemble] the partial request, honoring the command's
//!    [EmptyUpdatePolicy].
//! 4. [execute] the request, with confirmation and optional wait.
//!
//! Each resource family plugs into steps 1-3 by implementing
//! [SelectiveUpdate] on its input model, and into step 4 by
//! implementing [Mutation].

// Pipelines are awaited in place, never spawned.
#![allow(async_fn_in_trait)]

pub mod assemble;
pub mod execute;
pub mod resolve;
pub mod validate;

mod pipeline;

pub use assemble::EmptyUpdatePolicy;
pub use execute::{
  ExecutionError, ExecutionState, Executor, Mutation, Outcome, Prompt,
  label_or_id,
};
pub use pipeline::{PipelineError, SelectiveUpdate, build_request};
pub use resolve::{NamedReference, ResolveError};
pub use validate::ValidationError;
