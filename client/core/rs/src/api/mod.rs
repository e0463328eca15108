//! One capability trait per service, covering only the
//! operations the CLI calls. [StackitClient](crate::StackitClient)
//! implements all of them.
//!
//! Mutating operations take a request struct holding the path
//! parameters and the assembled payload, so the exact request
//! can be compared in tests.

pub mod authorization;
pub mod opensearch;
pub mod postgresflex;
pub mod resourcemanager;
pub mod secretsmanager;
