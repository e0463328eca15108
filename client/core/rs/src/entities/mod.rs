//! Wire types of the STACKIT services.
//!
//! Every optional field is an [Option] skipped when `None`,
//! so payloads only carry what the caller set.

pub mod authorization;
pub mod config;
pub mod logger;
pub mod opensearch;
pub mod postgresflex;
pub mod resourcemanager;
pub mod secretsmanager;
