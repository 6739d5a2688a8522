//! Orchestration for podcompose.
//!
//! This crate ties the schema and runtime layers into the `Composer`: load a
//! compose file, resolve its images through an `ImageFetcher`, provision host
//! volumes, render the appc pod manifest and write it atomically. It also holds
//! the staleness check that decides whether a manifest must be regenerated and
//! the user configuration file.

pub mod config;
pub mod engine;
pub mod freshness;
pub mod writer;

pub use config::Config;
pub use engine::{run_args, Composer, PrepareOutcome};
pub use freshness::prepare_needed;
pub use writer::write_pod_manifest;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("compose error: {0}")]
    Spec(#[from] podcompose_schema::SpecError),
    #[error("manifest error: {0}")]
    Build(#[from] podcompose_schema::BuildError),
    #[error("runtime error: {0}")]
    Runtime(#[from] podcompose_runtime::RuntimeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
}
