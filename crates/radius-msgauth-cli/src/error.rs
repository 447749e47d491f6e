use crate::config::ConfigError;
use crate::source::SourceError;
use radius_msgauth::VerifyError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Shared secret must not be empty")]
    EmptySecret,
    #[error("Input error: {0}")]
    Source(#[from] SourceError),
    #[error("Verification failed: {0}")]
    Verify(#[from] VerifyError),
    #[error("Could not read answer: {0}")]
    Prompt(#[source] io::Error),
    #[error("Could not write report: {0}")]
    Output(#[source] io::Error),
    #[error("Could not serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
