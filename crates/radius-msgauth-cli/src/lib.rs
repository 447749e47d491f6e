//! Command-line shell around `radius-msgauth`.
//!
//! Everything with side effects lives here: reading the exported packet
//! bytes, prompting for missing input, the JSON configuration file and
//! rendering the result. The verification itself is delegated to
//! [`radius_msgauth::MessageAuthenticatorVerifier`].

pub mod check;
pub mod config;
pub mod error;
pub mod prompt;
pub mod report;
pub mod source;

pub use check::{run_check, CheckOutcome, CheckRequest};
pub use config::{Config, ConfigError, LOG_LEVELS};
pub use error::CliError;
pub use report::{render_json, render_text, HeaderSummary, Report};
pub use source::{looks_like_hex, BufferSource, InputFormat, SourceError};
