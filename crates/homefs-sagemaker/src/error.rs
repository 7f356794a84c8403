//! Error type for `homefs-sagemaker`.

use homefs_core::Operation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("region must not be empty")]
  MissingRegion,

  #[error("environment variable {0} is not set")]
  MissingCredential(&'static str),

  #[error("invalid endpoint {0:?}")]
  InvalidEndpoint(String),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("signing error: {0}")]
  Signing(String),

  /// An error response whose code the resolver does not classify.
  #[error("{operation} returned {status}: {code}: {message}")]
  Service {
    operation: Operation,
    status:    u16,
    code:      String,
    message:   String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
