//! Error type for `homefs-cfn`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("callback request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("callback rejected with status {0}")]
  Rejected(u16),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
