//! Client configuration and credentials.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Where and how to reach the SageMaker API.
#[derive(Debug, Clone, Deserialize)]
pub struct SageMakerConfig {
  pub region:   String,
  /// Overrides the regional endpoint, e.g. for a VPC endpoint or a local mock.
  #[serde(default)]
  pub endpoint: Option<String>,
}

impl SageMakerConfig {
  pub fn new(region: impl Into<String>) -> Self {
    Self { region: region.into(), endpoint: None }
  }

  pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.endpoint = Some(endpoint.into());
    self
  }

  /// The configured endpoint, or `https://api.sagemaker.{region}.amazonaws.com`.
  pub fn endpoint_url(&self) -> Result<String> {
    if self.region.trim().is_empty() {
      return Err(Error::MissingRegion);
    }
    Ok(match &self.endpoint {
      Some(endpoint) => endpoint.clone(),
      None => format!("https://api.sagemaker.{}.amazonaws.com", self.region),
    })
  }
}

/// Static AWS credentials used for SigV4 signing.
#[derive(Clone)]
pub struct Credentials {
  pub access_key_id:     String,
  pub secret_access_key: String,
  pub session_token:     Option<String>,
}

impl Credentials {
  pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
    Self {
      access_key_id:     access_key_id.into(),
      secret_access_key: secret_access_key.into(),
      session_token:     None,
    }
  }

  pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
    self.session_token = Some(token.into());
    self
  }

  /// Read `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
  /// `AWS_SESSION_TOKEN`.
  pub fn from_env() -> Result<Self> {
    let var = |name: &'static str| {
      std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingCredential(name))
    };
    Ok(Self {
      access_key_id:     var("AWS_ACCESS_KEY_ID")?,
      secret_access_key: var("AWS_SECRET_ACCESS_KEY")?,
      session_token:     std::env::var("AWS_SESSION_TOKEN").ok().filter(|v| !v.is_empty()),
    })
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("access_key_id", &self.access_key_id)
      .field("secret_access_key", &"<redacted>")
      .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}
