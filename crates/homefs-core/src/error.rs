//! Error types for `homefs-core`.

use thiserror::Error;

use crate::control_plane::Operation;

/// An error returned by a [`ControlPlane`](crate::control_plane::ControlPlane)
/// describe call.
///
/// Backends classify remote failures into the first two variants. Anything
/// they cannot classify (transport failures, throttling, undecodable bodies)
/// goes into [`DescribeError::Other`].
#[derive(Debug, Error)]
pub enum DescribeError {
  /// The identifier or name does not match an existing remote entity, or is
  /// malformed.
  #[error("validation error: {message}")]
  Validation { message: String },

  /// The caller's credentials are not allowed to perform the operation.
  #[error("access denied: {message}")]
  AccessDenied { message: String },

  #[error("remote error: {0}")]
  Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DescribeError {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation { message: message.into() }
  }

  pub fn access_denied(message: impl Into<String>) -> Self {
    Self::AccessDenied { message: message.into() }
  }

  pub fn other<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Other(Box::new(err))
  }
}

/// A resolution that was aborted without producing a record.
#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("domain id must not be empty")]
  EmptyDomainId,

  /// A describe call failed in a way the resolver does not handle.
  #[error("{operation} failed: {source}")]
  Remote {
    operation: Operation,
    #[source]
    source:    DescribeError,
  },
}

pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
