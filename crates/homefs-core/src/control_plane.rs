//! The `ControlPlane` trait and the describe responses it returns.
//!
//! The trait is implemented by API clients (e.g. `homefs-sagemaker`). The
//! resolver depends on this abstraction only; credentials, transport and
//! timeouts belong to the implementation.

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};

use crate::error::DescribeError;

// ─── Operations ──────────────────────────────────────────────────────────────

/// The remote operations the resolver may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
  DescribeDomain,
  DescribeUserProfile,
  DescribeSpace,
}

impl Operation {
  /// The remote API name of the operation, e.g. `DescribeSpace`.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::DescribeDomain => "DescribeDomain",
      Self::DescribeUserProfile => "DescribeUserProfile",
      Self::DescribeSpace => "DescribeSpace",
    }
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Responses ───────────────────────────────────────────────────────────────

/// The subset of domain metadata the resolver reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDescription {
  #[serde(rename = "DomainName")]
  pub domain_name:             String,
  /// The domain's shared home filesystem.
  #[serde(rename = "HomeEfsFileSystemId")]
  pub home_efs_file_system_id: String,
}

/// The subset of user-profile or space metadata the resolver reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescription {
  /// The entity's user id on the domain's home filesystem.
  #[serde(rename = "HomeEfsFileSystemUid")]
  pub home_efs_file_system_uid: String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Read-only access to the workspace control plane.
///
/// All methods return `Send` futures so a client can be shared between tasks
/// on a multi-threaded runtime.
pub trait ControlPlane: Send + Sync {
  /// Describe the domain `domain_id`.
  fn describe_domain<'a>(
    &'a self,
    domain_id: &'a str,
  ) -> impl Future<Output = Result<DomainDescription, DescribeError>> + Send + 'a;

  /// Describe the user profile `user_profile_name` inside `domain_id`.
  fn describe_user_profile<'a>(
    &'a self,
    domain_id: &'a str,
    user_profile_name: &'a str,
  ) -> impl Future<Output = Result<EntityDescription, DescribeError>> + Send + 'a;

  /// Describe the space `space_name` inside `domain_id`.
  fn describe_space<'a>(
    &'a self,
    domain_id: &'a str,
    space_name: &'a str,
  ) -> impl Future<Output = Result<EntityDescription, DescribeError>> + Send + 'a;
}
