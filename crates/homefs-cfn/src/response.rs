//! The custom-resource response body and the `ProfileIdentity` adapter.

use homefs_core::{FailureKind, ProfileIdentity, SelectorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::CustomResourceEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
  #[serde(rename = "SUCCESS")]
  Success,
  #[serde(rename = "FAILED")]
  Failed,
}

/// Facts about the running invocation used for response defaults.
#[derive(Debug, Clone)]
pub struct InvocationContext {
  pub log_stream_name: String,
}

/// The JSON body PUT to the event's `ResponseURL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallbackResponse {
  pub status:               ResponseStatus,
  pub reason:               String,
  pub physical_resource_id: String,
  pub stack_id:             String,
  pub request_id:           String,
  pub logical_resource_id:  String,
  /// Asks CloudFormation to mask `Data` in describe calls.
  pub no_echo:              bool,
  pub data:                 Map<String, Value>,
}

impl CallbackResponse {
  /// A response echoing the identifiers of `event`.
  ///
  /// The reason defaults to a pointer at the log stream. The physical
  /// resource id is the one CloudFormation sent, or the log stream name for a
  /// new resource.
  pub fn new(
    event: &CustomResourceEvent,
    context: &InvocationContext,
    status: ResponseStatus,
    data: Map<String, Value>,
  ) -> Self {
    Self {
      status,
      reason: format!(
        "See the details in CloudWatch Log Stream: {}",
        context.log_stream_name
      ),
      physical_resource_id: event
        .physical_resource_id
        .clone()
        .unwrap_or_else(|| context.log_stream_name.clone()),
      stack_id: event.stack_id.clone(),
      request_id: event.request_id.clone(),
      logical_resource_id: event.logical_resource_id.clone(),
      no_echo: false,
      data,
    }
  }

  pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
    self.reason = reason.into();
    self
  }

  pub fn with_no_echo(mut self, no_echo: bool) -> Self {
    self.no_echo = no_echo;
    self
  }

  /// Report a resolved profile. A failed record produces a `FAILED` response
  /// whose reason names the failed operation.
  pub fn from_identity(
    event: &CustomResourceEvent,
    identity: &ProfileIdentity,
    context: &InvocationContext,
  ) -> Self {
    let status = if identity.failed() { ResponseStatus::Failed } else { ResponseStatus::Success };
    let response = Self::new(event, context, status, identity_data(identity));

    match identity.failure() {
      Some(failure) => {
        let kind = match failure.kind {
          FailureKind::Validation => "validation error",
          FailureKind::AccessDenied => "access denied",
        };
        response.with_reason(format!("{} failed ({kind}): {}", failure.operation, failure.message))
      }
      None => response,
    }
  }
}

/// Output attributes exposed to the template via `Fn::GetAtt`.
fn identity_data(identity: &ProfileIdentity) -> Map<String, Value> {
  let mut data = Map::new();
  let mut put = |key: &str, value: &str| {
    data.insert(key.to_string(), Value::String(value.to_string()));
  };

  put("DomainId", identity.domain_id());
  put("DomainName", identity.domain_name());
  put("HomeEfsFileSystemId", identity.home_filesystem_id());
  put("HomeEfsFileSystemUid", identity.filesystem_uid());

  if let (Some(kind), Some(name)) = (identity.selector_kind(), identity.selector_name()) {
    match kind {
      SelectorKind::Space => put("SpaceName", name),
      SelectorKind::UserProfile => put("UserProfileName", name),
    }
  }
  if let Some(role) = identity.role_name() {
    put("RoleName", role);
  }
  if let Some(label) = identity.identity_label() {
    put("SingleSignOnUserValue", label);
  }
  data
}
