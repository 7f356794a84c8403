//! `SageMakerClient`: the [`ControlPlane`] implementation.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use homefs_core::{
  ControlPlane, DescribeError, DomainDescription, EntityDescription, Operation,
};
use reqwest::{
  Client, StatusCode, Url,
  header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use tracing::debug;

use crate::{
  config::{Credentials, SageMakerConfig},
  error::{Error, Result},
  sigv4::{self, Scope, SigningRequest},
};

const JSON_1_1: &str = "application/x-amz-json-1.1";
const SERVICE: &str = "sagemaker";

/// Async SigV4-signing client for the SageMaker JSON API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SageMakerClient {
  http:        Client,
  endpoint:    Url,
  host:        String,
  region:      String,
  credentials: Arc<Credentials>,
}

impl SageMakerClient {
  pub fn new(config: SageMakerConfig, credentials: Credentials) -> Result<Self> {
    let raw = config.endpoint_url()?;
    let endpoint = Url::parse(&raw).map_err(|_| Error::InvalidEndpoint(raw.clone()))?;
    let host = match (endpoint.host_str(), endpoint.port()) {
      (Some(host), Some(port)) => format!("{host}:{port}"),
      (Some(host), None) => host.to_string(),
      (None, _) => return Err(Error::InvalidEndpoint(raw)),
    };

    let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

    Ok(Self {
      http,
      endpoint,
      host,
      region: config.region,
      credentials: Arc::new(credentials),
    })
  }

  pub fn endpoint(&self) -> &Url { &self.endpoint }

  /// `POST /` with `X-Amz-Target: SageMaker.<operation>`.
  async fn call<T: DeserializeOwned>(
    &self,
    operation: Operation,
    body: serde_json::Value,
  ) -> Result<T, DescribeError> {
    let payload = serde_json::to_vec(&body).map_err(|e| DescribeError::other(Error::Json(e)))?;
    let target = format!("SageMaker.{operation}");
    let now = Utc::now();
    let amz_date = sigv4::amz_date(now);

    let mut signed = vec![
      ("content-type", JSON_1_1.to_string()),
      ("host", self.host.clone()),
      ("x-amz-date", amz_date.clone()),
      ("x-amz-target", target.clone()),
    ];
    if let Some(token) = &self.credentials.session_token {
      signed.push(("x-amz-security-token", token.clone()));
    }

    let request = SigningRequest { method: "POST", path: "/", query: "", headers: signed, payload: &payload };
    let authorization = sigv4::authorization(
      &self.credentials,
      &Scope { region: &self.region, service: SERVICE },
      now,
      &request,
    )
    .map_err(DescribeError::other)?;

    let mut builder = self
      .http
      .post(self.endpoint.clone())
      .header(CONTENT_TYPE, JSON_1_1)
      .header("x-amz-date", amz_date)
      .header("x-amz-target", &target)
      .header(AUTHORIZATION, authorization);
    if let Some(token) = &self.credentials.session_token {
      builder = builder.header("x-amz-security-token", token);
    }

    let resp = builder
      .body(payload)
      .send()
      .await
      .map_err(|e| DescribeError::other(Error::Http(e)))?;

    let status = resp.status();
    let error_type = resp
      .headers()
      .get("x-amzn-errortype")
      .and_then(|v| v.to_str().ok())
      .map(str::to_owned);
    let bytes = resp.bytes().await.map_err(|e| DescribeError::other(Error::Http(e)))?;
    debug!(%operation, %status, "control plane response");

    if status.is_success() {
      return serde_json::from_slice(&bytes).map_err(|e| DescribeError::other(Error::Json(e)));
    }
    Err(classify(operation, status, error_type.as_deref(), &bytes))
  }
}

// ─── Error responses ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
  #[serde(rename = "__type", default)]
  code:    Option<String>,
  #[serde(alias = "Message", default)]
  message: String,
}

/// Strip the namespace (`com.amazonaws.sagemaker#`) and the trailing
/// `:http://...` annotation some services append.
fn error_code(raw: &str) -> &str {
  let unqualified = raw.rsplit('#').next().unwrap_or(raw);
  unqualified.split(':').next().unwrap_or(unqualified).trim()
}

fn classify(
  operation: Operation,
  status: StatusCode,
  header_code: Option<&str>,
  body: &[u8],
) -> DescribeError {
  let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
  let code = parsed
    .code
    .as_deref()
    .or(header_code)
    .map(error_code)
    .unwrap_or_default()
    .to_string();

  match code.as_str() {
    "ValidationException" | "ResourceNotFound" => DescribeError::validation(parsed.message),
    "AccessDeniedException" => DescribeError::access_denied(parsed.message),
    _ => DescribeError::other(Error::Service {
      operation,
      status: status.as_u16(),
      code,
      message: parsed.message,
    }),
  }
}

// ─── Trait impl ──────────────────────────────────────────────────────────────

impl ControlPlane for SageMakerClient {
  async fn describe_domain(&self, domain_id: &str) -> Result<DomainDescription, DescribeError> {
    self
      .call(Operation::DescribeDomain, json!({ "DomainId": domain_id }))
      .await
  }

  async fn describe_user_profile(
    &self,
    domain_id: &str,
    user_profile_name: &str,
  ) -> Result<EntityDescription, DescribeError> {
    self
      .call(
        Operation::DescribeUserProfile,
        json!({ "DomainId": domain_id, "UserProfileName": user_profile_name }),
      )
      .await
  }

  async fn describe_space(
    &self,
    domain_id: &str,
    space_name: &str,
  ) -> Result<EntityDescription, DescribeError> {
    self
      .call(
        Operation::DescribeSpace,
        json!({ "DomainId": domain_id, "SpaceName": space_name }),
      )
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn error_code_strips_namespace_and_suffix() {
    assert_eq!(error_code("ValidationException"), "ValidationException");
    assert_eq!(
      error_code("com.amazonaws.sagemaker#AccessDeniedException"),
      "AccessDeniedException"
    );
    assert_eq!(
      error_code("ResourceNotFound:http://internal.amazon.com/coral/"),
      "ResourceNotFound"
    );
  }

  #[test]
  fn classify_falls_back_to_error_type_header() {
    let err = classify(
      Operation::DescribeSpace,
      StatusCode::BAD_REQUEST,
      Some("AccessDeniedException:http://internal"),
      br#"{"message":"denied"}"#,
    );
    assert!(matches!(err, DescribeError::AccessDenied { message } if message == "denied"));
  }

  #[test]
  fn classify_keeps_unknown_codes_unclassified() {
    let err = classify(
      Operation::DescribeDomain,
      StatusCode::BAD_REQUEST,
      None,
      br#"{"__type":"ThrottlingException","Message":"slow down"}"#,
    );
    assert_eq!(
      err.to_string(),
      "remote error: DescribeDomain returned 400: ThrottlingException: slow down"
    );
  }

  #[test]
  fn classify_tolerates_non_json_bodies() {
    let err = classify(Operation::DescribeDomain, StatusCode::BAD_GATEWAY, None, b"<html>");
    assert!(matches!(err, DescribeError::Other(_)));
  }
}
