//! `SageMakerClient` tests against a mock HTTP endpoint.

use std::sync::Arc;

use homefs_core::{
  ControlPlane, DescribeError, ProfileRequest, ProfileResolver, SelectorKind,
};
use httpmock::prelude::*;
use serde_json::json;

use crate::{Credentials, Error, SageMakerClient, SageMakerConfig};

fn client_for(server: &MockServer, credentials: Credentials) -> SageMakerClient {
  let config = SageMakerConfig::new("us-west-2").with_endpoint(server.base_url());
  SageMakerClient::new(config, credentials).expect("client")
}

fn test_client(server: &MockServer) -> SageMakerClient {
  client_for(server, Credentials::new("AKIDTEST", "secret"))
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn default_endpoint_is_regional() {
  let config = SageMakerConfig::new("eu-central-1");
  assert_eq!(
    config.endpoint_url().unwrap(),
    "https://api.sagemaker.eu-central-1.amazonaws.com"
  );
}

#[test]
fn empty_region_is_rejected() {
  let result = SageMakerClient::new(SageMakerConfig::new(""), Credentials::new("a", "b"));
  assert!(matches!(result, Err(Error::MissingRegion)));
}

#[test]
fn malformed_endpoint_is_rejected() {
  let config = SageMakerConfig::new("us-east-1").with_endpoint("not a url");
  let result = SageMakerClient::new(config, Credentials::new("a", "b"));
  assert!(matches!(result, Err(Error::InvalidEndpoint(_))));
}

#[test]
fn credentials_debug_redacts_secrets() {
  let creds = Credentials::new("AKID", "super-secret").with_session_token("tok");
  let rendered = format!("{creds:?}");
  assert!(rendered.contains("AKID"));
  assert!(!rendered.contains("super-secret"));
  assert!(!rendered.contains("tok\""));
}

// ─── Describe calls ──────────────────────────────────────────────────────────

#[tokio::test]
async fn describe_domain_sends_signed_json_request() {
  let server = MockServer::start();
  let mock = server.mock(|when, then| {
    when.method(Method::POST)
      .path("/")
      .header("content-type", "application/x-amz-json-1.1")
      .header("x-amz-target", "SageMaker.DescribeDomain")
      .header_exists("x-amz-date")
      .header_exists("authorization")
      .json_body(json!({ "DomainId": "d-123" }));
    then.status(200).json_body(json!({
      "DomainId": "d-123",
      "DomainName": "studio1",
      "HomeEfsFileSystemId": "fs-1",
      "Status": "InService"
    }));
  });

  let domain = test_client(&server).describe_domain("d-123").await.unwrap();

  mock.assert();
  assert_eq!(domain.domain_name, "studio1");
  assert_eq!(domain.home_efs_file_system_id, "fs-1");
}

#[tokio::test]
async fn session_token_is_forwarded() {
  let server = MockServer::start();
  let mock = server.mock(|when, then| {
    when.method(Method::POST)
      .header("x-amz-target", "SageMaker.DescribeSpace")
      .header("x-amz-security-token", "session-tok")
      .json_body(json!({ "DomainId": "d-123", "SpaceName": "team" }));
    then.status(200).json_body(json!({ "HomeEfsFileSystemUid": "200001" }));
  });

  let client = client_for(
    &server,
    Credentials::new("AKIDTEST", "secret").with_session_token("session-tok"),
  );
  let space = client.describe_space("d-123", "team").await.unwrap();

  mock.assert();
  assert_eq!(space.home_efs_file_system_uid, "200001");
}

#[tokio::test]
async fn validation_exception_is_classified() {
  let server = MockServer::start();
  server.mock(|when, then| {
    when.method(Method::POST).header("x-amz-target", "SageMaker.DescribeUserProfile");
    then.status(400).json_body(json!({
      "__type": "ValidationException",
      "message": "User profile ghost does not exist"
    }));
  });

  let err = test_client(&server)
    .describe_user_profile("d-123", "ghost")
    .await
    .unwrap_err();

  assert!(matches!(
    err,
    DescribeError::Validation { message } if message == "User profile ghost does not exist"
  ));
}

#[tokio::test]
async fn resource_not_found_counts_as_validation() {
  let server = MockServer::start();
  server.mock(|when, then| {
    when.method(Method::POST).header("x-amz-target", "SageMaker.DescribeDomain");
    then.status(400).json_body(json!({
      "__type": "com.amazonaws.sagemaker#ResourceNotFound",
      "Message": "Domain not found"
    }));
  });

  let err = test_client(&server).describe_domain("d-missing").await.unwrap_err();

  assert!(matches!(err, DescribeError::Validation { .. }));
}

#[tokio::test]
async fn access_denied_exception_is_classified() {
  let server = MockServer::start();
  server.mock(|when, then| {
    when.method(Method::POST).header("x-amz-target", "SageMaker.DescribeSpace");
    then.status(400).json_body(json!({
      "__type": "AccessDeniedException",
      "Message": "not authorized to perform: sagemaker:DescribeSpace"
    }));
  });

  let err = test_client(&server).describe_space("d-123", "team").await.unwrap_err();

  assert!(matches!(err, DescribeError::AccessDenied { .. }));
}

#[tokio::test]
async fn server_error_is_unclassified() {
  let server = MockServer::start();
  server.mock(|when, then| {
    when.method(Method::POST);
    then.status(500).json_body(json!({ "__type": "InternalFailure", "message": "boom" }));
  });

  let err = test_client(&server).describe_domain("d-123").await.unwrap_err();

  assert!(matches!(err, DescribeError::Other(_)));
}

#[tokio::test]
async fn missing_response_field_is_unclassified() {
  let server = MockServer::start();
  server.mock(|when, then| {
    when.method(Method::POST);
    then.status(200).json_body(json!({ "DomainName": "studio1" }));
  });

  let err = test_client(&server).describe_domain("d-123").await.unwrap_err();

  assert!(matches!(err, DescribeError::Other(_)));
}

// ─── Resolver over HTTP ──────────────────────────────────────────────────────

#[tokio::test]
async fn resolver_runs_domain_then_space_lookup() {
  let server = MockServer::start();
  let domain = server.mock(|when, then| {
    when.method(Method::POST).header("x-amz-target", "SageMaker.DescribeDomain");
    then.status(200).json_body(json!({
      "DomainName": "studio1",
      "HomeEfsFileSystemId": "fs-1"
    }));
  });
  let space = server.mock(|when, then| {
    when.method(Method::POST).header("x-amz-target", "SageMaker.DescribeSpace");
    then.status(200).json_body(json!({ "HomeEfsFileSystemUid": "u-1" }));
  });
  let profile = server.mock(|when, then| {
    when.method(Method::POST).header("x-amz-target", "SageMaker.DescribeUserProfile");
    then.status(200).json_body(json!({ "HomeEfsFileSystemUid": "unused" }));
  });

  let resolver = ProfileResolver::new(Arc::new(test_client(&server)));
  let identity = resolver
    .resolve(ProfileRequest::new("d-123").space("team").user_profile("alice"))
    .await
    .unwrap();

  assert_eq!(domain.calls(), 1);
  assert_eq!(space.calls(), 1);
  assert_eq!(profile.calls(), 0);
  assert!(!identity.failed());
  assert_eq!(identity.selector_kind(), Some(SelectorKind::Space));
  assert_eq!(identity.domain_name(), "studio1");
  assert_eq!(identity.home_filesystem_id(), "fs-1");
  assert_eq!(identity.filesystem_uid(), "u-1");
}

#[tokio::test]
async fn resolver_stops_after_domain_validation_error() {
  let server = MockServer::start();
  server.mock(|when, then| {
    when.method(Method::POST).header("x-amz-target", "SageMaker.DescribeDomain");
    then.status(400).json_body(json!({
      "__type": "ValidationException",
      "message": "Domain d-bogus does not exist"
    }));
  });
  let profile = server.mock(|when, then| {
    when.method(Method::POST).header("x-amz-target", "SageMaker.DescribeUserProfile");
    then.status(200).json_body(json!({ "HomeEfsFileSystemUid": "unused" }));
  });

  let identity = ProfileResolver::new(Arc::new(test_client(&server)))
    .resolve(ProfileRequest::new("d-bogus").user_profile("alice"))
    .await
    .unwrap();

  assert!(identity.failed());
  assert_eq!(identity.home_filesystem_id(), "");
  assert_eq!(profile.calls(), 0);
}
