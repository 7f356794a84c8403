//! PUTs a [`CallbackResponse`] to the pre-signed response URL.

use std::time::Duration;

use reqwest::{
  Client, StatusCode,
  header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use tracing::{debug, info};

use crate::{
  error::{Error, Result},
  response::CallbackResponse,
};

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct CallbackSender {
  client: Client,
}

impl CallbackSender {
  pub fn new() -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client })
  }

  /// Send `response` once. Non-2xx answers are returned as
  /// [`Error::Rejected`]; nothing is retried.
  pub async fn send(&self, url: &str, response: &CallbackResponse) -> Result<StatusCode> {
    let body = serde_json::to_vec(response)?;
    debug!(url, body = %String::from_utf8_lossy(&body), "response body");

    // The pre-signed S3 URL is signed without a content type.
    let resp = self
      .client
      .put(url)
      .header(CONTENT_TYPE, "")
      .header(CONTENT_LENGTH, body.len())
      .body(body)
      .send()
      .await?;

    let status = resp.status();
    info!(%status, logical_resource_id = %response.logical_resource_id, "custom resource response sent");
    if !status.is_success() {
      return Err(Error::Rejected(status.as_u16()));
    }
    Ok(status)
  }
}

#[cfg(test)]
mod tests {
  use httpmock::prelude::*;
  use serde_json::Map;

  use super::*;
  use crate::response::ResponseStatus;

  fn response() -> CallbackResponse {
    CallbackResponse {
      status:               ResponseStatus::Success,
      reason:               "ok".into(),
      physical_resource_id: "phys".into(),
      stack_id:             "stack-1".into(),
      request_id:           "req-1".into(),
      logical_resource_id:  "AliceProfile".into(),
      no_echo:              false,
      data:                 Map::new(),
    }
  }

  #[tokio::test]
  async fn puts_json_body_to_response_url() {
    let server = MockServer::start();
    let body = response();
    let mock = server.mock(|when, then| {
      when.method(Method::PUT)
        .path("/callback")
        .json_body(serde_json::to_value(&body).unwrap());
      then.status(200);
    });

    let status = CallbackSender::new()
      .unwrap()
      .send(&server.url("/callback"), &body)
      .await
      .unwrap();

    mock.assert();
    assert_eq!(status, StatusCode::OK);
  }

  #[tokio::test]
  async fn rejected_callback_is_an_error_and_not_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
      when.method(Method::PUT).path("/callback");
      then.status(403);
    });

    let err = CallbackSender::new()
      .unwrap()
      .send(&server.url("/callback"), &response())
      .await
      .unwrap_err();

    assert!(matches!(err, Error::Rejected(403)));
    assert_eq!(mock.calls(), 1);
  }
}
