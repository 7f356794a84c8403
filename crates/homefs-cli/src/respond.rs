//! `homefs respond`: the custom-resource entry point.

use std::{
  io::Read as _,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use homefs_cfn::{
  CallbackResponse, CallbackSender, CustomResourceEvent, InvocationContext, RequestType,
  ResponseStatus,
};
use homefs_core::{ControlPlane, ProfileResolver};
use serde_json::Map;
use tracing::{error, info};

use crate::settings::{Settings, pick};

#[derive(Args, Debug)]
pub struct RespondArgs {
  /// Path to the event JSON, or `-` for stdin.
  #[arg(long, value_name = "FILE")]
  event: PathBuf,

  /// Log stream name used for the default reason and physical resource id.
  #[arg(long, env = "AWS_LAMBDA_LOG_STREAM_NAME")]
  log_stream_name: Option<String>,

  /// Ask CloudFormation to mask the response data.
  #[arg(long)]
  no_echo: bool,
}

/// Handle one event. `resolver` is the outcome of client setup; a setup
/// error still produces a callback once the event has been read.
pub async fn run<C: ControlPlane>(
  resolver: Result<ProfileResolver<C>>,
  settings: &Settings,
  args: RespondArgs,
) -> Result<()> {
  let raw = read_event(&args.event)?;
  let event = CustomResourceEvent::from_json(&raw).context("parsing custom resource event")?;
  let context = InvocationContext {
    log_stream_name: pick(args.log_stream_name, &settings.log_stream_name)
      .unwrap_or_else(|| "homefs".to_string()),
  };
  info!(
    request_type = ?event.request_type,
    request_id = %event.request_id,
    resource_type = event.resource_type.as_deref().unwrap_or_default(),
    "custom resource event"
  );

  let no_echo = args.no_echo || settings.no_echo.unwrap_or(false);
  let response = build_response(&resolver, &event, &context).await.with_no_echo(no_echo);

  let sender = CallbackSender::new().context("building callback client")?;
  if let Err(err) = sender.send(&event.response_url, &response).await {
    error!(%err, "sending custom resource response failed");
    return Err(err).context("sending custom resource response");
  }
  Ok(())
}

/// The response for `event`. Deletes need no lookup and no client. A setup
/// error or an aborted resolution is reported as `FAILED` so the stack does
/// not hang.
pub async fn build_response<C: ControlPlane>(
  resolver: &Result<ProfileResolver<C>>,
  event: &CustomResourceEvent,
  context: &InvocationContext,
) -> CallbackResponse {
  if event.request_type == RequestType::Delete {
    return CallbackResponse::new(event, context, ResponseStatus::Success, Map::new());
  }

  let failed = |reason: String| {
    CallbackResponse::new(event, context, ResponseStatus::Failed, Map::new()).with_reason(reason)
  };

  let resolver = match resolver {
    Ok(resolver) => resolver,
    Err(err) => {
      let reason = format!("{err:#}");
      error!(%reason, "control plane setup failed");
      return failed(reason);
    }
  };

  match resolver.resolve(event.profile_request()).await {
    Ok(identity) => CallbackResponse::from_identity(event, &identity, context),
    Err(err) => {
      error!(%err, "profile resolution aborted");
      failed(err.to_string())
    }
  }
}

fn read_event(path: &Path) -> Result<String> {
  if path.as_os_str() == "-" {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw).context("reading event from stdin")?;
    return Ok(raw);
  }
  std::fs::read_to_string(path).with_context(|| format!("reading event file {}", path.display()))
}
