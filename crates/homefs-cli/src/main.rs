//! `homefs`: resolve the EFS home identity of a SageMaker Studio user
//! profile or space.
//!
//! # Usage
//!
//! ```
//! homefs show --domain-id d-abc123 --region us-east-1 --user-profile-name alice
//! homefs show --domain-id d-abc123 --space-name shared --json
//! homefs respond --event event.json
//! ```
//!
//! Credentials come from `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` /
//! `AWS_SESSION_TOKEN`.

mod respond;
mod settings;
mod show;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use homefs_core::ProfileResolver;
use homefs_sagemaker::{Credentials, SageMakerClient, SageMakerConfig};
use settings::{Settings, pick};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "homefs", version, about = "Resolve SageMaker Studio EFS home identities")]
struct Cli {
  /// Path to a TOML config file (region, endpoint, log_stream_name, no_echo).
  #[arg(short, long, value_name = "FILE", default_value = "homefs.toml", global = true)]
  config: PathBuf,

  /// AWS region name.
  #[arg(long, env = "AWS_REGION", global = true)]
  region: Option<String>,

  /// Override the SageMaker API endpoint.
  #[arg(long, env = "HOMEFS_ENDPOINT", global = true)]
  endpoint: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Resolve a profile and print its identity fields.
  Show(show::ShowArgs),
  /// Handle a CloudFormation custom-resource event and send the response.
  Respond(respond::RespondArgs),
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;
  let resolver = build_resolver(cli.region, cli.endpoint, &settings);

  match cli.command {
    Command::Show(args) => show::run(&resolver?, args).await,
    // Setup errors are reported through the callback, not by exiting early.
    Command::Respond(args) => respond::run(resolver, &settings, args).await,
  }
}

fn build_resolver(
  region: Option<String>,
  endpoint: Option<String>,
  settings: &Settings,
) -> Result<ProfileResolver<SageMakerClient>> {
  let region = pick(region, &settings.region).context("no region given (--region or AWS_REGION)")?;
  let mut sagemaker = SageMakerConfig::new(region);
  if let Some(endpoint) = pick(endpoint, &settings.endpoint) {
    sagemaker = sagemaker.with_endpoint(endpoint);
  }

  let credentials = Credentials::from_env().context("loading AWS credentials")?;
  let client = SageMakerClient::new(sagemaker, credentials).context("building SageMaker client")?;
  tracing::debug!(endpoint = %client.endpoint(), "using control plane");
  Ok(ProfileResolver::new(Arc::new(client)))
}
