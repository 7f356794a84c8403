//! `homefs show`

use std::fmt::Write as _;

use anyhow::{Result, bail};
use clap::Args;
use homefs_core::{ControlPlane, ProfileIdentity, ProfileRequest, ProfileResolver, SelectorKind};

#[derive(Args, Debug)]
pub struct ShowArgs {
  /// SageMaker Studio domain id.
  #[arg(long)]
  domain_id: String,

  /// SageMaker user profile name.
  #[arg(long)]
  user_profile_name: Option<String>,

  /// SSO user value (e.g. email address); printed, not looked up.
  #[arg(long)]
  single_sign_on_user_value: Option<String>,

  /// SageMaker space name; takes precedence over --user-profile-name.
  #[arg(long)]
  space_name: Option<String>,

  /// Notebook execution role name; printed, not looked up.
  #[arg(long)]
  role_name: Option<String>,

  /// Print the record as JSON.
  #[arg(long)]
  json: bool,
}

impl From<ShowArgs> for ProfileRequest {
  fn from(args: ShowArgs) -> Self {
    ProfileRequest {
      domain_id:         args.domain_id,
      space_name:        args.space_name,
      user_profile_name: args.user_profile_name,
      role_name:         args.role_name,
      identity_label:    args.single_sign_on_user_value,
    }
  }
}

pub async fn run<C: ControlPlane>(resolver: &ProfileResolver<C>, args: ShowArgs) -> Result<()> {
  let json = args.json;
  let identity = resolver.resolve(args.into()).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&identity)?);
  } else {
    print!("{}", render(&identity));
  }

  if let Some(failure) = identity.failure() {
    bail!("{} failed: {}", failure.operation, failure.message);
  }
  Ok(())
}

/// Human-readable listing of the record fields.
pub fn render(identity: &ProfileIdentity) -> String {
  let selector_label = match identity.selector_kind() {
    Some(SelectorKind::Space) => "space_name",
    Some(SelectorKind::UserProfile) | None => "profile_name",
  };

  let mut out = String::new();
  let rows = [
    ("user", identity.identity_label().unwrap_or_default()),
    ("role_name", identity.role_name().unwrap_or_default()),
    (selector_label, identity.selector_name().unwrap_or_default()),
    ("domain_id", identity.domain_id()),
    ("domain_name", identity.domain_name()),
    ("home_efs_id", identity.home_filesystem_id()),
    ("efs_uid", identity.filesystem_uid()),
  ];
  for (label, value) in rows {
    let _ = writeln!(out, "{label:<12}: {value}");
  }
  out
}
