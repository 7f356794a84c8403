//! The resolved profile record and the request that produces it.
//!
//! A [`ProfileIdentity`] is built by exactly one resolution run and is
//! read-only afterwards: its fields are private and exposed through accessors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::control_plane::Operation;

// ─── Selector ────────────────────────────────────────────────────────────────

/// Which kind of entity the second lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectorKind {
  Space,
  UserProfile,
}

impl fmt::Display for SelectorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Space => "space",
      Self::UserProfile => "user profile",
    })
  }
}

/// The entity whose filesystem uid is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Selector {
  Space(String),
  UserProfile(String),
}

impl Selector {
  /// Pick the selector from the two optional names. A space name wins over a
  /// user-profile name; empty names count as absent.
  pub fn choose(space_name: Option<&str>, user_profile_name: Option<&str>) -> Option<Self> {
    fn present(name: Option<&str>) -> Option<String> {
      name.filter(|n| !n.is_empty()).map(str::to_owned)
    }

    present(space_name)
      .map(Self::Space)
      .or_else(|| present(user_profile_name).map(Self::UserProfile))
  }

  pub fn kind(&self) -> SelectorKind {
    match self {
      Self::Space(_) => SelectorKind::Space,
      Self::UserProfile(_) => SelectorKind::UserProfile,
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Self::Space(name) | Self::UserProfile(name) => name,
    }
  }

  /// The describe operation used to look this selector up.
  pub fn operation(&self) -> Operation {
    match self {
      Self::Space(_) => Operation::DescribeSpace,
      Self::UserProfile(_) => Operation::DescribeUserProfile,
    }
  }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// Inputs to a resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
  pub domain_id:         String,
  pub space_name:        Option<String>,
  pub user_profile_name: Option<String>,
  /// Passed through to the record, never looked up.
  pub role_name:         Option<String>,
  /// Passed through to the record, never looked up (e.g. an SSO user value).
  pub identity_label:    Option<String>,
}

impl ProfileRequest {
  pub fn new(domain_id: impl Into<String>) -> Self {
    Self { domain_id: domain_id.into(), ..Self::default() }
  }

  pub fn space(mut self, name: impl Into<String>) -> Self {
    self.space_name = Some(name.into());
    self
  }

  pub fn user_profile(mut self, name: impl Into<String>) -> Self {
    self.user_profile_name = Some(name.into());
    self
  }

  pub fn role(mut self, name: impl Into<String>) -> Self {
    self.role_name = Some(name.into());
    self
  }

  pub fn identity_label(mut self, label: impl Into<String>) -> Self {
    self.identity_label = Some(label.into());
    self
  }

  pub fn selector(&self) -> Option<Selector> {
    Selector::choose(self.space_name.as_deref(), self.user_profile_name.as_deref())
  }
}

// ─── Resolution state ────────────────────────────────────────────────────────

/// Where a resolution run stopped.
///
/// `Init → DomainResolved → IdentityResolved` on success; `Failed` can be
/// entered from `Init` or `DomainResolved` and is never left. A run without a
/// selector stops at `DomainResolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
  Init,
  DomainResolved,
  IdentityResolved,
  Failed,
}

/// The classified cause of a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
  Validation,
  AccessDenied,
}

/// Why a record is marked failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
  pub operation: Operation,
  pub kind:      FailureKind,
  /// The message reported by the remote API.
  pub message:   String,
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// Storage identity of a user profile or space within a domain.
///
/// A record without a selector is left at [`Stage::DomainResolved`] with an
/// empty filesystem uid and is *not* marked failed. Callers that need a uid
/// should check [`ProfileIdentity::stage`] rather than [`ProfileIdentity::failed`]
/// alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileIdentity {
  domain_id:          String,
  domain_name:        String,
  home_filesystem_id: String,
  selector:           Option<Selector>,
  role_name:          Option<String>,
  identity_label:     Option<String>,
  filesystem_uid:     String,
  stage:              Stage,
  failure:            Option<Failure>,
}

impl ProfileIdentity {
  /// A fresh record in [`Stage::Init`].
  pub(crate) fn init(request: ProfileRequest) -> Self {
    let selector = request.selector();
    Self {
      domain_id: request.domain_id,
      domain_name: String::new(),
      home_filesystem_id: String::new(),
      selector,
      role_name: request.role_name,
      identity_label: request.identity_label,
      filesystem_uid: String::new(),
      stage: Stage::Init,
      failure: None,
    }
  }

  pub(crate) fn domain_resolved(&mut self, domain_name: String, home_filesystem_id: String) {
    debug_assert_eq!(self.stage, Stage::Init);
    self.domain_name = domain_name;
    self.home_filesystem_id = home_filesystem_id;
    self.stage = Stage::DomainResolved;
  }

  pub(crate) fn identity_resolved(&mut self, filesystem_uid: String) {
    debug_assert_eq!(self.stage, Stage::DomainResolved);
    self.filesystem_uid = filesystem_uid;
    self.stage = Stage::IdentityResolved;
  }

  pub(crate) fn fail(mut self, failure: Failure) -> Self {
    self.stage = Stage::Failed;
    self.failure = Some(failure);
    self
  }

  pub fn domain_id(&self) -> &str { &self.domain_id }

  /// Empty unless the domain lookup succeeded.
  pub fn domain_name(&self) -> &str { &self.domain_name }

  /// Empty unless the domain lookup succeeded.
  pub fn home_filesystem_id(&self) -> &str { &self.home_filesystem_id }

  pub fn selector(&self) -> Option<&Selector> { self.selector.as_ref() }

  pub fn selector_kind(&self) -> Option<SelectorKind> {
    self.selector.as_ref().map(Selector::kind)
  }

  pub fn selector_name(&self) -> Option<&str> {
    self.selector.as_ref().map(Selector::name)
  }

  pub fn role_name(&self) -> Option<&str> { self.role_name.as_deref() }

  pub fn identity_label(&self) -> Option<&str> { self.identity_label.as_deref() }

  /// Empty unless the selector lookup succeeded.
  pub fn filesystem_uid(&self) -> &str { &self.filesystem_uid }

  pub fn stage(&self) -> Stage { self.stage }

  pub fn failed(&self) -> bool { self.stage == Stage::Failed }

  pub fn failure(&self) -> Option<&Failure> { self.failure.as_ref() }
}
