//! Profile resolution: domain lookup, then space or user-profile lookup.

use std::sync::Arc;

use tracing::{Dispatch, Instrument as _, debug, debug_span, error, instrument::WithSubscriber as _};

use crate::{
  control_plane::{ControlPlane, Operation},
  error::{DescribeError, ResolveError, Result},
  identity::{Failure, FailureKind, ProfileIdentity, ProfileRequest, Selector},
};

/// Resolves [`ProfileIdentity`] records against a [`ControlPlane`].
///
/// The resolver holds no state between runs. Log events go to the injected
/// [`Dispatch`] if one was supplied, otherwise to the caller's current
/// subscriber.
pub struct ProfileResolver<C> {
  client:   Arc<C>,
  dispatch: Option<Dispatch>,
}

impl<C> Clone for ProfileResolver<C> {
  fn clone(&self) -> Self {
    Self { client: Arc::clone(&self.client), dispatch: self.dispatch.clone() }
  }
}

impl<C: ControlPlane> ProfileResolver<C> {
  pub fn new(client: Arc<C>) -> Self { Self { client, dispatch: None } }

  /// Route this resolver's log events to `dispatch` for the duration of each
  /// [`resolve`](Self::resolve) call.
  pub fn with_dispatch(mut self, dispatch: impl Into<Dispatch>) -> Self {
    self.dispatch = Some(dispatch.into());
    self
  }

  /// Run one resolution.
  ///
  /// Validation and access-denied errors are logged and recorded on the
  /// returned record. Any other remote error aborts the run and is returned
  /// as [`ResolveError::Remote`].
  pub async fn resolve(&self, request: ProfileRequest) -> Result<ProfileIdentity> {
    let run = async move {
      let span = debug_span!("resolve_profile", domain_id = %request.domain_id);
      self.run(request).instrument(span).await
    };
    match &self.dispatch {
      Some(dispatch) => run.with_subscriber(dispatch.clone()).await,
      None => run.await,
    }
  }

  async fn run(&self, request: ProfileRequest) -> Result<ProfileIdentity> {
    if request.domain_id.trim().is_empty() {
      return Err(ResolveError::EmptyDomainId);
    }

    let mut identity = ProfileIdentity::init(request);

    // ── Stage 1: domain ───────────────────────────────────────────────────
    let described = self.client.describe_domain(identity.domain_id()).await;
    let domain = match described {
      Ok(domain) => domain,
      Err(DescribeError::Validation { message }) => {
        error!(
          domain_id = identity.domain_id(),
          "could not get domain {} metadata: {message}",
          identity.domain_id()
        );
        let failure = Failure {
          operation: Operation::DescribeDomain,
          kind: FailureKind::Validation,
          message,
        };
        return Ok(identity.fail(failure));
      }
      Err(source) => {
        return Err(ResolveError::Remote { operation: Operation::DescribeDomain, source });
      }
    };
    debug!(?domain, "domain metadata");
    identity.domain_resolved(domain.domain_name, domain.home_efs_file_system_id);

    // ── Stage 2: space or user profile ────────────────────────────────────
    let Some(selector) = identity.selector().cloned() else {
      debug!("no space or user profile name given, skipping uid lookup");
      return Ok(identity);
    };

    let operation = selector.operation();
    let described = match &selector {
      Selector::Space(name) => self.client.describe_space(identity.domain_id(), name).await,
      Selector::UserProfile(name) => {
        self.client.describe_user_profile(identity.domain_id(), name).await
      }
    };

    let (kind, message) = match described {
      Ok(entity) => {
        debug!(?entity, %operation, "{} metadata", selector.name());
        identity.identity_resolved(entity.home_efs_file_system_uid);
        return Ok(identity);
      }
      Err(DescribeError::Validation { message }) => {
        error!(
          %operation,
          name = selector.name(),
          "could not get {kind} {} metadata: {message}",
          selector.name(),
          kind = selector.kind()
        );
        (FailureKind::Validation, message)
      }
      Err(DescribeError::AccessDenied { message }) => {
        error!(
          %operation,
          name = selector.name(),
          "could not get {kind} {} metadata because access denied for {operation}: {message}",
          selector.name(),
          kind = selector.kind()
        );
        (FailureKind::AccessDenied, message)
      }
      Err(source) => return Err(ResolveError::Remote { operation, source }),
    };

    Ok(identity.fail(Failure { operation, kind, message }))
  }
}

impl ProfileIdentity {
  /// Build a record by running one resolution against `client`.
  pub async fn resolve<C: ControlPlane>(client: Arc<C>, request: ProfileRequest) -> Result<Self> {
    ProfileResolver::new(client).resolve(request).await
  }
}
