//! Core types and trait definitions for resolving home-filesystem identities
//! of workspace profiles.
//!
//! This crate is deliberately free of HTTP and runtime dependencies. The API
//! client is injected through [`control_plane::ControlPlane`].

pub mod control_plane;
pub mod error;
pub mod identity;
pub mod resolver;

pub use control_plane::{ControlPlane, DomainDescription, EntityDescription, Operation};
pub use error::{DescribeError, ResolveError, Result};
pub use identity::{
  Failure, FailureKind, ProfileIdentity, ProfileRequest, Selector, SelectorKind, Stage,
};
pub use resolver::ProfileResolver;
