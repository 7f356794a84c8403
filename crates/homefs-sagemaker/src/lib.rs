//! SageMaker control-plane backend for `homefs`.
//!
//! Speaks the AWS JSON 1.1 protocol over [`reqwest`] and signs every request
//! with SigV4. Implements [`homefs_core::ControlPlane`].

mod client;
mod sigv4;

pub mod config;
pub mod error;

pub use client::SageMakerClient;
pub use config::{Credentials, SageMakerConfig};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
