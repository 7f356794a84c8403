//! CloudFormation custom-resource glue for `homefs`.
//!
//! Parses the custom-resource request event, maps a resolved
//! [`homefs_core::ProfileIdentity`] into the callback response body, and PUTs
//! that body to the pre-signed `ResponseURL`.
//!
//! # Flow
//!
//! ```rust,ignore
//! let event: CustomResourceEvent = serde_json::from_str(&raw)?;
//! let identity = resolver.resolve(event.profile_request()).await?;
//! let body = CallbackResponse::from_identity(&event, &identity, &context);
//! CallbackSender::new()?.send(&event.response_url, &body).await?;
//! ```

pub mod error;
pub mod event;
pub mod response;
pub mod sender;

pub use error::{Error, Result};
pub use event::{CustomResourceEvent, ProfileProperties, RequestType};
pub use response::{CallbackResponse, InvocationContext, ResponseStatus};
pub use sender::CallbackSender;
