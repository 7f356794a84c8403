//! The custom-resource request event.

use homefs_core::ProfileRequest;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
  Create,
  Update,
  Delete,
}

/// Resource properties accepted by the profile custom resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileProperties {
  #[serde(default)]
  pub domain_id:                 String,
  #[serde(default)]
  pub user_profile_name:         Option<String>,
  #[serde(default)]
  pub space_name:                Option<String>,
  #[serde(default)]
  pub role_name:                 Option<String>,
  #[serde(default)]
  pub single_sign_on_user_value: Option<String>,
}

impl From<&ProfileProperties> for ProfileRequest {
  fn from(props: &ProfileProperties) -> Self {
    ProfileRequest {
      domain_id:         props.domain_id.clone(),
      space_name:        props.space_name.clone(),
      user_profile_name: props.user_profile_name.clone(),
      role_name:         props.role_name.clone(),
      identity_label:    props.single_sign_on_user_value.clone(),
    }
  }
}

/// A CloudFormation custom-resource request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
  pub request_type:         RequestType,
  /// Pre-signed URL the response body is PUT to.
  #[serde(rename = "ResponseURL")]
  pub response_url:         String,
  pub stack_id:             String,
  pub request_id:           String,
  pub logical_resource_id:  String,
  /// Present on `Update` and `Delete`.
  #[serde(default)]
  pub physical_resource_id: Option<String>,
  #[serde(default)]
  pub resource_type:        Option<String>,
  #[serde(default)]
  pub resource_properties:  ProfileProperties,
}

impl CustomResourceEvent {
  pub fn from_json(raw: &str) -> Result<Self> { Ok(serde_json::from_str(raw)?) }

  pub fn profile_request(&self) -> ProfileRequest { (&self.resource_properties).into() }
}
