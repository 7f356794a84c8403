//! AWS Signature Version 4 request signing.
//!
//! Only what a JSON-protocol POST needs: the caller supplies an already
//! canonical query string and the full set of headers to sign.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::{
  config::Credentials,
  error::{Error, Result},
};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// The parts of an HTTP request covered by the signature.
pub(crate) struct SigningRequest<'a> {
  pub method:  &'a str,
  pub path:    &'a str,
  /// Canonical (sorted, encoded) query string; empty for none.
  pub query:   &'a str,
  /// Header name/value pairs; names are lowercased while signing.
  pub headers: Vec<(&'a str, String)>,
  pub payload: &'a [u8],
}

/// Scope of a signature: region and service.
pub(crate) struct Scope<'a> {
  pub region:  &'a str,
  pub service: &'a str,
}

pub(crate) fn amz_date(time: DateTime<Utc>) -> String { time.format("%Y%m%dT%H%M%SZ").to_string() }

/// Compute the `Authorization` header value for `request`.
///
/// `request.headers` must already contain the `x-amz-date` header matching
/// `time`.
pub(crate) fn authorization(
  credentials: &Credentials,
  scope: &Scope<'_>,
  time: DateTime<Utc>,
  request: &SigningRequest<'_>,
) -> Result<String> {
  let date = time.format("%Y%m%d").to_string();
  let credential_scope = format!("{date}/{}/{}/aws4_request", scope.region, scope.service);

  let mut headers: Vec<(String, String)> = request
    .headers
    .iter()
    .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
    .collect();
  headers.sort();

  let canonical_headers: String =
    headers.iter().map(|(name, value)| format!("{name}:{value}\n")).collect();
  let signed_headers = headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>().join(";");

  let canonical_request = format!(
    "{}\n{}\n{}\n{canonical_headers}\n{signed_headers}\n{}",
    request.method,
    request.path,
    request.query,
    hex::encode(Sha256::digest(request.payload)),
  );

  let string_to_sign = format!(
    "{ALGORITHM}\n{}\n{credential_scope}\n{}",
    amz_date(time),
    hex::encode(Sha256::digest(canonical_request.as_bytes())),
  );

  let key = signing_key(&credentials.secret_access_key, &date, scope)?;
  let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

  Ok(format!(
    "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
    credentials.access_key_id,
  ))
}

/// Derive the per-day signing key.
pub(crate) fn signing_key(secret: &str, date: &str, scope: &Scope<'_>) -> Result<Vec<u8>> {
  let k_date = hmac(format!("AWS4{secret}").as_bytes(), date.as_bytes())?;
  let k_region = hmac(&k_date, scope.region.as_bytes())?;
  let k_service = hmac(&k_region, scope.service.as_bytes())?;
  hmac(&k_service, b"aws4_request")
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
  let mut mac = HmacSha256::new_from_slice(key).map_err(|e| Error::Signing(e.to_string()))?;
  mac.update(data);
  Ok(mac.finalize().into_bytes().to_vec())
}
