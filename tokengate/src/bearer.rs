//! Extraction of bearer credentials from `Authorization` header values

use crate::{error::CredentialError, jwt::JwtRef};

const BEARER_SCHEME: &str = "bearer ";

/// Extracts the bearer token from a raw `Authorization` header value
///
/// The scheme is matched case-insensitively and must be followed by a single
/// space. The token is taken as the second whitespace-delimited field of the
/// header; any further fields are ignored rather than rejected. No
/// validation of the token's internal structure happens here.
///
/// # Errors
///
/// Returns [`CredentialError::MissingCredential`] if the header is absent or
/// empty, and [`CredentialError::MalformedCredential`] if it does not begin
/// with the bearer scheme.
pub fn extract_bearer(header: Option<&str>) -> Result<&JwtRef, CredentialError> {
    let header = header
        .filter(|h| !h.is_empty())
        .ok_or(CredentialError::MissingCredential)?;

    let scheme = header
        .get(..BEARER_SCHEME.len())
        .ok_or(CredentialError::MalformedCredential)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(CredentialError::MalformedCredential);
    }

    let token = header.split(' ').nth(1).unwrap_or("");

    Ok(JwtRef::from_str(token))
}
