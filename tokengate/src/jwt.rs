//! Compact tokens and their untrusted decomposition
//!
//! A compact JWT appears as three base64url-encoded sections separated by
//! `.`: header, payload, and signature. The header tells a verifier which
//! key the token claims to be signed with, and so must be inspected before
//! the signature can be checked; nothing read during that inspection is
//! trusted until verification succeeds.

use aliri_braid::braid;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use crate::{
    error::{self, MalformedJwt},
    jwks::{KeyId, KeyIdRef},
};

/// An encoded JSON Web Token
#[braid(serde, ref_doc = "A borrowed reference to an encoded JSON Web Token ([`Jwt`])")]
pub struct Jwt;

/// The subject of a token's claims
#[braid(serde, ref_doc = "A borrowed reference to a [`Subject`]")]
pub struct Subject;

macro_rules! expect_three {
    ($iter:expr) => {{
        let mut i = $iter;
        match (i.next(), i.next(), i.next(), i.next()) {
            (Some(first), Some(second), Some(third), None) => Some((first, second, third)),
            _ => None,
        }
    }};
}

impl JwtRef {
    /// Decomposes the compact token and decodes its header section without
    /// verifying the signature
    ///
    /// The result is suitable only for selecting a verification key; it
    /// carries no authenticity guarantee whatsoever.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not syntactically a three-section
    /// compact token or if its header section is not valid base64url-encoded
    /// JSON.
    pub fn decompose(&self) -> Result<Headers, MalformedJwt> {
        let (header, _payload, _signature) =
            expect_three!(self.as_str().split('.')).ok_or_else(error::malformed_jwt)?;

        let raw = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(error::malformed_jwt_source)?;

        serde_json::from_slice(&raw).map_err(error::malformed_jwt_source)
    }
}

/// The headers of a JWT, decoded without signature verification
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Headers {
    alg: String,
    #[serde(default)]
    kid: Option<KeyId>,
}

impl Headers {
    /// The algorithm the token claims to be signed with
    ///
    /// Informational only. Verification always pins the algorithm declared
    /// by the resolved key-set entry, not this value, so a forged header
    /// cannot downgrade the check.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.alg
    }

    /// The ID of the key the token claims to be signed with
    #[must_use]
    pub fn key_id(&self) -> Option<&KeyIdRef> {
        self.kid.as_deref()
    }
}

/// The claims of a token that has passed signature validation
///
/// Values of this type are only produced by [`crate::verify::verify`] after
/// a successful cryptographic check.
#[derive(Clone, Debug, Deserialize)]
pub struct BasicClaims {
    sub: Subject,
    #[serde(flatten)]
    additional: serde_json::Map<String, serde_json::Value>,
}

impl BasicClaims {
    /// The subject of the token
    #[must_use]
    pub fn subject(&self) -> &SubjectRef {
        &self.sub
    }

    /// Any further claims the issuer included, as issued
    #[must_use]
    pub fn additional(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.additional
    }
}
