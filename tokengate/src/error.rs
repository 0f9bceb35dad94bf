//! Errors raised while deciding whether to trust a token

use std::error::Error as StdError;

use thiserror::Error;

/// The `Authorization` header did not carry a usable bearer credential
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum CredentialError {
    /// No credential was presented
    #[error("authorization header is missing or empty")]
    MissingCredential,

    /// A credential was presented, but it is not a bearer credential
    #[error("authorization header is not a bearer credential")]
    MalformedCredential,
}

/// The JWT is malformed and cannot be decomposed into header, payload, and
/// signature sections
#[derive(Debug, Error)]
#[error("malformed JWT")]
pub struct MalformedJwt {
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

pub(crate) const fn malformed_jwt() -> MalformedJwt {
    MalformedJwt { source: None }
}

pub(crate) fn malformed_jwt_source(
    source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
) -> MalformedJwt {
    MalformedJwt {
        source: Some(source.into()),
    }
}

/// An error occurring while validating a token against a key-set entry
#[derive(Debug, Error)]
pub enum JwtVerifyError {
    /// The entry carries no certificate chain to verify against
    #[error("key-set entry has no certificate chain")]
    MissingCertificate,

    /// The entry's leaf certificate could not be parsed
    #[error("certificate rejected")]
    CertificateRejected(#[from] openssl::error::ErrorStack),

    /// The entry's declared algorithm cannot be verified with a certificate
    #[error("key incompatible with algorithm '{alg:?}'")]
    IncompatibleAlgorithm {
        /// The algorithm declared by the key-set entry
        alg: jsonwebtoken::Algorithm,
    },

    /// The signature or standard claims failed validation
    #[error("token rejected by verification key")]
    SignatureInvalid(#[from] jsonwebtoken::errors::Error),
}

pub(crate) const fn incompatible_algorithm(alg: jsonwebtoken::Algorithm) -> JwtVerifyError {
    JwtVerifyError::IncompatibleAlgorithm { alg }
}
