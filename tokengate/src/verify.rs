//! Signature validation against a key-set entry's certificate chain
//!
//! The verification key is not published directly: each key-set entry
//! carries an `x5c` certificate chain whose leaf holds the public key. The
//! leaf is reframed as a PEM certificate, its public key extracted, and the
//! token checked against that key using the algorithm the entry declares.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use openssl::x509::X509;
use serde::de::DeserializeOwned;

use crate::{
    error::{self, JwtVerifyError},
    jwks::Jwk,
    jwt::JwtRef,
};

const PEM_CERT_HEADER: &str = "-----BEGIN CERTIFICATE-----";
const PEM_CERT_FOOTER: &str = "-----END CERTIFICATE-----";

/// Wraps a base64 DER certificate body in PEM framing
///
/// Certificate parsers reject bare base64 bodies; the framing must be
/// exactly the literal header line, the body, and the literal footer line,
/// each separated by a single newline.
#[must_use]
pub fn pem_encode_certificate(body: &str) -> String {
    format!("{PEM_CERT_HEADER}\n{body}\n{PEM_CERT_FOOTER}")
}

/// Validates the token against the given key-set entry and returns its
/// claims
///
/// The verification algorithm is pinned to the algorithm the entry
/// declares. The algorithm the token declares for itself is never
/// consulted, so a forged header cannot select a weaker check.
///
/// Beyond the signature itself, the standard temporal checks of the
/// verification routine apply: the token must carry an `exp` claim that has
/// not passed, and must not be used before its `nbf` claim if present.
///
/// # Errors
///
/// Returns an error if the entry carries no certificate chain, if its leaf
/// certificate cannot be parsed, if its algorithm cannot be verified with a
/// certificate, or if the signature or standard claims fail validation.
pub fn verify<C>(token: &JwtRef, key: &Jwk) -> Result<C, JwtVerifyError>
where
    C: DeserializeOwned,
{
    let body = key
        .leaf_certificate()
        .ok_or(JwtVerifyError::MissingCertificate)?;

    let decoding_key = decoding_key(key.algorithm(), &pem_encode_certificate(body))?;

    let mut validation = Validation::new(key.algorithm());
    // Audience enforcement is not part of this gate. With no expected
    // audience configured, the library default rejects any token that
    // carries an `aud` claim, so the check is disabled outright.
    validation.validate_aud = false;

    let data = jsonwebtoken::decode::<C>(token.as_str(), &decoding_key, &validation)?;

    Ok(data.claims)
}

/// Extracts the public key from the PEM certificate and pairs it with the
/// declared algorithm's family
fn decoding_key(alg: Algorithm, pem: &str) -> Result<DecodingKey, JwtVerifyError> {
    let certificate = X509::from_pem(pem.as_bytes())?;
    let public_key = certificate.public_key()?.public_key_to_pem()?;

    let key = match alg {
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(&public_key)?,
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(&public_key)?,
        Algorithm::EdDSA => DecodingKey::from_ed_pem(&public_key)?,
        _ => return Err(error::incompatible_algorithm(alg)),
    };

    Ok(key)
}
