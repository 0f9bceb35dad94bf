//! The remote key-set authority and its verification pipeline

use thiserror::Error;
use tokengate::{
    bearer::extract_bearer,
    error::{CredentialError, JwtVerifyError, MalformedJwt},
    jwt::BasicClaims,
    verify, Jwks,
};

/// A reason authorization could not be granted
///
/// Every variant is terminal for the invocation; nothing is retried
/// internally. The decision boundary collapses all of them into the same
/// deny response and keeps the distinction for the logs.
#[derive(Debug, Error)]
pub enum AuthorityError {
    /// The authorization header did not carry a usable bearer credential
    #[error(transparent)]
    BadCredential(#[from] CredentialError),

    /// The bearer token could not be decomposed into a compact JWT
    #[error(transparent)]
    MalformedJwt(#[from] MalformedJwt),

    /// The authority's published key set could not be fetched
    #[error("key set unavailable")]
    KeySetUnavailable(#[from] reqwest::Error),

    /// No key in the fetched key set matches the token's declared key ID
    ///
    /// Distinct from a transport failure: this indicates key-rotation skew
    /// or an attempted forgery.
    #[error("no matching key found to validate JWT")]
    UnknownKeyId,

    /// The token failed validation against the matched key
    #[error("invalid JWT")]
    SignatureInvalid(#[from] JwtVerifyError),
}

/// A token authority backed by a remotely published JSON Web Key Set
///
/// The key set is fetched fresh inside every [`check`][Authority::check]
/// call, so a rotation at the authority is honored immediately and a stale
/// key can never be served from a cache.
#[derive(Clone, Debug)]
#[must_use]
pub struct Authority {
    jwks_url: String,
    client: reqwest::Client,
}

impl Authority {
    /// Constructs an authority trusting the key set published at `jwks_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(jwks_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tokengate_authorizer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { jwks_url, client })
    }

    /// The URL the key set is fetched from
    #[must_use]
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Runs the verification pipeline over a raw authorization header value
    ///
    /// The stages run strictly in order, and the first failure ends the
    /// invocation: credential extraction, unverified header decomposition,
    /// key-set fetch and selection, then signature validation pinned to the
    /// selected key's algorithm.
    ///
    /// # Errors
    ///
    /// Returns the failing stage's error; see [`AuthorityError`].
    #[tracing::instrument(skip_all, fields(jwks.url = %self.jwks_url))]
    pub async fn check(&self, authorization: Option<&str>) -> Result<BasicClaims, AuthorityError> {
        let token = extract_bearer(authorization)?;

        let headers = token.decompose()?;
        tracing::debug!(
            jwt.alg = %headers.algorithm(),
            jwt.kid = ?headers.key_id(),
            "decoded token header"
        );

        let jwks = self.fetch_key_set().await?;

        let key = headers
            .key_id()
            .and_then(|kid| jwks.get_key(kid))
            .ok_or_else(|| {
                tracing::debug!(jwt.kid = ?headers.key_id(), "unable to find matching key");
                AuthorityError::UnknownKeyId
            })?;

        let claims: BasicClaims = verify::verify(token, key)?;
        tracing::info!(jwt.sub = %claims.subject(), "token verified");

        Ok(claims)
    }

    async fn fetch_key_set(&self) -> Result<Jwks, reqwest::Error> {
        let response = self.client.get(&self.jwks_url).send().await?;
        response.error_for_status_ref()?;

        let jwks = response.json::<Jwks>().await?;
        tracing::info!(jwks.keys = jwks.keys().len(), "JWKS fetched");

        Ok(jwks)
    }
}
