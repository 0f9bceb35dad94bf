//! The gateway-facing decision boundary

use crate::{
    authority::Authority,
    event::{AuthorizerRequest, AuthorizerResponse},
};

/// Produces the authorization decision for a gateway event
///
/// This is the one total function in the system: every internal failure is
/// caught here and converted into the uniform deny response, so the gateway
/// always receives a well-formed decision and never an error. Which stage
/// failed is emitted to the logs and never to the caller.
pub async fn authorize(authority: &Authority, event: &AuthorizerRequest) -> AuthorizerResponse {
    match authority.check(event.authorization_token.as_deref()).await {
        Ok(claims) => {
            tracing::info!(jwt.sub = %claims.subject(), "authorization granted");
            AuthorizerResponse::allow(claims.subject().as_str())
        }
        Err(err) => {
            let error: &dyn std::error::Error = &err;
            tracing::error!(error, "authorization denied");
            AuthorizerResponse::deny()
        }
    }
}
