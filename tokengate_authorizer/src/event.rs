//! Gateway authorization events and the policy responses returned for them

use serde::{Deserialize, Serialize};

/// The policy-language version emitted in every policy document
pub const POLICY_VERSION: &str = "2012-10-17";

/// The single gateway action this authorizer ever grants or denies
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

const DENIED_PRINCIPAL: &str = "user";

/// A token-authorizer event as delivered by the gateway
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    /// The raw authorization header value, expected to be `Bearer <token>`
    #[serde(default)]
    pub authorization_token: Option<String>,

    /// The ARN of the method the caller is attempting to invoke
    #[serde(default)]
    pub method_arn: Option<String>,
}

/// The decision returned to the gateway
///
/// Always structurally well-formed: one policy document with one statement
/// over the invoke action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    /// The principal the decision applies to
    pub principal_id: String,

    /// The policy carrying the allow/deny effect
    pub policy_document: PolicyDocument,
}

impl AuthorizerResponse {
    /// An allow decision for the given principal
    pub fn allow(principal: impl Into<String>) -> Self {
        Self::with_effect(principal.into(), Effect::Allow)
    }

    /// The uniform deny decision
    ///
    /// Every failure collapses into this same response; the reason is
    /// visible only in the logs.
    #[must_use]
    pub fn deny() -> Self {
        Self::with_effect(DENIED_PRINCIPAL.to_owned(), Effect::Deny)
    }

    fn with_effect(principal_id: String, effect: Effect) -> Self {
        Self {
            principal_id,
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_owned(),
                statement: vec![Statement {
                    action: INVOKE_ACTION.to_owned(),
                    effect,
                    resource: "*".to_owned(),
                }],
            },
        }
    }
}

/// An IAM-style policy document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// The policy-language version, always [`POLICY_VERSION`]
    pub version: String,

    /// The statements granting or denying invocation
    pub statement: Vec<Statement>,
}

/// A single allow/deny statement over a gateway action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    /// The gateway action the statement covers
    pub action: String,

    /// Whether invocation is allowed or denied
    pub effect: Effect,

    /// The resource the statement covers
    pub resource: String,
}

/// The outcome of an authorization decision
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// The caller may invoke the resource
    Allow,
    /// The caller may not invoke the resource
    Deny,
}
