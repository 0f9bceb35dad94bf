//! End-to-end decisions against a locally served key set
//!
//! The fixture certificate and tokens mirror the ones in the core crate:
//! real RSA-2048 material, with RS256 signatures produced by the
//! certificate's private key.

use std::future::IntoFuture;

use axum::{http::StatusCode, routing::get, Json, Router};
use color_eyre::Result;
use serde_json::{json, Value};
use tokengate_authorizer::{
    authorize, Authority, AuthorityError, AuthorizerRequest, AuthorizerResponse, Effect,
};

const TEST_KEY_ID: &str = "aUj7NbCJkDDBSK2d";
const OTHER_KEY_ID: &str = "zV93wXo2pQ5fH8Lm";
const CERT_B64: &str = include_str!("data/cert.b64");

const TOKEN: &str = include_str!("data/token-good.jwt");
const TOKEN_NO_KID: &str = include_str!("data/token-no-kid.jwt");
const TOKEN_UNKNOWN_KID: &str = include_str!("data/token-unknown-kid.jwt");
const TOKEN_BAD_SIGNATURE: &str = include_str!("data/token-corrupt.jwt");

const JWKS_PATH: &str = "/.well-known/jwks.json";

fn key(kid: &str) -> Value {
    json!({ "kid": kid, "kty": "RSA", "use": "sig", "alg": "RS256", "x5c": [CERT_B64] })
}

fn bearer(token: &str) -> AuthorizerRequest {
    AuthorizerRequest {
        authorization_token: Some(format!("Bearer {token}")),
        method_arn: None,
    }
}

async fn spawn(app: Router) -> Result<Authority> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(axum::serve(listener, app).into_future());

    Ok(Authority::new(format!("http://{addr}{JWKS_PATH}"))?)
}

async fn serve_jwks(document: Value) -> Result<Authority> {
    let app = Router::new().route(
        JWKS_PATH,
        get(move || {
            let document = document.clone();
            async move { Json(document) }
        }),
    );

    spawn(app).await
}

#[tokio::test]
async fn allows_a_correctly_signed_token() -> Result<()> {
    let authority = serve_jwks(json!({ "keys": [key(TEST_KEY_ID)] })).await?;

    let response = authorize(&authority, &bearer(TOKEN)).await;

    assert_eq!(response.principal_id, "user|0a1b2c3d");
    assert_eq!(response.policy_document.version, "2012-10-17");

    let statement = &response.policy_document.statement[0];
    assert_eq!(statement.effect, Effect::Allow);
    assert_eq!(statement.action, "execute-api:Invoke");
    assert_eq!(statement.resource, "*");
    Ok(())
}

#[tokio::test]
async fn selection_does_not_depend_on_published_key_order() -> Result<()> {
    for document in [
        json!({ "keys": [key(TEST_KEY_ID), key(OTHER_KEY_ID)] }),
        json!({ "keys": [key(OTHER_KEY_ID), key(TEST_KEY_ID)] }),
    ] {
        let authority = serve_jwks(document).await?;
        let response = authorize(&authority, &bearer(TOKEN)).await;
        assert_eq!(response.policy_document.statement[0].effect, Effect::Allow);
    }
    Ok(())
}

#[tokio::test]
async fn denies_without_a_credential() -> Result<()> {
    let authority = serve_jwks(json!({ "keys": [key(TEST_KEY_ID)] })).await?;

    for authorization_token in [None, Some(String::new())] {
        let event = AuthorizerRequest {
            authorization_token,
            method_arn: None,
        };
        let response = authorize(&authority, &event).await;
        assert_eq!(response, AuthorizerResponse::deny());
        assert_eq!(response.principal_id, "user");
    }
    Ok(())
}

#[tokio::test]
async fn denies_a_non_bearer_credential() -> Result<()> {
    let authority = serve_jwks(json!({ "keys": [key(TEST_KEY_ID)] })).await?;

    let event = AuthorizerRequest {
        authorization_token: Some("Basic dXNlcjpwYXNz".to_owned()),
        method_arn: None,
    };
    assert_eq!(authorize(&authority, &event).await, AuthorizerResponse::deny());
    Ok(())
}

#[tokio::test]
async fn denies_an_unknown_key_id() -> Result<()> {
    let authority = serve_jwks(json!({ "keys": [key(TEST_KEY_ID)] })).await?;

    let err = authority
        .check(Some(&format!("Bearer {TOKEN_UNKNOWN_KID}")))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthorityError::UnknownKeyId));

    let response = authorize(&authority, &bearer(TOKEN_UNKNOWN_KID)).await;
    assert_eq!(response, AuthorizerResponse::deny());
    Ok(())
}

#[tokio::test]
async fn denies_a_token_without_a_key_id() -> Result<()> {
    let authority = serve_jwks(json!({ "keys": [key(TEST_KEY_ID)] })).await?;

    let err = authority
        .check(Some(&format!("Bearer {TOKEN_NO_KID}")))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthorityError::UnknownKeyId));
    Ok(())
}

#[tokio::test]
async fn denies_a_corrupted_signature() -> Result<()> {
    let authority = serve_jwks(json!({ "keys": [key(TEST_KEY_ID)] })).await?;

    let err = authority
        .check(Some(&format!("Bearer {TOKEN_BAD_SIGNATURE}")))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthorityError::SignatureInvalid(_)));

    let response = authorize(&authority, &bearer(TOKEN_BAD_SIGNATURE)).await;
    assert_eq!(response, AuthorizerResponse::deny());
    Ok(())
}

#[tokio::test]
async fn a_failing_key_set_endpoint_is_a_transport_error() -> Result<()> {
    let app = Router::new().route(
        JWKS_PATH,
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let authority = spawn(app).await?;

    // The pipeline stops at the fetch; a valid token never reaches the
    // signature-validation stage.
    let err = authority
        .check(Some(&format!("Bearer {TOKEN}")))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthorityError::KeySetUnavailable(_)));

    assert_eq!(
        authorize(&authority, &bearer(TOKEN)).await,
        AuthorizerResponse::deny()
    );
    Ok(())
}

#[tokio::test]
async fn an_unreachable_key_set_endpoint_is_a_transport_error() -> Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let authority = Authority::new(format!("http://{addr}{JWKS_PATH}"))?;

    let err = authority
        .check(Some(&format!("Bearer {TOKEN}")))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthorityError::KeySetUnavailable(_)));
    Ok(())
}
