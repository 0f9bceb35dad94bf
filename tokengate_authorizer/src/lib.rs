//! Gateway token authorization backed by a remotely published JSON Web Key
//! Set
//!
//! This crate turns the verification pipeline of [`tokengate`] into a
//! complete gateway authorizer: it fetches the trusted authority's key set,
//! runs the inbound credential through extraction, untrusted decomposition,
//! key selection, and signature validation, and emits an IAM-style
//! allow/deny policy decision.
//!
//! Two properties define the external contract:
//!
//! * The key set is fetched fresh on every authorization call. There is no
//!   cache and no TTL, so a key rotation at the authority takes effect
//!   immediately.
//! * [`authorize`] is total. Every internal failure, from a missing header
//!   to an unreachable key-set endpoint, collapses into the same deny
//!   response with principal `"user"`; the reason survives only in the
//!   logs.
//!
//! # TLS
//!
//! This crate does not enable TLS support in `reqwest` itself. If your
//! application already uses `reqwest` with some TLS settings, those apply
//! automatically; if this crate is your only use of `reqwest`, enable its
//! `default-tls` or `rustls-tls` feature to reach an HTTPS key-set
//! endpoint.

#![warn(
    missing_docs,
    unused_import_braces,
    unused_imports,
    unused_qualifications
)]
#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_must_use
)]

mod authority;
mod authorizer;
pub mod config;
pub mod event;

pub use authority::{Authority, AuthorityError};
pub use authorizer::authorize;
pub use config::{Config, ConfigError};
pub use event::{AuthorizerRequest, AuthorizerResponse, Effect};
