//! Trust decisions for inbound bearer tokens.
//!
//! This crate implements the verification half of a token-based
//! authorization gate: given the raw value of an `Authorization` header and
//! a published JSON Web Key Set (JWKS), it determines whether the presented
//! credential is a validly signed, non-expired assertion issued by the
//! trusted authority.
//!
//! Verification is a pipeline of four stages, each of which fails
//! independently:
//!
//! 1. [`bearer::extract_bearer`] pulls the compact token out of the header.
//! 2. [`JwtRef::decompose`][jwt::JwtRef::decompose] decodes the token header
//!    *without* checking the signature, to learn which signing key was used.
//! 3. [`Jwks::get_key`][jwks::Jwks::get_key] selects the key-set entry whose
//!    key ID matches the token's declared key ID.
//! 4. [`verify::verify`] reconstructs a verification certificate from the
//!    selected entry and cryptographically validates the token.
//!
//! A [`jwt::BasicClaims`] value is only ever produced by the final stage,
//! after the signature check has succeeded against a certificate whose key
//! ID matches the token's declared key ID.
//!
//! Fetching the key set is a transport concern and lives with the callers of
//! this crate; nothing here performs I/O.

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

pub mod bearer;
pub mod error;
pub mod jwks;
pub mod jwt;
pub mod verify;


#[doc(inline)]
pub use jwks::{Jwk, Jwks};
#[doc(inline)]
pub use jwt::{Jwt, JwtRef};
