//! Key sets published by a trusted authority
//!
//! A relying party verifies tokens against the authority's published JSON
//! Web Key Set rather than through a private back-channel. Each entry in
//! the set names a key ID, the algorithm the key signs with, and a
//! certificate chain whose leaf carries the verification key.

use aliri_braid::braid;
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

/// An identifier for a key within a key set
#[braid(serde, ref_doc = "A borrowed reference to a key identifier ([`KeyId`])")]
pub struct KeyId;

/// A single signing-key descriptor published in a key set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Jwk {
    kid: KeyId,
    alg: Algorithm,
    #[serde(default)]
    x5c: Vec<String>,
}

impl Jwk {
    /// The key ID
    #[must_use]
    pub fn key_id(&self) -> &KeyIdRef {
        &self.kid
    }

    /// The signing algorithm declared for this key
    ///
    /// This value, not the algorithm a token declares for itself, is
    /// authoritative when verifying a token against this key.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.alg
    }

    /// The leaf of the key's certificate chain, as base64-encoded DER
    #[must_use]
    pub fn leaf_certificate(&self) -> Option<&str> {
        self.x5c.first().map(String::as_str)
    }
}

/// A JSON Web Key Set (JWKS)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Jwks {
    #[serde(deserialize_with = "deserialize_keys")]
    keys: Vec<Jwk>,
}

impl Jwks {
    /// A view of the keys in this set, in published order
    #[must_use]
    pub fn keys(&self) -> &[Jwk] {
        &self.keys
    }

    /// Selects the first key whose ID exactly matches `kid`
    ///
    /// The scan walks the published sequence in order and stops at the
    /// first exact match, so selection stays deterministic even if the set
    /// contains duplicate IDs.
    #[must_use]
    pub fn get_key(&self, kid: &KeyIdRef) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.key_id() == kid)
    }
}

/// Deserializes the `keys` array, skipping entries this gate cannot use
///
/// Published key sets routinely carry encryption keys, keys with unknown
/// algorithms, or entries without the fields needed here. Those entries are
/// logged and dropped rather than failing the whole document.
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<Jwk>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct MaybeJwksVisitor;

    impl<'de> serde::de::Visitor<'de> for MaybeJwksVisitor {
        type Value = Vec<Jwk>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a list of JWK objects")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            let mut values = Vec::with_capacity(seq.size_hint().unwrap_or_default());
            let mut index = 0_usize;

            while let Some(value) = seq.next_element()? {
                match value {
                    MaybeJwk::Jwk(jwk) => values.push(jwk),
                    MaybeJwk::Unknown(key) => {
                        tracing::warn!(
                            jwks.idx = index,
                            jwk.kid = ?key.kid,
                            jwk.alg = ?key.alg,
                            "ignoring unusable JWK"
                        );
                    }
                }
                index += 1;
            }

            Ok(values)
        }
    }

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum MaybeJwk {
        Jwk(Jwk),
        Unknown(JwkLike),
    }

    #[allow(dead_code)]
    #[derive(serde::Deserialize)]
    struct JwkLike {
        #[serde(default)]
        kid: Option<KeyId>,
        #[serde(default)]
        alg: Option<String>,
    }

    deserializer.deserialize_seq(MaybeJwksVisitor)
}

#[cfg(test)]
mod tests {
    use color_eyre::Result;

    use super::*;
    use crate::test;

    const TWO_KEYS_A_FIRST: &str = r#"
        {
            "keys": [
                { "kid": "A", "alg": "RS256", "x5c": ["QUFBQQ=="] },
                { "kid": "B", "alg": "RS256", "x5c": ["QkJCQg=="] }
            ]
        }
    "#;

    const TWO_KEYS_B_FIRST: &str = r#"
        {
            "keys": [
                { "kid": "B", "alg": "RS256", "x5c": ["QkJCQg=="] },
                { "kid": "A", "alg": "RS256", "x5c": ["QUFBQQ=="] }
            ]
        }
    "#;

    const DUPLICATE_KEY_IDS: &str = r#"
        {
            "keys": [
                { "kid": "A", "alg": "RS256", "x5c": ["Zmlyc3Q="] },
                { "kid": "A", "alg": "RS384", "x5c": ["c2Vjb25k"] }
            ]
        }
    "#;

    const JWKS_WITH_UNKNOWN_ALG: &str = r#"
        {
            "keys": [
                { "kid": "enc-key", "use": "enc", "alg": "RSA-OAEP" },
                { "kid": "sig-key", "alg": "RS256", "x5c": ["QUFBQQ=="] }
            ]
        }
    "#;

    #[test]
    fn decodes_a_published_key_set() -> Result<()> {
        let jwks: Jwks = serde_json::from_str(test::rsa::JWKS)?;
        assert_eq!(jwks.keys().len(), 1);
        assert_eq!(
            jwks.keys()[0].key_id(),
            KeyIdRef::from_str(test::rsa::TEST_KEY_ID)
        );
        Ok(())
    }

    #[test]
    fn selection_is_independent_of_published_order() -> Result<()> {
        for doc in [TWO_KEYS_A_FIRST, TWO_KEYS_B_FIRST] {
            let jwks: Jwks = serde_json::from_str(doc)?;
            let key = jwks.get_key(KeyIdRef::from_str("B")).unwrap();
            assert_eq!(key.leaf_certificate(), Some("QkJCQg=="));
        }
        Ok(())
    }

    #[test]
    fn first_match_wins_on_duplicate_ids() -> Result<()> {
        let jwks: Jwks = serde_json::from_str(DUPLICATE_KEY_IDS)?;
        let key = jwks.get_key(KeyIdRef::from_str("A")).unwrap();
        assert_eq!(key.leaf_certificate(), Some("Zmlyc3Q="));
        assert_eq!(key.algorithm(), Algorithm::RS256);
        Ok(())
    }

    #[test]
    fn unknown_key_id_matches_nothing() -> Result<()> {
        let jwks: Jwks = serde_json::from_str(TWO_KEYS_A_FIRST)?;
        assert!(jwks.get_key(KeyIdRef::from_str("C")).is_none());
        Ok(())
    }

    #[test]
    fn unusable_entries_are_skipped() -> Result<()> {
        let jwks: Jwks = serde_json::from_str(JWKS_WITH_UNKNOWN_ALG)?;
        assert_eq!(jwks.keys().len(), 1);
        assert_eq!(jwks.keys()[0].key_id(), KeyIdRef::from_str("sig-key"));
        Ok(())
    }

    #[test]
    fn an_entry_without_a_chain_still_deserializes() -> Result<()> {
        let jwks: Jwks = serde_json::from_str(r#"{ "keys": [{ "kid": "A", "alg": "RS256" }] }"#)?;
        assert_eq!(jwks.keys()[0].leaf_certificate(), None);
        Ok(())
    }
}
