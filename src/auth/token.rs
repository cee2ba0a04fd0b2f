//! Bearer token verification against a configured key set.
//!
//! The key set is handed over at process start (JWKS JSON from the identity
//! provider); rotation requires a restart. Signature verification is pinned
//! to RS256 and always happens before any claim is read.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Raw claims carried by a bearer token.
#[derive(Debug, Deserialize)]
struct BearerClaims {
    sub: String,
    email: String,
    exp: i64,
    #[serde(default)]
    user_metadata: Option<NameHints>,
}

/// Optional display-name hints supplied by the identity provider.
#[derive(Debug, Deserialize)]
struct NameHints {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

/// Claims extracted from a token whose signature and expiry validated.
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    /// Token subject, which doubles as the identity's primary key.
    pub subject_id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Verifies bearer tokens. Stateless apart from the configured keys.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Vec<(Option<String>, DecodingKey)>,
}

impl TokenVerifier {
    /// Build a verifier from a JWKS JSON document. A bare single-JWK object
    /// (no `keys` wrapper) is accepted too, since some providers hand out
    /// exactly one key.
    pub fn from_jwks(jwks_json: &str) -> AppResult<Self> {
        let value: serde_json::Value = serde_json::from_str(jwks_json)
            .map_err(|e| AppError::Unexpected(format!("JWK set is not valid JSON: {}", e)))?;

        let raw_keys: Vec<serde_json::Value> = match value.get("keys") {
            Some(serde_json::Value::Array(keys)) => keys.clone(),
            _ => vec![value],
        };

        let mut keys = Vec::new();
        for jwk_value in &raw_keys {
            let jwk: jsonwebtoken::jwk::Jwk = match serde_json::from_value(jwk_value.clone()) {
                Ok(j) => j,
                Err(e) => {
                    warn!("Skipping unparseable JWK: {}", e);
                    continue;
                }
            };

            let kid = jwk.common.key_id.clone();
            match DecodingKey::from_jwk(&jwk) {
                Ok(key) => keys.push((kid, key)),
                Err(e) => warn!("Failed to build decoding key from JWK {:?}: {}", kid, e),
            }
        }

        if keys.is_empty() {
            return Err(AppError::Unexpected(
                "no usable verification keys in the configured JWK set".to_string(),
            ));
        }

        Ok(Self { keys })
    }

    /// Verify a bearer token and extract its identity claim.
    ///
    /// Fails with `TokenExpired` when the signature is good but the expiry
    /// has passed, `TokenInvalid` for everything else. Claim fields are only
    /// read after the signature validated.
    pub fn verify(&self, token: &str) -> AppResult<VerifiedClaims> {
        let header = decode_header(token).map_err(|e| {
            warn!("Rejected malformed bearer token: {}", e);
            AppError::TokenInvalid("token is malformed".to_string())
        })?;

        // Prefer keys matching the token's kid; try the whole set when the
        // kid is absent or unknown.
        let by_kid: Vec<&DecodingKey> = match header.kid.as_deref() {
            Some(kid) => self
                .keys
                .iter()
                .filter(|(k, _)| k.as_deref() == Some(kid))
                .map(|(_, key)| key)
                .collect(),
            None => Vec::new(),
        };
        let candidates: Vec<&DecodingKey> = if by_kid.is_empty() {
            self.keys.iter().map(|(_, key)| key).collect()
        } else {
            by_kid
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let mut token_data = None;
        for key in candidates {
            match decode::<BearerClaims>(token, key, &validation) {
                Ok(data) => {
                    token_data = Some(data);
                    break;
                }
                // An expiry failure means the signature already validated
                // under this key; stop trying others.
                Err(e) if *e.kind() == jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    return Err(AppError::TokenExpired);
                }
                Err(e) => {
                    warn!("Bearer token failed verification against a key: {}", e);
                }
            }
        }

        let Some(token_data) = token_data else {
            return Err(AppError::TokenInvalid(
                "signature did not validate against any configured key".to_string(),
            ));
        };

        let claims = token_data.claims;

        let subject_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            AppError::TokenInvalid("token is missing a subject id or it is not a valid UUID".to_string())
        })?;

        let (first_name, last_name) = match claims.user_metadata {
            Some(hints) => (hints.first_name, hints.last_name),
            None => (None, None),
        };

        Ok(VerifiedClaims {
            subject_id,
            email: claims.email,
            first_name,
            last_name,
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
        })
    }
}
