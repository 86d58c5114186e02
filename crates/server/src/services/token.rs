//! Bearer token issuance and validation.
//!
//! Tokens are compact HS256 JWTs: `base64url(header).base64url(claims).base64url(mac)`,
//! unpadded. The MAC is HMAC-SHA256 over the first two segments, keyed with
//! `JWT_SECRET_KEY`. The subject (`sub`) is the user ID rendered as a string.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

use swapi_favorites_core::UserId;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";
const ACCESS_TOKEN_TYPE: &str = "access";

/// Errors produced while issuing or validating a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is not valid yet")]
    NotYetValid,

    #[error("wrong token type: {0}")]
    WrongType(String),

    #[error("token subject is not a user id")]
    InvalidSubject,

    #[error("invalid signing key")]
    InvalidKey,

    #[error("failed to encode token: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user ID as a decimal string.
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    /// Unique token ID.
    pub jti: String,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl Claims {
    /// The user ID the token was issued for.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidSubject` if `sub` is not an integer.
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidSubject)
    }
}

/// Signs and verifies access tokens with a shared secret.
///
/// Implements `Debug` manually to redact the key.
#[derive(Clone)]
pub struct TokenKeys {
    secret: SecretString,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenKeys {
    /// Create token keys from the signing secret and token lifetime.
    #[must_use]
    pub const fn new(secret: SecretString, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    /// Issue an access token whose subject is `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the claims cannot be encoded.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);

        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            nbf: iat,
            exp: iat.saturating_add(ttl),
            jti: Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
        );
        let signature = self.sign(signing_input.as_bytes())?;

        Ok(format!(
            "{signing_input}.{}",
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the token is malformed, signed with another
    /// key or algorithm, expired, not yet valid, or not an access token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let claims: Claims = decode_segment(claims_b64)?;

        let now = now.timestamp();
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        if now < claims.nbf {
            return Err(TokenError::NotYetValid);
        }
        if claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TokenError::WrongType(claims.token_type));
        }

        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| TokenError::InvalidKey)
    }

    fn sign(&self, input: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = self.mac()?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(
            SecretString::from("kX9#q2Lm!v8Rz@4Tb7&Wn1$Hc5^Yp3*D"),
            Duration::from_secs(900),
        )
    }

    fn reassemble(header: &str, claims: &str, signature: &str) -> String {
        format!("{header}.{claims}.{signature}")
    }

    #[test]
    fn test_issue_then_verify_round_trip_subject() {
        let keys = keys();
        let token = keys.issue(UserId::new(7)).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_id().unwrap(), UserId::new(7));
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let keys = keys();
        let a = keys.verify(&keys.issue(UserId::new(1)).unwrap()).unwrap();
        let b = keys.verify(&keys.issue(UserId::new(1)).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let other = TokenKeys::new(
            SecretString::from("another-signing-key-0123456789abcdef"),
            Duration::from_secs(900),
        );
        let token = other.issue(UserId::new(1)).unwrap();

        assert!(matches!(
            keys().verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_claims_are_rejected() {
        let keys = keys();
        let token = keys.issue(UserId::new(1)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let mut claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        claims["sub"] = serde_json::Value::String("2".to_string());
        let forged_claims = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

        let forged = reassemble(parts[0], &forged_claims, parts[2]);
        assert!(matches!(
            keys.verify(&forged),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys();
        let issued = Utc::now() - chrono::Duration::seconds(901);
        let token = keys.issue_at(UserId::new(1), issued).unwrap();

        assert!(matches!(keys.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_future_token_is_not_yet_valid() {
        let keys = keys();
        let issued = Utc::now() + chrono::Duration::seconds(60);
        let token = keys.issue_at(UserId::new(1), issued).unwrap();

        assert!(matches!(keys.verify(&token), Err(TokenError::NotYetValid)));
    }

    #[test]
    fn test_alg_none_is_rejected() {
        let keys = keys();
        let token = keys.issue(UserId::new(1)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let none_header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);

        let result = keys.verify(&reassemble(&none_header, parts[1], ""));
        assert!(matches!(result, Err(TokenError::UnsupportedAlgorithm(alg)) if alg == "none"));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let keys = keys();
        for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
            assert!(
                matches!(keys.verify(token), Err(TokenError::Malformed)),
                "expected {token:?} to be malformed"
            );
        }
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = Claims {
            sub: "luke".to_string(),
            iat: 0,
            nbf: 0,
            exp: 1,
            jti: String::new(),
            token_type: "access".to_string(),
        };
        assert!(matches!(claims.user_id(), Err(TokenError::InvalidSubject)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug_output = format!("{:?}", keys());
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kX9#"));
    }
}
