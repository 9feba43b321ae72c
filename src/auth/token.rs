//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying only the subject ID and the issue and
//! expiry times. The signing secret is handed in once at startup.

use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::AuthError;
use crate::{DealershipError, Result};

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
}

/// Issues and verifies signed, time-limited bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_secs: u64,
}

impl TokenService {
    /// Create a token service from a signing secret and token lifetime.
    ///
    /// An empty secret is a configuration error.
    pub fn new(secret: &str, lifetime_secs: u64) -> Result<Self> {
        if secret.is_empty() {
            return Err(DealershipError::Config(
                "token signing secret must not be empty".to_string(),
            ));
        }

        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime_secs,
        })
    }

    /// Token lifetime in seconds.
    pub fn lifetime_secs(&self) -> u64 {
        self.lifetime_secs
    }

    /// Issue a token for the given subject, expiring `lifetime_secs` from now.
    pub fn issue(&self, subject_id: i64) -> Result<String> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let claims = TokenClaims {
            sub: subject_id,
            iat: now,
            exp: now.saturating_add(self.lifetime_secs),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DealershipError::Internal(format!("failed to sign token: {e}")))
    }

    /// Verify a token and recover its subject ID.
    pub fn verify(&self, token: &str) -> std::result::Result<i64, AuthError> {
        match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::ExpiredToken),
                _ => {
                    debug!("Token verification failed: {}", e);
                    Err(AuthError::InvalidToken)
                }
            },
        }
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, claims: &TokenClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn now() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            TokenService::new("", 3600),
            Err(DealershipError::Config(_))
        ));
    }

    #[test]
    fn test_issue_then_verify() {
        let service = TokenService::new("test-secret", 3600).unwrap();
        let token = service.issue(42).unwrap();

        assert_eq!(service.verify(&token).unwrap(), 42);
        assert_eq!(service.lifetime_secs(), 3600);
    }

    #[test]
    fn test_expiry_is_one_lifetime_after_issue() {
        let service = TokenService::new("test-secret", 3600).unwrap();
        let token = service.issue(7).unwrap();

        let data = decode::<TokenClaims>(&token, &service.decoding_key, &service.validation).unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 3600);
    }

    #[test]
    fn test_expired_token() {
        let service = TokenService::new("test-secret", 3600).unwrap();
        let claims = TokenClaims {
            sub: 1,
            iat: now() - 7200,
            exp: now() - 10,
        };

        let token = sign("test-secret", &claims);
        assert_eq!(service.verify(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn test_numeric_subject_is_accepted() {
        let service = TokenService::new("test-secret", 3600).unwrap();
        let claims = TokenClaims {
            sub: 1234,
            iat: now(),
            exp: now() + 60,
        };

        let token = sign("test-secret", &claims);
        assert_eq!(service.verify(&token), Ok(1234));
    }

    #[test]
    fn test_huge_lifetime_does_not_overflow() {
        let service = TokenService::new("test-secret", u64::MAX).unwrap();
        let token = service.issue(9).unwrap();

        let data = decode::<TokenClaims>(&token, &service.decoding_key, &service.validation).unwrap();
        assert_eq!(data.claims.exp, u64::MAX);
        assert_eq!(service.verify(&token), Ok(9));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let service = TokenService::new("secret2", 3600).unwrap();
        let claims = TokenClaims {
            sub: 1,
            iat: now(),
            exp: now() + 3600,
        };

        let token = sign("secret1", &claims);
        assert_eq!(service.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let service = TokenService::new("test-secret", 3600).unwrap();
        let token = service.issue(1).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{}", chars.into_iter().collect::<String>());

        assert_eq!(service.verify(&tampered), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let service = TokenService::new("test-secret", 3600).unwrap();

        assert_eq!(service.verify("not-a-token"), Err(AuthError::InvalidToken));
        assert_eq!(service.verify(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_token_with_bad_signature_is_invalid() {
        let service = TokenService::new("test-secret", 3600).unwrap();
        let claims = TokenClaims {
            sub: 1,
            iat: now() - 7200,
            exp: now() - 3600,
        };

        let token = sign("other-secret", &claims);
        assert_eq!(service.verify(&token), Err(AuthError::InvalidToken));
    }
}
