use std::{collections::HashSet, fmt, io::Read};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by token verification and verifier construction.
///
/// - `Configuration`: key material missing or unusable (startup only)
/// - `Unauthenticated`: the token envelope is malformed, badly signed, expired
///   or declares an unexpected algorithm
/// - `BadInput`: the envelope is valid but the payload breaks the claims contract
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    BadInput(String),
}

/// Upper bound for clock-skew tolerance. Larger values are clamped.
pub const MAX_LEEWAY_SECONDS: u64 = 3600;

/// Claims required from every access token.
///
/// `exp` and `nbf` are checked by `jsonwebtoken::Validation` and `iat` by
/// `TokenVerifier::verify` before this is decoded, so they are not repeated here.
#[derive(Debug, Clone, Deserialize)]
struct AccessTokenClaims {
    id: String,
}

/// Asymmetric bearer-token verifier.
///
/// Holds one public key and the single algorithm it was configured for. It is
/// immutable after construction and shared across requests behind an `Arc`.
pub struct TokenVerifier {
    algorithm: Algorithm,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("algorithm", &self.algorithm)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenVerifier {
    /// Build a verifier from PEM-encoded public key bytes.
    ///
    /// The key is parsed according to the family of `algorithm` (RSA, RSA-PSS,
    /// ECDSA or EdDSA). Symmetric algorithms are refused.
    pub fn from_pem(
        public_key_pem: &[u8],
        algorithm: Algorithm,
        leeway_seconds: u64,
    ) -> Result<Self, AuthError> {
        if public_key_pem.iter().all(u8::is_ascii_whitespace) {
            return Err(AuthError::Configuration("no public key provided".to_string()));
        }

        let decoding_key = match algorithm {
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => DecodingKey::from_rsa_pem(public_key_pem),
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(public_key_pem),
            Algorithm::EdDSA => DecodingKey::from_ed_pem(public_key_pem),
            other => {
                return Err(AuthError::Configuration(format!(
                    "signing method {other:?} is not an asymmetric scheme"
                )));
            }
        }
        .map_err(|e| AuthError::Configuration(format!("parsing public key failed: {e}")))?;

        let mut validation = Validation::new(algorithm);
        // `exp` and `nbf` are optional, but validated whenever they are present.
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        // jsonwebtoken computes `now - leeway` unchecked.
        validation.leeway = leeway_seconds.min(MAX_LEEWAY_SECONDS);

        Ok(Self {
            algorithm,
            decoding_key,
            validation,
        })
    }

    /// Read the whole PEM from `reader`, then behave like [`TokenVerifier::from_pem`].
    pub fn from_reader<R: Read>(
        mut reader: R,
        algorithm: Algorithm,
        leeway_seconds: u64,
    ) -> Result<Self, AuthError> {
        let mut pem = Vec::new();
        reader
            .read_to_end(&mut pem)
            .map_err(|e| AuthError::Configuration(format!("reading public key failed: {e}")))?;

        Self::from_pem(&pem, algorithm, leeway_seconds)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Verify `token` and return its subject identifier (the `id` claim).
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let header = decode_header(token).map_err(|e| {
            AuthError::Unauthenticated(format!("JWT could not be parsed correctly: {e}"))
        })?;

        // Allow-list check against the configured scheme, before any key is used.
        if header.alg != self.algorithm {
            return Err(AuthError::Unauthenticated(format!(
                "JWT could not be parsed correctly: unexpected signing method: {:?}",
                header.alg
            )));
        }

        let data = decode::<serde_json::Value>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                AuthError::Unauthenticated(format!("JWT could not be parsed correctly: {e}"))
            })?;

        // A token issued in the future is not valid yet.
        if let Some(iat) = data.claims.get("iat").and_then(serde_json::Value::as_i64)
            && iat > chrono::Utc::now().timestamp() + self.validation.leeway as i64
        {
            return Err(AuthError::Unauthenticated(
                "JWT could not be parsed correctly: token used before issued".to_string(),
            ));
        }

        let claims: AccessTokenClaims = serde_json::from_value(data.claims)
            .map_err(|e| AuthError::BadInput(format!("ID of type string in JWT missing: {e}")))?;

        if claims.id.trim().is_empty() {
            return Err(AuthError::BadInput("ID in JWT is empty".to_string()));
        }

        Ok(claims.id)
    }
}
