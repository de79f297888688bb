/// Factory: build `TokenVerifier` from application `Config`.
use std::fs::File;
use std::sync::Arc;

use crate::config::{Config, PublicKeySource};
use crate::services::auth::{AuthError, TokenVerifier};

pub fn build_token_verifier(config: &Config) -> Result<Arc<TokenVerifier>, AuthError> {
    let verifier = match &config.jwt_public_key {
        PublicKeySource::Path(path) => {
            let file = File::open(path).map_err(|e| {
                AuthError::Configuration(format!(
                    "opening public key {} failed: {e}",
                    path.display()
                ))
            })?;
            TokenVerifier::from_reader(
                file,
                config.jwt_algorithm,
                config.access_token_leeway_seconds,
            )?
        }
        PublicKeySource::Pem(pem) => TokenVerifier::from_pem(
            pem.as_bytes(),
            config.jwt_algorithm,
            config.access_token_leeway_seconds,
        )?,
    };

    tracing::info!(
        algorithm = ?verifier.algorithm(),
        "access token verifier ready"
    );

    Ok(Arc::new(verifier))
}
