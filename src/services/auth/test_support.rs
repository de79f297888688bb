//! Key fixtures and token signing for tests. Token issuance is not part of the service.
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;

use super::TokenVerifier;

pub const PUBLIC_PEM: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/public.pem"));
pub const PRIVATE_PEM: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/private.pem"));
pub const OTHER_PRIVATE_PEM: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/other_private.pem"));

pub fn test_verifier() -> TokenVerifier {
    TokenVerifier::from_pem(PUBLIC_PEM, Algorithm::RS512, 0).expect("test verifier")
}

pub fn in_one_minute() -> i64 {
    chrono::Utc::now().timestamp() + 60
}

/// Sign `claims` with the fixture private key (RS512).
pub fn sign<T: Serialize>(claims: &T) -> String {
    let key = EncodingKey::from_rsa_pem(PRIVATE_PEM).expect("test private key");
    encode(&Header::new(Algorithm::RS512), claims, &key).expect("signed test token")
}
