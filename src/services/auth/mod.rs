pub mod factory;
pub mod token_verifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use factory::build_token_verifier;
pub use token_verifier::{AuthError, TokenVerifier};
