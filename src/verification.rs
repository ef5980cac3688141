use dotenvy::dotenv;
use std::env;

pub const VERIFICATION_TOKEN_VAR: &str = "MACHAON_VERIFICATION_TOKEN";

/// Source of the opaque anti-automation token attached to each submission.
/// A fresh token is requested per attempt; the service is its sole validator.
pub trait VerificationProvider {
    fn request_token(&self) -> Result<String, String>;
}

/// Token taken verbatim from an explicit override or from the
/// `MACHAON_VERIFICATION_TOKEN` environment variable.
#[derive(Debug, Clone, Default)]
pub struct EnvTokenProvider {
    override_token: Option<String>,
}

impl EnvTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            override_token: Some(token.to_string()),
        }
    }
}

impl VerificationProvider for EnvTokenProvider {
    fn request_token(&self) -> Result<String, String> {
        if let Some(token) = &self.override_token {
            return Ok(token.clone());
        }
        dotenv().ok();
        env::var(VERIFICATION_TOKEN_VAR).map_err(|_| {
            format!("No verification token available; set {VERIFICATION_TOKEN_VAR} or pass --token")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_token_wins() {
        let provider = EnvTokenProvider::with_token("abc123");
        assert_eq!(provider.request_token().unwrap(), "abc123");
    }
}
