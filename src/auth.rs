//! Credential check for mutating routes.

use std::fmt;

/// Decides whether a caller-supplied credential grants write access.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> bool;
}

/// Compares against one configured token. Accepts the raw token or `Bearer <token>`.
#[derive(Clone)]
pub struct StaticToken {
    expected: String,
}

impl StaticToken {
    pub fn new(expected: impl Into<String>) -> Self {
        StaticToken {
            expected: expected.into(),
        }
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticToken").field("expected", &"***").finish()
    }
}

impl CredentialVerifier for StaticToken {
    fn verify(&self, credential: &str) -> bool {
        let token = credential
            .strip_prefix("Bearer ")
            .unwrap_or(credential)
            .trim();
        !self.expected.is_empty() && token == self.expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_raw_and_bearer_forms() {
        let v = StaticToken::new("s3cret");
        assert!(v.verify("s3cret"));
        assert!(v.verify("Bearer s3cret"));
        assert!(!v.verify("Bearer other"));
        assert!(!v.verify(""));
    }

    #[test]
    fn empty_expected_token_rejects_everything() {
        let v = StaticToken::new("");
        assert!(!v.verify(""));
        assert!(!v.verify("Bearer "));
    }

    #[test]
    fn debug_hides_token() {
        assert!(!format!("{:?}", StaticToken::new("s3cret")).contains("s3cret"));
    }
}
