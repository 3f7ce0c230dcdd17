use thiserror::Error;

/// Shared secret presented by API clients.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for an empty or whitespace-only key.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Constant-time comparison against a presented key.
    pub fn matches(&self, presented: &str) -> bool {
        let expected = self.0.as_bytes();
        let presented = presented.as_bytes();
        if expected.len() != presented.len() {
            return false;
        }
        expected
            .iter()
            .zip(presented)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl core::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing API key")]
    MissingKey,

    #[error("invalid API key")]
    InvalidKey,

    /// No key is configured and open access is disabled.
    #[error("API access is not configured")]
    NotConfigured,
}

/// Decides whether a request carrying `presented` may proceed.
pub trait KeyValidator: Send + Sync {
    fn validate(&self, presented: Option<&str>) -> Result<(), AuthError>;
}

/// Validator backed by a single static key.
///
/// Without a key, requests are allowed only when `allow_open` is set
/// (local/dev deployments).
#[derive(Debug, Clone)]
pub struct StaticKeyValidator {
    key: Option<ApiKey>,
    allow_open: bool,
}

impl StaticKeyValidator {
    pub fn new(key: Option<ApiKey>, allow_open: bool) -> Self {
        Self { key, allow_open }
    }
}

impl KeyValidator for StaticKeyValidator {
    fn validate(&self, presented: Option<&str>) -> Result<(), AuthError> {
        let Some(expected) = &self.key else {
            return if self.allow_open {
                Ok(())
            } else {
                Err(AuthError::NotConfigured)
            };
        };

        let presented = presented.ok_or(AuthError::MissingKey)?;
        if expected.matches(presented.trim()) {
            Ok(())
        } else {
            tracing::debug!("rejected request with mismatched API key");
            Err(AuthError::InvalidKey)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(key: &str) -> StaticKeyValidator {
        StaticKeyValidator::new(ApiKey::new(key), false)
    }

    #[test]
    fn accepts_matching_key() {
        assert_eq!(validator("s3cret").validate(Some("s3cret")), Ok(()));
    }

    #[test]
    fn rejects_missing_and_wrong_keys() {
        let v = validator("s3cret");
        assert_eq!(v.validate(None), Err(AuthError::MissingKey));
        assert_eq!(v.validate(Some("s3cre")), Err(AuthError::InvalidKey));
        assert_eq!(v.validate(Some("S3CRET")), Err(AuthError::InvalidKey));
    }

    #[test]
    fn unconfigured_key_depends_on_open_access() {
        let closed = StaticKeyValidator::new(None, false);
        assert_eq!(closed.validate(Some("anything")), Err(AuthError::NotConfigured));

        let open = StaticKeyValidator::new(None, true);
        assert_eq!(open.validate(None), Ok(()));
    }

    #[test]
    fn blank_keys_are_not_keys() {
        assert!(ApiKey::new("   ").is_none());
        assert_eq!(format!("{:?}", ApiKey::new("x").unwrap()), "ApiKey(***)");
    }
}
