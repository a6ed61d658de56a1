use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Time-bounded JWT claims.
///
/// Carries the registered `sub`, `iat` and `exp` claims plus any number of
/// custom fields flattened into the payload. `exp` is always present so
/// every token issued from these claims expires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for a subject, valid from now for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Unique identifier of the token holder
    /// * `ttl` - Lifetime of the token
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: Some(subject.to_string()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            extra: HashMap::new(),
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = iat;
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Read a custom string field.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}
