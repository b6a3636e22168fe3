//! Transport-neutral shape of outbound push requests and their responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Form body of a push request.
///
/// Keys are unique and kept sorted, so two forms built from the same change
/// always encode identically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Form(BTreeMap<String, String>);

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new()).extend_pairs(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Form {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Authentication attached uniformly to every request of a batch.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Credential {
    /// Session token, sent as the `auth_token` form field
    Token {
        /// Opaque token value
        token: String,
    },
    /// HTTP basic authentication
    Basic {
        /// Account name
        username: String,
        /// Account password
        password: String,
    },
}

impl Credential {
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token { token: token.into() }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { .. } => f.debug_struct("Token").field("token", &"***").finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// One outbound request produced from a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    /// Absolute endpoint URL
    pub url: String,
    /// Form fields to send
    pub form: Form,
    /// Credential attached by the sender
    pub credential: Credential,
}

/// What a response validator gets to see of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl PushResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_encoding_is_sorted_and_escaped() {
        let mut form = Form::new();
        form.set("status", "on-hold");
        form.set("episodes_watched", "3");
        form.set("notes", "a b&c");
        assert_eq!(form.encode(), "episodes_watched=3&notes=a+b%26c&status=on-hold");
    }

    #[test]
    fn test_form_set_overwrites() {
        let mut form: Form = [("status", "completed")].into_iter().collect();
        form.set("status", "dropped");
        assert_eq!(form.len(), 1);
        assert_eq!(form.get("status"), Some("dropped"));
    }

    #[test]
    fn test_credential_debug_redacts_secrets() {
        let token = format!("{:?}", Credential::token("hunter2"));
        assert!(!token.contains("hunter2"));

        let basic = format!("{:?}", Credential::basic("darin", "hunter2"));
        assert!(basic.contains("darin"));
        assert!(!basic.contains("hunter2"));
    }
}
