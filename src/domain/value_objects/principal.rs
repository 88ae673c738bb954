//! Caller identity types.
//!
//! A [`ClaimSet`] is what a verified bearer token carries; a [`Principal`] is
//! the typed identity resolved from it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Registered subject claim.
pub const SUBJECT_CLAIM: &str = "sub";

/// Legacy subject claim written by older token issuers.
pub const LEGACY_SUBJECT_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

pub const EMAIL_CLAIM: &str = "email";

pub const NICKNAME_CLAIM: &str = "nickname";

/// Decoded claims of an already verified token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(HashMap<String, Value>);

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of a claim. Non-string values are treated as absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<HashMap<String, Value>> for ClaimSet {
    fn from(claims: HashMap<String, Value>) -> Self {
        Self(claims)
    }
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub nickname: Option<String>,
}

impl Principal {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
            nickname: None,
        }
    }
}
