use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::Role;

/// Full identity record associated with a validated credential.
///
/// The record is whatever the issuing side handed us: the four fields the
/// dashboard actually reads, plus arbitrary extra fields that must survive a
/// persistence round-trip untouched. Nothing beyond [`PublicIdentity`] is ever
/// exposed to consumers of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    /// Granted role. `None` means the record is unusable for login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Fields the session core carries but never interprets.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Identity {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: Some(role),
            extra: Map::new(),
        }
    }

    /// The fixed projection handed to UI consumers. Extra fields never leak
    /// through this.
    pub fn public(&self) -> PublicIdentity {
        PublicIdentity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Minimal identity projection exposed outside the session core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicIdentity {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
}
