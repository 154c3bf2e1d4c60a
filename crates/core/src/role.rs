use serde::{Deserialize, Serialize};

/// Role assigned to a marketplace user.
///
/// The three privileged roles are matched by **exact** string comparison
/// against `"admin"` / `"supplier"` / `"client"`. Any other value is tolerated
/// (a session holding one is still authenticated) but grants none of the
/// role-specific capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Supplier,
    Client,
    /// A role string the dashboard does not recognize. Kept verbatim so it
    /// round-trips through persistence unchanged.
    Unrecognized(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Supplier => "supplier",
            Role::Client => "client",
            Role::Unrecognized(other) => other,
        }
    }

    /// True for the three roles the dashboard actually maps to capabilities.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "supplier" => Role::Supplier,
            "client" => Role::Client,
            _ => Role::Unrecognized(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
