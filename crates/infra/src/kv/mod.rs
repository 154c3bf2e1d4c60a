//! Key-value persistence surface.

use std::sync::Arc;

use thiserror::Error;

mod in_memory;

pub use in_memory::InMemoryKvStore;

/// Well-known persisted key names.
///
/// `AUTH_TOKEN` and `AUTH_USER` are owned by the session store.
/// `SUPPLIER_INVITATIONS` is collaborator-owned scratch data that the store
/// nevertheless erases on logout, so it lives here where both sides can see
/// the name.
pub mod keys {
    /// Raw credential string, stored verbatim.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Codec-encoded identity string.
    pub const AUTH_USER: &str = "auth_user";

    /// Pending-invitation scratch data tied to the session.
    pub const SUPPLIER_INVITATIONS: &str = "supplier_invitations";
}

/// Key-value store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KvError {
    /// The backing store could not serve the request.
    #[error("kv backend failure: {0}")]
    Backend(String),
}

/// Minimal string-to-string persistence surface.
///
/// Implementations must make `set`/`remove` durable before returning: the
/// session store relies on its writes completing synchronously so in-memory
/// and persisted state never disagree.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), KvError>;
}

impl<S> KvStore for Arc<S>
where
    S: KvStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        (**self).remove(key)
    }
}
