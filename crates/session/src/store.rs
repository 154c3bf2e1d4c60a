//! The persisted-session state machine.
//!
//! # Invariants
//! - A session is either fully present (credential + identity, credential
//!   currently valid) or fully absent. Partial persisted state is treated as
//!   absent and cleared during rehydration.
//! - `login`/`logout` complete their kv writes before returning, so in-memory
//!   and persisted state never disagree across a call boundary.
//! - Expiry is enforced in exactly one place: [`SessionStore::revalidate_at`].
//! - A new `login` fully supersedes any previous session; no field merging.

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard, mpsc};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use tradegate_auth::{codec, token};
use tradegate_core::{Identity, PublicIdentity, Role, SessionError};
use tradegate_infra::{KvError, KvStore, keys};

use crate::config::SessionConfig;

/// Store-level error: a rejected domain operation or a storage failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] KvError),
}

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Empty,
    Active {
        credential: String,
        identity: Identity,
    },
}

/// Immutable view of the session used by gate evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub role: Option<Role>,
}

impl SessionSnapshot {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Some(Role::Admin))
    }

    pub fn is_supplier(&self) -> bool {
        matches!(self.role, Some(Role::Supplier))
    }

    pub fn is_client(&self) -> bool {
        matches!(self.role, Some(Role::Client))
    }
}

/// Owner of the single current session.
///
/// One instance per process scope, injected wherever session state is needed.
/// All mutation goes through `login`/`logout`/`revalidate_at`; reads are
/// cheap projections safe to call on every route transition.
pub struct SessionStore {
    kv: Arc<dyn KvStore>,
    config: SessionConfig,
    state: RwLock<SessionState>,
    expiry_signal: Mutex<Option<mpsc::Sender<()>>>,
}

impl SessionStore {
    /// Construct the store, rehydrating from persistence.
    ///
    /// The persisted session is restored iff the credential still validates
    /// and the decoded identity carries a role; anything less is cleared and
    /// the store starts `Empty`.
    pub fn init(kv: Arc<dyn KvStore>, config: SessionConfig) -> Result<Self, KvError> {
        let store = Self {
            kv,
            config,
            state: RwLock::new(SessionState::Empty),
            expiry_signal: Mutex::new(None),
        };
        store.rehydrate(Utc::now())?;
        Ok(store)
    }

    fn rehydrate(&self, now: DateTime<Utc>) -> Result<(), KvError> {
        let credential = self.kv.get(keys::AUTH_TOKEN)?;
        let encoded = self.kv.get(keys::AUTH_USER)?;

        let (Some(credential), Some(encoded)) = (credential, encoded) else {
            // Partially-present state (e.g. a credential persisted without an
            // identity) is treated as absent.
            return self.erase_persisted();
        };

        if !token::is_valid(&credential, now) {
            debug!("persisted credential no longer validates; starting empty");
            return self.erase_persisted();
        }

        match codec::decode_identity(&encoded) {
            Some(identity) if identity.role.is_some() => {
                debug!(user_id = identity.id, "session rehydrated from persistence");
                *self.state_mut() = SessionState::Active {
                    credential,
                    identity,
                };
                Ok(())
            }
            _ => {
                warn!("persisted identity undecodable or roleless; starting empty");
                self.erase_persisted()
            }
        }
    }

    /// Establish a session from a credential and an identity.
    ///
    /// Rejects with [`SessionError::InvalidCredential`] /
    /// [`SessionError::InvalidIdentity`] before any state change. On success
    /// both values are persisted before this returns. An identity that fails
    /// to encode is logged and skipped while the credential is still written;
    /// rehydration later treats that credential-only state as absent.
    pub fn login(&self, credential: &str, identity: Identity) -> Result<(), StoreError> {
        if !token::is_valid(credential, Utc::now()) {
            return Err(SessionError::InvalidCredential.into());
        }
        if identity.role.is_none() {
            return Err(SessionError::InvalidIdentity.into());
        }

        self.kv.set(keys::AUTH_TOKEN, credential)?;

        match codec::encode_identity(&identity) {
            Some(encoded) => self.kv.set(keys::AUTH_USER, &encoded)?,
            None => {
                warn!(
                    user_id = identity.id,
                    "identity encoding failed; persisting credential only"
                );
                self.kv.remove(keys::AUTH_USER)?;
            }
        }

        debug!(user_id = identity.id, "session established");
        *self.state_mut() = SessionState::Active {
            credential: credential.to_string(),
            identity,
        };
        Ok(())
    }

    /// Tear the session down unconditionally. Idempotent.
    ///
    /// Erases both store-owned keys plus the collaborator-owned
    /// `supplier_invitations` scratch key, and signals the expiry worker to
    /// stop.
    pub fn logout(&self) -> Result<(), KvError> {
        *self.state_mut() = SessionState::Empty;
        self.erase_persisted()?;
        self.kv.remove(keys::SUPPLIER_INVITATIONS)?;

        if let Some(signal) = self.take_expiry_signal() {
            // The worker may itself be the caller here; a plain channel send
            // cannot block, so that is safe.
            let _ = signal.send(());
        }

        debug!("session cleared");
        Ok(())
    }

    /// Re-evaluate the current credential at `now`.
    ///
    /// Returns `true` while the session stays `Active`. A credential that no
    /// longer validates forces a full `logout`. This is the single
    /// expiry-enforcement point in the system.
    pub fn revalidate_at(&self, now: DateTime<Utc>) -> bool {
        let credential = match &*self.state() {
            SessionState::Active { credential, .. } => credential.clone(),
            SessionState::Empty => return false,
        };

        if token::is_valid(&credential, now) {
            return true;
        }

        warn!("credential expired mid-session; forcing logout");
        if let Err(err) = self.logout() {
            warn!(error = %err, "failed to erase persisted session during forced logout");
        }
        false
    }

    pub fn revalidate(&self) -> bool {
        self.revalidate_at(Utc::now())
    }

    // ─── Read-only projections ───────────────────────────────────────────────

    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.state(), SessionState::Active { .. })
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.active_role(), Some(Role::Admin))
    }

    pub fn is_supplier(&self) -> bool {
        matches!(self.active_role(), Some(Role::Supplier))
    }

    pub fn is_client(&self) -> bool {
        matches!(self.active_role(), Some(Role::Client))
    }

    /// The fixed `{id, name, email, role}` projection, while `Active`.
    pub fn public_identity(&self) -> Option<PublicIdentity> {
        match &*self.state() {
            SessionState::Active { identity, .. } => Some(identity.public()),
            SessionState::Empty => None,
        }
    }

    /// Immutable view for gate evaluation.
    pub fn snapshot(&self) -> SessionSnapshot {
        match &*self.state() {
            SessionState::Active { identity, .. } => SessionSnapshot {
                authenticated: true,
                role: identity.role.clone(),
            },
            SessionState::Empty => SessionSnapshot {
                authenticated: false,
                role: None,
            },
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ─── Internals ───────────────────────────────────────────────────────────

    fn active_role(&self) -> Option<Role> {
        match &*self.state() {
            SessionState::Active { identity, .. } => identity.role.clone(),
            SessionState::Empty => None,
        }
    }

    fn erase_persisted(&self) -> Result<(), KvError> {
        self.kv.remove(keys::AUTH_TOKEN)?;
        self.kv.remove(keys::AUTH_USER)
    }

    pub(crate) fn register_expiry_signal(&self, signal: mpsc::Sender<()>) {
        *self
            .expiry_signal
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(signal);
    }

    fn take_expiry_signal(&self) -> Option<mpsc::Sender<()>> {
        self.expiry_signal
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    // State writes replace the whole value, so a guard recovered from a
    // poisoned lock never exposes a half-written session.
    fn state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
