//! `tradegate-session` — the persisted-session state machine and the
//! capability gates evaluated in front of every protected view.
//!
//! The store owns exactly one session (credential + identity, or nothing),
//! persists it synchronously through the infra kv surface, and enforces
//! expiry from a single recurring worker tick. Gates are pure reads of a
//! session snapshot; they never block and never touch storage.

pub mod config;
pub mod expiry;
pub mod gate;
pub mod routes;
pub mod store;

pub use config::SessionConfig;
pub use expiry::{ExpiryWorker, WorkerHandle};
pub use gate::{Gate, GateDecision};
pub use store::{SessionSnapshot, SessionStore, StoreError};
