//! `tradegate-core` — domain foundation for the marketplace session core.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! roles, the user identity record, and the domain error model.

pub mod error;
pub mod identity;
pub mod role;

pub use error::{SessionError, SessionResult};
pub use identity::{Identity, PublicIdentity};
pub use role::Role;
