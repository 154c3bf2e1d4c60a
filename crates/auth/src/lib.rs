//! `tradegate-auth` — credential validation and identity encoding.
//!
//! This crate is intentionally decoupled from storage and UI. It answers two
//! questions only: "is this token string well-formed and unexpired?" and
//! "how does an identity record become a storable string (and back)?".

pub mod codec;
pub mod token;

pub use codec::{decode_identity, encode_identity};
pub use token::is_valid;
