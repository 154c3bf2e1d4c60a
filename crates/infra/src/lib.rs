//! `tradegate-infra` — infrastructure surfaces for the session core.
//!
//! Currently this is the key-value persistence boundary the session store
//! writes through. Implementations range from the in-memory store (tests and
//! dev) to whatever the embedding shell provides (browser local storage,
//! desktop settings file).

pub mod kv;

pub use kv::{InMemoryKvStore, KvError, KvStore, keys};
