//! Reversible identity encoding for at-rest storage.
//!
//! **This is obfuscation, not encryption.** The transform chain is
//! JSON → percent-escaping → base64: reversible, keyless, and integrity-free.
//! It keeps the identity record from being trivially greppable in the
//! persistence store and nothing more. Anyone who can read the store can
//! decode the value; if actual confidentiality is ever required that is new
//! scope, not a tweak to this module.
//!
//! The percent-escaping middle layer exists so the chain losslessly
//! round-trips non-ASCII field values (names, company strings) regardless of
//! how the outer layer treats multi-byte input.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use tracing::warn;

use tradegate_core::Identity;

/// Encode an identity into its storable string form.
///
/// Returns `None` (and logs) if serialization fails; callers degrade by
/// proceeding without a persisted identity.
pub fn encode_identity(identity: &Identity) -> Option<String> {
    let json = serde_json::to_string(identity)
        .map_err(|err| warn!(error = %err, "identity serialization failed"))
        .ok()?;

    let escaped = urlencoding::encode(&json);
    Some(BASE64_STANDARD.encode(escaped.as_bytes()))
}

/// Exact inverse of [`encode_identity`].
///
/// Returns `None` (never panics) on any failure at any stage; callers treat
/// the stored value as absent.
pub fn decode_identity(encoded: &str) -> Option<Identity> {
    let unwrapped = BASE64_STANDARD
        .decode(encoded)
        .map_err(|err| warn!(error = %err, "stored identity is not valid base64"))
        .ok()?;

    let escaped = String::from_utf8(unwrapped)
        .map_err(|err| warn!(error = %err, "stored identity is not valid UTF-8"))
        .ok()?;

    let json = urlencoding::decode(&escaped)
        .map_err(|err| warn!(error = %err, "stored identity percent-decode failed"))
        .ok()?;

    serde_json::from_str(&json)
        .map_err(|err| warn!(error = %err, "stored identity JSON parse failed"))
        .ok()
}
