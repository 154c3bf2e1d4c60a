//! Token-format validation.
//!
//! Two accepted credential shapes, plus a length fallback:
//!
//! | Form         | Shape                              | Expiry check              |
//! |--------------|------------------------------------|---------------------------|
//! | Claims token | `seg1.seg2.seg3`                   | `exp` claim if decodable  |
//! | Opaque token | `<positive-int>\|<secret, len>=10>` | none                      |
//! | Fallback     | any other string                   | length > 10               |
//!
//! Validation is deliberately **permissive** for claims tokens whose payload
//! does not decode: a structurally token-shaped credential with an unreadable
//! middle segment is accepted. That is retained issuing-side behavior the
//! dashboard depends on, not an oversight; tightening it would reject
//! credentials the system currently accepts.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};

/// Minimum secret length for the `id|secret` opaque form.
const OPAQUE_SECRET_MIN_LEN: usize = 10;

/// Credentials matching neither structured form must be longer than this.
const FALLBACK_LEN_THRESHOLD: usize = 10;

/// Decide whether a credential string is well-formed and unexpired at `now`.
///
/// Never panics; every parse failure degrades to the per-branch default
/// described in the module docs.
pub fn is_valid(credential: &str, now: DateTime<Utc>) -> bool {
    if credential.is_empty() {
        return false;
    }

    if credential.contains('.') {
        claims_token_valid(credential, now)
    } else if credential.contains('|') {
        opaque_token_valid(credential)
    } else {
        credential.len() > FALLBACK_LEN_THRESHOLD
    }
}

/// Three dot-delimited segments; reject only on wrong segment count or a
/// decodable `exp` claim that lies in the past.
fn claims_token_valid(credential: &str, now: DateTime<Utc>) -> bool {
    let segments: Vec<&str> = credential.split('.').collect();
    if segments.len() != 3 {
        return false;
    }

    match decode_exp_claim(segments[1]) {
        Some(exp) => exp >= now.timestamp(),
        // Undecodable payload or no exp claim: accepted indefinitely.
        None => true,
    }
}

/// Pull the numeric `exp` claim (seconds since epoch) out of a base64url
/// payload segment, if the segment decodes to a JSON object carrying one.
fn decode_exp_claim(segment: &str) -> Option<i64> {
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    payload.as_object()?.get("exp")?.as_i64()
}

/// Exactly `id|secret`: a positive integer id and a secret of at least
/// [`OPAQUE_SECRET_MIN_LEN`] bytes. Opaque tokens carry no expiry.
fn opaque_token_valid(credential: &str) -> bool {
    let parts: Vec<&str> = credential.split('|').collect();
    if parts.len() != 2 {
        return false;
    }

    let id_ok = parts[0].parse::<u64>().map(|id| id > 0).unwrap_or(false);
    id_ok && parts[1].len() >= OPAQUE_SECRET_MIN_LEN
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn claims_token(payload: &serde_json::Value) -> String {
        let seg2 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("head.{seg2}.sig")
    }

    #[test]
    fn empty_credential_is_invalid() {
        assert!(!is_valid("", Utc::now()));
    }

    #[test]
    fn claims_token_with_future_exp_is_valid() {
        let now = Utc::now();
        let token = claims_token(&json!({ "exp": (now + Duration::hours(1)).timestamp() }));
        assert!(is_valid(&token, now));
    }

    #[test]
    fn claims_token_with_past_exp_is_invalid() {
        let now = Utc::now();
        let token = claims_token(&json!({ "exp": (now - Duration::seconds(1)).timestamp() }));
        assert!(!is_valid(&token, now));
    }

    #[test]
    fn claims_token_without_exp_is_valid() {
        let token = claims_token(&json!({ "sub": "42" }));
        assert!(is_valid(&token, Utc::now()));
    }

    #[test]
    fn undecodable_claims_payload_is_still_valid() {
        // Retained permissive policy: token-shaped, payload unreadable.
        assert!(is_valid("a.b.c", Utc::now()));
        assert!(is_valid("head.%%%%.sig", Utc::now()));
    }

    #[test]
    fn non_numeric_exp_degrades_to_valid() {
        let token = claims_token(&json!({ "exp": "tomorrow" }));
        assert!(is_valid(&token, Utc::now()));
    }

    #[test]
    fn wrong_dot_segment_count_is_invalid() {
        assert!(!is_valid("a.b", Utc::now()));
        assert!(!is_valid("a.b.c.d", Utc::now()));
    }

    #[test]
    fn empty_trailing_segment_still_counts() {
        // "x.y." splits into three segments, the last one empty; the shape
        // check is purely segment-count based.
        assert!(is_valid("x.y.", Utc::now()));
    }

    #[test]
    fn opaque_token_accepts_positive_id_and_long_secret() {
        assert!(is_valid("123|abcdefghij", Utc::now()));
        assert!(is_valid("1|0123456789abcdef", Utc::now()));
    }

    #[test]
    fn opaque_token_rejects_bad_id_or_short_secret() {
        assert!(!is_valid("0|abcdefghij", Utc::now()));
        assert!(!is_valid("-5|abcdefghij", Utc::now()));
        assert!(!is_valid("abc|abcdefghij", Utc::now()));
        assert!(!is_valid("123|short", Utc::now()));
        assert!(!is_valid("1|2|abcdefghij", Utc::now()));
    }

    #[test]
    fn dot_takes_precedence_over_pipe() {
        // Contains both separators: treated as a claims token, so the two
        // dot-segments fail the three-segment requirement.
        assert!(!is_valid("1.2|abcdefghij", Utc::now()));
    }

    #[test]
    fn fallback_checks_length_only() {
        assert!(is_valid("abcdefghijk", Utc::now())); // 11 chars
        assert!(!is_valid("abcdefghij", Utc::now())); // 10 chars
        assert!(!is_valid("short", Utc::now()));
    }

    #[test]
    fn opaque_tokens_never_expire() {
        let far_future = Utc::now() + Duration::days(365 * 10);
        assert!(is_valid("123|abcdefghij", far_future));
    }
}
