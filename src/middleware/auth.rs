// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token inspection.
//!
//! The client never verifies signatures (the server does); it only reads the
//! `exp` claim to decide whether a token is about to expire.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Margin before token expiration when we proactively refresh (5 minutes).
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// The only claim the client cares about.
#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Expiry of a JWT access token, if it carries one.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}

/// True when the token expires within `margin` of `now`.
///
/// Opaque tokens (no readable `exp`) are never considered expiring.
pub fn expires_within(token: &str, margin: Duration, now: DateTime<Utc>) -> bool {
    token_expiry(token).is_some_and(|exp| now + margin >= exp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_jwt(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{},"user_id":1}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_token_expiry() {
        let token = fake_jwt(1_700_000_000);
        assert_eq!(
            token_expiry(&token),
            DateTime::from_timestamp(1_700_000_000, 0)
        );
        assert_eq!(token_expiry("opaque-token"), None);
    }

    #[test]
    fn test_expires_within_margin() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let margin = Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);

        assert!(expires_within(&fake_jwt(1_700_000_000 + 60), margin, now));
        assert!(!expires_within(&fake_jwt(1_700_000_000 + 3600), margin, now));
        assert!(!expires_within("opaque-token", margin, now));
    }
}
