//! Route guard for protected views. The decision is a pure function of the stored
//! access token and the wall clock: no refresh, no network call, no memory between
//! evaluations. Any failure to read the expiry claim counts as expired.
//!
//! This is a client-side convenience only; revocation is enforced by the API and
//! surfaces through the 401 handling in [`crate::api::client`].

mod claims;
pub mod routes;

pub use claims::{token_expiry, ClaimsError};

use crate::session::{self, SessionStore};
use secrecy::ExposeSecret;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::debug;

/// Returns true when the token is absent, unreadable, or at/after its expiry.
#[must_use]
pub fn is_token_expired(token: Option<&str>, now_ms: u64) -> bool {
    let Some(token) = token.filter(|token| !token.is_empty()) else {
        return true;
    };

    match token_expiry(token) {
        #[allow(clippy::cast_precision_loss)]
        Ok(exp) => now_ms as f64 >= exp * 1000.0,
        Err(err) => {
            debug!("Treating access token as expired: {err}");
            true
        }
    }
}

/// Where a denied navigation is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    /// The location the user attempted to reach.
    pub from: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Redirect),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Decides whether `location` may be rendered with the given token.
#[must_use]
pub fn evaluate(token: Option<&str>, now_ms: u64, location: &str) -> Decision {
    if is_token_expired(token, now_ms) {
        Decision::Deny(Redirect {
            to: routes::SIGN_IN,
            replace: true,
            from: location.to_string(),
        })
    } else {
        Decision::Allow
    }
}

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}

/// A clock frozen at a given instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

/// Guard bound to a session store; the token is read fresh on every check.
#[derive(Clone)]
pub struct RouteGuard {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
}

impl RouteGuard {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    #[must_use]
    pub fn check(&self, location: &str) -> Decision {
        let token = session::access_token(self.store.as_ref());
        evaluate(
            token.as_ref().map(|token| token.expose_secret()),
            self.clock.now_ms(),
            location,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, SessionKey};
    use base64ct::{Base64UrlUnpadded, Encoding};

    fn token_with_exp(exp: u64) -> String {
        let claims = Base64UrlUnpadded::encode_string(format!(r#"{{"exp":{exp}}}"#).as_bytes());
        format!("eyJhbGciOiJIUzI1NiJ9.{claims}.sig")
    }

    #[test]
    fn allows_until_expiry_instant() {
        let token = token_with_exp(1_700_000_000);

        assert_eq!(
            evaluate(Some(&token), 1_699_999_999_999, "/dashboard"),
            Decision::Allow
        );
        assert!(!evaluate(Some(&token), 1_700_000_000_000, "/dashboard").is_allowed());
        assert!(!evaluate(Some(&token), 1_700_000_000_001, "/dashboard").is_allowed());
    }

    #[test]
    fn denies_without_token_and_keeps_origin() {
        let decision = evaluate(None, 0, "/admin/broadcast");
        assert_eq!(
            decision,
            Decision::Deny(Redirect {
                to: "/login",
                replace: true,
                from: "/admin/broadcast".to_string(),
            })
        );
        assert!(!evaluate(Some(""), 0, "/profile").is_allowed());
    }

    #[test]
    fn denies_malformed_tokens() {
        for token in ["abc", "abc.def", "abc.def.ghi", "a.b.c.d"] {
            assert!(is_token_expired(Some(token), 0), "{token}");
        }
    }

    #[test]
    fn route_guard_reads_store_on_every_check() {
        let store = MemoryStore::new();
        let guard = RouteGuard::with_clock(
            Arc::new(store.clone()),
            Arc::new(FixedClock(1_000_000)),
        );

        assert!(!guard.check("/dashboard").is_allowed());

        store
            .set(SessionKey::AccessToken, &token_with_exp(2_000))
            .unwrap();
        assert!(guard.check("/dashboard").is_allowed());

        store.clear(SessionKey::AccessToken).unwrap();
        assert!(!guard.check("/dashboard").is_allowed());
    }

    #[test]
    fn repeated_checks_agree() {
        let store = MemoryStore::new();
        store
            .set(SessionKey::AccessToken, &token_with_exp(2_000))
            .unwrap();
        let guard = RouteGuard::with_clock(Arc::new(store), Arc::new(FixedClock(1_999_999)));

        let first = guard.check("/profile");
        let second = guard.check("/profile");
        assert_eq!(first, second);
        assert!(first.is_allowed());
    }

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
