use crate::{
    cli::globals::GlobalArgs,
    guard::{routes, Decision, RouteGuard},
    session,
};
use anyhow::{anyhow, Result};

/// Fails unless the stored session may open `route`.
///
/// # Errors
/// Returns an error naming the sign-in redirect when the guard denies access.
pub fn require_session(guard: &RouteGuard, route: &str) -> Result<()> {
    match guard.check(route) {
        Decision::Allow => Ok(()),
        Decision::Deny(redirect) => Err(anyhow!(
            "Session missing or expired, sign in first (redirect to {} from {})",
            redirect.to,
            redirect.from
        )),
    }
}

/// Prints the stored identity and the guard decision for `route`.
///
/// # Errors
/// Returns an error when the guard denies access, so the process exits non-zero.
pub fn status(route: &str, globals: &GlobalArgs) -> Result<()> {
    let store = globals.store();
    let identity = session::identity(store.as_ref());

    println!("Session file: {}", globals.session_file.display());
    if !identity.email.is_empty() {
        println!("Signed in as {} <{}>", identity.name, identity.email);
    }
    if session::remembered(store.as_ref()) {
        println!("Admin sign-in remembered");
    }
    if !routes::is_protected(route) {
        println!("{route} is public");
        return Ok(());
    }

    require_session(&globals.guard(store), route)?;
    println!("Access to {route} granted");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        guard::FixedClock,
        session::{MemoryStore, SessionKey, SessionStore},
    };
    use base64ct::{Base64UrlUnpadded, Encoding};
    use std::sync::Arc;

    fn token(exp: u64) -> String {
        let claims = Base64UrlUnpadded::encode_string(format!(r#"{{"exp":{exp}}}"#).as_bytes());
        format!("eyJhbGciOiJIUzI1NiJ9.{claims}.sig")
    }

    fn guard_at(store: &Arc<MemoryStore>, now_ms: u64) -> RouteGuard {
        RouteGuard::with_clock(store.clone(), Arc::new(FixedClock(now_ms)))
    }

    #[test]
    fn require_session_allows_live_token() {
        let store = Arc::new(MemoryStore::default());
        store.set(SessionKey::AccessToken, &token(2_000)).unwrap();

        assert!(require_session(&guard_at(&store, 1_999_999), routes::DASHBOARD).is_ok());
    }

    #[test]
    fn require_session_names_redirect() {
        let store = Arc::new(MemoryStore::default());
        store.set(SessionKey::AccessToken, &token(2_000)).unwrap();

        let err = require_session(&guard_at(&store, 2_000_000), routes::ADMIN_DASHBOARD)
            .unwrap_err()
            .to_string();
        assert!(err.contains("/login"));
        assert!(err.contains(routes::ADMIN_DASHBOARD));
    }

    #[test]
    fn require_session_denies_without_token() {
        let store = Arc::new(MemoryStore::default());
        assert!(require_session(&guard_at(&store, 0), routes::PROFILE).is_err());
    }

    #[test]
    fn status_denies_empty_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let globals = GlobalArgs::new(None, dir.path().join("session.json"));

        assert!(status(routes::DASHBOARD, &globals).is_err());
        assert!(status(routes::SIGN_IN, &globals).is_ok());
    }
}
