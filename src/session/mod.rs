//! Persisted client session state. The session store replaces browser local storage
//! with an explicit, injectable key-value interface so the HTTP client and the route
//! guard read the same credentials without reaching for a global. Every consumer reads
//! the store fresh; nothing here caches a token snapshot.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use thiserror::Error;

/// Keys persisted by the client. No other state is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKey {
    AccessToken,
    Name,
    Email,
    Avatar,
    Remember,
}

impl SessionKey {
    pub const ALL: [SessionKey; 5] = [
        SessionKey::AccessToken,
        SessionKey::Name,
        SessionKey::Email,
        SessionKey::Avatar,
        SessionKey::Remember,
    ];

    /// Storage name used on disk.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionKey::AccessToken => "bitva:access_token",
            SessionKey::Name => "bitva:name",
            SessionKey::Email => "bitva:email",
            SessionKey::Avatar => "bitva:avatar",
            SessionKey::Remember => "bitva:remember",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Process-wide key-value store backing the session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: SessionKey) -> Option<String>;

    /// # Errors
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError>;

    /// # Errors
    /// Returns an error if the removal cannot be persisted.
    fn clear(&self, key: SessionKey) -> Result<(), SessionError>;

    /// # Errors
    /// Returns the first error hit while clearing keys.
    fn clear_all(&self) -> Result<(), SessionError> {
        for key in SessionKey::ALL {
            self.clear(key)?;
        }
        Ok(())
    }
}

/// Returns the stored access token; an empty value counts as absent.
pub fn access_token(store: &dyn SessionStore) -> Option<SecretString> {
    store
        .get(SessionKey::AccessToken)
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
}

/// Display metadata kept next to the token. Never used for authorization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Reads the display identity, falling back to a generic name.
pub fn identity(store: &dyn SessionStore) -> Identity {
    Identity {
        name: store
            .get(SessionKey::Name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        email: store.get(SessionKey::Email).unwrap_or_default(),
        avatar: store.get(SessionKey::Avatar).filter(|url| !url.is_empty()),
    }
}

/// Whether the last admin sign-in asked to be remembered.
pub fn remembered(store: &dyn SessionStore) -> bool {
    store.get(SessionKey::Remember).as_deref() == Some("1")
}

/// Persists the outcome of a successful sign-in.
///
/// `remember` is only touched when `Some`, since plain user sign-in never sets it.
///
/// # Errors
/// Returns an error if any key cannot be written.
pub fn persist_sign_in(
    store: &dyn SessionStore,
    token: Option<&SecretString>,
    identity: &Identity,
    remember: Option<bool>,
) -> Result<(), SessionError> {
    if !identity.name.is_empty() {
        store.set(SessionKey::Name, &identity.name)?;
    }
    if !identity.email.is_empty() {
        store.set(SessionKey::Email, &identity.email)?;
    }
    match remember {
        Some(true) => store.set(SessionKey::Remember, "1")?,
        Some(false) => store.clear(SessionKey::Remember)?,
        None => {}
    }
    if let Some(token) = token.filter(|token| !token.expose_secret().is_empty()) {
        store.set(SessionKey::AccessToken, token.expose_secret())?;
    }
    Ok(())
}

/// Removes the token and display metadata, as done on sign-out.
///
/// # Errors
/// Returns the first error hit while clearing keys.
pub fn clear_session(store: &dyn SessionStore) -> Result<(), SessionError> {
    for key in [
        SessionKey::Name,
        SessionKey::Email,
        SessionKey::Avatar,
        SessionKey::AccessToken,
    ] {
        store.clear(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_names_are_namespaced() {
        for key in SessionKey::ALL {
            assert!(key.as_str().starts_with("bitva:"));
        }
        assert_eq!(SessionKey::AccessToken.to_string(), "bitva:access_token");
    }

    #[test]
    fn empty_token_counts_as_absent() -> Result<(), SessionError> {
        let store = MemoryStore::new();
        store.set(SessionKey::AccessToken, "")?;
        assert!(access_token(&store).is_none());

        store.set(SessionKey::AccessToken, "abc.def.ghi")?;
        assert_eq!(
            access_token(&store).map(|t| t.expose_secret().to_string()),
            Some("abc.def.ghi".to_string())
        );
        Ok(())
    }

    #[test]
    fn identity_falls_back_to_generic_name() -> Result<(), SessionError> {
        let store = MemoryStore::new();
        assert_eq!(identity(&store).name, DEFAULT_DISPLAY_NAME);

        store.set(SessionKey::Name, "Alex")?;
        store.set(SessionKey::Email, "alex@bitva.io")?;
        let current = identity(&store);
        assert_eq!(current.name, "Alex");
        assert_eq!(current.email, "alex@bitva.io");
        assert_eq!(current.avatar, None);
        Ok(())
    }

    #[test]
    fn persist_sign_in_and_clear_session() -> Result<(), SessionError> {
        let store = MemoryStore::new();
        let token = SecretString::from("abc.def.ghi".to_string());
        let who = Identity {
            name: "Alex".to_string(),
            email: "alex@bitva.io".to_string(),
            avatar: None,
        };

        persist_sign_in(&store, Some(&token), &who, Some(true))?;
        assert!(remembered(&store));
        assert_eq!(store.get(SessionKey::AccessToken).as_deref(), Some("abc.def.ghi"));

        persist_sign_in(&store, Some(&token), &who, Some(false))?;
        assert!(!remembered(&store));

        clear_session(&store)?;
        assert!(access_token(&store).is_none());
        assert!(store.get(SessionKey::Name).is_none());
        assert!(store.get(SessionKey::Email).is_none());
        Ok(())
    }
}
