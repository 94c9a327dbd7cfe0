//! File-backed session store used by the CLI. The file holds a flat JSON object keyed by
//! storage name. Reads always hit the disk so a sign-out from another process is seen by
//! the next request.

use super::{SessionError, SessionKey, SessionStore};
use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::warn;

#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut file = open_private(&tmp_path)?;
            file.write_all(&payload)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), SessionError> {
        let mut entries = self.load()?;
        apply(&mut entries);
        self.save(&entries)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

impl SessionStore for FileStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key.as_str()),
            Err(err) => {
                // An unreadable store reads as signed out.
                warn!("Failed to read session file {}: {err}", self.path.display());
                None
            }
        }
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionError> {
        self.update(|entries| {
            entries.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn clear(&self, key: SessionKey) -> Result<(), SessionError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(SessionError::Json(err)) => {
                // Reads already treat a corrupt file as signed out; rewrite it clean.
                warn!("Discarding corrupt session file {}: {err}", self.path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.remove(key.as_str());
        self.save(&entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));

        assert!(store.get(SessionKey::AccessToken).is_none());
        assert!(store.clear(SessionKey::AccessToken).is_ok());
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileStore::new(&path)
            .set(SessionKey::AccessToken, "abc.def.ghi")
            .unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get(SessionKey::AccessToken).as_deref(),
            Some("abc.def.ghi")
        );

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"bitva:access_token\""));
    }

    #[test]
    fn clear_removes_only_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));

        store.set(SessionKey::AccessToken, "abc.def.ghi").unwrap();
        store.set(SessionKey::Name, "Alex").unwrap();
        store.clear(SessionKey::AccessToken).unwrap();

        assert!(store.get(SessionKey::AccessToken).is_none());
        assert_eq!(store.get(SessionKey::Name).as_deref(), Some("Alex"));
    }

    #[test]
    fn corrupt_file_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get(SessionKey::AccessToken).is_none());
        assert!(matches!(
            store.set(SessionKey::Name, "Alex"),
            Err(SessionError::Json(_))
        ));
    }

    #[test]
    fn clearing_a_corrupt_file_resets_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{\"bitva:access_token\": ").unwrap();

        let store = FileStore::new(&path);
        crate::session::clear_session(&store).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
        store.set(SessionKey::Name, "Alex").unwrap();
        assert_eq!(store.get(SessionKey::Name).as_deref(), Some("Alex"));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileStore::new(&path)
            .set(SessionKey::AccessToken, "abc.def.ghi")
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
