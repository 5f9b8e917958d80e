//! Persistence for the single bearer token of a signed-in user.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One named slot holding the session token.
///
/// Implementations never fail from the caller's point of view: storage
/// problems are logged and the slot behaves as empty.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Token kept in a file, by default `~/.config/anxiety-ally/token`.
///
/// With no resolvable location every operation is a no-op.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: Option<PathBuf>,
}

impl FileTokenStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let contents = std::fs::read_to_string(path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set(&self, token: &str) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "failed to create token dir");
                return;
            }
        }
        if let Err(e) = write_private(path, token) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write token");
        }
    }

    fn clear(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove token"),
        }
    }
}

/// Write `token` readable by the owner only. An existing file is truncated
/// and its mode tightened.
fn write_private(path: &Path, token: &str) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(token.as_bytes())
}

/// Process-local token slot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_token_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("ally-token-test-{}", uuid::Uuid::now_v7()))
            .join("token")
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_token_path();
        let store = FileTokenStore::new(Some(path.clone()));

        assert!(store.get().is_none());
        store.set("abc.def.ghi");
        assert_eq!(store.get().as_deref(), Some("abc.def.ghi"));

        store.clear();
        assert!(store.get().is_none());
        assert!(!path.exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_overwrites_single_slot() {
        let path = temp_token_path();
        let store = FileTokenStore::new(Some(path.clone()));

        store.set("first");
        store.set("second");
        assert_eq!(store.get().as_deref(), Some("second"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_blank_file_is_empty() {
        let path = temp_token_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(Some(path.clone()));
        assert!(store.get().is_none());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_trims_newline() {
        let path = temp_token_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "tok\n").unwrap();

        let store = FileTokenStore::new(Some(path.clone()));
        assert_eq!(store.get().as_deref(), Some("tok"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_token_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_token_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(Some(path.clone()));
        store.set("secret");
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get().as_deref(), Some("secret"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_without_location_is_noop() {
        let store = FileTokenStore::new(None);
        store.set("ignored");
        assert!(store.get().is_none());
        store.clear();
    }

    #[test]
    fn test_clear_missing_file_is_quiet() {
        let store = FileTokenStore::new(Some(temp_token_path()));
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let a = MemoryTokenStore::with_token("t1");
        let b = a.clone();
        assert_eq!(b.get().as_deref(), Some("t1"));
        b.clear();
        assert!(a.get().is_none());
    }
}
