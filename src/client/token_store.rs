//! # Token Storage
//!
//! Where the client keeps its bearer token between requests. The CLI uses a
//! session file; tests and embedders can keep it in memory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockWriteGuard};

use super::errors::{ClientError, ClientResult};

pub trait TokenStore: Send + Sync {
    /// Current token, if any
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str) -> ClientResult<()>;

    fn clear(&self) -> ClientResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> ClientResult<RwLockWriteGuard<'_, Option<String>>> {
        self.token
            .write()
            .map_err(|_| ClientError::TokenStore("lock poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Token kept in a single file; clearing removes the file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        let token = content.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());

        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_store_reports_poisoned_lock() {
        let store = std::sync::Arc::new(MemoryTokenStore::new());

        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.token.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.save("abc"), Err(ClientError::TokenStore(_))));
        assert!(matches!(store.clear(), Err(ClientError::TokenStore(_))));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_persists_and_clears() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("session");
        let store = FileTokenStore::new(&path);

        assert!(store.load().is_none());
        store.save("token-1").unwrap();

        // a second handle on the same file sees the token
        assert_eq!(FileTokenStore::new(&path).load().as_deref(), Some("token-1"));

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.load().is_none());

        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session");
        fs::write(&path, "  \n").unwrap();

        assert!(FileTokenStore::new(&path).load().is_none());
    }
}
