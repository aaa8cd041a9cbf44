// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Key-value storage capability with in-memory, flat-file and cookie
//! backed implementations.
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use axum::http::{header, HeaderMap, HeaderValue};
use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::fs as tokio_fs;

/// Storage failures. Only the flat-file backend can actually fail.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt store file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: Storage + ?Sized> Storage for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key).await
    }
}

/// Process-local storage
#[derive(Clone, Default, Debug)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Flat-file storage: one JSON object in `<root>/storage.json`.
/// Survives restarts, so a new process starts in whatever session state
/// the previous one left behind.
#[derive(Clone, Debug)]
pub struct FlatFileStorage {
    path: PathBuf,
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl FlatFileStorage {
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            path: root.join(Self::FILE_NAME),
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio_fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FlatFileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.load().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

/// A pending change to a cookie
#[derive(Debug, Clone, PartialEq, Eq)]
enum CookieChange {
    Set(String),
    Remove,
}

/// Request-scoped storage over browser cookies.
///
/// Reads come from the request's `Cookie` header; writes are journaled and
/// turned into `Set-Cookie` headers for the response, so the browser stays
/// the persistent store.
#[derive(Debug, Default)]
pub struct CookieStorage {
    cookies: Mutex<BTreeMap<String, String>>,
    changes: Mutex<BTreeMap<String, CookieChange>>,
    secure: bool,
}

impl CookieStorage {
    pub fn from_headers(headers: &HeaderMap, secure: bool) -> Self {
        let mut cookies = BTreeMap::new();
        for value in headers.get_all(header::COOKIE) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for pair in value.split(';') {
                if let Some((name, val)) = pair.trim().split_once('=') {
                    // first occurrence wins, as browsers send the most specific cookie first
                    cookies
                        .entry(name.trim().to_string())
                        .or_insert_with(|| val.trim().trim_matches('"').to_string());
                }
            }
        }

        Self {
            cookies: Mutex::new(cookies),
            changes: Mutex::new(BTreeMap::new()),
            secure,
        }
    }

    /// `Set-Cookie` headers for every change made through this storage
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        let suffix = if self.secure {
            "; Path=/; HttpOnly; SameSite=Lax; Secure"
        } else {
            "; Path=/; HttpOnly; SameSite=Lax"
        };

        self.changes
            .lock()
            .iter()
            .filter_map(|(name, change)| {
                let cookie = match change {
                    CookieChange::Set(value) => format!("{name}={value}{suffix}"),
                    CookieChange::Remove => format!("{name}={suffix}; Max-Age=0"),
                };
                match HeaderValue::from_str(&cookie) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(cookie = %name, "dropping cookie with invalid characters");
                        None
                    },
                }
            })
            .collect()
    }
}

#[async_trait]
impl Storage for CookieStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cookies.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.cookies.lock().insert(key.to_string(), value.to_string());
        self.changes
            .lock()
            .insert(key.to_string(), CookieChange::Set(value.to_string()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let existed = self.cookies.lock().remove(key).is_some();
        let mut changes = self.changes.lock();
        if existed || changes.contains_key(key) {
            changes.insert(key.to_string(), CookieChange::Remove);
        }
        Ok(())
    }
}
