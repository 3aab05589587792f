//! Durable client-side session storage.
//!
//! A single JSON blob survives process restarts: identity, operating context,
//! permission tree, both indices and the authenticated flag. The blob is
//! written synchronously on every session mutation and read back once at
//! startup. It is never trusted blindly — the bootstrap protocol revalidates
//! against the server, and the indices are rebuilt from the tree on load.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthUser, OperatingContext};
use crate::permissions::{ActionFlags, Page, PermissionTree};

/// The persisted subset of the session.
///
/// `isLoading` and the hydration flag are process-local bootstrap state and
/// are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(rename = "usuario", default)]
    pub user: Option<AuthUser>,

    #[serde(rename = "contextoOperativo", default)]
    pub operating_context: Option<OperatingContext>,

    #[serde(rename = "permisos", default)]
    pub permission_tree: PermissionTree,

    #[serde(rename = "permisosPorRuta", default)]
    pub actions_by_route: std::collections::HashMap<String, ActionFlags>,

    #[serde(rename = "paginaPorRuta", default)]
    pub page_by_route: std::collections::HashMap<String, Page>,

    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: bool,

    #[serde(rename = "savedAt", default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Storage backend for the persisted session blob.
///
/// Implementations must be cheap: the store writes on every mutation.
pub trait SessionBackend: Send + Sync {
    /// Read the blob back, if any. A corrupt blob is an error, not `None`.
    fn load(&self) -> Result<Option<PersistedSession>>;

    /// Replace the blob.
    fn save(&self, snapshot: &PersistedSession) -> Result<()>;

    /// Remove the blob entirely.
    fn clear(&self) -> Result<()>;
}

/// File-backed storage (one pretty-printed JSON file).
pub struct FileSessionBackend {
    path: PathBuf,
}

impl FileSessionBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionBackend for FileSessionBackend {
    fn load(&self) -> Result<Option<PersistedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading session blob {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parsing session blob {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating session dir {}", parent.display()))?;
        }

        let raw = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing session blob {}", self.path.display()))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("removing session blob {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-memory storage for tests and the offline demo.
#[derive(Default)]
pub struct MemorySessionBackend {
    blob: Mutex<Option<PersistedSession>>,
}

impl MemorySessionBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemorySessionBackend {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.blob.lock().expect("session blob lock poisoned").clone())
    }

    fn save(&self, snapshot: &PersistedSession) -> Result<()> {
        *self.blob.lock().expect("session blob lock poisoned") = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.blob.lock().expect("session blob lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Branch, Company, Sector};

    fn sample() -> PersistedSession {
        PersistedSession {
            user: Some(AuthUser {
                id: 1,
                email: "ana@pirapo.coop.py".into(),
                display_name: "Ana".into(),
                role: "ADMIN".into(),
                group_id: Some(2),
            }),
            operating_context: Some(OperatingContext {
                company: Company { code: "01".into(), name: "Pirapó".into(), ruc: None },
                sector: Sector { code: "S1".into(), name: "Central".into() },
                branch: Branch { code: None, name: "Casa Matriz".into() },
                available_sectors: vec![],
            }),
            permission_tree: vec![],
            actions_by_route: Default::default(),
            page_by_route: Default::default(),
            is_authenticated: true,
            saved_at: Some(Utc::now()),
        }
    }

    #[test]
    fn file_backend_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileSessionBackend::new(dir.path().join("session.json"));

        assert!(backend.load().unwrap().is_none());

        let snapshot = sample();
        backend.save(&snapshot).unwrap();
        assert_eq!(backend.load().unwrap(), Some(snapshot));

        backend.clear().unwrap();
        assert!(backend.load().unwrap().is_none());
        // clearing twice is fine
        backend.clear().unwrap();
    }

    #[test]
    fn file_backend_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileSessionBackend::new(dir.path().join("nested/deeper/session.json"));
        backend.save(&sample()).unwrap();
        assert!(backend.load().unwrap().is_some());
    }

    #[test]
    fn corrupt_blob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let backend = FileSessionBackend::new(path);
        assert!(backend.load().is_err());
    }

    #[test]
    fn memory_backend_round_trips() {
        let backend = MemorySessionBackend::new();
        assert!(backend.load().unwrap().is_none());
        backend.save(&sample()).unwrap();
        assert!(backend.load().unwrap().unwrap().is_authenticated);
        backend.clear().unwrap();
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn persisted_blob_uses_storage_key_names() {
        let raw = serde_json::to_value(sample()).unwrap();
        assert!(raw.get("usuario").is_some());
        assert!(raw.get("contextoOperativo").is_some());
        assert!(raw.get("permisos").is_some());
        assert!(raw.get("permisosPorRuta").is_some());
        assert!(raw.get("paginaPorRuta").is_some());
        assert!(raw.get("isAuthenticated").is_some());
    }
}
