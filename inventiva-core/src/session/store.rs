//! Process-wide authenticated-session state.
//!
//! The store is an injectable service (construct one per app, or per test)
//! holding the current user, operating context, permission tree and the
//! derived route indices behind one `RwLock`. All mutation goes through the
//! three whole-record transitions (`set_auth`, `clear_auth`, `switch_sector`);
//! readers can never observe a half-updated session.
//!
//! None of the operations return errors: lookups are total (unknown route
//! denies), and persistence failures are logged and swallowed — a broken
//! local cache must never take the UI down.

use std::sync::RwLock;

use chrono::Utc;

use crate::auth::{AuthBundle, AuthUser, OperatingContext, Sector};
use crate::permissions::{
    build_indices, find_duplicate_routes, Page, PermissionAction, PermissionIndex, PermissionTree,
};

use super::persist::{MemorySessionBackend, PersistedSession, SessionBackend};

/// Everything a renderer needs, cloned out in one consistent read.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub user: Option<AuthUser>,
    pub operating_context: Option<OperatingContext>,
    pub permission_tree: PermissionTree,
    pub index: PermissionIndex,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<AuthUser>,
    operating_context: Option<OperatingContext>,
    permission_tree: PermissionTree,
    index: PermissionIndex,
    is_authenticated: bool,
    is_loading: bool,
    hydrated: bool,
}

impl SessionState {
    /// Process-start state: empty, loading, not yet hydrated.
    fn boot() -> Self {
        Self { is_loading: true, ..Default::default() }
    }

    fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            operating_context: self.operating_context.clone(),
            permission_tree: self.permission_tree.clone(),
            actions_by_route: self.index.actions_by_route.clone(),
            page_by_route: self.index.page_by_route.clone(),
            is_authenticated: self.is_authenticated,
            saved_at: Some(Utc::now()),
        }
    }
}

/// The shared session store.
pub struct SessionStore {
    state: RwLock<SessionState>,
    backend: Box<dyn SessionBackend>,
}

impl SessionStore {
    pub fn new(backend: Box<dyn SessionBackend>) -> Self {
        Self { state: RwLock::new(SessionState::boot()), backend }
    }

    /// Store with an in-memory backend (tests, demos).
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySessionBackend::new()))
    }

    /// Establish a session from a complete login / who-am-i payload.
    ///
    /// Indices are rebuilt from the tree and the whole record is replaced in
    /// one transition; afterwards `is_authenticated` is true and loading is
    /// over. Persisted synchronously.
    pub fn set_auth(&self, bundle: AuthBundle) {
        if cfg!(debug_assertions) {
            let duplicates = find_duplicate_routes(&bundle.permission_tree);
            if !duplicates.is_empty() {
                log::warn!(
                    "permission tree contains duplicate routes (last one wins): {}",
                    duplicates.join(", ")
                );
            }
        }

        let index = build_indices(&bundle.permission_tree);
        let next = SessionState {
            operating_context: Some(bundle.operating_context()),
            user: Some(bundle.user),
            permission_tree: bundle.permission_tree,
            index,
            is_authenticated: true,
            is_loading: false,
            hydrated: true,
        };

        let mut state = self.state.write().expect("session state lock poisoned");
        *state = next;
        self.persist(&state);
    }

    /// Reset to the empty state. Idempotent; also drops the persisted blob.
    pub fn clear_auth(&self) {
        let mut state = self.state.write().expect("session state lock poisoned");
        *state = SessionState { is_loading: false, hydrated: true, ..Default::default() };
        drop(state);

        if let Err(err) = self.backend.clear() {
            log::warn!("failed to clear persisted session: {err:#}");
        }
    }

    /// Switch the operating sector (and its owning branch) without touching
    /// identity, tree or indices. Unknown codes are a silent no-op — the UI
    /// may be acting on a stale sector list.
    pub fn switch_sector(&self, sector_code: &str) {
        let mut state = self.state.write().expect("session state lock poisoned");

        let Some(context) = state.operating_context.as_mut() else { return };
        let Some(option) =
            context.available_sectors.iter().find(|s| s.code == sector_code).cloned()
        else {
            log::debug!("switch_sector: unknown sector code {sector_code}, ignoring");
            return;
        };

        context.sector = Sector { code: option.code, name: option.name };
        context.branch = option.branch;
        self.persist(&state);
    }

    /// Load the persisted blob back into memory. Returns whether a persisted
    /// user exists (i.e. whether revalidation is warranted).
    ///
    /// The indices are rebuilt from the persisted tree rather than trusted,
    /// so a stale index format self-heals. When a user is present, loading
    /// stays on until revalidation settles the session.
    pub fn hydrate(&self) -> bool {
        let blob = match self.backend.load() {
            Ok(blob) => blob,
            Err(err) => {
                log::warn!("failed to read persisted session, starting empty: {err:#}");
                None
            }
        };

        let mut state = self.state.write().expect("session state lock poisoned");
        match blob {
            Some(blob) if blob.user.is_some() => {
                let index = build_indices(&blob.permission_tree);
                *state = SessionState {
                    user: blob.user,
                    operating_context: blob.operating_context,
                    permission_tree: blob.permission_tree,
                    index,
                    is_authenticated: blob.is_authenticated,
                    is_loading: true,
                    hydrated: true,
                };
                true
            }
            _ => {
                *state = SessionState { is_loading: false, hydrated: true, ..Default::default() };
                false
            }
        }
    }

    // --- permission checks (fail-closed) ---

    /// May the user see this route at all? Unknown route denies.
    pub fn has_view_permission(&self, route: &str) -> bool {
        self.has_action_permission(route, PermissionAction::View)
    }

    /// May the user perform `action` on this route? Unknown route denies.
    pub fn has_action_permission(&self, route: &str, action: PermissionAction) -> bool {
        let state = self.state.read().expect("session state lock poisoned");
        state.index.actions_by_route.get(route).map(|flags| flags.allows(action)).unwrap_or(false)
    }

    /// Full page record for a route, if indexed.
    pub fn page_by_route(&self, route: &str) -> Option<Page> {
        let state = self.state.read().expect("session state lock poisoned");
        state.index.page_by_route.get(route).cloned()
    }

    // --- accessors ---

    pub fn is_authenticated(&self) -> bool {
        self.state.read().expect("session state lock poisoned").is_authenticated
    }

    /// True from process start until the bootstrap protocol settles.
    pub fn is_loading(&self) -> bool {
        self.state.read().expect("session state lock poisoned").is_loading
    }

    /// False until [`hydrate`](Self::hydrate) has run; permission checks made
    /// earlier answer over the empty index and must not be trusted.
    pub fn is_hydrated(&self) -> bool {
        self.state.read().expect("session state lock poisoned").hydrated
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.read().expect("session state lock poisoned").user.clone()
    }

    pub fn operating_context(&self) -> Option<OperatingContext> {
        self.state.read().expect("session state lock poisoned").operating_context.clone()
    }

    pub fn permission_tree(&self) -> PermissionTree {
        self.state.read().expect("session state lock poisoned").permission_tree.clone()
    }

    /// One consistent clone of everything a renderer reads.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().expect("session state lock poisoned");
        SessionSnapshot {
            user: state.user.clone(),
            operating_context: state.operating_context.clone(),
            permission_tree: state.permission_tree.clone(),
            index: state.index.clone(),
            is_authenticated: state.is_authenticated,
            is_loading: state.is_loading,
        }
    }

    fn persist(&self, state: &SessionState) {
        if let Err(err) = self.backend.save(&state.to_persisted()) {
            log::warn!("failed to persist session: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Branch, Company, SectorOption};
    use crate::permissions::{ActionFlags, Module, PageType};
    use crate::session::persist::FileSessionBackend;

    fn sample_tree() -> PermissionTree {
        vec![Module {
            id: 1,
            code: "VEN".into(),
            name: "Ventas".into(),
            icon: Some("shopping-cart".into()),
            order: 1,
            types: vec![PageType {
                id: 1,
                code: "MOV".into(),
                name: "Movimientos".into(),
                icon: Some("folder".into()),
                order: 1,
                pages: vec![Page {
                    id: 1,
                    code: "FACT".into(),
                    name: "Facturación".into(),
                    route: "/ventas/movimientos/facturacion".into(),
                    icon: Some("file-text".into()),
                    order: 1,
                    permissions: ActionFlags { view: true, create: true, edit: true, delete: false },
                }],
            }],
        }]
    }

    fn sample_bundle() -> AuthBundle {
        AuthBundle {
            user: AuthUser {
                id: 7,
                email: "ana@pirapo.coop.py".into(),
                display_name: "Ana".into(),
                role: "ADMIN".into(),
                group_id: Some(2),
            },
            company: Company { code: "01".into(), name: "Pirapó".into(), ruc: None },
            sector: Sector { code: "S1".into(), name: "Central".into() },
            branch: Branch { code: Some("B1".into()), name: "Casa Matriz".into() },
            available_sectors: vec![
                SectorOption {
                    code: "S1".into(),
                    name: "Central".into(),
                    branch: Branch { code: Some("B1".into()), name: "Casa Matriz".into() },
                },
                SectorOption {
                    code: "S2".into(),
                    name: "Depósito".into(),
                    branch: Branch { code: Some("B2".into()), name: "Sucursal Norte".into() },
                },
            ],
            permission_tree: sample_tree(),
        }
    }

    #[test]
    fn boot_state_is_loading_and_unauthenticated() {
        let store = SessionStore::in_memory();
        assert!(store.is_loading());
        assert!(!store.is_authenticated());
        assert!(!store.is_hydrated());
        assert!(!store.has_view_permission("/ventas/movimientos/facturacion"));
    }

    #[test]
    fn set_auth_is_atomic_and_complete() {
        let store = SessionStore::in_memory();
        store.set_auth(sample_bundle());

        assert!(store.is_authenticated());
        assert!(!store.is_loading());
        assert!(store.current_user().is_some());
        assert!(store.operating_context().is_some());
        assert!(!store.permission_tree().is_empty());
        assert!(!store.snapshot().index.is_empty());
    }

    #[test]
    fn permission_checks_match_spec_scenario() {
        let store = SessionStore::in_memory();
        store.set_auth(sample_bundle());
        let route = "/ventas/movimientos/facturacion";

        assert!(store.has_view_permission(route));
        assert!(store.has_action_permission(route, PermissionAction::Create));
        assert!(store.has_action_permission(route, PermissionAction::Edit));
        assert!(!store.has_action_permission(route, PermissionAction::Delete));

        // fail-closed on unknown routes
        assert!(!store.has_view_permission("/no/such/route"));
        for action in PermissionAction::ALL {
            assert!(!store.has_action_permission("/no/such/route", action));
        }
        assert!(store.page_by_route("/no/such/route").is_none());
    }

    #[test]
    fn clear_auth_is_idempotent() {
        let store = SessionStore::in_memory();
        store.set_auth(sample_bundle());

        store.clear_auth();
        let first = store.snapshot();
        store.clear_auth();
        let second = store.snapshot();

        assert!(!first.is_authenticated && !second.is_authenticated);
        assert!(first.user.is_none() && second.user.is_none());
        assert!(first.permission_tree.is_empty() && second.permission_tree.is_empty());
        assert!(first.index.is_empty() && second.index.is_empty());
        assert!(!first.is_loading && !second.is_loading);
    }

    #[test]
    fn switch_sector_changes_only_sector_and_branch() {
        let store = SessionStore::in_memory();
        store.set_auth(sample_bundle());

        let user_before = store.current_user();
        let tree_before = store.permission_tree();
        let index_before = store.snapshot().index;

        store.switch_sector("S2");

        let ctx = store.operating_context().unwrap();
        assert_eq!(ctx.sector.code, "S2");
        assert_eq!(ctx.sector.name, "Depósito");
        assert_eq!(ctx.branch.name, "Sucursal Norte");
        assert_eq!(ctx.company.code, "01");
        assert_eq!(ctx.available_sectors.len(), 2);

        assert_eq!(store.current_user(), user_before);
        assert_eq!(store.permission_tree(), tree_before);
        assert_eq!(store.snapshot().index, index_before);
    }

    #[test]
    fn switch_sector_ignores_unknown_codes() {
        let store = SessionStore::in_memory();
        store.set_auth(sample_bundle());

        let before = store.operating_context().unwrap();
        store.switch_sector("DOES-NOT-EXIST");
        assert_eq!(store.operating_context().unwrap(), before);
    }

    #[test]
    fn hydrate_restores_persisted_session_and_rebuilds_indices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = SessionStore::new(Box::new(FileSessionBackend::new(&path)));
            store.set_auth(sample_bundle());
        }

        let store = SessionStore::new(Box::new(FileSessionBackend::new(&path)));
        assert!(store.hydrate());
        assert!(store.is_hydrated());
        // still loading until the server confirms the session
        assert!(store.is_loading());
        assert!(store.has_view_permission("/ventas/movimientos/facturacion"));
        assert_eq!(store.current_user().unwrap().display_name, "Ana");
    }

    #[test]
    fn hydrate_without_blob_settles_empty() {
        let store = SessionStore::in_memory();
        assert!(!store.hydrate());
        assert!(store.is_hydrated());
        assert!(!store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clear_auth_drops_the_persisted_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::new(Box::new(FileSessionBackend::new(&path)));
        store.set_auth(sample_bundle());
        assert!(path.exists());

        store.clear_auth();
        assert!(!path.exists());

        let fresh = SessionStore::new(Box::new(FileSessionBackend::new(&path)));
        assert!(!fresh.hydrate());
    }
}
