//! Session bootstrap: reconcile the locally persisted session with the
//! server on every app mount.
//!
//! The persisted session is an optimistic cache. On mount we hydrate it, and
//! if it claims a user we confirm with one who-am-i call; any failure there is
//! the expected signal for "revoked elsewhere" or "expired server-side" and
//! silently clears the session. The whole check is latched to run at most once
//! per mount, and is skipped entirely while on the login route.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::auth::AuthBundle;
use crate::http::ApiError;

use super::store::SessionStore;

/// Where the bootstrap protocol currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Durable storage is being read back. No network.
    Hydrating,
    /// No persisted user; unauthenticated UI renders immediately.
    Empty,
    /// A persisted user exists; the who-am-i confirmation is in flight.
    Validating,
    /// Server confirmed the session (and pushed a fresh bundle).
    Valid,
    /// Server rejected the session; it has been cleared.
    Invalid,
}

/// Once-per-mount bootstrap runner.
pub struct SessionBootstrap {
    started: AtomicBool,
    state: Mutex<BootstrapState>,
}

impl Default for SessionBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBootstrap {
    pub fn new() -> Self {
        Self { started: AtomicBool::new(false), state: Mutex::new(BootstrapState::Hydrating) }
    }

    /// The last observed state.
    pub fn state(&self) -> BootstrapState {
        *self.state.lock().expect("bootstrap state lock poisoned")
    }

    /// Run the bootstrap protocol. Subsequent calls (remounts, re-renders)
    /// return the already-resolved state without re-running anything.
    ///
    /// `who_am_i` is invoked at most once, and never while `current_route`
    /// is the login route.
    pub async fn run<F, Fut>(
        &self,
        session: &SessionStore,
        current_route: &str,
        login_route: &str,
        who_am_i: F,
    ) -> BootstrapState
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AuthBundle, ApiError>>,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            return self.state();
        }

        if current_route == login_route {
            // The login flow owns session establishment here.
            return self.settle(BootstrapState::Empty);
        }

        let has_persisted_user = session.hydrate();
        if !has_persisted_user {
            return self.settle(BootstrapState::Empty);
        }

        self.settle(BootstrapState::Validating);
        match who_am_i().await {
            Ok(bundle) => {
                // The server may push a fresher tree than the cached one.
                session.set_auth(bundle);
                self.settle(BootstrapState::Valid)
            }
            Err(err) => {
                log::debug!("session revalidation failed, clearing local session: {err}");
                session.clear_auth();
                self.settle(BootstrapState::Invalid)
            }
        }
    }

    fn settle(&self, next: BootstrapState) -> BootstrapState {
        *self.state.lock().expect("bootstrap state lock poisoned") = next;
        next
    }
}
