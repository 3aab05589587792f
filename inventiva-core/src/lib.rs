//! Inventiva client core.
//!
//! The session, permission and navigation subsystem of the Inventiva admin
//! console: a thin client over the Inventiva REST API. The server is the
//! authority on every record and rule; this crate caches and interprets what
//! it is told.
//!
//! # Overview
//!
//! At login the server hands over one atomic bundle: identity, operating
//! context (company/sector/branch) and a three-level permission tree
//! (Module → PageType → Page, four action flags per page). The tree is
//! flattened into route-keyed indices once, so every render-time permission
//! check is a hash lookup. The session persists to durable client storage and
//! is revalidated against the server on every mount; a 401 anywhere clears it
//! and redirects to login exactly once.
//!
//! # Architecture
//!
//! - [`permissions`] - the grant tree, its flat route indices, icon names
//! - [`session`] - the shared session store, persistence, bootstrap protocol
//! - [`http`] - the API client with cookie transport and the 401 interceptor
//! - [`auth`] - login/revalidation/logout and the password flows
//! - [`nav`] - sidebar tree and breadcrumb view-models
//! - [`admin`] - group permission write-back
//!
//! # Quick start
//!
//! ```rust,ignore
//! use inventiva_core::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example(navigator: Arc<dyn Navigator>) -> anyhow::Result<()> {
//! let config = ClientConfig::load()?;
//! let session = Arc::new(SessionStore::new(Box::new(FileSessionBackend::new(
//!     config.storage_path.clone().unwrap_or_else(|| "session.json".into()),
//! ))));
//! let client = Arc::new(ApiClient::new(&config, session.clone(), navigator)?);
//! let auth = AuthService::new(client, config.login_route.clone());
//!
//! match auth.revalidate("/").await {
//!     BootstrapState::Valid => { /* render the app */ }
//!     _ => { /* render the login screen */ }
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod auth;
pub mod config;
pub mod http;
pub mod nav;
pub mod permissions;
pub mod session;

pub mod prelude;

// Re-exports of the main types
pub use config::ClientConfig;
pub use http::{ApiClient, ApiError, Navigator};
pub use session::{BootstrapState, SessionStore};
