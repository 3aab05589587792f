//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use inventiva_core::prelude::*;
//! ```

// === Configuration ===
pub use crate::config::ClientConfig;

// === Permission model ===
pub use crate::permissions::build_indices;
pub use crate::permissions::find_duplicate_routes;
pub use crate::permissions::ActionFlags;
pub use crate::permissions::Icon;
pub use crate::permissions::Module;
pub use crate::permissions::Page;
pub use crate::permissions::PageType;
pub use crate::permissions::PermissionAction;
pub use crate::permissions::PermissionIndex;
pub use crate::permissions::PermissionTree;

// === Session ===
pub use crate::session::BootstrapState;
pub use crate::session::FileSessionBackend;
pub use crate::session::MemorySessionBackend;
pub use crate::session::SessionBackend;
pub use crate::session::SessionBootstrap;
pub use crate::session::SessionStore;

// === HTTP ===
pub use crate::http::ApiClient;
pub use crate::http::ApiError;
pub use crate::http::Navigator;
pub use crate::http::UnauthorizedGuard;

// === Auth ===
pub use crate::auth::AuthBundle;
pub use crate::auth::AuthService;
pub use crate::auth::AuthUser;
pub use crate::auth::OperatingContext;

// === Navigation ===
pub use crate::nav::breadcrumb_trail;
pub use crate::nav::build_nav_tree;
pub use crate::nav::BreadcrumbTrail;
pub use crate::nav::NavModule;
