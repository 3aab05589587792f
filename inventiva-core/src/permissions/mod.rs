//! Permission model: the hierarchical grant tree, its flat route indices,
//! and the icon identifiers the navigation data carries.

mod icon;
mod index;
mod tree;

pub use icon::Icon;
pub use index::{build_indices, find_duplicate_routes, PermissionIndex};
pub use tree::{ActionFlags, Module, Page, PageType, PermissionAction, PermissionTree};
