//! Flat route-keyed indices over the permission tree.
//!
//! Built once per session (at login and at revalidation) so every render-time
//! permission check is a single hash lookup instead of a tree walk.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::tree::{ActionFlags, Module, Page, PermissionAction};

/// Derived lookup maps. Pure function of the tree, never transmitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionIndex {
    /// route -> coerced action flags
    pub actions_by_route: HashMap<String, ActionFlags>,

    /// route -> full page record (breadcrumb/title lookups)
    pub page_by_route: HashMap<String, Page>,
}

impl PermissionIndex {
    pub fn is_empty(&self) -> bool {
        self.page_by_route.is_empty()
    }

    /// Every indexed route, unordered.
    pub fn routes(&self) -> Vec<&str> {
        self.actions_by_route.keys().map(String::as_str).collect()
    }

    /// Routes on which the given action is granted.
    pub fn routes_with_action(&self, action: PermissionAction) -> Vec<&str> {
        self.actions_by_route
            .iter()
            .filter(|(_, flags)| flags.allows(action))
            .map(|(route, _)| route.as_str())
            .collect()
    }
}

/// Traverse Module → PageType → Page once and index every page by route.
///
/// On duplicate routes the later page in traversal order silently wins
/// (compatibility with the server's historical behavior); use
/// [`find_duplicate_routes`] to surface the anomaly.
pub fn build_indices(tree: &[Module]) -> PermissionIndex {
    let mut actions_by_route = HashMap::new();
    let mut page_by_route = HashMap::new();

    for module in tree {
        for page_type in &module.types {
            for page in &page_type.pages {
                actions_by_route.insert(page.route.clone(), page.permissions);
                page_by_route.insert(page.route.clone(), page.clone());
            }
        }
    }

    PermissionIndex { actions_by_route, page_by_route }
}

/// Diagnostic integrity check: every route that appears more than once,
/// in first-seen order of duplication. Not enforced automatically.
pub fn find_duplicate_routes(tree: &[Module]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut flagged = HashSet::new();
    let mut duplicates = Vec::new();

    for module in tree {
        for page_type in &module.types {
            for page in &page_type.pages {
                if !seen.insert(page.route.clone()) && flagged.insert(page.route.clone()) {
                    duplicates.push(page.route.clone());
                }
            }
        }
    }

    duplicates
}
