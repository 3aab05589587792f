//! Navigation model: the three-level collapsible menu and breadcrumb
//! reconstruction.
//!
//! This is a pure view-model layer: it turns the permission tree plus the
//! current route into plain structs a renderer (web, TUI, tests) can walk.
//! No permission filtering happens here — pages the user cannot see were
//! already excluded from the tree by the server; the client only
//! self-enforces per-action flags inside a page.

use crate::permissions::{Icon, Module, PermissionIndex};

/// A leaf menu entry. The only navigable level.
#[derive(Debug, Clone, PartialEq)]
pub struct NavPage {
    pub id: i64,
    pub name: String,
    pub icon: Icon,
    pub route: String,
    /// Exact match against the current route.
    pub active: bool,
}

/// Second level: a page-type grouping. Toggles expand/collapse only.
#[derive(Debug, Clone, PartialEq)]
pub struct NavSection {
    pub id: i64,
    pub name: String,
    pub icon: Icon,
    /// Pre-expanded iff one of its pages is the active one.
    pub expanded: bool,
    pub pages: Vec<NavPage>,
}

/// Top level: a module. Toggles expand/collapse only.
#[derive(Debug, Clone, PartialEq)]
pub struct NavModule {
    pub id: i64,
    pub name: String,
    pub icon: Icon,
    /// Pre-expanded iff any page beneath it is the active one.
    pub expanded: bool,
    pub sections: Vec<NavSection>,
}

/// Build the sidebar model. Tree order is preserved as delivered by the
/// server; ancestors of the active page start expanded, everything else
/// collapsed.
pub fn build_nav_tree(tree: &[Module], current_route: &str) -> Vec<NavModule> {
    tree.iter()
        .map(|module| {
            let sections: Vec<NavSection> = module
                .types
                .iter()
                .map(|page_type| {
                    let pages: Vec<NavPage> = page_type
                        .pages
                        .iter()
                        .map(|page| NavPage {
                            id: page.id,
                            name: page.name.clone(),
                            icon: Icon::parse(page.icon.as_deref()),
                            route: page.route.clone(),
                            active: page.route == current_route,
                        })
                        .collect();

                    NavSection {
                        id: page_type.id,
                        name: page_type.name.clone(),
                        icon: Icon::parse(page_type.icon.as_deref()),
                        expanded: pages.iter().any(|p| p.active),
                        pages,
                    }
                })
                .collect();

            NavModule {
                id: module.id,
                name: module.name.clone(),
                icon: Icon::parse(module.icon.as_deref()),
                expanded: sections.iter().any(|s| s.expanded),
                sections,
            }
        })
        .collect()
}

/// The Home › Module › Type › Page trail for the current route.
#[derive(Debug, Clone, PartialEq)]
pub struct BreadcrumbTrail {
    pub module: String,
    pub section: String,
    pub page: String,
}

impl BreadcrumbTrail {
    /// Trail segments starting at Home.
    pub fn segments(&self) -> [&str; 4] {
        ["Home", &self.module, &self.section, &self.page]
    }

    pub fn render(&self) -> String {
        self.segments().join(" › ")
    }
}

/// Reconstruct the breadcrumb for `current_route`.
///
/// The page comes from the flat index; the owning type and module require one
/// linear scan since ownership is not stored on the page. Unknown routes (and
/// routes whose owners cannot be found) yield `None` — never a partial trail.
pub fn breadcrumb_trail(
    tree: &[Module],
    index: &PermissionIndex,
    current_route: &str,
) -> Option<BreadcrumbTrail> {
    let page = index.page_by_route.get(current_route)?;

    for module in tree {
        for page_type in &module.types {
            if page_type.pages.iter().any(|p| p.id == page.id) {
                return Some(BreadcrumbTrail {
                    module: module.name.clone(),
                    section: page_type.name.clone(),
                    page: page.name.clone(),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{build_indices, ActionFlags, Page, PageType};

    fn page(id: i64, name: &str, route: &str) -> Page {
        Page {
            id,
            code: format!("P{id}"),
            name: name.to_string(),
            route: route.to_string(),
            icon: Some("file-text".into()),
            order: id as i32,
            permissions: ActionFlags { view: true, ..Default::default() },
        }
    }

    fn sample_tree() -> Vec<Module> {
        vec![
            Module {
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
                    pages: vec![
                        page(1, "Facturación", "/ventas/movimientos/facturacion"),
                        page(2, "Notas de crédito", "/ventas/movimientos/notas-credito"),
                    ],
                }],
            },
            Module {
                id: 2,
                code: "COM".into(),
                name: "Compras".into(),
                icon: Some("shopping-bag".into()),
                order: 2,
                types: vec![PageType {
                    id: 2,
                    code: "MOV".into(),
                    name: "Movimientos".into(),
                    icon: Some("folder".into()),
                    order: 1,
                    pages: vec![page(3, "Carga de factura", "/compras/movimientos/carga-factura")],
                }],
            },
        ]
    }

    #[test]
    fn ancestors_of_active_page_are_expanded() {
        let nav = build_nav_tree(&sample_tree(), "/ventas/movimientos/facturacion");

        assert!(nav[0].expanded);
        assert!(nav[0].sections[0].expanded);
        assert!(nav[0].sections[0].pages[0].active);
        assert!(!nav[0].sections[0].pages[1].active);

        // the other module starts collapsed
        assert!(!nav[1].expanded);
        assert!(!nav[1].sections[0].expanded);
        assert!(!nav[1].sections[0].pages[0].active);
    }

    #[test]
    fn everything_collapsed_when_route_is_foreign() {
        let nav = build_nav_tree(&sample_tree(), "/perfil/cambiar-password");
        assert!(nav.iter().all(|m| !m.expanded));
        assert!(nav.iter().flat_map(|m| &m.sections).all(|s| !s.expanded));
    }

    #[test]
    fn nav_preserves_server_order_and_parses_icons() {
        let nav = build_nav_tree(&sample_tree(), "/");
        assert_eq!(nav[0].name, "Ventas");
        assert_eq!(nav[1].name, "Compras");
        assert_eq!(nav[0].icon, Icon::ShoppingCart);
        assert_eq!(nav[0].sections[0].icon, Icon::Folder);
        assert_eq!(nav[0].sections[0].pages[0].route, "/ventas/movimientos/facturacion");
    }

    #[test]
    fn breadcrumb_matches_reference_scenario() {
        let tree = sample_tree();
        let index = build_indices(&tree);

        let trail = breadcrumb_trail(&tree, &index, "/ventas/movimientos/facturacion").unwrap();
        assert_eq!(trail.segments(), ["Home", "Ventas", "Movimientos", "Facturación"]);
        assert_eq!(trail.render(), "Home › Ventas › Movimientos › Facturación");
    }

    #[test]
    fn no_breadcrumb_for_unknown_route() {
        let tree = sample_tree();
        let index = build_indices(&tree);
        assert!(breadcrumb_trail(&tree, &index, "/no/such/route").is_none());
        assert!(breadcrumb_trail(&tree, &index, "/").is_none());
    }

    #[test]
    fn no_partial_trail_when_owners_are_missing() {
        let tree = sample_tree();
        let mut index = build_indices(&tree);
        // index claims a page the tree no longer contains
        let orphan = page(99, "Huérfana", "/orfandad");
        index.page_by_route.insert(orphan.route.clone(), orphan);

        assert!(breadcrumb_trail(&tree, &index, "/orfandad").is_none());
    }
}
