//! Render the sidebar and breadcrumbs for a fixture permission tree, no
//! backend needed.
//!
//! ```text
//! cargo run -p nav-preview -- /ventas/movimientos/facturacion
//! ```

use anyhow::Result;
use inventiva_core::nav::{breadcrumb_trail, build_nav_tree};
use inventiva_core::permissions::{build_indices, PermissionAction, PermissionTree};

const FIXTURE: &str = include_str!("../fixtures/permission-tree.json");

fn main() -> Result<()> {
    env_logger::init();

    let current_route = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/ventas/movimientos/facturacion".to_string());

    let tree: PermissionTree = serde_json::from_str(FIXTURE)?;
    let index = build_indices(&tree);
    log::info!("indexed {} routes", index.routes().len());

    println!("Menú de accesos  (active: {current_route})");
    for module in build_nav_tree(&tree, &current_route) {
        let marker = if module.expanded { "▾" } else { "▸" };
        println!("{marker} {} {}", module.icon.glyph(), module.name);
        if !module.expanded {
            continue;
        }
        for section in &module.sections {
            let marker = if section.expanded { "▾" } else { "▸" };
            println!("  {marker} {} {}", section.icon.glyph(), section.name);
            if !section.expanded {
                continue;
            }
            for page in &section.pages {
                let active = if page.active { "●" } else { " " };
                println!("    {active} {} {}  {}", page.icon.glyph(), page.name, page.route);
            }
        }
    }

    println!();
    match breadcrumb_trail(&tree, &index, &current_route) {
        Some(trail) => println!("{}", trail.render()),
        None => println!("(no breadcrumb for {current_route})"),
    }

    if let Some(flags) = index.actions_by_route.get(&current_route) {
        println!();
        for action in PermissionAction::ALL {
            let granted = if flags.allows(action) { "yes" } else { "no" };
            println!("{:>6}: {granted}", action.as_str());
        }
    }

    Ok(())
}
