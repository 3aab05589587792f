//! Hierarchical permission tree as delivered by the Inventiva API.
//!
//! The tree is strictly three levels (Module → PageType → Page) and is the
//! authorization grant for one authenticated user. It is fetched once per
//! session (login or who-am-i) and never mutated client-side.
//!
//! Wire format is the API's Spanish JSON (`tipos`, `paginas`, `ruta`,
//! `permisos`, ...); field names here are English with serde renames so the
//! rest of the crate reads naturally.

use serde::{Deserialize, Deserializer, Serialize};

/// The full authorization grant for one user.
pub type PermissionTree = Vec<Module>;

/// One of the four actions a page can gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionAction {
    View,
    Create,
    Edit,
    Delete,
}

impl PermissionAction {
    /// All actions, in the order the API lists them.
    pub const ALL: [PermissionAction; 4] = [
        PermissionAction::View,
        PermissionAction::Create,
        PermissionAction::Edit,
        PermissionAction::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::View => "view",
            PermissionAction::Create => "create",
            PermissionAction::Edit => "edit",
            PermissionAction::Delete => "delete",
        }
    }
}

/// What the user may do on a single page.
///
/// The transport is loosely typed: depending on the backend path a flag
/// arrives as a boolean, an "S"/"N" token, or an integer. Deserialization
/// coerces every variant to a strict bool; missing flags deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionFlags {
    #[serde(rename = "ver", default, deserialize_with = "coerce_flag")]
    pub view: bool,

    #[serde(rename = "crear", default, deserialize_with = "coerce_flag")]
    pub create: bool,

    #[serde(rename = "editar", default, deserialize_with = "coerce_flag")]
    pub edit: bool,

    #[serde(rename = "eliminar", default, deserialize_with = "coerce_flag")]
    pub delete: bool,
}

impl ActionFlags {
    /// Check a single action flag.
    pub fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::View => self.view,
            PermissionAction::Create => self.create,
            PermissionAction::Edit => self.edit,
            PermissionAction::Delete => self.delete,
        }
    }

    /// The fail-closed default: everything denied.
    pub fn deny_all() -> Self {
        Self::default()
    }
}

/// Accepts `true`, `"S"`, `"Y"`, `"1"`, `1`, ... and coerces to bool.
fn coerce_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagToken {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match FlagToken::deserialize(deserializer)? {
        FlagToken::Bool(b) => b,
        FlagToken::Int(n) => n != 0,
        FlagToken::Text(s) => {
            matches!(s.trim(), "S" | "s" | "Y" | "y" | "1" | "true" | "True" | "TRUE")
        }
    })
}

/// A single navigable screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,

    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    /// Absolute path starting with "/". Unique across the whole tree
    /// (duplicates are an upstream data bug, see `find_duplicate_routes`).
    #[serde(rename = "ruta")]
    pub route: String,

    #[serde(rename = "icono", default)]
    pub icon: Option<String>,

    #[serde(rename = "orden", default)]
    pub order: i32,

    #[serde(rename = "permisos", default)]
    pub permissions: ActionFlags,
}

/// A grouping of pages within a module (e.g. "Movimientos").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageType {
    pub id: i64,

    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "icono", default)]
    pub icon: Option<String>,

    #[serde(rename = "orden", default)]
    pub order: i32,

    #[serde(rename = "paginas", default)]
    pub pages: Vec<Page>,
}

/// A top-level functional area (e.g. "Ventas").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: i64,

    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "icono", default)]
    pub icon: Option<String>,

    #[serde(rename = "orden", default)]
    pub order: i32,

    #[serde(rename = "tipos", default)]
    pub types: Vec<PageType>,
}
