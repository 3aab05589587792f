//! Wire types for the authentication endpoints.
//!
//! The login and who-am-i responses share one payload shape: identity,
//! operating context (company/sector/branch plus the sectors the user may
//! switch to) and the permission tree, delivered atomically so there is never
//! an authenticated-but-permissionless state.

use serde::{Deserialize, Serialize};

use crate::permissions::PermissionTree;

/// The authenticated identity. Immutable for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,

    pub email: String,

    #[serde(rename = "nombre")]
    pub display_name: String,

    pub role: String,

    #[serde(rename = "grupoId", default)]
    pub group_id: Option<i64>,
}

/// The company the session operates within.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(default)]
    pub ruc: Option<String>,
}

/// The sector the user is currently acting within.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,
}

/// The branch (sucursal) owning the current sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "codigo", default)]
    pub code: Option<String>,

    #[serde(rename = "nombre")]
    pub name: String,
}

/// One selectable sector, bundled with its owning branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorOption {
    #[serde(rename = "codSector")]
    pub code: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "sucursal")]
    pub branch: Branch,
}

/// The selected company/sector/branch the user is acting within.
///
/// `sector`/`branch` are mutable via the explicit sector switch (no
/// re-authentication); everything else changes only on re-login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingContext {
    #[serde(rename = "empresa")]
    pub company: Company,

    #[serde(rename = "sector")]
    pub sector: Sector,

    #[serde(rename = "sucursal")]
    pub branch: Branch,

    #[serde(rename = "sectoresDisponibles", default)]
    pub available_sectors: Vec<SectorOption>,
}

/// Complete session payload returned by POST /auth/login and GET /auth/me.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthBundle {
    #[serde(rename = "usuario")]
    pub user: AuthUser,

    #[serde(rename = "empresa")]
    pub company: Company,

    pub sector: Sector,

    #[serde(rename = "sucursal")]
    pub branch: Branch,

    #[serde(rename = "sectoresDisponibles", default)]
    pub available_sectors: Vec<SectorOption>,

    #[serde(rename = "permisos", default)]
    pub permission_tree: PermissionTree,
}

impl AuthBundle {
    /// Split the bundle into its operating-context view.
    pub fn operating_context(&self) -> OperatingContext {
        OperatingContext {
            company: self.company.clone(),
            sector: self.sector.clone(),
            branch: self.branch.clone(),
            available_sectors: self.available_sectors.clone(),
        }
    }
}

/// One row of GET /empresas (the pre-login company picker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyListing {
    #[serde(rename = "codigo")]
    pub code: String,

    #[serde(rename = "descripcion")]
    pub description: String,

    #[serde(rename = "nombreCorto", default)]
    pub short_name: Option<String>,

    #[serde(default)]
    pub ruc: Option<String>,
}

/// Generic `{ ok, message }` acknowledgment used by the password flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,

    #[serde(default)]
    pub message: Option<String>,
}
