//! Group permission read-out and write-back.
//!
//! The client never interprets these rows for authorization (that is the
//! session's permission tree); this API only round-trips the flat page/flag
//! list the permissions editor shows and saves. The server stores flags as
//! "S"/"N" tokens, coerced to bool here and encoded back on write.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::http::{ApiClient, ApiError};

fn sn_to_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let token = String::deserialize(deserializer)?;
    Ok(matches!(token.trim(), "S" | "s" | "Y" | "y" | "1"))
}

fn bool_to_sn<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "S" } else { "N" })
}

/// One page's grant for a group, as stored server-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupPermissionRow {
    pub id: i64,

    #[serde(rename = "grupoId")]
    pub group_id: i64,

    #[serde(rename = "paginaId")]
    pub page_id: i64,

    #[serde(rename = "puedeVer", deserialize_with = "sn_to_bool")]
    pub view: bool,

    #[serde(rename = "puedeCrear", deserialize_with = "sn_to_bool")]
    pub create: bool,

    #[serde(rename = "puedeEditar", deserialize_with = "sn_to_bool")]
    pub edit: bool,

    #[serde(rename = "puedeEliminar", deserialize_with = "sn_to_bool")]
    pub delete: bool,

    // Denormalized display metadata the editor shows alongside each row.
    #[serde(rename = "paginaNombre", default)]
    pub page_name: Option<String>,

    #[serde(rename = "paginaRuta", default)]
    pub page_route: Option<String>,

    #[serde(rename = "moduloNombre", default)]
    pub module_name: Option<String>,

    #[serde(rename = "tipoNombre", default)]
    pub type_name: Option<String>,
}

/// One page's flags as submitted by the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePermissionWrite {
    #[serde(rename = "paginaId")]
    pub page_id: i64,

    #[serde(rename = "puedeVer", serialize_with = "bool_to_sn")]
    pub view: bool,

    #[serde(rename = "puedeCrear", serialize_with = "bool_to_sn")]
    pub create: bool,

    #[serde(rename = "puedeEditar", serialize_with = "bool_to_sn")]
    pub edit: bool,

    #[serde(rename = "puedeEliminar", serialize_with = "bool_to_sn")]
    pub delete: bool,
}

#[derive(Serialize)]
struct UpdateGroupPermissionsRequest<'a> {
    permisos: &'a [PagePermissionWrite],
}

/// Typed client for the /permisos-grupos endpoints.
pub struct GroupPermissionsApi {
    client: Arc<ApiClient>,
}

impl GroupPermissionsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// All page grants for one group.
    pub async fn fetch(&self, group_id: i64) -> Result<Vec<GroupPermissionRow>, ApiError> {
        self.client.get(&format!("/permisos-grupos/{group_id}")).await
    }

    /// Replace a group's grants. The server is the authority; the session's
    /// own tree refreshes on the next login/revalidation.
    pub async fn update(
        &self,
        group_id: i64,
        permissions: &[PagePermissionWrite],
    ) -> Result<crate::auth::AckResponse, ApiError> {
        let request = UpdateGroupPermissionsRequest { permisos: permissions };
        self.client.put(&format!("/permisos-grupos/{group_id}"), &request).await
    }
}
