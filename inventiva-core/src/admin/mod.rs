//! Admin-side API surface that the core owns (the CRUD screens themselves
//! are external collaborators).

mod group_permissions;

pub use group_permissions::{GroupPermissionRow, GroupPermissionsApi, PagePermissionWrite};
