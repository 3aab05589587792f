//! HTTP layer: the shared API client with cookie transport and the
//! process-wide 401 interceptor.

mod client;
mod error;

pub use client::{ApiClient, Navigator, UnauthorizedGuard};
pub use error::ApiError;
