//! Authentication: wire types and the protocol service.

mod service;
mod types;

pub use service::AuthService;
pub use types::{
    AckResponse, AuthBundle, AuthUser, Branch, Company, CompanyListing, OperatingContext, Sector,
    SectorOption,
};
