//! Authenticated-session state: the shared store, its durable persistence,
//! and the mount-time bootstrap/revalidation protocol.

mod bootstrap;
mod persist;
mod store;

pub use bootstrap::{BootstrapState, SessionBootstrap};
pub use persist::{FileSessionBackend, MemorySessionBackend, PersistedSession, SessionBackend};
pub use store::{SessionSnapshot, SessionStore};
