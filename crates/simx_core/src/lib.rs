//! SimulatorX Core - Identity Primitives
//!
//! Value-type keys and handles shared by every subsystem of the session core:
//!
//! - Entity identity (camp, role, serial) used for routing and equality
//! - Part identity for sub-components, with its legacy string wire form
//! - Generational pool handles for the store arena
//! - The server/client authority tag

pub mod authority;
pub mod identity;
pub mod part;
pub mod pool;

pub mod prelude {
    pub use crate::authority::Authority;
    pub use crate::identity::{Camp, Identity, Role};
    pub use crate::part::{ChildIdentity, PartKind};
    pub use crate::pool::{Pool, PoolId};
}

pub use prelude::*;
