//! SimulatorX Dispatch - Action Routing Runtime
//!
//! The session core: a per-session publish/subscribe dispatcher, the flat
//! store arena holding entity roots and their sub-components, and the
//! fixed-update driver that resolves child-before-root initialization
//! races by buffering child actions until the root is identified.
//!
//! Everything here is single-threaded and driven synchronously from the
//! host simulation's fixed-timestep loop; there are no locks and no
//! internal threads.

pub mod dispatcher;
pub mod error;
pub mod session;
pub mod store;

pub mod prelude {
    pub use crate::dispatcher::{Dispatcher, ReceiverId};
    pub use crate::error::DispatchError;
    pub use crate::session::{Outbox, Session};
    pub use crate::store::{
        ChildStoreId, Entity, EntitySlot, Part, PartSlot, StoreBase, StoreChildBase, StoreId,
        StorePhase,
    };
}

pub use prelude::*;
