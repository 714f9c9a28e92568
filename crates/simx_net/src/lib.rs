//! SimulatorX Net - Replication Boundary
//!
//! The session core treats the network as an external collaborator that
//! delivers opaque byte frames, ordered per sender. This crate supplies
//! that boundary: the transport trait, an in-process loopback pair for
//! tests and local play, the binary frame envelope, and the replicator
//! that pumps frames between a transport end and a session each tick.

pub mod frame;
pub mod replicator;
pub mod transport;

pub mod prelude {
    pub use crate::frame::{Frame, FrameError};
    pub use crate::replicator::{NetError, Replicator};
    pub use crate::transport::{LoopbackTransport, Transport, TrySendError};
}

pub use prelude::*;
