//! SimulatorX Action - Gameplay Messages
//!
//! Tagged message variants describing gameplay events (state changes,
//! health deltas, physical commands, part events), routed by a stable
//! action name plus a target identity, and a codec that turns any variant
//! into a self-describing string and back without the decoding side
//! knowing the variant in advance.

pub mod action;
pub mod codec;

pub mod prelude {
    pub use crate::action::{
        names, Action, ActionName, ChildAction, PartState, PhysicalKind, RobotState,
    };
    pub use crate::codec::{decode, encode, CodecError};
}

pub use prelude::*;
