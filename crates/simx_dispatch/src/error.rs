//! Dispatch errors

use simx_core::Identity;
use thiserror::Error;

/// Structural failures of the store runtime.
///
/// Routing misses are not errors; they resolve to defined defaults. Only
/// scene-setup mistakes (a child without a live root) and misuse of the
/// store lifecycle surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// A child store's root handle is null or refers to a destroyed store
    #[error("child store has no live root store")]
    MissingRoot,
    /// Operation on a null or stale store handle
    #[error("store handle is stale or null")]
    StaleStore,
    /// A store may be identified only once
    #[error("store already identified as {0}")]
    AlreadyIdentified(Identity),
    /// The invalid sentinel identity cannot be assigned
    #[error("cannot identify a store with an invalid identity")]
    InvalidIdentity,
}
