//! Entity root and sub-component runtime state

use std::collections::VecDeque;

use simx_action::{Action, ActionName, ChildAction};
use simx_core::{ChildIdentity, Identity, PoolId};

use crate::error::DispatchError;
use crate::session::Outbox;

/// Handle to an entity root store in the session arena
pub type StoreId = PoolId<EntitySlot>;

/// Handle to a sub-component store in the session arena
pub type ChildStoreId = PoolId<PartSlot>;

/// Lifecycle of an entity root store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorePhase {
    /// Spawned, no identity assigned yet
    Uninitialized,
    /// Identity assigned
    Identified,
    /// Connected to the dispatcher under the session's network role
    Registered,
}

/// Common state of an entity root.
///
/// Owns the entity's identity and the roster of registered sub-components.
pub struct StoreBase {
    id: Identity,
    phase: StorePhase,
    children: Vec<ChildStoreId>,
}

impl StoreBase {
    pub(crate) fn new() -> Self {
        Self {
            id: Identity::INVALID,
            phase: StorePhase::Uninitialized,
            children: Vec::new(),
        }
    }

    /// The entity's identity; `Identity::INVALID` until identified
    pub fn identity(&self) -> Identity {
        self.id
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    /// Whether an identity has been assigned
    pub fn is_identified(&self) -> bool {
        self.phase != StorePhase::Uninitialized
    }

    /// Registered sub-components, in registration order
    pub fn children(&self) -> &[ChildStoreId] {
        &self.children
    }

    /// Assign the identity; allowed exactly once
    pub(crate) fn identify(&mut self, identity: Identity) -> Result<(), DispatchError> {
        if self.phase != StorePhase::Uninitialized {
            return Err(DispatchError::AlreadyIdentified(self.id));
        }
        if !identity.is_valid() {
            return Err(DispatchError::InvalidIdentity);
        }
        self.id = identity;
        self.phase = StorePhase::Identified;
        Ok(())
    }

    pub(crate) fn mark_registered(&mut self) {
        self.phase = StorePhase::Registered;
    }

    /// Add a child to the roster; redundant calls are no-ops
    pub(crate) fn register_child(&mut self, child: ChildStoreId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }
}

/// Common state of a sub-component.
///
/// Created with its root's handle (registration handshake). Outgoing
/// actions buffer in a FIFO cache until the root has a valid identity;
/// once resolution succeeds it is latched permanently.
pub struct StoreChildBase {
    id: ChildIdentity,
    root: StoreId,
    root_found: bool,
    action_cache: VecDeque<Action>,
}

impl StoreChildBase {
    pub(crate) fn new(root: StoreId, id: ChildIdentity) -> Self {
        Self {
            id,
            root,
            root_found: false,
            action_cache: VecDeque::new(),
        }
    }

    /// The part's identity, assigned once at creation
    pub fn identity(&self) -> ChildIdentity {
        self.id
    }

    /// Handle of the enclosing root store
    pub fn root(&self) -> StoreId {
        self.root
    }

    /// Whether the root has been seen identified (latched)
    pub fn is_resolved(&self) -> bool {
        self.root_found
    }

    /// Number of buffered outgoing actions
    pub fn cached_len(&self) -> usize {
        self.action_cache.len()
    }

    pub(crate) fn enqueue(&mut self, action: Action) {
        self.action_cache.push_back(action);
    }

    pub(crate) fn resolve(&mut self) {
        self.root_found = true;
    }

    pub(crate) fn drain(&mut self) -> Vec<Action> {
        self.action_cache.drain(..).collect()
    }
}

/// Behavior of a concrete entity type.
///
/// Implementations self-filter in `receive` by comparing the action's
/// target identity against `base.identity()`; the dispatcher routes by
/// name only.
pub trait Entity {
    /// Action names this entity cares about.
    ///
    /// Called once at registration; the list must be stable thereafter.
    fn input_actions(&self) -> Vec<ActionName>;

    /// React to a dispatched action. Default: no-op.
    fn receive(&mut self, base: &mut StoreBase, action: &Action, outbox: &mut Outbox) {
        let _ = (base, action, outbox);
    }
}

/// Behavior of a concrete sub-component type.
pub trait Part {
    /// The part's identity; called once at creation
    fn identify(&self) -> ChildIdentity;

    /// Action names this part cares about. Default: none.
    fn input_actions(&self) -> Vec<ActionName> {
        Vec::new()
    }

    /// React to a dispatched child action. Default: no-op.
    fn receive(&mut self, base: &mut StoreChildBase, action: &ChildAction, outbox: &mut Outbox) {
        let _ = (base, action, outbox);
    }
}

/// Arena slot pairing an entity root's state with its behavior
pub struct EntitySlot {
    pub(crate) base: StoreBase,
    pub(crate) behavior: Box<dyn Entity>,
}

/// Arena slot pairing a sub-component's state with its behavior
pub struct PartSlot {
    pub(crate) base: StoreChildBase,
    pub(crate) behavior: Box<dyn Part>,
}
