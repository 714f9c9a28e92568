//! Session: the store arena and its dispatch loop

use std::collections::VecDeque;

use simx_action::Action;
use simx_core::{Authority, Identity, Pool};

use crate::dispatcher::{Dispatcher, ReceiverId};
use crate::error::DispatchError;
use crate::store::{
    ChildStoreId, Entity, EntitySlot, Part, PartSlot, StoreBase, StoreChildBase, StoreId,
};

/// FIFO of actions emitted by receivers during delivery.
///
/// Receivers get the outbox instead of the session itself, which keeps
/// re-entrant emission borrow-safe: emitted actions are appended and the
/// session's drain loop processes them before the outer `send` returns.
#[derive(Default)]
pub struct Outbox {
    queue: VecDeque<Action>,
}

impl Outbox {
    /// Queue an action for dispatch after the current delivery
    pub fn send(&mut self, action: impl Into<Action>) {
        self.queue.push_back(action.into());
    }

    /// Number of queued actions
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn pop(&mut self) -> Option<Action> {
        self.queue.pop_front()
    }
}

/// One game session: the entity/part arena, the dispatcher, and the
/// fixed-update driver.
///
/// Constructed once per session with its network role and passed by
/// reference to whatever needs it; two sessions coexist in one process
/// (the usual test setup runs a server and a client side by side).
pub struct Session {
    authority: Authority,
    dispatcher: Dispatcher,
    roots: Pool<EntitySlot>,
    children: Pool<PartSlot>,
    outbox: Outbox,
    replicate: bool,
    outbound: VecDeque<Action>,
}

impl Session {
    /// Create a session running under the given network role
    pub fn new(authority: Authority) -> Self {
        log::info!("session created ({authority})");
        Self {
            authority,
            dispatcher: Dispatcher::new(),
            roots: Pool::new(),
            children: Pool::new(),
            outbox: Outbox::default(),
            replicate: false,
            outbound: VecDeque::new(),
        }
    }

    /// The session's network role
    pub fn authority(&self) -> Authority {
        self.authority
    }

    /// Start collecting authoritative sends for the replication layer.
    ///
    /// Without this, sends stay local and nothing accumulates.
    pub fn enable_replication(&mut self) {
        self.replicate = true;
    }

    /// Drain the actions queued for replication to remote replicas
    pub fn take_outbound(&mut self) -> Vec<Action> {
        self.outbound.drain(..).collect()
    }

    /// Spawn an entity root; it stays `Uninitialized` until identified
    pub fn spawn_entity(&mut self, behavior: Box<dyn Entity>) -> StoreId {
        self.roots.insert(EntitySlot {
            base: StoreBase::new(),
            behavior,
        })
    }

    /// Assign an entity's identity and connect it to the dispatcher.
    ///
    /// The session knows its network role from construction, so the
    /// identified store registers in the same call. Allowed exactly once
    /// per store.
    pub fn identify(&mut self, store: StoreId, identity: Identity) -> Result<(), DispatchError> {
        let slot = self
            .roots
            .get_mut(store)
            .ok_or(DispatchError::StaleStore)?;
        slot.base.identify(identity)?;
        let names = slot.behavior.input_actions();
        slot.base.mark_registered();
        self.dispatcher.register(ReceiverId::Root(store), &names);
        log::debug!("store identified as {identity}");
        Ok(())
    }

    /// Destroy an entity and all of its sub-components.
    ///
    /// Both are unregistered from every action name they declared, so no
    /// dangling receiver is ever dispatched to. Stale handles are no-ops.
    pub fn despawn_entity(&mut self, store: StoreId) {
        let Some(slot) = self.roots.remove(store) else {
            return;
        };
        self.dispatcher.unregister(ReceiverId::Root(store));
        for child in slot.base.children() {
            if self.children.remove(*child).is_some() {
                self.dispatcher.unregister(ReceiverId::Child(*child));
            }
        }
    }

    /// Spawn a sub-component under a root (registration handshake).
    ///
    /// The part identifies itself once, joins the root's roster, and
    /// registers its interest list. A dead root handle is a scene-setup
    /// mistake and fails immediately.
    pub fn spawn_child(
        &mut self,
        root: StoreId,
        behavior: Box<dyn Part>,
    ) -> Result<ChildStoreId, DispatchError> {
        if !self.roots.contains(root) {
            return Err(DispatchError::MissingRoot);
        }
        let id = behavior.identify();
        let names = behavior.input_actions();
        let child = self.children.insert(PartSlot {
            base: StoreChildBase::new(root, id),
            behavior,
        });
        if let Some(slot) = self.roots.get_mut(root) {
            slot.base.register_child(child);
        }
        self.dispatcher.register(ReceiverId::Child(child), &names);
        log::debug!("child {id} spawned under {root:?}");
        Ok(child)
    }

    /// Destroy a sub-component; stale handles are no-ops
    pub fn despawn_child(&mut self, child: ChildStoreId) {
        if self.children.remove(child).is_some() {
            self.dispatcher.unregister(ReceiverId::Child(child));
        }
    }

    /// Emit an action on behalf of a sub-component.
    ///
    /// The action joins the child's FIFO cache; if the root is already
    /// resolved (or resolves right now), the cache drains immediately in
    /// order. Otherwise it waits for a later `fixed_update` tick.
    pub fn child_send(&mut self, child: ChildStoreId, action: Action) -> Result<(), DispatchError> {
        let slot = self
            .children
            .get_mut(child)
            .ok_or(DispatchError::StaleStore)?;
        slot.base.enqueue(action);
        self.try_resolve_child(child)
    }

    /// One fixed-timestep tick: poll unresolved children for their root.
    ///
    /// Children whose root became identified since the last tick latch
    /// their resolution and drain their caches in FIFO order. A child
    /// whose root store no longer exists is a fatal configuration error.
    pub fn fixed_update(&mut self) -> Result<(), DispatchError> {
        for child in self.children.ids() {
            let resolved = self
                .children
                .get(child)
                .map(|slot| slot.base.is_resolved())
                .unwrap_or(true);
            if !resolved {
                self.try_resolve_child(child)?;
            }
        }
        Ok(())
    }

    /// Dispatch an action to every interested receiver.
    ///
    /// Fan-out is synchronous; actions emitted by receivers during
    /// delivery are processed before this returns. With server authority
    /// and replication enabled, every dispatched action is also queued
    /// for the replication layer.
    pub fn send(&mut self, action: Action) {
        self.outbox.send(action);
        while let Some(next) = self.outbox.pop() {
            self.deliver(next);
        }
    }

    /// Shared state of an entity root, if the handle is live
    pub fn store(&self, store: StoreId) -> Option<&StoreBase> {
        self.roots.get(store).map(|slot| &slot.base)
    }

    /// Shared state of a sub-component, if the handle is live
    pub fn child_store(&self, child: ChildStoreId) -> Option<&StoreChildBase> {
        self.children.get(child).map(|slot| &slot.base)
    }

    /// Number of live entity roots
    pub fn entity_count(&self) -> usize {
        self.roots.len()
    }

    fn deliver(&mut self, action: Action) {
        if self.replicate && self.authority.is_server() {
            self.outbound.push_back(action.clone());
        }
        let receivers = self.dispatcher.interested(action.name());
        for receiver in receivers {
            match receiver {
                ReceiverId::Root(id) => {
                    // Stale handles are skipped: a destroyed receiver
                    // never sees the action.
                    if let Some(slot) = self.roots.get_mut(id) {
                        slot.behavior
                            .receive(&mut slot.base, &action, &mut self.outbox);
                    }
                }
                ReceiverId::Child(id) => {
                    let Action::Child(child_action) = &action else {
                        continue;
                    };
                    if let Some(slot) = self.children.get_mut(id) {
                        slot.behavior
                            .receive(&mut slot.base, child_action, &mut self.outbox);
                    }
                }
            }
        }
    }

    /// Latch a child's resolution once its root is identified, then drain
    /// its cache through the normal send path.
    fn try_resolve_child(&mut self, child: ChildStoreId) -> Result<(), DispatchError> {
        let (root, resolved) = {
            let slot = self.children.get(child).ok_or(DispatchError::StaleStore)?;
            (slot.base.root(), slot.base.is_resolved())
        };

        if !resolved {
            let root_ready = match self.roots.get(root) {
                Some(slot) => slot.base.is_identified(),
                None => return Err(DispatchError::MissingRoot),
            };
            if !root_ready {
                // Root exists but has no identity yet; retry next tick
                return Ok(());
            }
            if let Some(slot) = self.children.get_mut(child) {
                slot.base.resolve();
                log::debug!("child {} resolved its root", slot.base.identity());
            }
        }

        let pending = match self.children.get_mut(child) {
            Some(slot) => slot.base.drain(),
            None => return Err(DispatchError::StaleStore),
        };
        for action in pending {
            self.send(action);
        }
        Ok(())
    }
}
