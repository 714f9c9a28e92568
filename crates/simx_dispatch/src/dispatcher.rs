//! Per-session publish/subscribe registry

use std::collections::HashMap;

use simx_action::ActionName;

use crate::store::{ChildStoreId, StoreId};

/// A registered receiver: either an entity root or a sub-component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReceiverId {
    Root(StoreId),
    Child(ChildStoreId),
}

/// Maps action names to the receivers interested in them.
///
/// Receivers declare their interest set once at registration. Fan-out order
/// is registration order per name. No identity filtering happens here;
/// receivers self-filter inside `receive`.
#[derive(Default)]
pub struct Dispatcher {
    by_name: HashMap<ActionName, Vec<ReceiverId>>,
    by_receiver: HashMap<ReceiverId, Vec<ActionName>>,
}

impl Dispatcher {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a receiver for a set of action names.
    ///
    /// Idempotent: a receiver appears at most once per name, so a double
    /// registration never duplicates fan-out.
    pub fn register(&mut self, receiver: ReceiverId, names: &[ActionName]) {
        let declared = self.by_receiver.entry(receiver).or_default();
        for &name in names {
            if !declared.contains(&name) {
                declared.push(name);
                self.by_name.entry(name).or_default().push(receiver);
            }
        }
        log::debug!("registered {receiver:?} for {names:?}");
    }

    /// Remove a receiver from every name it declared.
    ///
    /// Unregistering a receiver that was never registered is a no-op.
    pub fn unregister(&mut self, receiver: ReceiverId) {
        let Some(declared) = self.by_receiver.remove(&receiver) else {
            return;
        };
        for name in declared {
            if let Some(receivers) = self.by_name.get_mut(name) {
                receivers.retain(|r| *r != receiver);
                if receivers.is_empty() {
                    self.by_name.remove(name);
                }
            }
        }
        log::debug!("unregistered {receiver:?}");
    }

    /// Snapshot the receivers interested in a name, in registration order.
    ///
    /// Returned by value so fan-out survives receivers registering or
    /// unregistering mid-delivery.
    pub fn interested(&self, name: &str) -> Vec<ReceiverId> {
        self.by_name.get(name).cloned().unwrap_or_default()
    }

    /// Whether a receiver is currently registered
    pub fn is_registered(&self, receiver: ReceiverId) -> bool {
        self.by_receiver.contains_key(&receiver)
    }

    /// Number of registered receivers
    pub fn receiver_count(&self) -> usize {
        self.by_receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(index: u32) -> ReceiverId {
        ReceiverId::Root(StoreId::new(index, 0))
    }

    #[test]
    fn routes_by_declared_interest() {
        let mut dispatcher = Dispatcher::new();
        let r1 = root(1);
        let r2 = root(2);
        dispatcher.register(r1, &["a", "b"]);
        dispatcher.register(r2, &["b"]);

        assert_eq!(dispatcher.interested("a"), vec![r1]);
        assert_eq!(dispatcher.interested("b"), vec![r1, r2]);
        assert!(dispatcher.interested("c").is_empty());
    }

    #[test]
    fn double_registration_does_not_duplicate() {
        let mut dispatcher = Dispatcher::new();
        let r1 = root(1);
        dispatcher.register(r1, &["a"]);
        dispatcher.register(r1, &["a", "b"]);

        assert_eq!(dispatcher.interested("a"), vec![r1]);
        assert_eq!(dispatcher.interested("b"), vec![r1]);
    }

    #[test]
    fn unregister_is_complete_and_tolerant() {
        let mut dispatcher = Dispatcher::new();
        let r1 = root(1);
        let r2 = root(2);
        dispatcher.register(r1, &["a", "b"]);
        dispatcher.register(r2, &["b"]);

        dispatcher.unregister(r1);
        assert!(dispatcher.interested("a").is_empty());
        assert_eq!(dispatcher.interested("b"), vec![r2]);
        assert!(!dispatcher.is_registered(r1));

        // Unregistering again is a no-op, not an error
        dispatcher.unregister(r1);
        assert_eq!(dispatcher.receiver_count(), 1);
    }

    #[test]
    fn fan_out_order_is_registration_order() {
        let mut dispatcher = Dispatcher::new();
        let ids: Vec<ReceiverId> = (0..4).map(root).collect();
        for id in &ids {
            dispatcher.register(*id, &["a"]);
        }
        assert_eq!(dispatcher.interested("a"), ids);
    }
}
