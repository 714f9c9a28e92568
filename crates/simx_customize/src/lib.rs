//! SimulatorX Customize - Authoritative Property Store
//!
//! Per-identity bag of named float properties (stat multipliers such as
//! chassis speed or shooter cooldown), mutated only on the authoritative
//! replica and read everywhere. Absent keys read as `1.0`, the
//! multiplicative identity, never `0.0`: gameplay formulas multiply by
//! these values and an unset property must mean "unmodified".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use simx_core::{Authority, Identity};

/// Value returned for any absent identity or property
pub const DEFAULT_VALUE: f32 = 1.0;

/// A pending write forwarded from a replica to the server
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomizeCommand {
    pub id: Identity,
    pub property: String,
    pub value: f32,
}

/// The session's customization store.
///
/// One instance per session, tagged with the session's network role. All
/// mutation funnels through [`cmd_set_data`](Self::cmd_set_data): on the
/// server it writes directly, on a replica it queues the command for the
/// replication layer to forward and leaves the local cache untouched.
/// Replica caches are written only by [`apply_replicated`](Self::apply_replicated).
pub struct CustomizeManager {
    role: Authority,
    store: HashMap<Identity, HashMap<String, f32>>,
    pending_forwards: Vec<CustomizeCommand>,
    forwarding: bool,
    init: bool,
}

impl CustomizeManager {
    /// Create the store for a session running under the given role
    pub fn new(role: Authority) -> Self {
        Self {
            role,
            store: HashMap::new(),
            pending_forwards: Vec::new(),
            forwarding: false,
            init: true,
        }
    }

    /// The role this instance was constructed with
    pub fn role(&self) -> Authority {
        self.role
    }

    /// Readiness probe; false after teardown
    pub fn is_init(&self) -> bool {
        self.init
    }

    /// Read a property, falling back to the multiplicative default.
    ///
    /// Absent identity or property both read as [`DEFAULT_VALUE`].
    pub fn data(&self, id: Identity, property: &str) -> f32 {
        self.store
            .get(&id)
            .and_then(|bag| bag.get(property))
            .copied()
            .unwrap_or(DEFAULT_VALUE)
    }

    /// Existence check; an invalid identity is simply "not found"
    pub fn has(&self, id: Identity, property: &str) -> bool {
        if !id.is_valid() {
            return false;
        }
        self.store
            .get(&id)
            .is_some_and(|bag| bag.contains_key(property))
    }

    /// Start queueing replica writes for forwarding to the server
    pub fn enable_forwarding(&mut self) {
        self.forwarding = true;
    }

    /// Drain the commands a replica has queued for the server
    pub fn take_pending_forwards(&mut self) -> Vec<CustomizeCommand> {
        std::mem::take(&mut self.pending_forwards)
    }

    /// Authoritative write entry point.
    ///
    /// On the server the value is stored immediately and `true` is
    /// returned. On a replica nothing is written locally; the command is
    /// queued for forwarding (or dropped with a warning when no
    /// replication layer is attached) and `false` is returned.
    pub fn cmd_set_data(&mut self, id: Identity, property: &str, value: f32) -> bool {
        if self.role.is_server() {
            self.write(id, property, value);
            return true;
        }
        if self.forwarding {
            self.pending_forwards.push(CustomizeCommand {
                id,
                property: property.to_string(),
                value,
            });
        } else {
            log::warn!("replica write of {property} on {id} dropped: no forwarding attached");
        }
        false
    }

    /// Apply a value replicated from the server.
    ///
    /// The only entry point that writes a replica's cache.
    pub fn apply_replicated(&mut self, id: Identity, property: &str, value: f32) {
        self.write(id, property, value);
    }

    /// Session teardown: drop all state and report not-ready
    pub fn reset(&mut self) {
        self.store.clear();
        self.pending_forwards.clear();
        self.init = false;
    }

    fn write(&mut self, id: Identity, property: &str, value: f32) {
        log::debug!("customize {id} {property} = {value}");
        self.store
            .entry(id)
            .or_default()
            .insert(property.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simx_core::{Camp, Role};

    fn engineer() -> Identity {
        Identity::new(Camp::Red, Role::Engineer, 1)
    }

    #[test]
    fn absent_keys_read_as_multiplicative_identity() {
        let manager = CustomizeManager::new(Authority::Server);
        assert_eq!(manager.data(engineer(), "anything"), 1.0);
        assert!(!manager.has(engineer(), "anything"));
    }

    #[test]
    fn server_write_is_applied_and_readable() {
        let mut manager = CustomizeManager::new(Authority::Server);
        assert!(manager.cmd_set_data(engineer(), "chassis_speed", 3.5));
        assert_eq!(manager.data(engineer(), "chassis_speed"), 3.5);
        assert!(manager.has(engineer(), "chassis_speed"));

        // Other properties of the same identity still default
        assert_eq!(manager.data(engineer(), "shooter_cooldown"), 1.0);
    }

    #[test]
    fn invalid_identity_is_never_found() {
        let mut manager = CustomizeManager::new(Authority::Server);
        manager.cmd_set_data(Identity::INVALID, "p", 2.0);
        assert!(!manager.has(Identity::INVALID, "p"));
    }

    #[test]
    fn replica_write_queues_instead_of_applying() {
        let mut manager = CustomizeManager::new(Authority::Client);
        manager.enable_forwarding();

        assert!(!manager.cmd_set_data(engineer(), "chassis_speed", 2.0));
        // Local cache untouched
        assert_eq!(manager.data(engineer(), "chassis_speed"), 1.0);

        let pending = manager.take_pending_forwards();
        assert_eq!(
            pending,
            vec![CustomizeCommand {
                id: engineer(),
                property: "chassis_speed".to_string(),
                value: 2.0,
            }]
        );
        assert!(manager.take_pending_forwards().is_empty());
    }

    #[test]
    fn replica_cache_updates_through_replication_only() {
        let mut manager = CustomizeManager::new(Authority::Client);
        manager.apply_replicated(engineer(), "chassis_speed", 2.5);
        assert_eq!(manager.data(engineer(), "chassis_speed"), 2.5);
    }

    #[test]
    fn reset_tears_down() {
        let mut manager = CustomizeManager::new(Authority::Server);
        manager.cmd_set_data(engineer(), "p", 9.0);
        assert!(manager.is_init());

        manager.reset();
        assert!(!manager.is_init());
        assert_eq!(manager.data(engineer(), "p"), 1.0);
    }
}
