//! Entity identity keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Team affiliation of an entity
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Camp {
    /// Not yet assigned
    #[default]
    Unknown,
    Red,
    Blue,
    /// Referee-owned entities (runes, supply zones)
    Judge,
}

impl Camp {
    /// Stable name used in log output
    pub const fn name(&self) -> &'static str {
        match self {
            Camp::Unknown => "Unknown",
            Camp::Red => "Red",
            Camp::Blue => "Blue",
            Camp::Judge => "Judge",
        }
    }
}

impl fmt::Display for Camp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Battlefield role of an entity
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Role {
    /// Not yet assigned
    #[default]
    Unknown,
    Hero,
    Engineer,
    Infantry,
    Sentinel,
    Drone,
    Base,
    Outpost,
    Obstacle,
}

impl Role {
    /// Stable name used in log output
    pub const fn name(&self) -> &'static str {
        match self {
            Role::Unknown => "Unknown",
            Role::Hero => "Hero",
            Role::Engineer => "Engineer",
            Role::Infantry => "Infantry",
            Role::Sentinel => "Sentinel",
            Role::Drone => "Drone",
            Role::Base => "Base",
            Role::Outpost => "Outpost",
            Role::Obstacle => "Obstacle",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value key for a top-level game entity.
///
/// Two identities are equal iff camp, role and serial all match. Used as the
/// routing key for actions and as the dictionary key of the customize store.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Identity {
    pub camp: Camp,
    pub role: Role,
    pub serial: u32,
}

impl Identity {
    /// The not-yet-identified sentinel; stores start out with this value
    pub const INVALID: Identity = Identity {
        camp: Camp::Unknown,
        role: Role::Unknown,
        serial: 0,
    };

    /// Create a new identity
    pub const fn new(camp: Camp, role: Role, serial: u32) -> Self {
        Self { camp, role, serial }
    }

    /// Whether this identity has been assigned real camp and role values
    pub const fn is_valid(&self) -> bool {
        !matches!(self.camp, Camp::Unknown) && !matches!(self.role, Role::Unknown)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.camp, self.role, self.serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_over_all_fields() {
        let a = Identity::new(Camp::Red, Role::Engineer, 1);
        let b = Identity::new(Camp::Red, Role::Engineer, 1);
        let c = Identity::new(Camp::Red, Role::Engineer, 2);
        let d = Identity::new(Camp::Blue, Role::Engineer, 1);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(Identity::default(), Identity::INVALID);
        assert!(!Identity::INVALID.is_valid());
        assert!(Identity::new(Camp::Blue, Role::Sentinel, 0).is_valid());
    }

    #[test]
    fn display_format() {
        let id = Identity::new(Camp::Red, Role::Engineer, 1);
        assert_eq!(id.to_string(), "Red/Engineer#1");
    }
}
