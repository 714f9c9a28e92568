//! Sub-component identity and its string wire form

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of a sub-component within one entity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartKind {
    /// Placeholder for uninitialized or unparseable child identities
    #[default]
    Nothing,
    Armor,
    Chassis,
    Gimbal,
    Shooter,
    Magazine,
    Wheel,
    Gun,
    Camera,
    Gyro,
    Light,
    Claw,
    Lifter,
    Supply,
    Shield,
    Radar,
    Battery,
    Controller,
    Rune,
    Decoration,
}

impl PartKind {
    /// Stable name used in the wire form; assumed to never contain `;`
    pub const fn name(&self) -> &'static str {
        match self {
            PartKind::Nothing => "Nothing",
            PartKind::Armor => "Armor",
            PartKind::Chassis => "Chassis",
            PartKind::Gimbal => "Gimbal",
            PartKind::Shooter => "Shooter",
            PartKind::Magazine => "Magazine",
            PartKind::Wheel => "Wheel",
            PartKind::Gun => "Gun",
            PartKind::Camera => "Camera",
            PartKind::Gyro => "Gyro",
            PartKind::Light => "Light",
            PartKind::Claw => "Claw",
            PartKind::Lifter => "Lifter",
            PartKind::Supply => "Supply",
            PartKind::Shield => "Shield",
            PartKind::Radar => "Radar",
            PartKind::Battery => "Battery",
            PartKind::Controller => "Controller",
            PartKind::Rune => "Rune",
            PartKind::Decoration => "Decoration",
        }
    }

    /// Look up a kind by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Nothing" => PartKind::Nothing,
            "Armor" => PartKind::Armor,
            "Chassis" => PartKind::Chassis,
            "Gimbal" => PartKind::Gimbal,
            "Shooter" => PartKind::Shooter,
            "Magazine" => PartKind::Magazine,
            "Wheel" => PartKind::Wheel,
            "Gun" => PartKind::Gun,
            "Camera" => PartKind::Camera,
            "Gyro" => PartKind::Gyro,
            "Light" => PartKind::Light,
            "Claw" => PartKind::Claw,
            "Lifter" => PartKind::Lifter,
            "Supply" => PartKind::Supply,
            "Shield" => PartKind::Shield,
            "Radar" => PartKind::Radar,
            "Battery" => PartKind::Battery,
            "Controller" => PartKind::Controller,
            "Rune" => PartKind::Rune,
            "Decoration" => PartKind::Decoration,
            _ => return None,
        })
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value key for a sub-component, unique within the scope of one root store.
///
/// Assigned once by the part's `identify` at creation and immutable after.
/// The wire form is `"{Kind};{serial}"`; parsing tolerates empty or malformed
/// input by yielding the `Nothing` value, so uninitialized network fields
/// during startup races never error out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChildIdentity {
    pub kind: PartKind,
    pub serial: u32,
}

impl ChildIdentity {
    /// Create a new child identity
    pub const fn new(kind: PartKind, serial: u32) -> Self {
        Self { kind, serial }
    }

    /// Serialize to the semicolon-delimited wire form
    pub fn data(&self) -> String {
        format!("{};{}", self.kind.name(), self.serial)
    }

    /// Parse the wire form; anything unparseable yields `Nothing;0`
    pub fn from_data(data: &str) -> Self {
        let Some((kind, serial)) = data.split_once(';') else {
            return Self::default();
        };
        let Some(kind) = PartKind::from_name(kind) else {
            return Self::default();
        };
        let Ok(serial) = serial.parse::<u32>() else {
            return Self::default();
        };
        Self { kind, serial }
    }
}

impl fmt::Display for ChildIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.serial)
    }
}

// Serde carries child identities in their string wire form, so every
// serialized child action exercises the same round trip the transport uses.
impl Serialize for ChildIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.data())
    }
}

impl<'de> Deserialize<'de> for ChildIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = String::deserialize(deserializer)?;
        Ok(Self::from_data(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        let id = ChildIdentity::new(PartKind::Magazine, 3);
        assert_eq!(id.data(), "Magazine;3");
        assert_eq!(ChildIdentity::from_data(&id.data()), id);
    }

    #[test]
    fn all_kinds_round_trip() {
        for kind in [
            PartKind::Nothing,
            PartKind::Armor,
            PartKind::Chassis,
            PartKind::Gimbal,
            PartKind::Shooter,
            PartKind::Magazine,
            PartKind::Wheel,
            PartKind::Gun,
            PartKind::Camera,
            PartKind::Gyro,
            PartKind::Light,
            PartKind::Claw,
            PartKind::Lifter,
            PartKind::Supply,
            PartKind::Shield,
            PartKind::Radar,
            PartKind::Battery,
            PartKind::Controller,
            PartKind::Rune,
            PartKind::Decoration,
        ] {
            let id = ChildIdentity::new(kind, 7);
            assert_eq!(ChildIdentity::from_data(&id.data()), id);
        }
    }

    #[test]
    fn malformed_input_yields_nothing() {
        let nothing = ChildIdentity::new(PartKind::Nothing, 0);
        assert_eq!(ChildIdentity::from_data(""), nothing);
        assert_eq!(ChildIdentity::from_data("Magazine"), nothing);
        assert_eq!(ChildIdentity::from_data("Magazine;abc"), nothing);
        assert_eq!(ChildIdentity::from_data("Thruster;1"), nothing);
    }

    #[test]
    fn serde_uses_wire_form() {
        let id = ChildIdentity::new(PartKind::Gimbal, 2);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Gimbal;2\"");
        let back: ChildIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
