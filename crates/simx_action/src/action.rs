//! Action message variants

use serde::{Deserialize, Serialize};
use simx_core::{ChildIdentity, Identity};

/// Routing name of an action; stable, unique per semantic event
pub type ActionName = &'static str;

/// The routing name table.
///
/// Names are used only for interest matching; receivers branch on the
/// decoded variant, never on these strings.
pub mod names {
    pub const STATE_CHANGE: &str = "state_change";
    pub const HEALTH_CHANGE: &str = "health_change";
    pub const GRADE_CHANGE: &str = "grade_change";
    pub const CUSTOMIZE_CHANGE: &str = "customize_change";
    pub const PHYSICAL_COMMAND: &str = "physical_command";
    pub const PART_STATE_CHANGE: &str = "part_state_change";
    pub const AMMO_CHANGE: &str = "ammo_change";
    pub const LIGHT_CONTROL: &str = "light_control";

    /// Whether a wire discriminator names a known action kind
    pub fn is_known(name: &str) -> bool {
        matches!(
            name,
            STATE_CHANGE
                | HEALTH_CHANGE
                | GRADE_CHANGE
                | CUSTOMIZE_CHANGE
                | PHYSICAL_COMMAND
                | PART_STATE_CHANGE
                | AMMO_CHANGE
                | LIGHT_CONTROL
        )
    }
}

/// Robot operating mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotState {
    Normal,
    Disabled,
    Destroyed,
    Supplying,
    Buffed,
}

/// Physics directive carried by a physical command
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalKind {
    Catch,
    Release,
    Launch,
    Brake,
}

/// Condition of a sub-component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartState {
    Intact,
    Damaged,
    Broken,
}

/// A gameplay event targeting a top-level entity.
///
/// Closed union: adding a variant forces the codec table and every receiver
/// switch to be revisited at compile time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Robot mode switch
    StateChange { target: Identity, state: RobotState },
    /// Damage or heal delta
    HealthChange { target: Identity, delta: f32 },
    /// Level-up
    GradeChange { target: Identity, grade: u8 },
    /// Replicated customization value update
    CustomizeChange {
        target: Identity,
        property: String,
        value: f32,
    },
    /// Catch/release style physics directive
    PhysicalCommand {
        target: Identity,
        command: PhysicalKind,
    },
    /// An event targeting one of the entity's sub-components
    Child(ChildAction),
}

impl Action {
    /// The routing name of this variant
    pub fn name(&self) -> ActionName {
        match self {
            Action::StateChange { .. } => names::STATE_CHANGE,
            Action::HealthChange { .. } => names::HEALTH_CHANGE,
            Action::GradeChange { .. } => names::GRADE_CHANGE,
            Action::CustomizeChange { .. } => names::CUSTOMIZE_CHANGE,
            Action::PhysicalCommand { .. } => names::PHYSICAL_COMMAND,
            Action::Child(child) => child.name(),
        }
    }

    /// The identity of the entity this action is addressed to
    pub fn target(&self) -> Identity {
        match self {
            Action::StateChange { target, .. }
            | Action::HealthChange { target, .. }
            | Action::GradeChange { target, .. }
            | Action::CustomizeChange { target, .. }
            | Action::PhysicalCommand { target, .. } => *target,
            Action::Child(child) => child.target(),
        }
    }
}

/// A gameplay event targeting a sub-component of an entity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChildAction {
    /// Part condition change
    PartStateChange {
        target: Identity,
        child: ChildIdentity,
        state: PartState,
    },
    /// Magazine loads or spends rounds
    AmmoChange {
        target: Identity,
        child: ChildIdentity,
        delta: i32,
    },
    /// Light toggled on or off
    LightControl {
        target: Identity,
        child: ChildIdentity,
        on: bool,
    },
}

impl ChildAction {
    /// The routing name of this variant
    pub fn name(&self) -> ActionName {
        match self {
            ChildAction::PartStateChange { .. } => names::PART_STATE_CHANGE,
            ChildAction::AmmoChange { .. } => names::AMMO_CHANGE,
            ChildAction::LightControl { .. } => names::LIGHT_CONTROL,
        }
    }

    /// The identity of the entity owning the targeted part
    pub fn target(&self) -> Identity {
        match self {
            ChildAction::PartStateChange { target, .. }
            | ChildAction::AmmoChange { target, .. }
            | ChildAction::LightControl { target, .. } => *target,
        }
    }

    /// The identity of the targeted part
    pub fn child(&self) -> ChildIdentity {
        match self {
            ChildAction::PartStateChange { child, .. }
            | ChildAction::AmmoChange { child, .. }
            | ChildAction::LightControl { child, .. } => *child,
        }
    }
}

impl From<ChildAction> for Action {
    fn from(child: ChildAction) -> Self {
        Action::Child(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simx_core::{Camp, PartKind, Role};

    #[test]
    fn names_are_unique() {
        let all = [
            names::STATE_CHANGE,
            names::HEALTH_CHANGE,
            names::GRADE_CHANGE,
            names::CUSTOMIZE_CHANGE,
            names::PHYSICAL_COMMAND,
            names::PART_STATE_CHANGE,
            names::AMMO_CHANGE,
            names::LIGHT_CONTROL,
        ];
        for (i, a) in all.iter().enumerate() {
            assert!(names::is_known(a));
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(!names::is_known("teleport"));
    }

    #[test]
    fn child_wrapper_routes_by_inner_name() {
        let target = Identity::new(Camp::Red, Role::Engineer, 1);
        let child = ChildIdentity::new(PartKind::Magazine, 0);
        let action = Action::Child(ChildAction::AmmoChange {
            target,
            child,
            delta: -1,
        });

        assert_eq!(action.name(), names::AMMO_CHANGE);
        assert_eq!(action.target(), target);
    }
}
