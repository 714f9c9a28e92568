//! Self-describing wire codec for actions
//!
//! Encoded form is `"{name}|{json}"`: the routing name before the first
//! `|`, the serde payload after it. The discriminator is checked against
//! the known-name table before the payload is parsed, so a message from a
//! newer protocol version (unknown kind) is reported distinctly from a
//! corrupt one (malformed payload).

use thiserror::Error;

use crate::action::{names, Action};

/// Separator between discriminator and payload
pub const SEPARATOR: char = '|';

/// Codec failures
#[derive(Debug, Error)]
pub enum CodecError {
    /// No discriminator separator in the input
    #[error("missing discriminator separator")]
    Framing,
    /// Discriminator names no known action kind (version mismatch)
    #[error("unknown action kind: {0}")]
    UnknownKind(String),
    /// Payload failed to parse (corrupt data)
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
    /// Payload parsed, but as a different kind than the discriminator claims
    #[error("discriminator says {expected}, payload decodes as {found}")]
    Mismatch {
        expected: String,
        found: &'static str,
    },
}

/// Encode an action of any variant into its transmissible string form
pub fn encode(action: &Action) -> Result<String, CodecError> {
    let payload = serde_json::to_string(action)?;
    Ok(format!("{}{}{}", action.name(), SEPARATOR, payload))
}

/// Decode the string form back to the exact originating variant
pub fn decode(text: &str) -> Result<Action, CodecError> {
    let (kind, payload) = text.split_once(SEPARATOR).ok_or(CodecError::Framing)?;
    if !names::is_known(kind) {
        return Err(CodecError::UnknownKind(kind.to_string()));
    }
    let action: Action = serde_json::from_str(payload)?;
    if action.name() != kind {
        return Err(CodecError::Mismatch {
            expected: kind.to_string(),
            found: action.name(),
        });
    }
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ChildAction, PartState, PhysicalKind, RobotState};
    use simx_core::{Camp, ChildIdentity, Identity, PartKind, Role};

    fn target() -> Identity {
        Identity::new(Camp::Red, Role::Engineer, 1)
    }

    fn every_variant() -> Vec<Action> {
        let child = ChildIdentity::new(PartKind::Magazine, 0);
        vec![
            Action::StateChange {
                target: target(),
                state: RobotState::Disabled,
            },
            Action::HealthChange {
                target: target(),
                delta: -12.5,
            },
            Action::GradeChange {
                target: target(),
                grade: 3,
            },
            Action::CustomizeChange {
                target: target(),
                property: "chassis_speed".to_string(),
                value: 1.5,
            },
            Action::PhysicalCommand {
                target: target(),
                command: PhysicalKind::Catch,
            },
            Action::Child(ChildAction::PartStateChange {
                target: target(),
                child,
                state: PartState::Damaged,
            }),
            Action::Child(ChildAction::AmmoChange {
                target: target(),
                child,
                delta: 40,
            }),
            Action::Child(ChildAction::LightControl {
                target: target(),
                child,
                on: true,
            }),
        ]
    }

    #[test]
    fn every_variant_round_trips() {
        for action in every_variant() {
            let text = encode(&action).unwrap();
            assert_eq!(decode(&text).unwrap(), action);
        }
    }

    #[test]
    fn encoded_form_starts_with_name() {
        let action = Action::HealthChange {
            target: target(),
            delta: -1.0,
        };
        let text = encode(&action).unwrap();
        assert!(text.starts_with("health_change|"));
    }

    #[test]
    fn unknown_kind_is_distinct_from_corrupt_payload() {
        let unknown = decode("teleport|{}").unwrap_err();
        assert!(matches!(unknown, CodecError::UnknownKind(kind) if kind == "teleport"));

        let corrupt = decode("health_change|not json").unwrap_err();
        assert!(matches!(corrupt, CodecError::Payload(_)));
    }

    #[test]
    fn missing_separator_is_a_framing_error() {
        assert!(matches!(decode("health_change"), Err(CodecError::Framing)));
        assert!(matches!(decode(""), Err(CodecError::Framing)));
    }

    #[test]
    fn name_payload_mismatch_is_rejected() {
        let action = Action::GradeChange {
            target: target(),
            grade: 2,
        };
        let payload = serde_json::to_string(&action).unwrap();
        let text = format!("health_change|{payload}");
        assert!(matches!(
            decode(&text),
            Err(CodecError::Mismatch { .. })
        ));
    }
}
