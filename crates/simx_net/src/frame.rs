//! Binary frame envelope

use serde::{Deserialize, Serialize};
use simx_core::Authority;
use simx_customize::CustomizeCommand;
use thiserror::Error;

/// Envelope encode/decode failure
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame codec failed: {0}")]
    Bincode(#[from] bincode::Error),
}

/// One message crossing the transport, bincode on the wire.
///
/// Actions travel server to clients as their self-describing codec text;
/// customize writes travel client to server as structured commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Frame {
    /// Session handshake announcing the sender's role
    Hello { authority: Authority },
    /// A replicated action in its codec string form
    Action { text: String },
    /// A replica's forwarded customize write
    SetCustomize(CustomizeCommand),
}

impl Frame {
    /// Encode into wire bytes
    pub fn encode(&self) -> Result<Vec<u8>, FrameError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from wire bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simx_core::{Camp, Identity, Role};

    #[test]
    fn frames_round_trip() {
        let frames = [
            Frame::Hello {
                authority: Authority::Server,
            },
            Frame::Action {
                text: "health_change|{}".to_string(),
            },
            Frame::SetCustomize(CustomizeCommand {
                id: Identity::new(Camp::Blue, Role::Sentinel, 3),
                property: "gimbal_speed".to_string(),
                value: 0.5,
            }),
        ];
        for frame in frames {
            let bytes = frame.encode().unwrap();
            assert_eq!(Frame::decode(&bytes).unwrap(), frame);
        }
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(Frame::decode(&[0xff, 0xff, 0xff, 0xff, 0xff]).is_err());
    }
}
