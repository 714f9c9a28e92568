//! Per-tick replication pump

use simx_action::{codec, Action, CodecError};
use simx_core::Authority;
use simx_customize::CustomizeManager;
use simx_dispatch::Session;
use thiserror::Error;

use crate::frame::{Frame, FrameError};
use crate::transport::Transport;

/// Replication failures worth surfacing to the caller.
///
/// Inbound decode problems are not here: a malformed or foreign message
/// must never take the session down, so those are logged and dropped.
#[derive(Debug, Error)]
pub enum NetError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("action encode failed: {0}")]
    Codec(#[from] CodecError),
}

/// Bridges one transport end and one session.
///
/// The server end broadcasts every authoritatively dispatched action and
/// applies forwarded customize writes; the client end feeds replicated
/// actions into its local dispatcher and forwards its customize writes
/// upstream. Call [`pump`](Self::pump) once per simulation tick.
pub struct Replicator<T: Transport> {
    transport: T,
    authority: Authority,
}

impl<T: Transport> Replicator<T> {
    /// Create a replicator for one end of a session pair
    pub fn new(authority: Authority, transport: T) -> Self {
        Self {
            transport,
            authority,
        }
    }

    /// The role of this end
    pub fn authority(&self) -> Authority {
        self.authority
    }

    /// Wire the session and customize store to this transport end and
    /// greet the peer.
    pub fn attach(
        &self,
        session: &mut Session,
        customize: &mut CustomizeManager,
    ) -> Result<(), NetError> {
        session.enable_replication();
        customize.enable_forwarding();
        self.send_frame(&Frame::Hello {
            authority: self.authority,
        })?;
        Ok(())
    }

    /// One tick of replication: flush outbound queues, then drain and
    /// apply every inbound frame.
    pub fn pump(
        &mut self,
        session: &mut Session,
        customize: &mut CustomizeManager,
    ) -> Result<(), NetError> {
        for action in session.take_outbound() {
            let text = codec::encode(&action)?;
            self.send_frame(&Frame::Action { text })?;
        }
        for command in customize.take_pending_forwards() {
            self.send_frame(&Frame::SetCustomize(command))?;
        }

        while let Some(bytes) = self.transport.try_recv() {
            match Frame::decode(&bytes) {
                Ok(frame) => self.apply(frame, session, customize),
                Err(err) => log::warn!("dropping undecodable frame: {err}"),
            }
        }
        Ok(())
    }

    fn apply(&self, frame: Frame, session: &mut Session, customize: &mut CustomizeManager) {
        match frame {
            Frame::Hello { authority } => {
                log::info!("peer connected as {authority}");
            }
            Frame::Action { text } => match codec::decode(&text) {
                Ok(action) => {
                    // Replicated customize values land in the read cache
                    // before listeners hear about them.
                    if let Action::CustomizeChange {
                        target,
                        property,
                        value,
                    } = &action
                    {
                        customize.apply_replicated(*target, property, *value);
                    }
                    session.send(action);
                }
                Err(CodecError::UnknownKind(kind)) => {
                    log::warn!("dropping action of unknown kind {kind:?} (version mismatch?)");
                }
                Err(err) => {
                    log::warn!("dropping corrupt action: {err}");
                }
            },
            Frame::SetCustomize(command) => {
                if self.authority.is_server() {
                    customize.cmd_set_data(command.id, &command.property, command.value);
                    session.send(Action::CustomizeChange {
                        target: command.id,
                        property: command.property,
                        value: command.value,
                    });
                } else {
                    log::warn!("replica received a customize command; ignoring");
                }
            }
        }
    }

    fn send_frame(&self, frame: &Frame) -> Result<(), NetError> {
        let bytes = frame.encode()?;
        if self.transport.try_send(bytes).is_err() {
            // Fire and forget: a gone peer only means nobody is listening
            log::warn!("transport peer disconnected; frame dropped");
        }
        Ok(())
    }
}
