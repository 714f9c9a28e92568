//! Byte transport boundary

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Send-side transport failure
#[derive(Debug, PartialEq, Eq)]
pub enum TrySendError {
    /// The peer end is gone
    Disconnected,
}

/// Minimal reliable-ordered byte pipe to one peer.
///
/// The real game hands this role to its networking plugin; everything the
/// session core needs is fire-and-forget sends and non-blocking receives,
/// with ordering preserved per sender.
pub trait Transport {
    fn try_send(&self, bytes: Vec<u8>) -> Result<(), TrySendError>;
    fn try_recv(&self) -> Option<Vec<u8>>;
    /// Frames waiting to be received
    fn depth(&self) -> usize;
}

/// In-process loopback pair built on unbounded channels.
///
/// Each end sends into the other's receive queue; ordering matches send
/// order, exactly what the session core assumes of the real transport.
#[derive(Clone)]
pub struct LoopbackTransport {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

impl LoopbackTransport {
    /// Create a connected pair of ends
    pub fn pair() -> (Self, Self) {
        let (tx_a, rx_a) = unbounded();
        let (tx_b, rx_b) = unbounded();
        (Self { tx: tx_a, rx: rx_b }, Self { tx: tx_b, rx: rx_a })
    }
}

impl Transport for LoopbackTransport {
    fn try_send(&self, bytes: Vec<u8>) -> Result<(), TrySendError> {
        self.tx.send(bytes).map_err(|_| TrySendError::Disconnected)
    }

    fn try_recv(&self) -> Option<Vec<u8>> {
        self.rx.try_recv().ok()
    }

    fn depth(&self) -> usize {
        self.rx.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_send_recv() {
        let (a, b) = LoopbackTransport::pair();
        a.try_send(b"ping".to_vec()).unwrap();
        b.try_send(b"pong".to_vec()).unwrap();
        assert_eq!(b.try_recv(), Some(b"ping".to_vec()));
        assert_eq!(a.try_recv(), Some(b"pong".to_vec()));
        assert_eq!(a.try_recv(), None);
    }

    #[test]
    fn order_is_preserved_per_sender() {
        let (a, b) = LoopbackTransport::pair();
        for i in 0u8..4 {
            a.try_send(vec![i]).unwrap();
        }
        assert_eq!(b.depth(), 4);
        for i in 0u8..4 {
            assert_eq!(b.try_recv(), Some(vec![i]));
        }
    }

    #[test]
    fn dropped_peer_reports_disconnected() {
        let (a, b) = LoopbackTransport::pair();
        drop(b);
        assert_eq!(a.try_send(vec![1]), Err(TrySendError::Disconnected));
    }
}
