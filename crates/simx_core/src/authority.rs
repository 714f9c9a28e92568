//! Network authority tag

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which replica of the session this process runs.
///
/// Exactly one side of a session pair is `Server`; only that side performs
/// real mutation of shared state, everything else is a read cache refreshed
/// by replicated messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    /// Authoritative replica
    Server,
    /// Non-authoritative replica
    Client,
}

impl Authority {
    /// Whether this replica may mutate shared game state
    pub const fn is_server(&self) -> bool {
        matches!(self, Authority::Server)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authority::Server => f.write_str("server"),
            Authority::Client => f.write_str("client"),
        }
    }
}
