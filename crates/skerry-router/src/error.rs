//! Error types for the router crate.

use skerry_placement::RingError;

/// A request line that does not follow the command protocol.
///
/// The `Display` output is the one-line message sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first token is not a known verb.
    #[error("command {0} is invalid")]
    UnknownVerb(String),

    /// Known verb with the wrong number of tokens or an empty key.
    #[error("command is invalid")]
    Malformed,
}

/// Errors reported by a [`NodeBackend`](crate::NodeBackend).
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The owning node could not be reached.
    #[error("node {identifier} unreachable: {reason}")]
    Unreachable {
        /// Identifier of the owning node.
        identifier: String,
        /// Transport-level description.
        reason: String,
    },

    /// The owning node refused the command.
    #[error("rejected by node: {0}")]
    Rejected(String),
}

/// Errors produced while routing a command.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Ring membership or lookup failed.
    #[error("ring error: {0}")]
    Ring(#[from] RingError),

    /// The backend failed to carry the command.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl RouterError {
    /// One-line client reply for this error, without the trailing newline.
    pub fn reply(&self) -> String {
        match self {
            Self::Ring(RingError::EmptyRing) => "error: no nodes available".to_owned(),
            Self::Ring(e) => format!("error: {e}"),
            Self::Backend(e) => format!("error: {e}"),
        }
    }
}
