//! Collaborator interface towards the nodes' storage.
//!
//! The router decides *which* node owns a key; a [`NodeBackend`] carries the
//! command there. Storage itself lives outside this workspace.

use async_trait::async_trait;
use skerry_placement::NodeEntry;

use crate::command::Command;
use crate::error::BackendError;

/// Carries a routed command to its owning node.
///
/// Implementations must be `Send + Sync`: one backend is shared by every
/// connection task.
#[async_trait]
pub trait NodeBackend: Send + Sync {
    /// Execute `command` on `owner` and return the one-line reply.
    async fn forward(&self, owner: &NodeEntry, command: &Command) -> Result<String, BackendError>;
}

/// Backend that tells the client where to go instead of forwarding.
///
/// Replies `MOVED <ring-key> <identifier>` for every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Redirect;

#[async_trait]
impl NodeBackend for Redirect {
    async fn forward(&self, owner: &NodeEntry, _command: &Command) -> Result<String, BackendError> {
        Ok(format!("MOVED {} {}", owner.key, owner.identifier))
    }
}
