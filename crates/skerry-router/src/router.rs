//! Command routing: line in, owner resolved, reply out.

use std::sync::Arc;

use skerry_placement::NodeEntry;
use tracing::{debug, warn};

use crate::backend::NodeBackend;
use crate::command::Command;
use crate::error::RouterError;
use crate::state::SharedRing;

/// A command together with the node that owns its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    /// Owning node.
    pub owner: NodeEntry,
    /// The command to run there.
    pub command: Command,
}

/// Routes client commands to their owning node.
///
/// Cheap to clone; all clones share the same ring and backend.
#[derive(Clone)]
pub struct Router {
    ring: Arc<SharedRing>,
    backend: Arc<dyn NodeBackend>,
}

impl Router {
    /// Create a router over `ring` that forwards through `backend`.
    pub fn new(ring: Arc<SharedRing>, backend: Arc<dyn NodeBackend>) -> Self {
        Self { ring, backend }
    }

    /// The shared ring this router resolves against.
    pub fn ring(&self) -> &Arc<SharedRing> {
        &self.ring
    }

    /// Membership change: place a node on the ring.
    pub async fn add_node(&self, identifier: &str) -> Result<NodeEntry, RouterError> {
        self.ring.add_node(identifier).await.map_err(|e| {
            warn!(node = identifier, error = %e, "failed to add node");
            e.into()
        })
    }

    /// Membership change: take a node off the ring.
    pub async fn remove_node(&self, identifier: &str) -> Result<NodeEntry, RouterError> {
        self.ring.remove_node(identifier).await.map_err(|e| {
            warn!(node = identifier, error = %e, "failed to remove node");
            e.into()
        })
    }

    /// Resolve the owner of `command`'s key without forwarding it.
    pub async fn route(&self, command: Command) -> Result<Routed, RouterError> {
        let owner = self.ring.assign(command.key()).await?;
        Ok(Routed { owner, command })
    }

    /// Handle one request line and produce the reply line.
    ///
    /// Never fails: protocol, ring and backend errors all become a one-line
    /// reply. The returned string always ends in `\n`.
    pub async fn dispatch(&self, line: &str) -> String {
        let command = match Command::parse(line) {
            Ok(c) => c,
            Err(e) => {
                debug!(line = line.trim(), error = %e, "rejected request");
                return format!("{e}\n");
            }
        };

        let mut reply = match self.forward(command).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "request failed");
                e.reply()
            }
        };
        reply.push('\n');
        reply
    }

    async fn forward(&self, command: Command) -> Result<String, RouterError> {
        let routed = self.route(command).await?;
        debug!(
            command = %routed.command,
            owner = %routed.owner,
            "routing command"
        );
        Ok(self.backend.forward(&routed.owner, &routed.command).await?)
    }
}
