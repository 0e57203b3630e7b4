//! Shared ring state: the placement ring behind one lock.
//!
//! [`SharedRing`] is the structure connection handlers hold on to. Lookups
//! take the read lock, membership changes the write lock, and each lock is
//! held for the whole ring operation so no caller observes a half-shifted
//! array.

use std::sync::Arc;

use skerry_placement::{NodeEntry, Ring, RingError};
use tokio::sync::{RwLock, broadcast};
use tracing::info;

/// Membership change on the ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingEvent {
    /// A node was placed on the ring.
    NodeAdded(NodeEntry),
    /// A node was taken off the ring.
    NodeRemoved(NodeEntry),
}

/// The placement ring shared between tasks.
pub struct SharedRing {
    ring: RwLock<Ring>,
    /// Subscribers get every successful membership change.
    event_tx: broadcast::Sender<RingEvent>,
}

impl SharedRing {
    /// Wrap `ring` for shared use.
    pub fn new(ring: Ring) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(256);
        Arc::new(Self {
            ring: RwLock::new(ring),
            event_tx,
        })
    }

    /// Subscribe to membership changes.
    pub fn subscribe(&self) -> broadcast::Receiver<RingEvent> {
        self.event_tx.subscribe()
    }

    /// Place a node on the ring.
    pub async fn add_node(&self, identifier: &str) -> Result<NodeEntry, RingError> {
        let entry = self.ring.write().await.add(identifier)?;

        info!(node = %entry.identifier, key = entry.key, "node added to ring");
        let _ = self.event_tx.send(RingEvent::NodeAdded(entry.clone()));
        Ok(entry)
    }

    /// Take a node off the ring.
    pub async fn remove_node(&self, identifier: &str) -> Result<NodeEntry, RingError> {
        let entry = self.ring.write().await.remove(identifier)?;

        info!(node = %entry.identifier, key = entry.key, "node removed from ring");
        let _ = self.event_tx.send(RingEvent::NodeRemoved(entry.clone()));
        Ok(entry)
    }

    /// Resolve the owner of `lookup`.
    pub async fn assign(&self, lookup: &str) -> Result<NodeEntry, RingError> {
        self.ring.read().await.assign(lookup)
    }

    /// Return a clone of the current ring.
    pub async fn snapshot(&self) -> Ring {
        self.ring.read().await.clone()
    }

    /// Number of nodes on the ring.
    pub async fn len(&self) -> usize {
        self.ring.read().await.len()
    }

    /// Whether the ring holds no nodes.
    pub async fn is_empty(&self) -> bool {
        self.ring.read().await.is_empty()
    }
}
