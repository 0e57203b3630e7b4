//! Bounded consistent hashing ring.

use std::fmt;

use crate::error::RingError;
use crate::hash::{Crc32c, HashFunction};

/// A node's position on the ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeEntry {
    /// Ring position: the hash of `identifier`.
    pub key: u32,
    /// Node identifier as supplied to [`Ring::add`].
    pub identifier: String,
}

impl fmt::Display for NodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.identifier, self.key)
    }
}

/// Consistent hashing ring over a 32-bit key space.
///
/// Entries are kept in a contiguous array sorted strictly ascending by key,
/// holding at most `capacity` nodes. Two identifiers hashing to the same key
/// are rejected rather than merged.
///
/// `replication_factor` is carried as configuration only. No placement
/// decision consults it, and each node occupies exactly one position.
#[derive(Debug, Clone)]
pub struct Ring<H = Crc32c> {
    entries: Vec<NodeEntry>,
    capacity: usize,
    replication_factor: usize,
    hasher: H,
}

impl Ring<Crc32c> {
    /// Create an empty CRC32C ring.
    pub fn new(capacity: usize, replication_factor: usize) -> Self {
        Self::with_hasher(capacity, replication_factor, Crc32c)
    }
}

impl<H: HashFunction> Ring<H> {
    /// Create an empty ring positioned by `hasher`.
    ///
    /// The hasher is fixed for the ring's lifetime.
    pub fn with_hasher(capacity: usize, replication_factor: usize, hasher: H) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            replication_factor,
            hasher,
        }
    }

    /// Place a node on the ring.
    ///
    /// Fails with [`RingError::CapacityExceeded`] when the ring is full and
    /// with [`RingError::HashCollision`] when the identifier's key is
    /// already taken (re-adding the same identifier included).
    pub fn add(&mut self, identifier: &str) -> Result<NodeEntry, RingError> {
        if self.entries.len() >= self.capacity {
            return Err(RingError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let key = self.hasher.hash(identifier)?;

        let floor = self.floor_index(key);
        if let Some(i) = floor {
            if self.entries[i].key == key {
                return Err(RingError::HashCollision {
                    key,
                    existing: self.entries[i].identifier.clone(),
                    identifier: identifier.to_owned(),
                });
            }
        }

        let entry = NodeEntry {
            key,
            identifier: identifier.to_owned(),
        };
        self.entries.insert(floor.map_or(0, |i| i + 1), entry.clone());
        Ok(entry)
    }

    /// Take a node off the ring and return its entry.
    ///
    /// The node is located by key alone. Any identifier that hashes to a
    /// stored key removes that entry, even when the stored identifier
    /// differs, so `remove` can succeed where [`Ring::contains`] reports
    /// `false`.
    pub fn remove(&mut self, identifier: &str) -> Result<NodeEntry, RingError> {
        if self.entries.is_empty() {
            return Err(RingError::EmptyRing);
        }

        let key = self.hasher.hash(identifier)?;

        match self.exact_index(key) {
            Some(i) => Ok(self.entries.remove(i)),
            None => Err(RingError::NodeNotFound {
                identifier: identifier.to_owned(),
                key,
            }),
        }
    }

    /// Resolve the node that owns `lookup`.
    ///
    /// The owner is the first node whose key is greater than or equal to the
    /// lookup's key, wrapping to the smallest key when none is.
    pub fn assign(&self, lookup: &str) -> Result<NodeEntry, RingError> {
        if self.entries.is_empty() {
            return Err(RingError::EmptyRing);
        }

        let key = self.hasher.hash(lookup)?;
        Ok(self.entries[self.successor_index(key)].clone())
    }

    /// Whether `identifier` is on the ring.
    ///
    /// Matches by key and then by identifier, so an identifier that merely
    /// collides with a stored one is not reported as present.
    pub fn contains(&self, identifier: &str) -> bool {
        let Ok(key) = self.hasher.hash(identifier) else {
            return false;
        };
        self.exact_index(key)
            .is_some_and(|i| self.entries[i].identifier == identifier)
    }

    /// Number of nodes on the ring.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ring holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of nodes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured replication factor (not used for placement).
    pub fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    /// Entries in ascending key order.
    pub fn entries(&self) -> &[NodeEntry] {
        &self.entries
    }

    /// Rightmost index whose key is `<= key`.
    fn floor_index(&self, key: u32) -> Option<usize> {
        self.entries.partition_point(|e| e.key <= key).checked_sub(1)
    }

    /// Index holding exactly `key`.
    fn exact_index(&self, key: u32) -> Option<usize> {
        self.entries.binary_search_by_key(&key, |e| e.key).ok()
    }

    /// Leftmost index whose key is `>= key`, or 0 past the largest key.
    fn successor_index(&self, key: u32) -> usize {
        let i = self.entries.partition_point(|e| e.key < key);
        if i == self.entries.len() { 0 } else { i }
    }
}
