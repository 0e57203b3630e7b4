//! Error types for ring operations.

/// Errors produced by a [`HashFunction`](crate::HashFunction).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// The hash function refused the identifier.
    #[error("identifier {identifier:?} rejected: {reason}")]
    Rejected {
        /// The identifier that was refused.
        identifier: String,
        /// Why it was refused.
        reason: String,
    },
}

/// Errors returned by [`Ring`](crate::Ring) operations.
///
/// Every variant leaves the ring exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// The ring already holds `capacity` nodes.
    #[error("no slot available in hash ring (capacity {capacity})")]
    CapacityExceeded {
        /// Fixed capacity of the ring.
        capacity: usize,
    },

    /// The identifier hashed to a key that is already on the ring.
    #[error("hash collision on key {key}: {identifier:?} collides with {existing:?}")]
    HashCollision {
        /// The contested ring key.
        key: u32,
        /// Identifier already stored at that key.
        existing: String,
        /// Identifier that was being added.
        identifier: String,
    },

    /// The ring holds no nodes.
    #[error("empty hash ring")]
    EmptyRing,

    /// No node is stored at the identifier's key.
    #[error("node {identifier:?} (key {key}) does not exist")]
    NodeNotFound {
        /// Identifier that was looked up.
        identifier: String,
        /// Its computed key.
        key: u32,
    },

    /// The hash function failed.
    #[error("hash error: {0}")]
    Hash(#[from] HashError),
}
