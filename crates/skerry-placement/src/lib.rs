//! Consistent hashing ring for key-to-node placement.
//!
//! Node identifiers are hashed onto a 32-bit key space (CRC32C by default)
//! and kept in a bounded, strictly ascending array. A lookup value is owned
//! by the first node clockwise from its own position; positions past the
//! largest node key wrap around to the smallest.
//!
//! The ring is a plain single-owner value. Callers that share it between
//! tasks put it behind their own lock (see `skerry-router`).

mod error;
mod hash;
mod ring;

pub use error::{HashError, RingError};
pub use hash::{Crc32c, HashFunction};
pub use ring::{NodeEntry, Ring};
