//! Key routing on top of the placement ring.
//!
//! This crate provides:
//!
//! - [`SharedRing`]: the ring behind a reader-writer lock, with membership
//!   events broadcast to subscribers.
//! - [`command`]: parsing of the `get`/`set`/`put`/`del` line protocol.
//! - [`NodeBackend`]: the collaborator that carries a routed command to the
//!   owning node's storage. Only [`Redirect`] ships here.
//! - [`Router`]: ties the three together for connection handlers.

pub mod backend;
pub mod command;
mod error;
mod router;
mod state;


pub use backend::{NodeBackend, Redirect};
pub use command::Command;
pub use error::{BackendError, CommandError, RouterError};
pub use router::{Routed, Router};
pub use state::{RingEvent, SharedRing};
