//! In-memory backend for the Cumplo compliance stores.
//!
//! Each collection lives behind a [`tokio::sync::RwLock`] so one store can be
//! shared by concurrent request handlers. Collections are seeded from a
//! deterministic fixture generator or loaded from a JSON snapshot; nothing is
//! ever written back.

mod fixtures;
mod store;

pub mod error;
pub mod snapshot;

pub use error::{Error, Result};
pub use fixtures::FixtureSet;
pub use store::{MemoryStore, MemoryStores};
