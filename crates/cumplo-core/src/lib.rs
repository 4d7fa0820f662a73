//! Core types for the Cumplo compliance monitor.
//!
//! Holds the record model, the filter/paginate pipeline, selection tracking,
//! the status mutation contract, and the store traits. The crate is free of
//! HTTP and runtime dependencies; backends and the API depend on it.

// Native `async fn` in traits; the store traits spell out `Send` futures.
#![allow(async_fn_in_trait)]

pub mod badge;
pub mod collection;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod query;
pub mod record;
pub mod selection;
pub mod store;
pub mod summary;
pub mod view;

pub use error::{Error, Result};
