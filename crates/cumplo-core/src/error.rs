//! Error types for `cumplo-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown {kind} value: {value:?}")]
  UnknownVariant { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
