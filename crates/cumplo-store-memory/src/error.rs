//! Error type for `cumplo-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// Two records of the same kind share an id.
  #[error("duplicate {kind} id: {id}")]
  DuplicateId { kind: &'static str, id: String },

  #[error("invalid {kind} {id}: {reason}")]
  InvalidRecord {
    kind:   &'static str,
    id:     String,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
