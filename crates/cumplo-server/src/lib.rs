//! HTTP server wiring for Cumplo: configuration and the top-level router.

use std::{path::PathBuf, sync::Arc};

use axum::{Json, Router, routing::get};
use cumplo_core::store::ComplianceStores;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CUMPLO_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// Seed of the fixture generator. Ignored when `snapshot_path` is set.
  pub seed:          u64,
  /// JSON snapshot to load instead of generating fixtures.
  pub snapshot_path: Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_owned(),
      port:          8080,
      seed:          42,
      snapshot_path: None,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// The API nested under `/api`, plus `/health`, with request tracing.
pub fn app<S: ComplianceStores>(stores: Arc<S>) -> Router {
  Router::new()
    .route("/health", get(health))
    .nest("/api", cumplo_api::api_router(stores))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use chrono::Utc;
  use cumplo_store_memory::MemoryStores;
  use tower::ServiceExt;

  use super::*;

  #[test]
  fn empty_config_uses_defaults() {
    let cfg: ServerConfig = config::Config::builder()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.address(), "127.0.0.1:8080");
  }

  #[test]
  fn overrides_replace_single_fields() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("port", 9000_i64)
      .unwrap()
      .set_override("snapshot_path", "/tmp/session.json")
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.snapshot_path, Some(PathBuf::from("/tmp/session.json")));
  }

  #[tokio::test]
  async fn api_is_nested_and_health_answers() {
    let stores = Arc::new(MemoryStores::seeded(1, Utc::now()).unwrap());

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app(Arc::clone(&stores)).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
      .uri("/api/suppliers?page=2")
      .body(Body::empty())
      .unwrap();
    let resp = app(stores).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["page"], 2);
    assert_eq!(json["total_items"], 20);
  }
}
