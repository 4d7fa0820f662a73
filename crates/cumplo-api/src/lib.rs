//! JSON REST API for Cumplo.
//!
//! Exposes an axum [`Router`] backed by any
//! [`cumplo_core::store::ComplianceStores`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", cumplo_api::api_router(stores.clone()))
//! ```

pub mod alerts;
pub mod dashboard;
pub mod documents;
pub mod error;
pub mod extract;
pub mod invoices;
pub mod suppliers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use cumplo_core::store::ComplianceStores;
use serde::Deserialize;

pub use error::ApiError;

/// The `?page=` parameter shared by every list endpoint. Missing means 1;
/// out-of-range values are clamped by the store.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
  pub page: Option<usize>,
}

impl PageParams {
  pub fn page(&self) -> usize { self.page.unwrap_or(1) }
}

/// Build a fully-materialised API router for `stores`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S: ComplianceStores>(stores: Arc<S>) -> Router<()> {
  Router::new()
    // Invoices
    .route("/issued-invoices", get(invoices::list_issued::<S>))
    .route("/issued-invoices/{id}", get(invoices::get_issued::<S>))
    .route("/issued-invoices/{id}/review", post(invoices::review_issued::<S>))
    .route("/received-invoices", get(invoices::list_received::<S>))
    .route("/received-invoices/{id}", get(invoices::get_received::<S>))
    .route(
      "/received-invoices/{id}/reconcile",
      post(invoices::reconcile_received::<S>),
    )
    // Alerts
    .route("/alerts", get(alerts::list::<S>))
    .route("/alerts/review", post(alerts::review::<S>))
    .route("/alerts/{id}", get(alerts::get_one::<S>))
    .route("/alerts/{id}/resolve", post(alerts::resolve::<S>))
    // Suppliers
    .route("/suppliers", get(suppliers::list::<S>))
    .route("/suppliers/{tax_id}", get(suppliers::profile::<S>))
    .route("/suppliers/{id}/flags/{flag}", post(suppliers::toggle_flag::<S>))
    // Legal documents
    .route("/legal-documents", get(documents::list::<S>))
    .route("/legal-documents/{id}", get(documents::get_one::<S>))
    .route(
      "/legal-documents/{id}/corporate-purpose",
      put(documents::edit_corporate_purpose::<S>),
    )
    // Dashboard
    .route("/dashboard", get(dashboard::handler::<S>))
    .with_state(stores)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chrono::Utc;
  use cumplo_store_memory::MemoryStores;
  use serde_json::Value;
  use tower::ServiceExt;

  use super::*;

  fn router() -> Router {
    let stores = MemoryStores::seeded(42, Utc::now()).expect("seeded stores");
    api_router(Arc::new(stores))
  }

  async fn call(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    let resp = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  // ── Lists ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_returns_page_metadata() {
    let (status, json) = call(router(), "GET", "/alerts?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["page"], 2);
    assert_eq!(json["page_size"], 15);
    assert_eq!(json["total_items"], 60);
    assert_eq!(json["total_pages"], 4);
    assert_eq!(json["items"].as_array().unwrap().len(), 15);
    assert_eq!(json["items"][0]["id"], "alert-16");
  }

  #[tokio::test]
  async fn list_applies_filters() {
    let (status, json) =
      call(router(), "GET", "/received-invoices?status=critical", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = json["items"]
      .as_array()
      .unwrap()
      .iter()
      .map(|i| i["id"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(ids, ["rec-1", "rec-13", "rec-25", "rec-37"]);
  }

  #[tokio::test]
  async fn malformed_amount_is_ignored() {
    let (status, json) =
      call(router(), "GET", "/issued-invoices?amount_min=abc&amount_max=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_items"], 35);
  }

  #[tokio::test]
  async fn unknown_enum_token_is_a_json_bad_request() {
    let (status, json) = call(router(), "GET", "/alerts?severity=apocalyptic", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("apocalyptic"));

    let (status, json) = call(router(), "GET", "/suppliers?page=two", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
  }

  #[tokio::test]
  async fn blank_enum_params_mean_no_filter() {
    for (uri, total) in [
      ("/issued-invoices?status=&doc_type=&query=", 35),
      ("/received-invoices?status=&risk=&query=", 40),
      ("/alerts?severity=&state=", 60),
      ("/suppliers?risk=&alignment=", 20),
      ("/legal-documents?kind=&analysis=", 5),
    ] {
      let (status, json) = call(router(), "GET", uri, None).await;
      assert_eq!(status, StatusCode::OK, "{uri}");
      assert_eq!(json["total_items"], total, "{uri}");
    }
  }

  #[tokio::test]
  async fn date_bounds_restrict_the_list() {
    let (_, json) = call(router(), "GET", "/alerts?from=2999-01-01", None).await;
    assert_eq!(json["total_items"], 0);

    let (_, json) = call(router(), "GET", "/alerts?to=2000-01-01", None).await;
    assert_eq!(json["total_items"], 0);

    // Every fixture lies within the last 60 days.
    let (_, json) =
      call(router(), "GET", "/issued-invoices?from=2000-01-01&to=2999-12-31", None).await;
    assert_eq!(json["total_items"], 35);

    let (status, json) = call(router(), "GET", "/alerts?from=not-a-date", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_items"], 60);
  }

  // ── Single records ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_unknown_id_is_404() {
    let (status, json) = call(router(), "GET", "/issued-invoices/emit-999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("emit-999"));
  }

  #[tokio::test]
  async fn review_marks_invoice_ok() {
    let app = router();
    let (status, json) = call(app.clone(), "POST", "/issued-invoices/emit-1/review", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");

    let (_, json) = call(app, "GET", "/issued-invoices/emit-1", None).await;
    assert_eq!(json["status"], "ok");
  }

  #[tokio::test]
  async fn reconcile_unknown_is_404() {
    let (status, _) = call(router(), "POST", "/received-invoices/rec-0/reconcile", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Alerts ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn bulk_review_returns_found_ids() {
    let app = router();
    let body = serde_json::json!({ "ids": ["alert-2", "alert-3", "alert-nope"] });
    let (status, json) = call(app.clone(), "POST", "/alerts/review", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["updated"], serde_json::json!(["alert-2", "alert-3"]));

    let (_, json) = call(app, "GET", "/alerts/alert-3", None).await;
    assert_eq!(json["state"], "in_review");
  }

  #[tokio::test]
  async fn empty_bulk_review_is_bad_request() {
    let body = serde_json::json!({ "ids": [] });
    let (status, _) = call(router(), "POST", "/alerts/review", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn resolve_moves_alert_to_resolved() {
    let (status, json) = call(router(), "POST", "/alerts/alert-2/resolve", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "resolved");
  }

  // ── Suppliers ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn flag_toggle_flips() {
    let app = router();
    let (_, before) = call(app.clone(), "POST", "/suppliers/prov-1/flags/critical", None).await;
    assert_eq!(before["flagged_critical"], false);
    let (_, after) = call(app, "POST", "/suppliers/prov-1/flags/critical", None).await;
    assert_eq!(after["flagged_critical"], true);
  }

  #[tokio::test]
  async fn unknown_flag_is_bad_request() {
    let (status, json) = call(router(), "POST", "/suppliers/prov-1/flags/shady", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("shady"));
  }

  #[tokio::test]
  async fn supplier_profile_joins_invoices() {
    let (status, json) = call(router(), "GET", "/suppliers/ABC123456789", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["supplier"]["id"], "prov-1");
    let invoices = json["recent_invoices"].as_array().unwrap();
    assert!(!invoices.is_empty());
    assert!(invoices.iter().all(|i| i["supplier"]["tax_id"] == "ABC123456789"));

    let (status, _) = call(router(), "GET", "/suppliers/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Legal documents ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn legal_documents_filter_by_analysis() {
    let (status, json) = call(router(), "GET", "/legal-documents?analysis=ready", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = json["items"]
      .as_array()
      .unwrap()
      .iter()
      .map(|d| d["id"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(ids, ["doc-1", "doc-4", "doc-5"]);
  }

  #[tokio::test]
  async fn corporate_purpose_edit_round_trips() {
    let app = router();
    let body = serde_json::json!({ "corporate_purpose": "Comercio electrónico." });
    let (status, json) = call(
      app.clone(),
      "PUT",
      "/legal-documents/doc-4/corporate-purpose",
      Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["corporate_purpose"], "Comercio electrónico.");

    let (_, json) = call(app, "GET", "/legal-documents/doc-4", None).await;
    assert_eq!(json["corporate_purpose"], "Comercio electrónico.");
  }

  #[tokio::test]
  async fn corporate_purpose_edit_waits_for_analysis() {
    let app = router();
    let body = serde_json::json!({ "corporate_purpose": "Otro" });
    let (status, json) = call(
      app.clone(),
      "PUT",
      "/legal-documents/doc-3/corporate-purpose",
      Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("pending"));

    let (_, json) = call(app, "GET", "/legal-documents/doc-3", None).await;
    assert!(json["corporate_purpose"].is_null());

    let (status, _) =
      call(router(), "PUT", "/legal-documents/doc-9/corporate-purpose", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Dashboard ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn dashboard_summarises() {
    let (status, json) = call(router(), "GET", "/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["recent_alerts"].as_array().unwrap().len(), 5);
    // alert-1 (critical) is resolved; alert-21 and alert-41 stay open.
    assert_eq!(json["open_critical_alerts"], 2);
    assert!(json["clean_percentage"].as_u64().unwrap() <= 100);
  }
}
