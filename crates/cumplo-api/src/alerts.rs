//! Handlers for `/alerts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/alerts` | Filter params + `?page=` |
//! | `GET`  | `/alerts/{id}` | 404 if not found |
//! | `POST` | `/alerts/{id}/resolve` | Moves the alert to `resolved` |
//! | `POST` | `/alerts/review` | Body: `{"ids":["alert-2","alert-3"]}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use cumplo_core::{
  paginate::Page,
  query::AlertFilter,
  record::{Alert, AlertState, Record},
  store::{ComplianceStores, RecordStore},
};
use serde::{Deserialize, Serialize};

use crate::{PageParams, error::ApiError, extract::ListQuery};

// ─── Read ────────────────────────────────────────────────────────────────────

/// `GET /alerts`
pub async fn list<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  ListQuery(form): ListQuery<AlertFilter>,
  ListQuery(params): ListQuery<PageParams>,
) -> Result<Json<Page<Alert>>, ApiError> {
  let clauses = form.clauses();
  let page = stores
    .alerts()
    .paginate(&clauses, params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

/// `GET /alerts/{id}`
pub async fn get_one<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Alert>, ApiError> {
  let alert = stores
    .alerts()
    .get(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(Alert::KIND, &id))?;
  Ok(Json(alert))
}

// ─── Workflow ────────────────────────────────────────────────────────────────

/// `POST /alerts/{id}/resolve`
pub async fn resolve<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Alert>, ApiError> {
  let alert = stores
    .alerts()
    .set_status(&id, AlertState::Resolved)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(Alert::KIND, &id))?;
  tracing::debug!(id, "alert resolved");
  Ok(Json(alert))
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  pub ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
  /// Ids that exist. Resolved alerts among them keep their state.
  pub updated: Vec<String>,
}

/// `POST /alerts/review`: move every listed alert to `in_review`.
pub async fn review<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Json(body): Json<ReviewBody>,
) -> Result<Json<ReviewResponse>, ApiError> {
  if body.ids.is_empty() {
    return Err(ApiError::BadRequest("ids must not be empty".into()));
  }
  let updated = stores
    .alerts()
    .set_status_many(&body.ids, AlertState::InReview)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(requested = body.ids.len(), updated = updated.len(), "alerts sent to review");
  Ok(Json(ReviewResponse { updated }))
}
