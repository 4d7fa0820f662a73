//! Handlers for `/issued-invoices` and `/received-invoices` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/issued-invoices` | Filter params + `?page=` |
//! | `GET`  | `/issued-invoices/{id}` | 404 if not found |
//! | `POST` | `/issued-invoices/{id}/review` | Marks the invoice `ok` |
//! | `GET`  | `/received-invoices` | Filter params + `?page=` |
//! | `GET`  | `/received-invoices/{id}` | 404 if not found |
//! | `POST` | `/received-invoices/{id}/reconcile` | Marks the invoice `ok` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use cumplo_core::{
  paginate::Page,
  query::{IssuedInvoiceFilter, ReceivedInvoiceFilter},
  record::{IssuedInvoice, ReceivedInvoice, Record, ValidationStatus},
  store::{ComplianceStores, RecordStore},
};

use crate::{PageParams, error::ApiError, extract::ListQuery};

// ─── Issued ──────────────────────────────────────────────────────────────────

/// `GET /issued-invoices`
pub async fn list_issued<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  ListQuery(form): ListQuery<IssuedInvoiceFilter>,
  ListQuery(params): ListQuery<PageParams>,
) -> Result<Json<Page<IssuedInvoice>>, ApiError> {
  let clauses = form.clauses();
  let page = stores
    .issued_invoices()
    .paginate(&clauses, params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

/// `GET /issued-invoices/{id}`
pub async fn get_issued<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<IssuedInvoice>, ApiError> {
  let invoice = stores
    .issued_invoices()
    .get(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(IssuedInvoice::KIND, &id))?;
  Ok(Json(invoice))
}

/// `POST /issued-invoices/{id}/review`
pub async fn review_issued<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<IssuedInvoice>, ApiError> {
  let invoice = stores
    .issued_invoices()
    .set_status(&id, ValidationStatus::Ok)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(IssuedInvoice::KIND, &id))?;
  tracing::debug!(id, "issued invoice reviewed");
  Ok(Json(invoice))
}

// ─── Received ────────────────────────────────────────────────────────────────

/// `GET /received-invoices`
pub async fn list_received<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  ListQuery(form): ListQuery<ReceivedInvoiceFilter>,
  ListQuery(params): ListQuery<PageParams>,
) -> Result<Json<Page<ReceivedInvoice>>, ApiError> {
  let clauses = form.clauses();
  let page = stores
    .received_invoices()
    .paginate(&clauses, params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

/// `GET /received-invoices/{id}`
pub async fn get_received<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<ReceivedInvoice>, ApiError> {
  let invoice = stores
    .received_invoices()
    .get(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(ReceivedInvoice::KIND, &id))?;
  Ok(Json(invoice))
}

/// `POST /received-invoices/{id}/reconcile`
pub async fn reconcile_received<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<ReceivedInvoice>, ApiError> {
  let invoice = stores
    .received_invoices()
    .set_status(&id, ValidationStatus::Ok)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(ReceivedInvoice::KIND, &id))?;
  tracing::debug!(id, "received invoice reconciled");
  Ok(Json(invoice))
}
