//! Handlers for `/suppliers` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/suppliers` | `?query=&risk=&alignment=&page=` |
//! | `GET`  | `/suppliers/{tax_id}` | Profile with recent received invoices |
//! | `POST` | `/suppliers/{id}/flags/{flag}` | Flag is `critical` or `trusted` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use cumplo_core::{
  paginate::Page,
  query::SupplierFilter,
  record::{Record, Supplier, SupplierFlag, parse_token},
  store::{ComplianceStores, FlagStore, RecordStore},
  summary::SupplierProfile,
};

use crate::{PageParams, error::ApiError, extract::ListQuery};

/// `GET /suppliers`
pub async fn list<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  ListQuery(form): ListQuery<SupplierFilter>,
  ListQuery(params): ListQuery<PageParams>,
) -> Result<Json<Page<Supplier>>, ApiError> {
  let clauses = form.clauses();
  let page = stores
    .suppliers()
    .paginate(&clauses, params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

/// `GET /suppliers/{tax_id}`
pub async fn profile<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(tax_id): Path<String>,
) -> Result<Json<SupplierProfile>, ApiError> {
  let suppliers = stores.suppliers().list().await.map_err(ApiError::store)?;
  let received = stores.received_invoices().list().await.map_err(ApiError::store)?;
  let profile = SupplierProfile::lookup(&suppliers, &received, &tax_id)
    .ok_or_else(|| ApiError::NotFound(format!("supplier with tax id {tax_id} not found")))?;
  Ok(Json(profile))
}

/// `POST /suppliers/{id}/flags/{flag}`
pub async fn toggle_flag<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path((id, flag)): Path<(String, String)>,
) -> Result<Json<Supplier>, ApiError> {
  let flag: SupplierFlag = parse_token("supplier flag", &flag)?;
  let supplier = stores
    .suppliers()
    .toggle_flag(&id, flag)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(Supplier::KIND, &id))?;
  tracing::debug!(id, %flag, "supplier flag toggled");
  Ok(Json(supplier))
}
