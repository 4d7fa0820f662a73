//! `GET /dashboard`: headline counts and the newest open alerts.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use cumplo_core::{
  store::{ComplianceStores, RecordStore},
  summary::DashboardSummary,
};

use crate::error::ApiError;

pub async fn handler<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
) -> Result<Json<DashboardSummary>, ApiError> {
  let issued = stores.issued_invoices().list().await.map_err(ApiError::store)?;
  let received = stores.received_invoices().list().await.map_err(ApiError::store)?;
  let alerts = stores.alerts().list().await.map_err(ApiError::store)?;
  Ok(Json(DashboardSummary::compute(&issued, &received, &alerts, Utc::now())))
}
