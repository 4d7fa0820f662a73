//! Handlers for `/legal-documents` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/legal-documents` | `?query=&kind=&analysis=&page=` |
//! | `GET`  | `/legal-documents/{id}` | 404 if not found |
//! | `PUT`  | `/legal-documents/{id}/corporate-purpose` | Body: `{"corporate_purpose":"..."}`; 409 until analysis is `ready` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use cumplo_core::{
  paginate::Page,
  query::LegalDocumentFilter,
  record::{LegalDocument, Record},
  store::{ComplianceStores, DocumentStore, RecordStore},
};
use serde::Deserialize;

use crate::{PageParams, error::ApiError, extract::ListQuery};

#[derive(Debug, Deserialize)]
pub struct CorporatePurposeBody {
  /// Blank clears the field.
  pub corporate_purpose: String,
}

/// `GET /legal-documents`
pub async fn list<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  ListQuery(form): ListQuery<LegalDocumentFilter>,
  ListQuery(params): ListQuery<PageParams>,
) -> Result<Json<Page<LegalDocument>>, ApiError> {
  let clauses = form.clauses();
  let page = stores
    .legal_documents()
    .paginate(&clauses, params.page())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(page))
}

/// `GET /legal-documents/{id}`
pub async fn get_one<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<LegalDocument>, ApiError> {
  let doc = stores
    .legal_documents()
    .get(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(LegalDocument::KIND, &id))?;
  Ok(Json(doc))
}

/// `PUT /legal-documents/{id}/corporate-purpose`
pub async fn edit_corporate_purpose<S: ComplianceStores>(
  State(stores): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<CorporatePurposeBody>,
) -> Result<Json<LegalDocument>, ApiError> {
  let doc = stores
    .legal_documents()
    .set_corporate_purpose(&id, &body.corporate_purpose)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::missing(LegalDocument::KIND, &id))?;
  if !doc.is_editable() {
    return Err(ApiError::Conflict(format!(
      "{} {id} is still {}; its corporate purpose cannot be edited yet",
      LegalDocument::KIND,
      doc.analysis,
    )));
  }
  tracing::debug!(id, "corporate purpose updated");
  Ok(Json(doc))
}
