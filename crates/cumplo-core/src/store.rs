//! The `RecordStore` trait family.
//!
//! One store owns one record collection for the lifetime of a session. Store
//! backends (e.g. `cumplo-store-memory`) implement these traits; the API and
//! [`ViewPage`](crate::view::ViewPage) depend only on the abstraction, so
//! tests can substitute fixtures freely.
//!
//! All methods return `Send` futures so a store can sit behind a
//! multi-threaded async runtime (e.g. tokio with `axum`).

use std::future::Future;

use crate::{
  filter::{self, ClauseSet},
  paginate::{Page, paginate},
  record::{
    Alert, Flagged, IssuedInvoice, LegalDocument, ReceivedInvoice, Record, Supplier,
  },
};

// ─── Record store ────────────────────────────────────────────────────────────

/// Read-mostly access to one collection with its three mutation entry
/// points: single status set, bulk status set, and (via [`FlagStore`]) flag
/// toggles.
pub trait RecordStore<R: Record>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every record, in insertion order.
  fn list(&self) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Look up one record. `None` if the id is unknown.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + 'a;

  /// Records matching `clauses`, in insertion order.
  fn filter<'a>(
    &'a self,
    clauses: &'a ClauseSet<R::Field>,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + 'a {
    async move {
      let records = self.list().await?;
      Ok(filter::filter_owned(records, clauses))
    }
  }

  /// One page (of [`Record::PAGE_SIZE`] rows) of the records matching
  /// `clauses`. The page number is clamped into range.
  fn paginate<'a>(
    &'a self,
    clauses: &'a ClauseSet<R::Field>,
    page: usize,
  ) -> impl Future<Output = Result<Page<R>, Self::Error>> + Send + 'a {
    async move {
      let records = self.filter(clauses).await?;
      Ok(paginate(&records, page, R::PAGE_SIZE))
    }
  }

  /// Replace the status of one record. Returns the record afterwards, or
  /// `None` if the id is unknown.
  fn set_status<'a>(
    &'a self,
    id: &'a str,
    status: R::Status,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + 'a;

  /// Apply one status to each id. Unknown ids are skipped; returns the ids
  /// that were found.
  fn set_status_many<'a>(
    &'a self,
    ids: &'a [String],
    status: R::Status,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + 'a;
}

/// A store whose records carry boolean flags.
pub trait FlagStore<R: Flagged>: RecordStore<R> {
  /// Flip one flag of one record. `None` if the id is unknown.
  fn toggle_flag<'a>(
    &'a self,
    id: &'a str,
    flag: R::Flag,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + 'a;
}

/// The legal document collection. Beyond status, only the corporate purpose
/// of a fully analysed document may be edited.
pub trait DocumentStore: RecordStore<LegalDocument> {
  /// Replace the corporate purpose of one document. Blank text clears it.
  ///
  /// Returns `None` if the id is unknown. A document whose analysis is not
  /// ready is returned unchanged; callers check
  /// [`LegalDocument::is_editable`].
  fn set_corporate_purpose<'a>(
    &'a self,
    id: &'a str,
    text: &'a str,
  ) -> impl Future<Output = Result<Option<LegalDocument>, Self::Error>> + Send + 'a;
}

// ─── Bundle ──────────────────────────────────────────────────────────────────

/// The per-kind stores a compliance session works with.
pub trait ComplianceStores: Send + Sync + 'static {
  type Issued: RecordStore<IssuedInvoice>;
  type Received: RecordStore<ReceivedInvoice>;
  type Alerts: RecordStore<Alert>;
  type Suppliers: FlagStore<Supplier>;
  type Documents: DocumentStore;

  fn issued_invoices(&self) -> &Self::Issued;
  fn received_invoices(&self) -> &Self::Received;
  fn alerts(&self) -> &Self::Alerts;
  fn suppliers(&self) -> &Self::Suppliers;
  fn legal_documents(&self) -> &Self::Documents;
}
