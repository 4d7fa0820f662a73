//! [`MemoryStore`]: the in-memory implementation of [`RecordStore`].

use std::{collections::HashSet, path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use cumplo_core::{
  collection,
  filter::{self, ClauseSet},
  record::{Alert, Flagged, IssuedInvoice, LegalDocument, ReceivedInvoice, Record, Supplier},
  store::{ComplianceStores, DocumentStore, FlagStore, RecordStore},
};

use crate::{Error, Result, fixtures::FixtureSet, snapshot};

// ─── Store ───────────────────────────────────────────────────────────────────

/// One record collection held in memory.
///
/// Clones share the same collection.
#[derive(Debug)]
pub struct MemoryStore<R> {
  records: Arc<RwLock<Vec<R>>>,
}

impl<R> Clone for MemoryStore<R> {
  fn clone(&self) -> Self { Self { records: Arc::clone(&self.records) } }
}

impl<R: Record> MemoryStore<R> {
  /// Take ownership of `records`. Ids must be unique.
  pub fn new(records: Vec<R>) -> Result<Self> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
      if !seen.insert(record.id()) {
        return Err(Error::DuplicateId {
          kind: R::KIND,
          id:   record.id().to_owned(),
        });
      }
    }
    Ok(Self { records: Arc::new(RwLock::new(records)) })
  }

  pub async fn len(&self) -> usize { self.records.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.records.read().await.is_empty() }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl<R: Record> RecordStore<R> for MemoryStore<R> {
  type Error = Error;

  async fn list(&self) -> Result<Vec<R>> { Ok(self.records.read().await.clone()) }

  async fn get(&self, id: &str) -> Result<Option<R>> {
    let records = self.records.read().await;
    Ok(collection::find(records.as_slice(), id).cloned())
  }

  // Filter under the read lock so only matching records are cloned.
  async fn filter(&self, clauses: &ClauseSet<R::Field>) -> Result<Vec<R>> {
    let records = self.records.read().await;
    Ok(filter::filter(records.as_slice(), clauses).into_iter().cloned().collect())
  }

  async fn set_status(&self, id: &str, status: R::Status) -> Result<Option<R>> {
    let mut records = self.records.write().await;
    let updated = collection::set_status(records.as_mut_slice(), id, status).cloned();
    match &updated {
      Some(record) => tracing::debug!(
        kind = R::KIND,
        id,
        requested = ?status,
        current = ?record.status(),
        "status set"
      ),
      None => tracing::debug!(kind = R::KIND, id, "status set on unknown id"),
    }
    Ok(updated)
  }

  async fn set_status_many(&self, ids: &[String], status: R::Status) -> Result<Vec<String>> {
    let mut records = self.records.write().await;
    let found = collection::set_status_many(records.as_mut_slice(), ids, status);
    if found.len() < ids.len() {
      tracing::warn!(
        kind = R::KIND,
        requested = ids.len(),
        found = found.len(),
        "bulk status update skipped unknown ids"
      );
    }
    tracing::debug!(kind = R::KIND, count = found.len(), ?status, "bulk status set");
    Ok(found)
  }
}

impl<R: Flagged> FlagStore<R> for MemoryStore<R> {
  async fn toggle_flag(&self, id: &str, flag: R::Flag) -> Result<Option<R>> {
    let mut records = self.records.write().await;
    let updated = collection::toggle_flag(records.as_mut_slice(), id, flag).cloned();
    if let Some(record) = &updated {
      tracing::debug!(kind = R::KIND, id, ?flag, value = record.flag(flag), "flag toggled");
    }
    Ok(updated)
  }
}

impl DocumentStore for MemoryStore<LegalDocument> {
  async fn set_corporate_purpose(&self, id: &str, text: &str) -> Result<Option<LegalDocument>> {
    let mut records = self.records.write().await;
    let updated =
      collection::set_corporate_purpose(records.as_mut_slice(), id, text).cloned();
    match &updated {
      Some(doc) if doc.is_editable() => tracing::debug!(id, "corporate purpose edited"),
      Some(doc) => tracing::debug!(id, analysis = %doc.analysis, "corporate purpose locked"),
      None => {}
    }
    Ok(updated)
  }
}

// ─── Bundle ──────────────────────────────────────────────────────────────────

/// The collections of one session.
#[derive(Debug, Clone)]
pub struct MemoryStores {
  issued:    MemoryStore<IssuedInvoice>,
  received:  MemoryStore<ReceivedInvoice>,
  alerts:    MemoryStore<Alert>,
  suppliers: MemoryStore<Supplier>,
  documents: MemoryStore<LegalDocument>,
}

impl MemoryStores {
  pub fn from_fixtures(fixtures: FixtureSet) -> Result<Self> {
    Ok(Self {
      issued:    MemoryStore::new(fixtures.issued_invoices)?,
      received:  MemoryStore::new(fixtures.received_invoices)?,
      alerts:    MemoryStore::new(fixtures.alerts)?,
      suppliers: MemoryStore::new(fixtures.suppliers)?,
      documents: MemoryStore::new(fixtures.legal_documents)?,
    })
  }

  /// Generate a deterministic session from `seed`, with timestamps spread
  /// backwards from `now`.
  pub fn seeded(seed: u64, now: DateTime<Utc>) -> Result<Self> {
    Self::from_fixtures(FixtureSet::generate(seed, now))
  }

  /// Load a session from a JSON snapshot file.
  pub async fn open_snapshot(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_fixtures(snapshot::load(path.as_ref()).await?)
  }

  /// Copy the current content of every collection.
  pub async fn to_fixtures(&self) -> FixtureSet {
    FixtureSet {
      issued_invoices:   self.issued.records.read().await.clone(),
      received_invoices: self.received.records.read().await.clone(),
      alerts:            self.alerts.records.read().await.clone(),
      suppliers:         self.suppliers.records.read().await.clone(),
      legal_documents:   self.documents.records.read().await.clone(),
    }
  }
}

impl ComplianceStores for MemoryStores {
  type Issued = MemoryStore<IssuedInvoice>;
  type Received = MemoryStore<ReceivedInvoice>;
  type Alerts = MemoryStore<Alert>;
  type Suppliers = MemoryStore<Supplier>;
  type Documents = MemoryStore<LegalDocument>;

  fn issued_invoices(&self) -> &Self::Issued { &self.issued }

  fn received_invoices(&self) -> &Self::Received { &self.received }

  fn alerts(&self) -> &Self::Alerts { &self.alerts }

  fn suppliers(&self) -> &Self::Suppliers { &self.suppliers }

  fn legal_documents(&self) -> &Self::Documents { &self.documents }
}
