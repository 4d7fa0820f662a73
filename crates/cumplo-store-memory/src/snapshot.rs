//! JSON snapshot files.
//!
//! A snapshot is a serialized [`FixtureSet`]. Loading checks that monetary
//! amounts are finite and non-negative; id uniqueness is checked when the
//! stores are built.

use std::path::Path;

use cumplo_core::record::{IssuedInvoice, ReceivedInvoice, Record};

use crate::{Error, Result, fixtures::FixtureSet};

pub async fn load(path: &Path) -> Result<FixtureSet> {
  let raw = tokio::fs::read_to_string(path).await?;
  let set: FixtureSet = serde_json::from_str(&raw)?;
  validate(&set)?;
  tracing::info!(
    path = %path.display(),
    issued = set.issued_invoices.len(),
    received = set.received_invoices.len(),
    alerts = set.alerts.len(),
    suppliers = set.suppliers.len(),
    legal_documents = set.legal_documents.len(),
    "snapshot loaded"
  );
  Ok(set)
}

pub async fn save(path: &Path, set: &FixtureSet) -> Result<()> {
  let raw = serde_json::to_string_pretty(set)?;
  tokio::fs::write(path, raw).await?;
  Ok(())
}

fn validate(set: &FixtureSet) -> Result<()> {
  for inv in &set.issued_invoices {
    check_amounts::<IssuedInvoice>(&inv.id, [inv.subtotal, inv.tax, inv.total])?;
  }
  for inv in &set.received_invoices {
    check_amounts::<ReceivedInvoice>(&inv.id, [inv.subtotal, inv.tax, inv.total])?;
  }
  Ok(())
}

fn check_amounts<R: Record>(id: &str, amounts: [f64; 3]) -> Result<()> {
  if amounts.iter().all(|a| a.is_finite() && *a >= 0.0) {
    return Ok(());
  }
  Err(Error::InvalidRecord {
    kind:   R::KIND,
    id:     id.to_owned(),
    reason: "amounts must be finite and non-negative".to_owned(),
  })
}
