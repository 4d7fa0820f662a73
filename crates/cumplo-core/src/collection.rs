//! Narrow mutations over a record collection.
//!
//! A session may only replace a record's status or flip a flag; legal
//! documents also take an edit of their corporate purpose. Each helper
//! targets records by id and reports a missing id as `None` instead of an
//! error. Transitions are unconditional except where the record kind refuses
//! them ([`Record::accepts`]); a refused transition leaves the record as it
//! was and is not an error.

use crate::record::{Flagged, LegalDocument, Record};

pub fn find<'a, R: Record>(records: &'a [R], id: &str) -> Option<&'a R> {
  records.iter().find(|r| r.id() == id)
}

/// Replace the status of the record with `id`. Returns the record as it
/// stands afterwards, or `None` if no record has that id.
pub fn set_status<'a, R: Record>(
  records: &'a mut [R],
  id: &str,
  status: R::Status,
) -> Option<&'a R> {
  let record = records.iter_mut().find(|r| r.id() == id)?;
  if record.accepts(status) {
    record.set_status(status);
  }
  Some(&*record)
}

/// Apply the same status to every record in `ids`. Unknown ids are skipped;
/// the ids that were found are returned in the order given.
pub fn set_status_many<R, I, S>(records: &mut [R], ids: I, status: R::Status) -> Vec<String>
where
  R: Record,
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  ids
    .into_iter()
    .filter_map(|id| set_status(&mut *records, id.as_ref(), status).map(|r| r.id().to_owned()))
    .collect()
}

/// Flip one flag of the record with `id`.
pub fn toggle_flag<'a, R: Flagged>(
  records: &'a mut [R],
  id: &str,
  flag: R::Flag,
) -> Option<&'a R> {
  let record = records.iter_mut().find(|r| r.id() == id)?;
  let slot = record.flag_mut(flag);
  *slot = !*slot;
  Some(&*record)
}

/// Replace the corporate purpose of the document with `id`. Documents whose
/// analysis has not finished are left as they are. Blank text clears the
/// field.
pub fn set_corporate_purpose<'a>(
  documents: &'a mut [LegalDocument],
  id: &str,
  text: &str,
) -> Option<&'a LegalDocument> {
  let doc = documents.iter_mut().find(|d| d.id == id)?;
  if doc.is_editable() {
    let text = text.trim();
    doc.corporate_purpose = (!text.is_empty()).then(|| text.to_owned());
  }
  Some(&*doc)
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::record::{
    Alert, AlertCategory, AlertState, AnalysisStatus, EntityKind, LegalDocumentKind,
    RelatedEntity, RiskLevel, Severity, Supplier, SupplierFlag, ValidationStatus,
  };

  fn alert(n: usize, state: AlertState) -> Alert {
    Alert {
      id:             format!("alert-{n}"),
      severity:       Severity::Low,
      category:       AlertCategory::Validation,
      title:          format!("Alert {n}"),
      description:    String::new(),
      raised_at:      Utc::now(),
      related:        RelatedEntity {
        kind: EntityKind::Invoice,
        id:   format!("emit-{n}"),
        name: String::new(),
      },
      state,
      assignee:       None,
      evidence:       None,
      recommendation: None,
    }
  }

  fn supplier() -> Supplier {
    Supplier {
      id:               "prov-1".into(),
      tax_id:           "ABC123456789".into(),
      legal_name:       "Empresa ABC S.A. de C.V.".into(),
      invoice_volume:   120,
      average_risk:     RiskLevel::Low,
      open_alerts:      2,
      recent_invoices:  14,
      alignment:        ValidationStatus::Ok,
      flagged_critical: false,
      trusted:          true,
    }
  }

  #[test]
  fn set_status_targets_one_record() {
    let mut alerts: Vec<Alert> = (1..=3).map(|n| alert(n, AlertState::New)).collect();
    let updated = set_status(&mut alerts, "alert-2", AlertState::Resolved).unwrap();
    assert_eq!(updated.state, AlertState::Resolved);
    assert_eq!(alerts[0].state, AlertState::New);
    assert_eq!(alerts[2].state, AlertState::New);
  }

  #[test]
  fn set_status_on_missing_id_is_none() {
    let mut alerts = vec![alert(1, AlertState::New)];
    assert!(set_status(&mut alerts, "alert-99", AlertState::Resolved).is_none());
  }

  #[test]
  fn any_state_moves_to_resolved() {
    let mut alerts = vec![alert(1, AlertState::New), alert(2, AlertState::InReview)];
    let found = set_status_many(&mut alerts, ["alert-1", "alert-2"], AlertState::Resolved);
    assert_eq!(found, ["alert-1", "alert-2"]);
    assert!(alerts.iter().all(|a| a.state == AlertState::Resolved));
  }

  #[test]
  fn resolved_is_terminal_for_bulk_review() {
    let mut alerts = vec![alert(1, AlertState::Resolved), alert(2, AlertState::New)];
    let found = set_status_many(&mut alerts, ["alert-1", "alert-2", "alert-7"], AlertState::InReview);
    assert_eq!(found, ["alert-1", "alert-2"]);
    assert_eq!(alerts[0].state, AlertState::Resolved);
    assert_eq!(alerts[1].state, AlertState::InReview);
  }

  #[test]
  fn flags_flip_independently() {
    let mut suppliers = vec![supplier()];
    let s = toggle_flag(&mut suppliers, "prov-1", SupplierFlag::Critical).unwrap();
    assert!(s.flagged_critical);
    assert!(s.trusted);

    let s = toggle_flag(&mut suppliers, "prov-1", SupplierFlag::Trusted).unwrap();
    assert!(s.flagged_critical);
    assert!(!s.trusted);

    assert!(toggle_flag(&mut suppliers, "prov-2", SupplierFlag::Trusted).is_none());
  }

  #[test]
  fn find_locates_by_id() {
    let suppliers = vec![supplier()];
    assert_eq!(find(&suppliers, "prov-1").map(|s| s.trusted), Some(true));
    assert!(find(&suppliers, "nope").is_none());
  }

  fn document(id: &str, analysis: AnalysisStatus) -> LegalDocument {
    LegalDocument {
      id: id.into(),
      kind: LegalDocumentKind::Other,
      name: format!("{id}.pdf"),
      uploaded_at: Utc::now(),
      analysis,
      corporate_purpose: Some("Consultoría fiscal".into()),
      summary: None,
    }
  }

  #[test]
  fn corporate_purpose_edits_only_analysed_documents() {
    let mut docs = vec![
      document("doc-1", AnalysisStatus::Ready),
      document("doc-2", AnalysisStatus::Pending),
    ];
    let edited = set_corporate_purpose(&mut docs, "doc-1", "  Logística  ").unwrap();
    assert_eq!(edited.corporate_purpose.as_deref(), Some("Logística"));

    let untouched = set_corporate_purpose(&mut docs, "doc-2", "Logística").unwrap();
    assert_eq!(untouched.corporate_purpose.as_deref(), Some("Consultoría fiscal"));

    let cleared = set_corporate_purpose(&mut docs, "doc-1", "   ").unwrap();
    assert!(cleared.corporate_purpose.is_none());

    assert!(set_corporate_purpose(&mut docs, "doc-9", "x").is_none());
  }
}
