//! Deterministic fixture generation.
//!
//! A [`FixtureSet`] is the full content of a session: 35 issued invoices, 40
//! received invoices, 60 alerts, 20 suppliers and 5 legal documents. Statuses, risk levels and
//! workflow states follow fixed index patterns so list views always have
//! something in every bucket; amounts, timestamps and UUIDs come from a seeded
//! [`StdRng`], so the same seed and anchor instant produce the same set.

use chrono::{DateTime, TimeDelta, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cumplo_core::record::{
  Alert, AlertCategory, AlertState, AnalysisStatus, ConceptCheck, Counterparty,
  DocumentType, EntityKind, IssuedInvoice, LegalDocument, LegalDocumentKind,
  ReceivedInvoice, RelatedEntity, RiskLevel, Severity, Supplier, ValidationStatus,
};

pub const ISSUED_COUNT: usize = 35;
pub const RECEIVED_COUNT: usize = 40;
pub const ALERT_COUNT: usize = 60;
pub const SUPPLIER_COUNT: usize = 20;
pub const DOCUMENT_COUNT: usize = 5;

const LEGAL_NAMES: [&str; 10] = [
  "Empresa ABC S.A. de C.V.",
  "Comercial XYZ S.A.",
  "Servicios Tecnológicos S.C.",
  "Distribuidora Nacional S.A. de C.V.",
  "Grupo Industrial del Norte",
  "Consultoría Fiscal y Legal",
  "Manufacturas del Sur S.A.",
  "Logística Integral S.A. de C.V.",
  "Desarrollo de Software S.C.",
  "Construcciones Metropolitanas",
];

const TAX_IDS: [&str; 10] = [
  "ABC123456789",
  "XYZ987654321",
  "TEC456789012",
  "DIS789012345",
  "GIN012345678",
  "CFL345678901",
  "MAN678901234",
  "LOG901234567",
  "DSO234567890",
  "COM567890123",
];

const REASONS: [&str; 8] = [
  "Validación SAT exitosa",
  "RFC receptor no encontrado",
  "Concepto no coincide con clave SAT",
  "Impuestos calculados incorrectamente",
  "Fecha fuera de rango permitido",
  "UUID duplicado",
  "Total no coincide con sumas",
  "Sin incidencias detectadas",
];

const ALERT_TITLES: [&str; 6] = [
  "Validación SAT fallida",
  "Discrepancia en totales",
  "Concepto no alineado con actividad",
  "Proveedor con riesgo alto",
  "Documento faltante",
  "Vencimiento próximo",
];

const ASSIGNEES: [&str; 3] = ["Juan Pérez", "María González", "Carlos Rodríguez"];

const DOC_TYPES: [DocumentType; 4] = [
  DocumentType::Income,
  DocumentType::Expense,
  DocumentType::Transfer,
  DocumentType::Payment,
];

const CATEGORIES: [(AlertCategory, &str); 5] = [
  (AlertCategory::Validation, "validación"),
  (AlertCategory::Consistency, "consistencia"),
  (AlertCategory::Risk, "riesgo"),
  (AlertCategory::Expiration, "vencimiento"),
  (AlertCategory::Discrepancy, "discrepancia"),
];

const CONCEPT_MISMATCH: &str = "La clave SAT no corresponde al concepto descrito";
const RECOMMENDATION: &str =
  "Verificar con el proveedor y solicitar corrección del documento.";

/// `(kind, file name, days before now, analysis, corporate purpose, summary)`
type DocumentSeed = (
  LegalDocumentKind,
  &'static str,
  i64,
  AnalysisStatus,
  Option<&'static str>,
  Option<&'static str>,
);

const DOCUMENTS: [DocumentSeed; DOCUMENT_COUNT] = [
  (
    LegalDocumentKind::ArticlesOfIncorporation,
    "Acta_Constitutiva_2024.pdf",
    10,
    AnalysisStatus::Ready,
    Some(
      "Prestación de servicios de consultoría fiscal, asesoría legal y desarrollo de \
       software. Comercialización de productos tecnológicos.",
    ),
    Some(
      "Objeto social detectado: Servicios profesionales y tecnología. Actividades \
       principales: Consultoría, desarrollo de software, comercialización.",
    ),
  ),
  (
    LegalDocumentKind::ShareholderMeeting,
    "Acta_Asamblea_Extraordinaria_2024.pdf",
    5,
    AnalysisStatus::InProgress,
    None,
    None,
  ),
  (
    LegalDocumentKind::PowerOfAttorney,
    "Poder_Notarial_Representante_Legal.pdf",
    2,
    AnalysisStatus::Pending,
    None,
    None,
  ),
  (
    LegalDocumentKind::Other,
    "Constancia_Fiscal_2024.pdf",
    1,
    AnalysisStatus::Ready,
    None,
    Some("Constancia fiscal vigente hasta diciembre 2024."),
  ),
  (
    LegalDocumentKind::ArticlesOfIncorporation,
    "Modificacion_Acta_2023.pdf",
    20,
    AnalysisStatus::Ready,
    Some(
      "Modificación al objeto social para incluir actividades de comercio \
       electrónico y servicios de logística.",
    ),
    Some("Modificación detectada: Se agregaron actividades de e-commerce y logística."),
  ),
];

/// The collections of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureSet {
  pub issued_invoices:   Vec<IssuedInvoice>,
  pub received_invoices: Vec<ReceivedInvoice>,
  pub alerts:            Vec<Alert>,
  pub suppliers:         Vec<Supplier>,
  /// Missing from older snapshots.
  #[serde(default)]
  pub legal_documents:   Vec<LegalDocument>,
}

impl FixtureSet {
  /// Generate a full set. Invoices fall within the 30 days before `now`,
  /// alerts within the 60 days before it. Legal documents are fixed and only
  /// their upload times follow `now`.
  pub fn generate(seed: u64, now: DateTime<Utc>) -> Self {
    let mut rng = StdRng::seed_from_u64(seed);
    let issued_invoices = (0..ISSUED_COUNT).map(|i| issued(&mut rng, i, now)).collect();
    let received_invoices =
      (0..RECEIVED_COUNT).map(|i| received(&mut rng, i, now)).collect();
    let alerts = (0..ALERT_COUNT).map(|i| alert(&mut rng, i, now)).collect();
    let suppliers = (0..SUPPLIER_COUNT).map(|i| supplier(&mut rng, i)).collect();
    let legal_documents = DOCUMENTS
      .iter()
      .enumerate()
      .map(|(i, seed)| legal_document(i, seed, now))
      .collect();
    Self { issued_invoices, received_invoices, alerts, suppliers, legal_documents }
  }
}

// ─── Generators ──────────────────────────────────────────────────────────────

fn round_cents(amount: f64) -> f64 { (amount * 100.0).round() / 100.0 }

fn random_uuid(rng: &mut StdRng) -> Uuid {
  uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()
}

fn within_days(rng: &mut StdRng, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
  now - TimeDelta::seconds(rng.gen_range(0..days * 24 * 60 * 60))
}

fn counterparty(i: usize) -> Counterparty {
  Counterparty {
    tax_id:     TAX_IDS[i % TAX_IDS.len()].to_owned(),
    legal_name: LEGAL_NAMES[i % LEGAL_NAMES.len()].to_owned(),
  }
}

/// `(subtotal, tax, total)` for a gross amount at the 16% VAT split.
fn amounts(total: f64) -> (f64, f64, f64) {
  (round_cents(total * 0.84), round_cents(total * 0.16), round_cents(total))
}

fn issued(rng: &mut StdRng, i: usize, now: DateTime<Utc>) -> IssuedInvoice {
  let status = if i % 10 == 0 {
    ValidationStatus::Critical
  } else if i % 5 == 0 {
    ValidationStatus::Warn
  } else {
    ValidationStatus::Ok
  };
  let (subtotal, tax, total) = amounts(rng.gen_range(1_000.0..101_000.0));
  IssuedInvoice {
    id: format!("emit-{}", i + 1),
    uuid: random_uuid(rng),
    issued_at: within_days(rng, now, 30),
    customer: counterparty(i),
    subtotal,
    tax,
    total,
    status,
    reason: Some(REASONS[i % REASONS.len()].to_owned()),
    doc_type: DOC_TYPES[i % DOC_TYPES.len()],
  }
}

fn received(rng: &mut StdRng, i: usize, now: DateTime<Utc>) -> ReceivedInvoice {
  let status = if i % 12 == 0 {
    ValidationStatus::Critical
  } else if i % 6 == 0 {
    ValidationStatus::Warn
  } else {
    ValidationStatus::Ok
  };
  let risk = if i % 15 == 0 {
    RiskLevel::High
  } else if i % 8 == 0 {
    RiskLevel::Medium
  } else {
    RiskLevel::Low
  };
  let consistent = i % 7 != 0;
  let (subtotal, tax, total) = amounts(rng.gen_range(500.0..150_500.0));
  ReceivedInvoice {
    id: format!("rec-{}", i + 1),
    uuid: random_uuid(rng),
    received_at: within_days(rng, now, 30),
    supplier: counterparty(i),
    subtotal,
    tax,
    total,
    status,
    risk,
    doc_type: DOC_TYPES[i % DOC_TYPES.len()],
    concept_check: Some(ConceptCheck {
      consistent,
      explanation: (!consistent).then(|| CONCEPT_MISMATCH.to_owned()),
    }),
  }
}

fn alert(rng: &mut StdRng, i: usize, now: DateTime<Utc>) -> Alert {
  let severity = if i % 20 == 0 {
    Severity::Critical
  } else if i % 10 == 0 {
    Severity::High
  } else if i % 5 == 0 {
    Severity::Medium
  } else {
    Severity::Low
  };
  let state = if i % 15 == 0 {
    AlertState::Resolved
  } else if i % 8 == 0 {
    AlertState::InReview
  } else {
    AlertState::New
  };
  let (category, category_label) = CATEGORIES[i % CATEGORIES.len()];
  let on_invoice = i % 2 == 0;

  let related = if on_invoice {
    let short = random_uuid(rng).simple().to_string();
    RelatedEntity {
      kind: EntityKind::Invoice,
      id:   format!("emit-{}", i / 2 + 1),
      name: format!("CFDI {}", &short[..8]),
    }
  } else {
    RelatedEntity {
      kind: EntityKind::Supplier,
      id:   format!("prov-{}", i / 2 + 1),
      name: LEGAL_NAMES[i % LEGAL_NAMES.len()].to_owned(),
    }
  };

  Alert {
    id: format!("alert-{}", i + 1),
    severity,
    category,
    title: ALERT_TITLES[i % ALERT_TITLES.len()].to_owned(),
    description: format!(
      "Se detectó una {category_label} en el {} relacionado. Requiere revisión inmediata.",
      if on_invoice { "CFDI" } else { "proveedor" },
    ),
    raised_at: within_days(rng, now, 60),
    related,
    state,
    assignee: (state != AlertState::New).then(|| ASSIGNEES[i % ASSIGNEES.len()].to_owned()),
    evidence: Some(format!(
      "Fragmento XML: <Total>{}</Total>",
      rng.gen_range(0..=100_000u32)
    )),
    recommendation: Some(RECOMMENDATION.to_owned()),
  }
}

fn supplier(rng: &mut StdRng, i: usize) -> Supplier {
  let average_risk = if i % 8 == 0 {
    RiskLevel::High
  } else if i % 4 == 0 {
    RiskLevel::Medium
  } else {
    RiskLevel::Low
  };
  let alignment = match average_risk {
    RiskLevel::High => ValidationStatus::Critical,
    RiskLevel::Medium => ValidationStatus::Warn,
    RiskLevel::Low => ValidationStatus::Ok,
  };
  Supplier {
    id: format!("prov-{}", i + 1),
    tax_id: TAX_IDS[i % TAX_IDS.len()].to_owned(),
    legal_name: LEGAL_NAMES[i % LEGAL_NAMES.len()].to_owned(),
    invoice_volume: rng.gen_range(10..510),
    average_risk,
    open_alerts: rng.gen_range(0..15),
    recent_invoices: rng.gen_range(5..55),
    alignment,
    flagged_critical: average_risk == RiskLevel::High,
    trusted: average_risk == RiskLevel::Low && i % 3 == 0,
  }
}

fn legal_document(i: usize, seed: &DocumentSeed, now: DateTime<Utc>) -> LegalDocument {
  let &(kind, name, days_ago, analysis, purpose, summary) = seed;
  LegalDocument {
    id: format!("doc-{}", i + 1),
    kind,
    name: name.to_owned(),
    uploaded_at: now - TimeDelta::days(days_ago),
    analysis,
    corporate_purpose: purpose.map(str::to_owned),
    summary: summary.map(str::to_owned),
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap() }

  #[test]
  fn same_seed_same_set() {
    assert_eq!(FixtureSet::generate(7, now()), FixtureSet::generate(7, now()));
    assert_ne!(FixtureSet::generate(7, now()), FixtureSet::generate(8, now()));
  }

  #[test]
  fn collection_sizes() {
    let set = FixtureSet::generate(1, now());
    assert_eq!(set.issued_invoices.len(), ISSUED_COUNT);
    assert_eq!(set.received_invoices.len(), RECEIVED_COUNT);
    assert_eq!(set.alerts.len(), ALERT_COUNT);
    assert_eq!(set.suppliers.len(), SUPPLIER_COUNT);
    assert_eq!(set.legal_documents.len(), DOCUMENT_COUNT);
  }

  #[test]
  fn legal_documents_only_carry_purpose_when_ready() {
    let set = FixtureSet::generate(9, now());
    let ready: Vec<_> = set
      .legal_documents
      .iter()
      .filter(|d| d.is_editable())
      .map(|d| d.id.as_str())
      .collect();
    assert_eq!(ready, ["doc-1", "doc-4", "doc-5"]);
    for doc in &set.legal_documents {
      if doc.corporate_purpose.is_some() {
        assert!(doc.is_editable(), "{}", doc.id);
      }
    }
    assert_eq!(set.legal_documents[2].uploaded_at, now() - TimeDelta::days(2));
  }

  #[test]
  fn amounts_and_timestamps_stay_in_range() {
    let set = FixtureSet::generate(3, now());
    for inv in &set.issued_invoices {
      assert!((1_000.0..=101_000.0).contains(&inv.total), "{}", inv.total);
      assert!(inv.issued_at <= now());
      assert!(inv.issued_at >= now() - TimeDelta::days(30));
    }
    for inv in &set.received_invoices {
      assert!((500.0..=150_500.0).contains(&inv.total), "{}", inv.total);
    }
    for alert in &set.alerts {
      assert!(alert.raised_at >= now() - TimeDelta::days(60));
    }
  }

  #[test]
  fn index_patterns() {
    let set = FixtureSet::generate(5, now());
    let critical: Vec<_> = set
      .received_invoices
      .iter()
      .filter(|r| r.status == ValidationStatus::Critical)
      .map(|r| r.id.as_str())
      .collect();
    assert_eq!(critical, ["rec-1", "rec-13", "rec-25", "rec-37"]);

    // Unassigned exactly when new.
    for alert in &set.alerts {
      assert_eq!(alert.assignee.is_none(), alert.state == AlertState::New, "{}", alert.id);
    }
    assert_eq!(set.alerts[0].state, AlertState::Resolved);
    assert_eq!(set.alerts[0].related.kind, EntityKind::Invoice);
    assert!(set.alerts[0].related.name.starts_with("CFDI "));
    assert_eq!(set.alerts[1].related.id, "prov-1");

    let first = &set.suppliers[0];
    assert!(first.flagged_critical);
    assert_eq!(first.alignment, ValidationStatus::Critical);
    assert!(set.suppliers[3].trusted);
  }

  #[test]
  fn round_cents_keeps_two_decimals() {
    assert_eq!(round_cents(1234.5678), 1234.57);
    assert_eq!(round_cents(0.004), 0.0);
  }
}
