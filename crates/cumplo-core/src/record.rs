//! Record types for the compliance collections.
//!
//! Records are plain values. Once loaded, the only field a session may change
//! is the status (or workflow state) and, for suppliers, the two flags. Every
//! other field is fixed for the lifetime of the collection.

use std::{borrow::Cow, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Closed enums ────────────────────────────────────────────────────────────

/// Outcome of validating a CFDI; also used as a supplier's alignment light.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValidationStatus {
  Ok,
  Warn,
  Critical,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
}

/// CFDI voucher type (`Ingreso`, `Egreso`, `Traslado`, `Pago`).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentType {
  Income,
  Expense,
  Transfer,
  Payment,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
  Low,
  Medium,
  High,
  Critical,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertCategory {
  Validation,
  Consistency,
  Risk,
  Expiration,
  Discrepancy,
}

/// Human review workflow of an alert. `Resolved` is terminal.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertState {
  #[default]
  New,
  InReview,
  Resolved,
}

impl AlertState {
  pub fn is_terminal(self) -> bool { matches!(self, Self::Resolved) }
}

/// What an alert points at.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
  Invoice,
  Supplier,
  Document,
}

/// The two independent boolean markers a supplier carries.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SupplierFlag {
  Critical,
  Trusted,
}

/// Kind of corporate legal document kept on file.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LegalDocumentKind {
  /// Acta constitutiva.
  ArticlesOfIncorporation,
  /// Acta de asamblea.
  ShareholderMeeting,
  PowerOfAttorney,
  Other,
}

/// Progress of the automated reading of a legal document.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
  Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisStatus {
  #[default]
  Pending,
  InProgress,
  Ready,
}

/// Parse a snake_case token into one of the closed enums above.
///
/// `kind` names the enum in the resulting [`Error::UnknownVariant`].
pub fn parse_token<T: FromStr>(kind: &'static str, value: &str) -> Result<T> {
  value.parse().map_err(|_| Error::UnknownVariant {
    kind,
    value: value.to_owned(),
  })
}

// ─── Shared sub-types ────────────────────────────────────────────────────────

/// The other party of an invoice, identified by tax ID (RFC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
  pub tax_id:     String,
  pub legal_name: String,
}

/// Whether the invoice concept agrees with its SAT product key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptCheck {
  pub consistent:  bool,
  pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntity {
  pub kind: EntityKind,
  pub id:   String,
  /// Display name of the related entity.
  pub name: String,
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedInvoice {
  pub id:        String,
  pub uuid:      Uuid,
  pub issued_at: DateTime<Utc>,
  pub customer:  Counterparty,
  pub subtotal:  f64,
  pub tax:       f64,
  pub total:     f64,
  pub status:    ValidationStatus,
  pub reason:    Option<String>,
  pub doc_type:  DocumentType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedInvoice {
  pub id:            String,
  pub uuid:          Uuid,
  pub received_at:   DateTime<Utc>,
  pub supplier:      Counterparty,
  pub subtotal:      f64,
  pub tax:           f64,
  pub total:         f64,
  pub status:        ValidationStatus,
  pub risk:          RiskLevel,
  pub doc_type:      DocumentType,
  pub concept_check: Option<ConceptCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
  pub id:             String,
  pub severity:       Severity,
  pub category:       AlertCategory,
  pub title:          String,
  pub description:    String,
  pub raised_at:      DateTime<Utc>,
  pub related:        RelatedEntity,
  pub state:          AlertState,
  pub assignee:       Option<String>,
  pub evidence:       Option<String>,
  pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
  pub id:               String,
  pub tax_id:           String,
  pub legal_name:       String,
  pub invoice_volume:   u32,
  pub average_risk:     RiskLevel,
  pub open_alerts:      u32,
  pub recent_invoices:  u32,
  pub alignment:        ValidationStatus,
  pub flagged_critical: bool,
  pub trusted:          bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalDocument {
  pub id:                String,
  pub kind:              LegalDocumentKind,
  /// File name as uploaded.
  pub name:              String,
  pub uploaded_at:       DateTime<Utc>,
  pub analysis:          AnalysisStatus,
  /// Corporate purpose (objeto social) extracted from the document. The only
  /// free-text field a session may edit.
  pub corporate_purpose: Option<String>,
  pub summary:           Option<String>,
}

impl LegalDocument {
  /// The corporate purpose can be edited once analysis has finished.
  pub fn is_editable(&self) -> bool { self.analysis == AnalysisStatus::Ready }
}

// ─── Field access ────────────────────────────────────────────────────────────

/// A borrowed view of one record field, as seen by the filter engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
  Text(Cow<'a, str>),
  /// An optional text field that is not set on this record.
  Missing,
  /// The snake_case token of a closed enum.
  Token(&'static str),
  Instant(DateTime<Utc>),
  Amount(f64),
}

impl<'a> From<&'a str> for FieldValue<'a> {
  fn from(s: &'a str) -> Self { Self::Text(Cow::Borrowed(s)) }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
  fn from(s: Option<&'a str>) -> Self { s.map_or(Self::Missing, Self::from) }
}

/// A member of one of the record collections.
///
/// `Field` names the filterable fields of the record kind; `Status` is the
/// single enum field a session may replace.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
  type Field: Copy + Eq + fmt::Debug + Send + Sync + 'static;
  type Status: Copy + Eq + fmt::Debug + Send + Sync + 'static;

  /// Short name used in logs and error messages.
  const KIND: &'static str;
  /// Rows per page in list views.
  const PAGE_SIZE: usize;
  /// Fields consulted by the free-text search clause.
  const SEARCH_FIELDS: &'static [Self::Field];

  fn id(&self) -> &str;
  fn field(&self, field: Self::Field) -> FieldValue<'_>;
  fn status(&self) -> Self::Status;
  fn set_status(&mut self, status: Self::Status);

  /// Whether a transition to `next` takes effect. Rejected transitions are
  /// silently ignored by the mutation helpers.
  fn accepts(&self, next: Self::Status) -> bool {
    let _ = next;
    true
  }
}

/// A record carrying independent boolean flags.
pub trait Flagged: Record {
  type Flag: Copy + Eq + fmt::Debug + Send + Sync + 'static;

  fn flag(&self, flag: Self::Flag) -> bool;
  fn flag_mut(&mut self, flag: Self::Flag) -> &mut bool;
}

// ─── Issued invoices ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuedField {
  Uuid,
  CustomerTaxId,
  CustomerName,
  Reason,
  Status,
  DocType,
  IssuedAt,
  Total,
}

impl Record for IssuedInvoice {
  type Field = IssuedField;
  type Status = ValidationStatus;

  const KIND: &'static str = "issued_invoice";
  const PAGE_SIZE: usize = 10;
  const SEARCH_FIELDS: &'static [IssuedField] = &[
    IssuedField::Uuid,
    IssuedField::CustomerTaxId,
    IssuedField::CustomerName,
    IssuedField::Reason,
  ];

  fn id(&self) -> &str { &self.id }

  fn field(&self, field: IssuedField) -> FieldValue<'_> {
    match field {
      IssuedField::Uuid => FieldValue::Text(Cow::Owned(self.uuid.to_string())),
      IssuedField::CustomerTaxId => self.customer.tax_id.as_str().into(),
      IssuedField::CustomerName => self.customer.legal_name.as_str().into(),
      IssuedField::Reason => self.reason.as_deref().into(),
      IssuedField::Status => FieldValue::Token(self.status.into()),
      IssuedField::DocType => FieldValue::Token(self.doc_type.into()),
      IssuedField::IssuedAt => FieldValue::Instant(self.issued_at),
      IssuedField::Total => FieldValue::Amount(self.total),
    }
  }

  fn status(&self) -> ValidationStatus { self.status }

  fn set_status(&mut self, status: ValidationStatus) { self.status = status; }
}

// ─── Received invoices ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceivedField {
  Uuid,
  SupplierTaxId,
  SupplierName,
  Status,
  DocType,
  Risk,
  ReceivedAt,
  Total,
}

impl Record for ReceivedInvoice {
  type Field = ReceivedField;
  type Status = ValidationStatus;

  const KIND: &'static str = "received_invoice";
  const PAGE_SIZE: usize = 10;
  const SEARCH_FIELDS: &'static [ReceivedField] = &[
    ReceivedField::Uuid,
    ReceivedField::SupplierTaxId,
    ReceivedField::SupplierName,
  ];

  fn id(&self) -> &str { &self.id }

  fn field(&self, field: ReceivedField) -> FieldValue<'_> {
    match field {
      ReceivedField::Uuid => FieldValue::Text(Cow::Owned(self.uuid.to_string())),
      ReceivedField::SupplierTaxId => self.supplier.tax_id.as_str().into(),
      ReceivedField::SupplierName => self.supplier.legal_name.as_str().into(),
      ReceivedField::Status => FieldValue::Token(self.status.into()),
      ReceivedField::DocType => FieldValue::Token(self.doc_type.into()),
      ReceivedField::Risk => FieldValue::Token(self.risk.into()),
      ReceivedField::ReceivedAt => FieldValue::Instant(self.received_at),
      ReceivedField::Total => FieldValue::Amount(self.total),
    }
  }

  fn status(&self) -> ValidationStatus { self.status }

  fn set_status(&mut self, status: ValidationStatus) { self.status = status; }
}

// ─── Alerts ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertField {
  Title,
  Description,
  RelatedName,
  Severity,
  Category,
  State,
  Assignee,
  RaisedAt,
}

impl Record for Alert {
  type Field = AlertField;
  type Status = AlertState;

  const KIND: &'static str = "alert";
  const PAGE_SIZE: usize = 15;
  const SEARCH_FIELDS: &'static [AlertField] = &[
    AlertField::Title,
    AlertField::Description,
    AlertField::RelatedName,
  ];

  fn id(&self) -> &str { &self.id }

  fn field(&self, field: AlertField) -> FieldValue<'_> {
    match field {
      AlertField::Title => self.title.as_str().into(),
      AlertField::Description => self.description.as_str().into(),
      AlertField::RelatedName => self.related.name.as_str().into(),
      AlertField::Severity => FieldValue::Token(self.severity.into()),
      AlertField::Category => FieldValue::Token(self.category.into()),
      AlertField::State => FieldValue::Token(self.state.into()),
      AlertField::Assignee => self.assignee.as_deref().into(),
      AlertField::RaisedAt => FieldValue::Instant(self.raised_at),
    }
  }

  fn status(&self) -> AlertState { self.state }

  fn set_status(&mut self, state: AlertState) { self.state = state; }

  fn accepts(&self, next: AlertState) -> bool {
    !self.state.is_terminal() || next == self.state
  }
}

// ─── Suppliers ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierField {
  TaxId,
  LegalName,
  AverageRisk,
  Alignment,
}

impl Record for Supplier {
  type Field = SupplierField;
  type Status = ValidationStatus;

  const KIND: &'static str = "supplier";
  const PAGE_SIZE: usize = 10;
  const SEARCH_FIELDS: &'static [SupplierField] =
    &[SupplierField::TaxId, SupplierField::LegalName];

  fn id(&self) -> &str { &self.id }

  fn field(&self, field: SupplierField) -> FieldValue<'_> {
    match field {
      SupplierField::TaxId => self.tax_id.as_str().into(),
      SupplierField::LegalName => self.legal_name.as_str().into(),
      SupplierField::AverageRisk => FieldValue::Token(self.average_risk.into()),
      SupplierField::Alignment => FieldValue::Token(self.alignment.into()),
    }
  }

  fn status(&self) -> ValidationStatus { self.alignment }

  fn set_status(&mut self, alignment: ValidationStatus) {
    self.alignment = alignment;
  }
}

impl Flagged for Supplier {
  type Flag = SupplierFlag;

  fn flag(&self, flag: SupplierFlag) -> bool {
    match flag {
      SupplierFlag::Critical => self.flagged_critical,
      SupplierFlag::Trusted => self.trusted,
    }
  }

  fn flag_mut(&mut self, flag: SupplierFlag) -> &mut bool {
    match flag {
      SupplierFlag::Critical => &mut self.flagged_critical,
      SupplierFlag::Trusted => &mut self.trusted,
    }
  }
}

// ─── Legal documents ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalDocumentField {
  Name,
  Kind,
  Analysis,
  CorporatePurpose,
  Summary,
  UploadedAt,
}

impl Record for LegalDocument {
  type Field = LegalDocumentField;
  type Status = AnalysisStatus;

  const KIND: &'static str = "legal_document";
  const PAGE_SIZE: usize = 10;
  const SEARCH_FIELDS: &'static [LegalDocumentField] = &[
    LegalDocumentField::Name,
    LegalDocumentField::CorporatePurpose,
    LegalDocumentField::Summary,
  ];

  fn id(&self) -> &str { &self.id }

  fn field(&self, field: LegalDocumentField) -> FieldValue<'_> {
    match field {
      LegalDocumentField::Name => self.name.as_str().into(),
      LegalDocumentField::Kind => FieldValue::Token(self.kind.into()),
      LegalDocumentField::Analysis => FieldValue::Token(self.analysis.into()),
      LegalDocumentField::CorporatePurpose => self.corporate_purpose.as_deref().into(),
      LegalDocumentField::Summary => self.summary.as_deref().into(),
      LegalDocumentField::UploadedAt => FieldValue::Instant(self.uploaded_at),
    }
  }

  fn status(&self) -> AnalysisStatus { self.analysis }

  fn set_status(&mut self, analysis: AnalysisStatus) { self.analysis = analysis; }
}
