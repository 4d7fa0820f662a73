//! Per-kind filter forms.
//!
//! Each struct holds the raw values of one list view's filter form. Amounts
//! and dates stay as strings so malformed input can be ignored rather than
//! rejected; enums are typed, so an unknown token fails at the edge. The
//! structs deserialise from query strings and build a [`ClauseSet`].

use serde::{
  Deserialize, Deserializer, Serialize,
  de::{DeserializeOwned, IntoDeserializer, value::StrDeserializer},
};

use crate::{
  filter::{ClauseSet, parse_amount, parse_date_bound},
  record::{
    AlertCategory, AlertField, AlertState, AnalysisStatus, DocumentType,
    IssuedField, LegalDocumentField, LegalDocumentKind, ReceivedField, RiskLevel,
    Severity, SupplierField, ValidationStatus,
  },
};

/// Deserialise an optional enum field, reading a blank value as "not set".
///
/// HTML forms submit `status=` for an "all" option; that must not be
/// confused with an unknown token, which is still an error.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let raw = Option::<String>::deserialize(deserializer)?;
  match raw.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(token) => {
      let token: StrDeserializer<'_, D::Error> = token.into_deserializer();
      T::deserialize(token).map(Some)
    }
  }
}

/// Filter form of the issued-invoice list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuedInvoiceFilter {
  /// Free text over UUID, customer tax ID, customer name, and reason.
  pub query:      Option<String>,
  #[serde(deserialize_with = "blank_as_none")]
  pub status:     Option<ValidationStatus>,
  #[serde(deserialize_with = "blank_as_none")]
  pub doc_type:   Option<DocumentType>,
  pub from:       Option<String>,
  pub to:         Option<String>,
  pub amount_min: Option<String>,
  pub amount_max: Option<String>,
  /// Substring of the customer's tax ID or legal name.
  pub customer:   Option<String>,
}

impl IssuedInvoiceFilter {
  pub fn clauses(&self) -> ClauseSet<IssuedField> {
    ClauseSet::new()
      .search(self.query.as_deref())
      .equals(IssuedField::Status, self.status)
      .equals(IssuedField::DocType, self.doc_type)
      .date_range(
        IssuedField::IssuedAt,
        self.from.as_deref().and_then(parse_date_bound),
        self.to.as_deref().and_then(parse_date_bound),
      )
      .amount_range(
        IssuedField::Total,
        self.amount_min.as_deref().and_then(parse_amount),
        self.amount_max.as_deref().and_then(parse_amount),
      )
      .contains(
        &[IssuedField::CustomerTaxId, IssuedField::CustomerName],
        self.customer.as_deref(),
      )
  }
}

/// Filter form of the received-invoice list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceivedInvoiceFilter {
  /// Free text over UUID, supplier tax ID, and supplier name.
  pub query:      Option<String>,
  #[serde(deserialize_with = "blank_as_none")]
  pub status:     Option<ValidationStatus>,
  #[serde(deserialize_with = "blank_as_none")]
  pub doc_type:   Option<DocumentType>,
  #[serde(deserialize_with = "blank_as_none")]
  pub risk:       Option<RiskLevel>,
  pub from:       Option<String>,
  pub to:         Option<String>,
  pub amount_min: Option<String>,
  pub amount_max: Option<String>,
  /// Substring of the supplier's tax ID or legal name.
  pub supplier:   Option<String>,
}

impl ReceivedInvoiceFilter {
  pub fn clauses(&self) -> ClauseSet<ReceivedField> {
    ClauseSet::new()
      .search(self.query.as_deref())
      .equals(ReceivedField::Status, self.status)
      .equals(ReceivedField::DocType, self.doc_type)
      .equals(ReceivedField::Risk, self.risk)
      .date_range(
        ReceivedField::ReceivedAt,
        self.from.as_deref().and_then(parse_date_bound),
        self.to.as_deref().and_then(parse_date_bound),
      )
      .amount_range(
        ReceivedField::Total,
        self.amount_min.as_deref().and_then(parse_amount),
        self.amount_max.as_deref().and_then(parse_amount),
      )
      .contains(
        &[ReceivedField::SupplierTaxId, ReceivedField::SupplierName],
        self.supplier.as_deref(),
      )
  }
}

/// Filter form of the alert centre.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertFilter {
  /// Free text over title, description, and related entity name.
  pub query:    Option<String>,
  #[serde(deserialize_with = "blank_as_none")]
  pub severity: Option<Severity>,
  #[serde(deserialize_with = "blank_as_none")]
  pub category: Option<AlertCategory>,
  #[serde(deserialize_with = "blank_as_none")]
  pub state:    Option<AlertState>,
  pub assignee: Option<String>,
  pub from:     Option<String>,
  pub to:       Option<String>,
}

impl AlertFilter {
  pub fn clauses(&self) -> ClauseSet<AlertField> {
    ClauseSet::new()
      .search(self.query.as_deref())
      .equals(AlertField::Severity, self.severity)
      .equals(AlertField::Category, self.category)
      .equals(AlertField::State, self.state)
      .contains(&[AlertField::Assignee], self.assignee.as_deref())
      .date_range(
        AlertField::RaisedAt,
        self.from.as_deref().and_then(parse_date_bound),
        self.to.as_deref().and_then(parse_date_bound),
      )
  }
}

/// Filter form of the supplier list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierFilter {
  /// Free text over tax ID and legal name.
  pub query:     Option<String>,
  #[serde(deserialize_with = "blank_as_none")]
  pub risk:      Option<RiskLevel>,
  #[serde(deserialize_with = "blank_as_none")]
  pub alignment: Option<ValidationStatus>,
}

impl SupplierFilter {
  pub fn clauses(&self) -> ClauseSet<SupplierField> {
    ClauseSet::new()
      .search(self.query.as_deref())
      .equals(SupplierField::AverageRisk, self.risk)
      .equals(SupplierField::Alignment, self.alignment)
  }
}

/// Filter form of the legal-document list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalDocumentFilter {
  /// Free text over file name, corporate purpose, and summary.
  pub query:    Option<String>,
  #[serde(deserialize_with = "blank_as_none")]
  pub kind:     Option<LegalDocumentKind>,
  #[serde(deserialize_with = "blank_as_none")]
  pub analysis: Option<AnalysisStatus>,
}

impl LegalDocumentFilter {
  pub fn clauses(&self) -> ClauseSet<LegalDocumentField> {
    ClauseSet::new()
      .search(self.query.as_deref())
      .equals(LegalDocumentField::Kind, self.kind)
      .equals(LegalDocumentField::Analysis, self.analysis)
  }
}
