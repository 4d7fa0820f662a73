//! The filter engine: clause sets evaluated against record collections.
//!
//! A [`ClauseSet`] is an ordered list of predicates combined with AND. Clauses
//! carrying an empty value (an empty query, an absent enum, two absent bounds)
//! are no-ops, so a clause set built straight from a half-filled form filters
//! only on what the user actually entered. Filtering never reorders records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::record::{FieldValue, Record};

// ─── Clauses ─────────────────────────────────────────────────────────────────

/// One predicate over records whose filterable fields are named by `F`.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause<F> {
  /// Case-insensitive substring over the record kind's search fields; any
  /// field may match.
  Search(String),
  /// Exact match of an enum field against its snake_case token.
  Equals { field: F, token: &'static str },
  /// Case-insensitive substring over `fields`; any field may match.
  Contains { fields: Vec<F>, needle: String },
  /// Inclusive instant bounds; either may be absent.
  DateRange {
    field: F,
    from:  Option<DateTime<Utc>>,
    to:    Option<DateTime<Utc>>,
  },
  /// Inclusive numeric bounds; either may be absent.
  AmountRange {
    field: F,
    min:   Option<f64>,
    max:   Option<f64>,
  },
}

impl<F: Copy> Clause<F> {
  /// `true` when the clause constrains nothing.
  pub fn is_noop(&self) -> bool {
    match self {
      Self::Search(query) => query.is_empty(),
      Self::Equals { .. } => false,
      Self::Contains { fields, needle } => needle.is_empty() || fields.is_empty(),
      Self::DateRange { from, to, .. } => from.is_none() && to.is_none(),
      Self::AmountRange { min, max, .. } => min.is_none() && max.is_none(),
    }
  }

  pub fn matches<R>(&self, record: &R) -> bool
  where
    R: Record<Field = F>,
  {
    if self.is_noop() {
      return true;
    }
    match self {
      Self::Search(query) => {
        contains_any(record, R::SEARCH_FIELDS.iter().copied(), query)
      }
      Self::Equals { field, token } => {
        matches!(record.field(*field), FieldValue::Token(t) if t == *token)
      }
      Self::Contains { fields, needle } => {
        contains_any(record, fields.iter().copied(), needle)
      }
      Self::DateRange { field, from, to } => match record.field(*field) {
        FieldValue::Instant(at) => {
          from.is_none_or(|from| at >= from) && to.is_none_or(|to| at <= to)
        }
        _ => false,
      },
      Self::AmountRange { field, min, max } => match record.field(*field) {
        FieldValue::Amount(amount) => {
          min.is_none_or(|min| amount >= min) && max.is_none_or(|max| amount <= max)
        }
        _ => false,
      },
    }
  }
}

fn contains_any<R: Record>(
  record: &R,
  fields: impl IntoIterator<Item = R::Field>,
  needle: &str,
) -> bool {
  let needle = needle.to_lowercase();
  fields.into_iter().any(|field| match record.field(field) {
    FieldValue::Text(text) => text.to_lowercase().contains(&needle),
    _ => false,
  })
}

// ─── Clause sets ─────────────────────────────────────────────────────────────

/// An ordered set of clauses, built fluently. Builder methods drop empty
/// input instead of recording a no-op clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseSet<F> {
  clauses: Vec<Clause<F>>,
}

impl<F> Default for ClauseSet<F> {
  fn default() -> Self { Self { clauses: Vec::new() } }
}

impl<F: Copy> ClauseSet<F> {
  pub fn new() -> Self { Self::default() }

  /// Append a clause as-is, no-op or not.
  pub fn push(&mut self, clause: Clause<F>) { self.clauses.push(clause); }

  pub fn search(mut self, query: Option<&str>) -> Self {
    if let Some(query) = query.filter(|q| !q.is_empty()) {
      self.clauses.push(Clause::Search(query.to_owned()));
    }
    self
  }

  pub fn equals<T: Into<&'static str>>(mut self, field: F, value: Option<T>) -> Self {
    if let Some(value) = value {
      self.clauses.push(Clause::Equals { field, token: value.into() });
    }
    self
  }

  pub fn contains(mut self, fields: &[F], needle: Option<&str>) -> Self {
    if let Some(needle) = needle.filter(|n| !n.is_empty()) {
      self.clauses.push(Clause::Contains {
        fields: fields.to_vec(),
        needle: needle.to_owned(),
      });
    }
    self
  }

  pub fn date_range(
    mut self,
    field: F,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
  ) -> Self {
    if from.is_some() || to.is_some() {
      self.clauses.push(Clause::DateRange { field, from, to });
    }
    self
  }

  pub fn amount_range(mut self, field: F, min: Option<f64>, max: Option<f64>) -> Self {
    if min.is_some() || max.is_some() {
      self.clauses.push(Clause::AmountRange { field, min, max });
    }
    self
  }

  pub fn clauses(&self) -> &[Clause<F>] { &self.clauses }

  /// `true` when no clause constrains anything.
  pub fn is_empty(&self) -> bool { self.clauses.iter().all(Clause::is_noop) }

  pub fn matches<R>(&self, record: &R) -> bool
  where
    R: Record<Field = F>,
  {
    self.clauses.iter().all(|clause| clause.matches(record))
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Return the records matching every clause, in source order.
pub fn filter<'a, R: Record>(
  records: &'a [R],
  clauses: &ClauseSet<R::Field>,
) -> Vec<&'a R> {
  records.iter().filter(|r| clauses.matches(*r)).collect()
}

/// Owned variant of [`filter`], used by store backends.
pub fn filter_owned<R: Record>(records: Vec<R>, clauses: &ClauseSet<R::Field>) -> Vec<R> {
  records.into_iter().filter(|r| clauses.matches(r)).collect()
}

// ─── Form input ──────────────────────────────────────────────────────────────

/// Parse an amount bound typed by a user. Blank, malformed, and non-finite
/// input yields `None`, which means "no bound".
pub fn parse_amount(input: &str) -> Option<f64> {
  input
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|amount| amount.is_finite())
}

/// Parse a date bound typed by a user.
///
/// Accepts an RFC 3339 instant, a naive `YYYY-MM-DDTHH:MM:SS` (read as UTC),
/// or a bare `YYYY-MM-DD` (midnight UTC). Anything else yields `None`.
pub fn parse_date_bound(input: &str) -> Option<DateTime<Utc>> {
  let input = input.trim();
  if input.is_empty() {
    return None;
  }
  if let Ok(at) = DateTime::parse_from_rfc3339(input) {
    return Some(at.with_timezone(&Utc));
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
    return Some(naive.and_utc());
  }
  NaiveDate::parse_from_str(input, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use uuid::Uuid;

  use super::*;
  use crate::record::{
    Counterparty, DocumentType, IssuedField, IssuedInvoice, ValidationStatus,
  };

  fn invoice(n: usize, total: f64, status: ValidationStatus) -> IssuedInvoice {
    IssuedInvoice {
      id:        format!("emit-{n}"),
      uuid:      Uuid::from_u128(n as u128),
      issued_at: Utc.with_ymd_and_hms(2024, 3, n as u32 % 28 + 1, 12, 0, 0).unwrap(),
      customer:  Counterparty {
        tax_id:     format!("RFC{n:03}"),
        legal_name: if n % 2 == 0 { "Comercial XYZ S.A.".into() } else { "Grupo Norte".into() },
      },
      subtotal:  total * 0.84,
      tax:       total * 0.16,
      total,
      status,
      reason:    (n % 3 == 0).then(|| "Total no coincide".to_owned()),
      doc_type:  DocumentType::Income,
    }
  }

  fn sample() -> Vec<IssuedInvoice> {
    (1..=20)
      .map(|n| {
        let status = if n % 5 == 0 { ValidationStatus::Critical } else { ValidationStatus::Ok };
        invoice(n, n as f64 * 1000.0, status)
      })
      .collect()
  }

  #[test]
  fn empty_clause_set_is_identity() {
    let records = sample();
    let clauses = ClauseSet::new()
      .search(Some(""))
      .contains(&[IssuedField::CustomerName], Some(""))
      .date_range(IssuedField::IssuedAt, None, None)
      .amount_range(IssuedField::Total, None, None);
    assert!(clauses.is_empty());

    let out = filter(&records, &clauses);
    assert_eq!(out.len(), records.len());
    assert!(out.iter().zip(&records).all(|(a, b)| a.id == b.id));
  }

  #[test]
  fn pushed_noop_clauses_match_everything() {
    let records = sample();
    let mut clauses = ClauseSet::new();
    clauses.push(Clause::Search(String::new()));
    clauses.push(Clause::AmountRange { field: IssuedField::Total, min: None, max: None });
    assert!(clauses.is_empty());
    assert_eq!(filter(&records, &clauses).len(), records.len());
  }

  #[test]
  fn search_is_case_insensitive_over_any_search_field() {
    let records = sample();
    let by_name = ClauseSet::new().search(Some("comercial xyz"));
    assert_eq!(filter(&records, &by_name).len(), 10);

    let by_reason = ClauseSet::new().search(Some("NO COINCIDE"));
    let out = filter(&records, &by_reason);
    assert_eq!(out.len(), 6);
    assert!(out.iter().all(|r| r.reason.is_some()));

    let needle = Uuid::from_u128(7).to_string().to_uppercase();
    let by_uuid = ClauseSet::new().search(Some(needle.as_str()));
    assert_eq!(filter(&records, &by_uuid)[0].id, "emit-7");
  }

  #[test]
  fn equals_keeps_order_and_only_matching_status() {
    let records = sample();
    let clauses = ClauseSet::new().equals(IssuedField::Status, Some(ValidationStatus::Critical));
    let out = filter(&records, &clauses);
    let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["emit-5", "emit-10", "emit-15", "emit-20"]);
  }

  #[test]
  fn amount_bounds_are_inclusive() {
    let records = sample();
    let clauses = ClauseSet::new().amount_range(IssuedField::Total, Some(3000.0), Some(5000.0));
    let ids: Vec<_> = filter(&records, &clauses).iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, ["emit-3", "emit-4", "emit-5"]);
  }

  #[test]
  fn lower_amount_only_applies_no_upper_bound() {
    let records = sample();
    let clauses = ClauseSet::new().amount_range(
      IssuedField::Total,
      parse_amount("15000"),
      parse_amount(""),
    );
    let out = filter(&records, &clauses);
    assert_eq!(out.len(), 6);
    assert!(out.iter().all(|r| r.total >= 15000.0));
  }

  #[test]
  fn date_bounds_are_inclusive() {
    let records = sample();
    let from = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    let clauses = ClauseSet::new().date_range(IssuedField::IssuedAt, Some(from), Some(to));
    let ids: Vec<_> = filter(&records, &clauses).iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, ["emit-2", "emit-3", "emit-4"]);
  }

  #[test]
  fn clauses_combine_with_and() {
    let records = sample();
    let clauses = ClauseSet::new()
      .contains(&[IssuedField::CustomerTaxId, IssuedField::CustomerName], Some("xyz"))
      .equals(IssuedField::Status, Some(ValidationStatus::Critical));
    let ids: Vec<_> = filter(&records, &clauses).iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, ["emit-10", "emit-20"]);
  }

  #[test]
  fn filtering_twice_is_idempotent() {
    let records = sample();
    let clauses = ClauseSet::new().search(Some("grupo"));
    let once: Vec<IssuedInvoice> = filter(&records, &clauses).into_iter().cloned().collect();
    let twice: Vec<IssuedInvoice> = filter(&once, &clauses).into_iter().cloned().collect();
    assert_eq!(once, twice);
  }

  #[test]
  fn no_match_is_empty_not_error() {
    let records = sample();
    let clauses = ClauseSet::new().search(Some("does not exist"));
    assert!(filter(&records, &clauses).is_empty());
  }

  #[test]
  fn malformed_amounts_mean_no_bound() {
    assert_eq!(parse_amount(" 100000 "), Some(100000.0));
    assert_eq!(parse_amount("12.5"), Some(12.5));
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("NaN"), None);
    assert_eq!(parse_amount("inf"), None);
  }

  #[test]
  fn date_bounds_accept_three_shapes() {
    let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_date_bound("2024-03-01"), Some(midnight));
    assert_eq!(
      parse_date_bound("2024-03-01T08:30:00"),
      Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()),
    );
    assert_eq!(
      parse_date_bound("2024-03-01T08:30:00-06:00"),
      Some(Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap()),
    );
    assert_eq!(parse_date_bound("yesterday"), None);
    assert_eq!(parse_date_bound(""), None);
  }
}
