//! Read-only aggregates computed across collections: the dashboard summary
//! and the supplier profile.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::{
  Alert, AlertState, IssuedInvoice, ReceivedInvoice, Severity, Supplier,
  ValidationStatus,
};

/// Number of unresolved alerts listed on the dashboard.
pub const RECENT_ALERTS: usize = 5;
/// Number of received invoices listed on a supplier profile.
pub const PROFILE_INVOICES: usize = 5;

// ─── Dashboard ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
  pub as_of:                DateTime<Utc>,
  pub issued_today:         usize,
  pub received_today:       usize,
  /// Critical alerts that are not yet resolved.
  pub open_critical_alerts: usize,
  /// Share of invoices (both kinds) with status `ok`, rounded; 100 when there
  /// are no invoices.
  pub clean_percentage:     u8,
  /// Newest unresolved alerts first.
  pub recent_alerts:        Vec<Alert>,
}

impl DashboardSummary {
  pub fn compute(
    issued: &[IssuedInvoice],
    received: &[ReceivedInvoice],
    alerts: &[Alert],
    now: DateTime<Utc>,
  ) -> Self {
    let midnight = now
      .date_naive()
      .and_hms_opt(0, 0, 0)
      .map(|naive| naive.and_utc())
      .unwrap_or(now);

    let issued_today = issued.iter().filter(|i| i.issued_at >= midnight).count();
    let received_today = received.iter().filter(|r| r.received_at >= midnight).count();

    let open_critical_alerts = alerts
      .iter()
      .filter(|a| a.severity == Severity::Critical && a.state != AlertState::Resolved)
      .count();

    let total = issued.len() + received.len();
    let clean = issued.iter().filter(|i| i.status == ValidationStatus::Ok).count()
      + received.iter().filter(|r| r.status == ValidationStatus::Ok).count();
    let clean_percentage = if total == 0 {
      100
    } else {
      ((clean as f64 / total as f64) * 100.0).round() as u8
    };

    let mut recent_alerts: Vec<Alert> = alerts
      .iter()
      .filter(|a| a.state != AlertState::Resolved)
      .cloned()
      .collect();
    recent_alerts.sort_by(|a, b| b.raised_at.cmp(&a.raised_at));
    recent_alerts.truncate(RECENT_ALERTS);

    Self {
      as_of: now,
      issued_today,
      received_today,
      open_critical_alerts,
      clean_percentage,
      recent_alerts,
    }
  }
}

// ─── Supplier profile ────────────────────────────────────────────────────────

/// A supplier together with its most relevant received invoices, joined on
/// tax ID.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierProfile {
  pub supplier:        Supplier,
  pub recent_invoices: Vec<ReceivedInvoice>,
}

impl SupplierProfile {
  /// `None` when no supplier has `tax_id`.
  pub fn lookup(
    suppliers: &[Supplier],
    received: &[ReceivedInvoice],
    tax_id: &str,
  ) -> Option<Self> {
    let supplier = suppliers.iter().find(|s| s.tax_id == tax_id)?.clone();
    let recent_invoices = received
      .iter()
      .filter(|r| r.supplier.tax_id == tax_id)
      .take(PROFILE_INVOICES)
      .cloned()
      .collect();
    Some(Self { supplier, recent_invoices })
  }
}
