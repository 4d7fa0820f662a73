//! Display tokens for enum values, independent of any renderer.

use serde::Serialize;

use crate::record::{AlertState, AnalysisStatus, RiskLevel, Severity, ValidationStatus};

/// Colour family a front-end should use for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
  Success,
  Warning,
  Critical,
  Secondary,
  Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayToken {
  pub tone:  Tone,
  pub label: &'static str,
}

/// Values that render as a badge.
pub trait Badge {
  fn badge(&self) -> DisplayToken;
}

pub fn badge_for<T: Badge>(value: T) -> DisplayToken { value.badge() }

impl Badge for ValidationStatus {
  fn badge(&self) -> DisplayToken {
    match self {
      Self::Ok => DisplayToken { tone: Tone::Success, label: "OK" },
      Self::Warn => DisplayToken { tone: Tone::Warning, label: "Warn" },
      Self::Critical => DisplayToken { tone: Tone::Critical, label: "Critical" },
    }
  }
}

impl Badge for RiskLevel {
  fn badge(&self) -> DisplayToken {
    match self {
      Self::Low => DisplayToken { tone: Tone::Success, label: "LOW" },
      Self::Medium => DisplayToken { tone: Tone::Warning, label: "MEDIUM" },
      Self::High => DisplayToken { tone: Tone::Critical, label: "HIGH" },
    }
  }
}

impl Badge for Severity {
  fn badge(&self) -> DisplayToken {
    match self {
      Self::Critical => DisplayToken { tone: Tone::Critical, label: "CRITICAL" },
      Self::High => DisplayToken { tone: Tone::Warning, label: "HIGH" },
      Self::Medium => DisplayToken { tone: Tone::Secondary, label: "MEDIUM" },
      Self::Low => DisplayToken { tone: Tone::Secondary, label: "LOW" },
    }
  }
}

impl Badge for AlertState {
  fn badge(&self) -> DisplayToken {
    match self {
      Self::New => DisplayToken { tone: Tone::Info, label: "New" },
      Self::InReview => DisplayToken { tone: Tone::Warning, label: "In review" },
      Self::Resolved => DisplayToken { tone: Tone::Success, label: "Resolved" },
    }
  }
}

impl Badge for AnalysisStatus {
  fn badge(&self) -> DisplayToken {
    match self {
      Self::Pending => DisplayToken { tone: Tone::Secondary, label: "Pending" },
      Self::InProgress => DisplayToken { tone: Tone::Warning, label: "In progress" },
      Self::Ready => DisplayToken { tone: Tone::Success, label: "Ready" },
    }
  }
}
