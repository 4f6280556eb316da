// src/verifier/result.rs
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Outcome of a single deploy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// The body carried one of the marker strings.
    Found,
    /// 200 without a marker. Holds the leading characters of the body.
    LoadedUnknown(String),
    NotFound(u16),
    /// No complete response was received.
    TransportError(String),
}

impl CheckResult {
    pub fn is_found(&self) -> bool {
        matches!(self, CheckResult::Found)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Found => write!(f, "Goodbye page is deployed"),
            CheckResult::LoadedUnknown(_) => {
                write!(f, "Page loaded but no marker string was found")
            }
            CheckResult::NotFound(status) => {
                write!(f, "Goodbye page not found (HTTP {})", status)
            }
            CheckResult::TransportError(message) => write!(f, "Request failed: {}", message),
        }
    }
}

/// A [`CheckResult`] together with what was observed on the wire.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub url: String,
    pub status: Option<u16>,
    pub headers: Vec<(String, String)>,
    pub result: CheckResult,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl CheckReport {
    pub fn response_time_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}
