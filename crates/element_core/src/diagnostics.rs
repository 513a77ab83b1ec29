//! Process-wide advisory diagnostics log read by external agent tooling.
//!
//! Validation findings are advisory, not blocking: rendering always completes
//! and produces a usable (if imperfect) element, so nothing in this module
//! panics or returns errors. Entries accumulate until an explicit [`reset`];
//! external tooling is responsible for periodic clearing.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::time::next_monotonic_timestamp_ms;

/// Stable finding codes emitted by validation helpers and components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// An enumerated attribute carried a value outside its allowed set.
    InvalidAttributeValue,
    /// The element exposes no accessible label through any expected attribute.
    MissingLabel,
    /// A required attribute was absent at render time.
    MissingRequiredAttribute,
    /// The rendered structure violated a component's own structural contract.
    InvalidStructure,
}

impl DiagnosticCode {
    /// Returns the stable kebab-case token for the code.
    pub fn token(&self) -> &'static str {
        match self {
            Self::InvalidAttributeValue => "invalid-attribute-value",
            Self::MissingLabel => "missing-label",
            Self::MissingRequiredAttribute => "missing-required-attribute",
            Self::InvalidStructure => "invalid-structure",
        }
    }
}

/// One validation finding, in append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    /// Finding code.
    pub code: DiagnosticCode,
    /// Tag of the component that produced the finding.
    pub component: String,
    /// Human-readable description.
    pub message: String,
    /// Monotonic unix millisecond timestamp assigned at append time.
    pub timestamp_ms: u64,
}

thread_local! {
    static LOG: RefCell<Vec<DiagnosticEntry>> = const { RefCell::new(Vec::new()) };
}

/// Appends a finding to the process-wide log. Never panics, never blocks.
pub fn log_error(code: DiagnosticCode, component: &str, message: &str) {
    let entry = DiagnosticEntry {
        code,
        component: component.to_string(),
        message: message.to_string(),
        timestamp_ms: next_monotonic_timestamp_ms(),
    };
    LOG.with(|log| log.borrow_mut().push(entry));
}

/// Returns a snapshot of every finding recorded since the last [`reset`].
pub fn get_all() -> Vec<DiagnosticEntry> {
    LOG.with(|log| log.borrow().clone())
}

/// Clears the log. External tooling calls this after draining findings.
pub fn reset() {
    LOG.with(|log| log.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_grows_by_one_per_call() {
        reset();
        log_error(DiagnosticCode::MissingLabel, "ui-badge", "no label");
        assert_eq!(get_all().len(), 1);
        log_error(DiagnosticCode::InvalidAttributeValue, "ui-badge", "bad variant");
        assert_eq!(get_all().len(), 2);
    }

    #[test]
    fn entries_keep_append_order_and_fields() {
        reset();
        log_error(DiagnosticCode::MissingRequiredAttribute, "ui-toggle", "first");
        log_error(DiagnosticCode::MissingLabel, "ui-badge", "second");

        let entries = get_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].component, "ui-toggle");
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].code, DiagnosticCode::MissingLabel);
        assert!(entries[0].timestamp_ms < entries[1].timestamp_ms);
    }

    #[test]
    fn reset_clears_everything() {
        log_error(DiagnosticCode::InvalidStructure, "ui-x", "finding");
        reset();
        assert!(get_all().is_empty());
    }

    #[test]
    fn arbitrary_inputs_never_panic() {
        reset();
        log_error(DiagnosticCode::MissingLabel, "", "");
        log_error(DiagnosticCode::MissingLabel, "not a tag \u{0}", "weird \u{fffd} text");
        assert_eq!(get_all().len(), 2);
    }

    #[test]
    fn codes_serialize_as_kebab_tokens() {
        let json = serde_json::to_string(&DiagnosticCode::InvalidAttributeValue).expect("serialize");
        assert_eq!(json, "\"invalid-attribute-value\"");
        assert_eq!(DiagnosticCode::InvalidAttributeValue.token(), "invalid-attribute-value");
    }
}
