//! # Automation Audit Log
//!
//! System-generated audit entries recording every automatic action the
//! escalation engine takes on a dispute. The log is append-only: entries are
//! never edited or deleted, and a resolved dispute accepts no further
//! entries beyond the one recording its own automatic resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use souk_core::AutomationEntryId;

// ---------------------------------------------------------------------------
// AutomationEventKind
// ---------------------------------------------------------------------------

/// The kind of automation event an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationEventKind {
    /// A missed response deadline was recorded and an automatic action
    /// was scheduled.
    ActionScheduled,
    /// A scheduled automatic action fired.
    ActionExecuted,
}

impl AutomationEventKind {
    /// Return the string value for serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionScheduled => "action_scheduled",
            Self::ActionExecuted => "action_executed",
        }
    }
}

impl std::fmt::Display for AutomationEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AutomationLogEntry
// ---------------------------------------------------------------------------

/// A single entry in a dispute's automation audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationLogEntry {
    /// Unique entry identifier.
    pub id: AutomationEntryId,
    /// The kind of event recorded.
    pub kind: AutomationEventKind,
    /// Human-readable description of what the system did.
    pub message: String,
    /// When the event occurred (UTC).
    pub recorded_at: DateTime<Utc>,
}

impl AutomationLogEntry {
    /// Create an audit entry with the given timestamp.
    pub fn new(
        kind: AutomationEventKind,
        message: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AutomationEntryId::new(),
            kind,
            message: message.into(),
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_construction() {
        let entry = AutomationLogEntry::new(
            AutomationEventKind::ActionScheduled,
            "response deadline missed; AUTO_ESCALATE scheduled",
            Utc::now(),
        );
        assert_eq!(entry.kind, AutomationEventKind::ActionScheduled);
        assert!(entry.message.contains("AUTO_ESCALATE"));
    }

    #[test]
    fn entry_ids_are_unique() {
        let a = AutomationLogEntry::new(AutomationEventKind::ActionExecuted, "x", Utc::now());
        let b = AutomationLogEntry::new(AutomationEventKind::ActionExecuted, "x", Utc::now());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn kind_display_all_variants() {
        assert_eq!(
            AutomationEventKind::ActionScheduled.to_string(),
            "action_scheduled"
        );
        assert_eq!(
            AutomationEventKind::ActionExecuted.to_string(),
            "action_executed"
        );
    }

    #[test]
    fn entry_serde_roundtrip() {
        let entry = AutomationLogEntry::new(
            AutomationEventKind::ActionExecuted,
            "escalated to LEVEL2",
            Utc::now(),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: AutomationLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn kind_serde_snake_case() {
        let json = serde_json::to_string(&AutomationEventKind::ActionScheduled).unwrap();
        assert_eq!(json, "\"action_scheduled\"");
    }
}
