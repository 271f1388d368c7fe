//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the arbitration
//! backend. Each identifier is a distinct type — you cannot pass a
//! [`ParticipantId`] where an [`OrderId`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`OrderId`], [`ParticipantId`]) are minted by
//! the marketplace backend and treated as opaque here: validated for shape
//! (non-empty, at most 128 characters after trimming) at construction time.
//! UUID-based identifiers ([`MessageId`], [`NoteId`], [`AutomationEntryId`])
//! are always valid by construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum length for externally-owned string identifiers.
const MAX_ID_LEN: usize = 128;

fn validate_id(raw: String, kind: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim().to_string();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyIdentifier { kind });
    }
    if trimmed.len() > MAX_ID_LEN {
        return Err(ValidationError::IdentifierTooLong {
            kind,
            max: MAX_ID_LEN,
            len: trimmed.len(),
        });
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// The identifier of a marketplace order.
///
/// Disputes are keyed by the disputed order's identifier — one dispute per
/// order, enforced by construction: a dispute cannot exist without the order
/// whose identifier it shares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a validated order identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the identifier is empty after trimming
    /// or exceeds 128 characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(validate_id(raw.into(), "order")?))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identifier of a marketplace participant (buyer, seller, or platform
/// staff member).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a validated participant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the identifier is empty after trimming
    /// or exceeds 128 characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(validate_id(raw.into(), "participant")?))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for a dispute message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Create a new random message identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a message identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for an internal arbitrator note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new random note identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a note identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for an automation audit-log entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AutomationEntryId(Uuid);

impl AutomationEntryId {
    /// Create a new random audit-entry identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an audit-entry identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AutomationEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AutomationEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
