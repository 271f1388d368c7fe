//! # Dispute Messages and Internal Notes
//!
//! The two human-authored record streams on a dispute. Both are append-only:
//! entries are never edited, deleted, or reordered after being appended, and
//! insertion order is chronological — the conversation thread and the audit
//! trail both depend on it.
//!
//! Messages are visible to all parties; internal notes are arbitrator-only
//! annotations that are never shown to the buyer or seller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use souk_core::{MessageId, NoteId, ParticipantId};

use crate::error::DisputeError;

/// A message in a dispute's conversation thread.
///
/// Carries at least one of `text` / `image_url`, enforced at construction.
/// The sender's role (buyer, seller, arbitrator) is not stored — it is
/// derived from `sender_id` against the dispute's parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeMessage {
    /// Unique message identifier.
    pub id: MessageId,
    /// The sender's marketplace identifier.
    pub sender_id: ParticipantId,
    /// The sender's display name at send time.
    pub sender_name: String,
    /// Avatar URL for display, if the sender has one.
    pub sender_avatar: Option<String>,
    /// When the message was sent (UTC).
    pub sent_at: DateTime<Utc>,
    /// Message text, if any.
    pub text: Option<String>,
    /// Attached image URL, if any.
    pub image_url: Option<String>,
}

impl DisputeMessage {
    /// Create a message, validating that it carries content.
    ///
    /// Whitespace-only text is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::EmptyMessage`] if neither text nor an image
    /// is present.
    pub fn new(
        sender_id: ParticipantId,
        sender_name: impl Into<String>,
        sender_avatar: Option<String>,
        text: Option<String>,
        image_url: Option<String>,
        sent_at: DateTime<Utc>,
    ) -> Result<Self, DisputeError> {
        let text = text.filter(|t| !t.trim().is_empty());
        let image_url = image_url.filter(|u| !u.trim().is_empty());
        if text.is_none() && image_url.is_none() {
            return Err(DisputeError::EmptyMessage);
        }
        Ok(Self {
            id: MessageId::new(),
            sender_id,
            sender_name: sender_name.into(),
            sender_avatar,
            sent_at,
            text,
            image_url,
        })
    }
}

/// An arbitrator-only annotation on a dispute.
///
/// Notes form an internal audit trail and may be appended at any point in
/// the dispute's life, including after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalNote {
    /// Unique note identifier.
    pub id: NoteId,
    /// The staff member who wrote the note.
    pub author: ParticipantId,
    /// Note text.
    pub text: String,
    /// When the note was recorded (UTC).
    pub created_at: DateTime<Utc>,
}

impl InternalNote {
    /// Create a note with the given timestamp.
    pub fn new(author: ParticipantId, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::new(),
            author,
            text: text.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> ParticipantId {
        ParticipantId::new("buyer-1").unwrap()
    }

    #[test]
    fn message_with_text_only() {
        let msg = DisputeMessage::new(
            sender(),
            "Ayesha",
            None,
            Some("The item never arrived.".to_string()),
            None,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(msg.text.as_deref(), Some("The item never arrived."));
        assert!(msg.image_url.is_none());
    }

    #[test]
    fn message_with_image_only() {
        let msg = DisputeMessage::new(
            sender(),
            "Ayesha",
            None,
            None,
            Some("https://cdn.souk.example/p/123.jpg".to_string()),
            Utc::now(),
        )
        .unwrap();
        assert!(msg.text.is_none());
        assert!(msg.image_url.is_some());
    }

    #[test]
    fn message_rejects_no_content() {
        let result = DisputeMessage::new(sender(), "Ayesha", None, None, None, Utc::now());
        assert_eq!(result.unwrap_err(), DisputeError::EmptyMessage);
    }

    #[test]
    fn message_rejects_whitespace_text_without_image() {
        let result = DisputeMessage::new(
            sender(),
            "Ayesha",
            None,
            Some("   ".to_string()),
            None,
            Utc::now(),
        );
        assert_eq!(result.unwrap_err(), DisputeError::EmptyMessage);
    }

    #[test]
    fn whitespace_text_with_image_is_normalized_to_none() {
        let msg = DisputeMessage::new(
            sender(),
            "Ayesha",
            None,
            Some(" ".to_string()),
            Some("https://cdn.souk.example/p/1.jpg".to_string()),
            Utc::now(),
        )
        .unwrap();
        assert!(msg.text.is_none());
    }

    #[test]
    fn message_ids_are_unique() {
        let a = DisputeMessage::new(sender(), "A", None, Some("x".into()), None, Utc::now());
        let b = DisputeMessage::new(sender(), "A", None, Some("x".into()), None, Utc::now());
        assert_ne!(a.unwrap().id, b.unwrap().id);
    }

    #[test]
    fn message_serde_roundtrip() {
        let msg = DisputeMessage::new(
            sender(),
            "Ayesha",
            Some("https://cdn.souk.example/a/1.png".to_string()),
            Some("hello".to_string()),
            None,
            Utc::now(),
        )
        .unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        let back: DisputeMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn note_construction() {
        let note = InternalNote::new(
            ParticipantId::new("staff-1").unwrap(),
            "Buyer has two prior disputes with this seller.",
            Utc::now(),
        );
        assert!(note.text.contains("prior disputes"));
    }
}
