//! # Participants and Role Derivation
//!
//! A [`Participant`] is the identity of one side of a disputed order. The
//! buyer and seller identities are captured when the dispute opens and are
//! immutable for its lifetime.
//!
//! ## Role Derivation
//!
//! The role of a message sender is never stored. [`role_of`] derives it by
//! comparing the sender identifier against the dispute's buyer and seller:
//! a sender matching neither is platform staff (an arbitrator). Storing the
//! role redundantly could drift from the identifiers if a party were ever
//! reassigned.

use serde::{Deserialize, Serialize};

use crate::identity::ParticipantId;

/// A party to a disputed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The participant's marketplace identifier.
    pub id: ParticipantId,
    /// Display name at the time the dispute opened.
    pub name: String,
}

impl Participant {
    /// Create a participant identity.
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The role a message sender plays within a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    /// The customer who opened the disputed order.
    Buyer,
    /// The merchant who fulfilled the disputed order.
    Seller,
    /// Platform staff reviewing the dispute.
    Arbitrator,
}

impl ParticipantRole {
    /// The canonical string name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "BUYER",
            Self::Seller => "SELLER",
            Self::Arbitrator => "ARBITRATOR",
        }
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the role of `sender` relative to a dispute's buyer and seller.
///
/// A sender matching neither party is an arbitrator. This is a pure function
/// of the three identifiers; the result is never persisted.
pub fn role_of(
    sender: &ParticipantId,
    buyer: &Participant,
    seller: &Participant,
) -> ParticipantRole {
    if *sender == buyer.id {
        ParticipantRole::Buyer
    } else if *sender == seller.id {
        ParticipantRole::Seller
    } else {
        ParticipantRole::Arbitrator
    }
}
