#![deny(missing_docs)]

//! # souk-core — Foundational Types for the Souk Arbitration Backend
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `thiserror`,
//! and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`ParticipantId`] where an [`OrderId`]
//!    is expected.
//!
//! 2. **Externally-owned identifiers are opaque validated strings.** Order
//!    and participant identifiers are minted by the marketplace backend; this
//!    layer validates shape (non-empty, bounded length) and never interprets
//!    them.
//!
//! 3. **Sender role is derived, never stored.** [`role_of`] computes the
//!    role of a message sender by comparing identifiers against the dispute's
//!    buyer and seller. Persisting the role redundantly would let it drift if
//!    a party were ever reassigned.

pub mod error;
pub mod identity;
pub mod order;
pub mod participant;

// Re-export primary types at crate root for ergonomic imports.
pub use error::ValidationError;
pub use identity::{AutomationEntryId, MessageId, NoteId, OrderId, ParticipantId};
pub use order::{OrderLine, OrderSummary};
pub use participant::{role_of, Participant, ParticipantRole};
