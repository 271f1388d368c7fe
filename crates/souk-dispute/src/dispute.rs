//! # Dispute Lifecycle
//!
//! Manages a marketplace dispute from intake through arbitrator resolution,
//! with the status machine:
//!
//! ```text
//! OPEN ◀──reopen()──────▶ UNDER_REVIEW
//!   │                          │
//!   │  begin_review()          │
//!   │                          │
//!   └────────┬─────────────────┘
//!            │
//!        resolve() / automatic refund or release
//!            │
//!            ▼
//!   RESOLVED_BUYER | RESOLVED_SELLER   (terminal, irreversible)
//! ```
//!
//! ## Design Choice: Validated Enum over Typestate
//!
//! The status machine is a validated enum (runtime-checked) rather than a
//! typestate. Three factors drive this:
//!
//! 1. **Resolution from any non-terminal status.** Both `OPEN` and
//!    `UNDER_REVIEW` can resolve; typestate would duplicate `resolve()`
//!    across `impl` blocks with identical bodies.
//! 2. **Serialization frequency.** Disputes cross the wire to the
//!    marketplace backend on every committed transition, where the status
//!    is not known at compile time.
//! 3. **Per-transition validation.** Each operation checks its own
//!    preconditions and rejects with a structured [`DisputeError`] before
//!    mutating anything — a failed call leaves the record untouched.
//!
//! ## Append-Only Records
//!
//! `messages`, `internal_notes`, and `automation_log` are append-only.
//! Insertion order is chronological and load-bearing. Notes may be appended
//! even after resolution; messages and automation entries may not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use souk_core::{role_of, OrderId, OrderSummary, Participant, ParticipantId, ParticipantRole};

use crate::audit::{AutomationEventKind, AutomationLogEntry};
use crate::error::DisputeError;
use crate::message::{DisputeMessage, InternalNote};
use crate::sla::SlaPolicy;

/// Prefix marking the final arbitrator message as the binding decision.
pub const RESOLUTION_PREFIX: &str = "[RESOLUTION]";

// ---------------------------------------------------------------------------
// DisputeStatus
// ---------------------------------------------------------------------------

/// The lifecycle status of a dispute.
///
/// `Open` and `UnderReview` are non-terminal and may move between each other
/// during triage. The two `Resolved*` statuses are terminal and equivalent
/// in kind — they differ only in which party prevailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeStatus {
    /// Dispute has been opened and awaits arbitrator attention.
    Open,
    /// An arbitrator is actively reviewing the dispute.
    UnderReview,
    /// Resolved in favor of the buyer. Terminal.
    ResolvedBuyer,
    /// Resolved in favor of the seller. Terminal.
    ResolvedSeller,
}

impl DisputeStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::UnderReview => "UNDER_REVIEW",
            Self::ResolvedBuyer => "RESOLVED_BUYER",
            Self::ResolvedSeller => "RESOLVED_SELLER",
        }
    }

    /// Whether this status is terminal (no further transitions allowed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ResolvedBuyer | Self::ResolvedSeller)
    }

    /// Valid target statuses from this status.
    pub fn valid_transitions(&self) -> &'static [DisputeStatus] {
        match self {
            Self::Open => &[Self::UnderReview, Self::ResolvedBuyer, Self::ResolvedSeller],
            Self::UnderReview => &[Self::Open, Self::ResolvedBuyer, Self::ResolvedSeller],
            Self::ResolvedBuyer | Self::ResolvedSeller => &[],
        }
    }
}

impl std::fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DisputePriority
// ---------------------------------------------------------------------------

/// Arbitration priority. Higher priority means a shorter response window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputePriority {
    /// Low urgency.
    Low,
    /// Standard urgency. The default for new disputes.
    #[default]
    Normal,
    /// Requires prompt attention.
    Urgent,
}

impl DisputePriority {
    /// The canonical string name of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::Urgent => "URGENT",
        }
    }
}

impl std::fmt::Display for DisputePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EscalationTier
// ---------------------------------------------------------------------------

/// Escalation depth of the arbitration, from first-line support to
/// supervisor. Ordering follows escalation depth.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscalationTier {
    /// First-line arbitration. The default for new disputes.
    #[default]
    Level1,
    /// Senior arbitration.
    Level2,
    /// Supervisor review. Escalation caps here.
    Supervisor,
}

impl EscalationTier {
    /// The canonical string name of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Level1 => "LEVEL1",
            Self::Level2 => "LEVEL2",
            Self::Supervisor => "SUPERVISOR",
        }
    }

    /// The tier one level up, capped at [`Supervisor`](Self::Supervisor).
    pub fn escalated(self) -> Self {
        match self {
            Self::Level1 => Self::Level2,
            Self::Level2 | Self::Supervisor => Self::Supervisor,
        }
    }
}

impl std::fmt::Display for EscalationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AutoAction / PendingAutoAction
// ---------------------------------------------------------------------------

/// An automatic action taken when an arbitrator misses a response deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoAction {
    /// Raise the assigned tier one level (capped at supervisor) and reset
    /// the response clock.
    #[serde(rename = "AUTO_ESCALATE")]
    Escalate,
    /// Resolve in favor of the buyer.
    #[serde(rename = "AUTO_REFUND")]
    Refund,
    /// Resolve in favor of the seller.
    #[serde(rename = "AUTO_RELEASE")]
    Release,
}

impl AutoAction {
    /// The canonical string name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Escalate => "AUTO_ESCALATE",
            Self::Refund => "AUTO_REFUND",
            Self::Release => "AUTO_RELEASE",
        }
    }
}

impl std::fmt::Display for AutoAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An automatic action scheduled to fire if no qualifying human action
/// arrives before its deadline.
///
/// Existence of this record implies a firing deadline is set — the invariant
/// "a pending action always has a deadline" is structural, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAutoAction {
    /// The action that will fire.
    pub action: AutoAction,
    /// When the action becomes eligible to fire (UTC).
    pub fire_at: DateTime<Utc>,
}

impl PendingAutoAction {
    /// Whether the firing deadline has been reached.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.fire_at <= now
    }
}

// ---------------------------------------------------------------------------
// ResolutionOutcome
// ---------------------------------------------------------------------------

/// The party in whose favor a dispute is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionOutcome {
    /// The buyer prevails (refund).
    Buyer,
    /// The seller prevails (payment release).
    Seller,
}

impl ResolutionOutcome {
    /// The terminal status this outcome maps to.
    pub fn status(&self) -> DisputeStatus {
        match self {
            Self::Buyer => DisputeStatus::ResolvedBuyer,
            Self::Seller => DisputeStatus::ResolvedSeller,
        }
    }
}

// ---------------------------------------------------------------------------
// The Dispute
// ---------------------------------------------------------------------------

/// A dispute over a marketplace order, managed through the arbitration
/// lifecycle.
///
/// Created via [`Dispute::open`] when an order enters a disputed state.
/// Mutated only through the transition methods below, each of which
/// validates its preconditions before touching any field. Once a terminal
/// status is reached, the record persists unchanged as an audit trail
/// (internal notes excepted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispute {
    /// Read-only snapshot of the disputed order. The order's identifier is
    /// the dispute's identifier — one dispute per order, by construction.
    pub order: OrderSummary,
    /// The buyer party. Immutable for the dispute's lifetime.
    pub buyer: Participant,
    /// The seller party. Immutable for the dispute's lifetime.
    pub seller: Participant,
    /// Current lifecycle status.
    pub status: DisputeStatus,
    /// Arbitration priority. Freely mutable pre-resolution via triage.
    pub priority: DisputePriority,
    /// Escalation depth, raised by triage or automatic escalation.
    pub assigned_tier: EscalationTier,
    /// Conversation thread. Append-only, chronological.
    pub messages: Vec<DisputeMessage>,
    /// Arbitrator-only annotations. Append-only; appendable post-resolution.
    pub internal_notes: Vec<InternalNote>,
    /// System audit entries for automatic actions. Append-only.
    pub automation_log: Vec<AutomationLogEntry>,
    /// Deadline for the next arbitrator response; `None` = no active clock.
    pub response_sla_due_at: Option<DateTime<Utc>>,
    /// How many response deadlines have been missed. Never decreases.
    pub sla_breach_count: u32,
    /// The automatic action scheduled to fire absent human intervention.
    pub pending_auto_action: Option<PendingAutoAction>,
    /// When the dispute was opened (UTC).
    pub created_at: DateTime<Utc>,
    /// When the dispute was last mutated (UTC).
    pub updated_at: DateTime<Utc>,
    /// When the dispute reached a terminal status, if it has.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Dispute {
    /// Open a dispute over `order`, starting the first response clock.
    ///
    /// The dispute starts `OPEN` with default priority and tier; the buyer
    /// and seller identities are captured from the order snapshot.
    pub fn open(order: OrderSummary, sla: &SlaPolicy, now: DateTime<Utc>) -> Self {
        let priority = DisputePriority::default();
        let buyer = order.customer.clone();
        let seller = order.seller.clone();
        Self {
            order,
            buyer,
            seller,
            status: DisputeStatus::Open,
            priority,
            assigned_tier: EscalationTier::default(),
            messages: Vec::new(),
            internal_notes: Vec::new(),
            automation_log: Vec::new(),
            response_sla_due_at: Some(sla.due_after(priority, now)),
            sla_breach_count: 0,
            pending_auto_action: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }

    /// The dispute identifier — the disputed order's identifier.
    pub fn id(&self) -> &OrderId {
        &self.order.id
    }

    /// Derive the role of a message sender relative to this dispute.
    pub fn role_of(&self, sender: &ParticipantId) -> ParticipantRole {
        role_of(sender, &self.buyer, &self.seller)
    }

    /// Transition `OPEN` → `UNDER_REVIEW`.
    ///
    /// A qualifying human action: the response clock is recomputed and any
    /// pending automatic action is preempted.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::InvalidTransition`] if the dispute is not
    /// `OPEN`.
    pub fn begin_review(&mut self, sla: &SlaPolicy, now: DateTime<Utc>) -> Result<(), DisputeError> {
        self.require_status(DisputeStatus::Open, DisputeStatus::UnderReview)?;
        self.status = DisputeStatus::UnderReview;
        self.response_sla_due_at = Some(sla.due_after(self.priority, now));
        self.pending_auto_action = None;
        self.updated_at = now;
        Ok(())
    }

    /// Transition `UNDER_REVIEW` → `OPEN` (informal triage move).
    ///
    /// A qualifying human action: the response clock is recomputed and any
    /// pending automatic action is preempted.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::InvalidTransition`] if the dispute is not
    /// `UNDER_REVIEW`.
    pub fn reopen(&mut self, sla: &SlaPolicy, now: DateTime<Utc>) -> Result<(), DisputeError> {
        self.require_status(DisputeStatus::UnderReview, DisputeStatus::Open)?;
        self.status = DisputeStatus::Open;
        self.response_sla_due_at = Some(sla.due_after(self.priority, now));
        self.pending_auto_action = None;
        self.updated_at = now;
        Ok(())
    }

    /// Update priority and tier. Does not change the status, the response
    /// clock, or any pending automatic action.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::InvalidTransition`] if the dispute has
    /// reached a terminal status.
    pub fn triage(
        &mut self,
        priority: DisputePriority,
        tier: EscalationTier,
        now: DateTime<Utc>,
    ) -> Result<(), DisputeError> {
        if self.status.is_terminal() {
            return Err(DisputeError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: self.status.as_str().to_string(),
                reason: "triage is not permitted on a resolved dispute".to_string(),
            });
        }
        self.priority = priority;
        self.assigned_tier = tier;
        self.updated_at = now;
        Ok(())
    }

    /// Append a message to the conversation thread.
    ///
    /// If the sender is an arbitrator this is a qualifying response: the
    /// response clock restarts from `now` and any pending automatic action
    /// is preempted. Buyer and seller messages only append.
    ///
    /// Returns the derived sender role.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::DisputeResolved`] if the dispute has reached
    /// a terminal status.
    pub fn post_message(
        &mut self,
        message: DisputeMessage,
        sla: &SlaPolicy,
        now: DateTime<Utc>,
    ) -> Result<ParticipantRole, DisputeError> {
        if self.status.is_terminal() {
            return Err(DisputeError::DisputeResolved {
                dispute_id: self.id().to_string(),
                status: self.status.as_str().to_string(),
            });
        }
        let role = self.role_of(&message.sender_id);
        self.messages.push(message);
        if role == ParticipantRole::Arbitrator {
            self.response_sla_due_at = Some(sla.due_after(self.priority, now));
            self.pending_auto_action = None;
        }
        self.updated_at = now;
        Ok(role)
    }

    /// Append an internal note. Permitted in every status, including after
    /// resolution — notes are an audit trail, not part of the negotiation.
    pub fn add_note(
        &mut self,
        author: ParticipantId,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &InternalNote {
        self.internal_notes.push(InternalNote::new(author, text, now));
        self.updated_at = now;
        self.internal_notes
            .last()
            .unwrap_or_else(|| unreachable!("note was just appended"))
    }

    /// Resolve the dispute in favor of one party. Irreversible.
    ///
    /// Appends a final arbitrator message prefixed with
    /// [`RESOLUTION_PREFIX`], sets the terminal status, and clears the
    /// response clock and any pending automatic action. Validation happens
    /// before any field is touched — a rejected call leaves the dispute
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::AlreadyResolved`] if the dispute is already
    /// terminal, or [`DisputeError::MissingResolutionMessage`] if
    /// `decision_text` is empty or whitespace.
    pub fn resolve(
        &mut self,
        outcome: ResolutionOutcome,
        decision_text: &str,
        arbitrator: &Participant,
        now: DateTime<Utc>,
    ) -> Result<(), DisputeError> {
        if self.status.is_terminal() {
            return Err(DisputeError::AlreadyResolved {
                dispute_id: self.id().to_string(),
                status: self.status.as_str().to_string(),
            });
        }
        let decision_text = decision_text.trim();
        if decision_text.is_empty() {
            return Err(DisputeError::MissingResolutionMessage);
        }
        let message = DisputeMessage::new(
            arbitrator.id.clone(),
            arbitrator.name.clone(),
            None,
            Some(format!("{RESOLUTION_PREFIX} {decision_text}")),
            None,
            now,
        )?;
        self.messages.push(message);
        self.status = outcome.status();
        self.response_sla_due_at = None;
        self.pending_auto_action = None;
        self.resolved_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Record a missed response deadline and schedule the automatic action
    /// that will fire absent human intervention.
    ///
    /// Increments the breach counter exactly once per breach event: a breach
    /// with an action already pending is not re-counted, which the
    /// once-per-event contract relies on.
    ///
    /// # Errors
    ///
    /// Returns [`DisputeError::DisputeResolved`] on a terminal dispute, or
    /// [`DisputeError::InvalidTransition`] if an action is already pending.
    pub fn record_breach(
        &mut self,
        action: AutoAction,
        fire_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), DisputeError> {
        if self.status.is_terminal() {
            return Err(DisputeError::DisputeResolved {
                dispute_id: self.id().to_string(),
                status: self.status.as_str().to_string(),
            });
        }
        if self.pending_auto_action.is_some() {
            return Err(DisputeError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: self.status.as_str().to_string(),
                reason: "an automatic action is already scheduled".to_string(),
            });
        }
        self.sla_breach_count += 1;
        self.pending_auto_action = Some(PendingAutoAction { action, fire_at });
        self.automation_log.push(AutomationLogEntry::new(
            AutomationEventKind::ActionScheduled,
            format!(
                "response deadline missed (breach #{}); {} scheduled to fire at {}",
                self.sla_breach_count,
                action,
                fire_at.to_rfc3339(),
            ),
            now,
        ));
        self.updated_at = now;
        Ok(())
    }

    /// Fire the pending automatic action if its deadline has been reached.
    ///
    /// Returns the action that fired, or `None` when nothing was due. Firing
    /// against an already-terminal dispute is a silent no-op — no audit
    /// entry, no error — which guards the race between a sweep tick and a
    /// concurrent human resolution.
    ///
    /// `system` is the platform identity under which automatic resolution
    /// messages are posted.
    pub fn fire_auto_action(
        &mut self,
        sla: &SlaPolicy,
        system: &Participant,
        now: DateTime<Utc>,
    ) -> Option<AutoAction> {
        if self.status.is_terminal() {
            return None;
        }
        let pending = self.pending_auto_action?;
        if !pending.is_due(now) {
            return None;
        }
        self.pending_auto_action = None;
        match pending.action {
            AutoAction::Escalate => {
                self.assigned_tier = self.assigned_tier.escalated();
                self.response_sla_due_at = Some(sla.due_after(self.priority, now));
                self.automation_log.push(AutomationLogEntry::new(
                    AutomationEventKind::ActionExecuted,
                    format!(
                        "no response before the deadline; escalated to {} and restarted the response clock",
                        self.assigned_tier,
                    ),
                    now,
                ));
            }
            AutoAction::Refund => {
                self.conclude_automatically(
                    DisputeStatus::ResolvedBuyer,
                    format!(
                        "No arbitrator response was received within the required window. \
                         This dispute has been automatically resolved in favor of the buyer; \
                         a refund will be issued for order {}.",
                        self.id(),
                    ),
                    system,
                    now,
                );
            }
            AutoAction::Release => {
                self.conclude_automatically(
                    DisputeStatus::ResolvedSeller,
                    format!(
                        "No arbitrator response was received within the required window. \
                         This dispute has been automatically resolved in favor of the seller; \
                         payment for order {} has been released.",
                        self.id(),
                    ),
                    system,
                    now,
                );
            }
        }
        self.updated_at = now;
        Some(pending.action)
    }

    /// Terminal transition driven by the automation engine.
    fn conclude_automatically(
        &mut self,
        status: DisputeStatus,
        explanation: String,
        system: &Participant,
        now: DateTime<Utc>,
    ) {
        // The explanation text is never empty, so construction cannot fail.
        if let Ok(message) = DisputeMessage::new(
            system.id.clone(),
            system.name.clone(),
            None,
            Some(explanation),
            None,
            now,
        ) {
            self.messages.push(message);
        }
        self.automation_log.push(AutomationLogEntry::new(
            AutomationEventKind::ActionExecuted,
            format!("automatically resolved as {status}"),
            now,
        ));
        self.status = status;
        self.response_sla_due_at = None;
        self.resolved_at = Some(now);
    }

    /// Check that the dispute is in the expected status for a transition.
    fn require_status(
        &self,
        expected: DisputeStatus,
        target: DisputeStatus,
    ) -> Result<(), DisputeError> {
        if self.status != expected {
            return Err(DisputeError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: format!("expected status {}, got {}", expected, self.status),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------
