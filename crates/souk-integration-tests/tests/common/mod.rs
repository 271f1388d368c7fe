//! Shared fixtures for the cross-crate tests.
#![allow(dead_code)] // each test binary uses a subset of these fixtures

use chrono::{DateTime, Utc};

use souk_core::{OrderId, OrderLine, OrderSummary, Participant, ParticipantId};
use souk_dispute::{AutoActionPolicy, Dispute, SlaPolicy};

/// A dispute over a one-line order, opened at the given instant.
pub fn dispute_opened_at(order_id: &str, opened_at: DateTime<Utc>) -> Dispute {
    let order = OrderSummary {
        id: OrderId::new(order_id).unwrap(),
        customer: Participant::new(ParticipantId::new("buyer-1").unwrap(), "Ayesha"),
        seller: Participant::new(ParticipantId::new("seller-1").unwrap(), "Tarek"),
        lines: vec![OrderLine {
            title: "Vintage camera".to_string(),
            quantity: 1,
            unit_price_minor: 145_00,
        }],
        total_minor: 145_00,
        currency: "USD".to_string(),
    };
    Dispute::open(order, &SlaPolicy::default(), opened_at)
}

/// The arbitrator identity used across tests.
pub fn arbitrator() -> Participant {
    Participant::new(ParticipantId::new("staff-7").unwrap(), "Noor")
}

/// The platform identity automatic messages are posted under.
pub fn system_identity() -> Participant {
    Participant::new(
        ParticipantId::new("souk-automation").unwrap(),
        "Souk arbitration desk",
    )
}

/// A sweep engine with default policies.
pub fn engine() -> souk_automation::SweepEngine {
    souk_automation::SweepEngine::new(
        SlaPolicy::default(),
        AutoActionPolicy::default(),
        system_identity(),
    )
}
