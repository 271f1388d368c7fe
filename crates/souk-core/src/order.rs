//! # Order Snapshots
//!
//! Read-only snapshot of the order a dispute concerns. The order subsystem
//! owns this data; the arbitration backend captures it at dispute-open time
//! and never mutates it. Monetary amounts are integer minor units (cents)
//! with an ISO 4217 currency code — floating point never represents money.

use serde::{Deserialize, Serialize};

use crate::identity::OrderId;
use crate::participant::Participant;

/// A single line item within a disputed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Listing title at purchase time.
    pub title: String,
    /// Quantity purchased.
    pub quantity: u32,
    /// Unit price in minor currency units.
    pub unit_price_minor: i64,
}

/// Read-only snapshot of the order under dispute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// The order identifier. Doubles as the dispute identifier.
    pub id: OrderId,
    /// The customer who placed the order.
    pub customer: Participant,
    /// The merchant who fulfilled the order.
    pub seller: Participant,
    /// Line items at purchase time.
    pub lines: Vec<OrderLine>,
    /// Order total in minor currency units.
    pub total_minor: i64,
    /// ISO 4217 currency code (e.g., "USD").
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ParticipantId;

    fn sample_order() -> OrderSummary {
        OrderSummary {
            id: OrderId::new("ord-1001").unwrap(),
            customer: Participant::new(ParticipantId::new("buyer-1").unwrap(), "Ayesha"),
            seller: Participant::new(ParticipantId::new("seller-1").unwrap(), "Tarek"),
            lines: vec![OrderLine {
                title: "Vintage camera".to_string(),
                quantity: 1,
                unit_price_minor: 145_00,
            }],
            total_minor: 145_00,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn order_serde_roundtrip() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: OrderSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn order_total_is_minor_units() {
        let order = sample_order();
        assert_eq!(order.total_minor, 14500);
        assert_eq!(order.currency, "USD");
    }
}
