//! Domain event payloads and their routing keys.
//!
//! The same structs serve as HTTP request bodies and as broker payloads, so
//! what a caller posts is exactly what a consumer reads back.

use serde::{Deserialize, Serialize};

pub const ORDER_CREATED: &str = "order.created";
pub const PAYMENT_SUCCESS: &str = "payment.success";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub order_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub payment_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn order_event_round_trips_through_json() {
        let event = OrderEvent { order_id: 123 };

        let bytes = serde_json::to_vec(&event).unwrap();
        assert_eq!(bytes, br#"{"order_id":123}"#);

        let back: OrderEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn payment_event_round_trips_through_json() {
        let event = PaymentEvent { payment_id: 999 };

        let back: PaymentEvent =
            serde_json::from_slice(&serde_json::to_vec(&event).unwrap()).unwrap();
        assert_eq!(back, event);
    }
}
