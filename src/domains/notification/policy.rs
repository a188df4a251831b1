use serde::Serialize;

use crate::domains::normalizer::{NOT_AVAILABLE, Record, display_value, lookup};

/// Statuses that always alert the owner, compared case-insensitively.
const FAILED_STATUSES: [&str; 3] = ["canceled", "gagal", "error"];

/// Normalized result of an order lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatusRecord {
    pub order_id: String,
    pub status: String,
    pub provider: String,
    pub product: String,
    pub message: Option<String>,
}

impl OrderStatusRecord {
    /// Build from a normalized order record.
    pub fn from_record(order_id: impl Into<String>, record: &Record) -> Self {
        let text = |key: &str| {
            record
                .get(key)
                .map(display_value)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        let raw = serde_json::Value::Object(record.clone());

        Self {
            order_id: order_id.into(),
            status: text("status"),
            provider: text("provider"),
            product: text("product"),
            message: lookup(&raw, &["message"]).map(display_value),
        }
    }
}

/// Whether to alert the owner, and what to say.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationDecision {
    pub should_notify: bool,
    /// Present exactly when `should_notify` is true.
    pub message: Option<String>,
}

impl NotificationDecision {
    fn notify(message: String) -> Self {
        Self {
            should_notify: true,
            message: Some(message),
        }
    }

    fn skip() -> Self {
        Self::default()
    }
}

/// Apply the order alert rules.
///
/// 1. Manual-provider orders still `Processing` (exact, case-sensitive match)
///    need the owner to act.
/// 2. Otherwise, a canceled or failed status (case-insensitive) is reported
///    as an error.
/// 3. Anything else is silent.
///
/// Rule 1 is checked first and wins.
pub fn decide(record: &OrderStatusRecord) -> NotificationDecision {
    if record.provider == "Manual" && record.status == "Processing" {
        return NotificationDecision::notify(format!(
            "Pesanan manual:\nOrder ID: {}\nProduk: {}\nStatus: {}",
            record.order_id, record.product, record.status
        ));
    }

    let status = record.status.to_lowercase();
    if FAILED_STATUSES.contains(&status.as_str()) {
        return NotificationDecision::notify(format!(
            "Pesanan error:\nOrder ID: {}\nStatus: {}",
            record.order_id, record.status
        ));
    }

    NotificationDecision::skip()
}
