//! Order notification policy.
//!
//! Decides whether an order lookup must alert the store owner, and with
//! which message. The decision is a pure function of the normalized order;
//! dispatching the alert is the caller's job (see `domains::messaging`).

mod policy;

pub use policy::{NotificationDecision, OrderStatusRecord, decide};
