//! Order status lookup with owner alerts.
//!
//! Looks an order up on the store API and, when the notification policy
//! says so, alerts the owner over WhatsApp. The alert is fire-and-forget:
//! its failure is logged and never fails the lookup.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::core::client::ApiClient;
use crate::domains::normalizer::{Fallback, Field, RecordShape, is_truthy, normalize_single};
use crate::domains::notification::{NotificationDecision, OrderStatusRecord, decide};
use crate::domains::tools::{ToolContext, ToolDefinition, ToolError, ToolResult};

const ORDER: RecordShape = RecordShape {
    kind: "order",
    fields: &[
        Field::at("status", &["status"]),
        Field::at("provider", &["provider"]),
        Field::at("product", &["product"]),
        Field::at("message", &["keterangan"]).or(Fallback::Null),
    ],
    line: "Order *{product}* berstatus *{status}* (provider: {provider})",
};

/// Parameters for the order status tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OrderStatusParams {
    /// Order (invoice) id.
    #[schemars(description = "Order ID to look up")]
    pub order_id: String,
}

/// Order status tool.
pub struct OrderStatusTool;

impl OrderStatusTool {
    /// Dispatch the alert if one is due. Returns whether one was attempted.
    async fn notify_owner(ctx: &ToolContext, decision: &NotificationDecision) -> bool {
        let Some(message) = decision.message.as_deref() else {
            return false;
        };

        let owner = &ctx.config.messaging.owner_number;
        info!("Notifying owner {}", owner);
        match ctx.messenger.send_text(owner, message).await {
            Ok(_) => {}
            Err(e) if e.is_not_configured() => {
                warn!("Owner notification not sent: {}", e);
            }
            Err(e) => warn!("Owner notification failed: {}", e),
        }
        true
    }
}

#[async_trait]
impl ToolDefinition for OrderStatusTool {
    const NAME: &'static str = "check_order_status";

    const DESCRIPTION: &'static str = "Check the status of a store order by order ID. Alerts the store owner over WhatsApp when a manual order is waiting or an order has failed.";

    type Params = OrderStatusParams;

    fn connect_failure(_ctx: &ToolContext) -> String {
        "Gagal konek ke API".to_string()
    }

    #[instrument(skip_all, fields(order_id = %params.order_id))]
    async fn run(params: OrderStatusParams, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        let order_id = params.order_id.trim();
        info!("Order status tool called for: {}", order_id);

        if order_id.is_empty() {
            return Err(ToolError::validation("Order ID tidak boleh kosong."));
        }

        let store = &ctx.config.store;
        let url = ApiClient::endpoint(&store.order_api_url, order_id)?;
        let payload = ctx.client.get_json(url.as_str(), store.timeout()).await?;

        if !payload.get("success").is_some_and(is_truthy) {
            return Err(ToolError::not_found(format!(
                "Order ID {} tidak ditemukan.",
                order_id
            )));
        }

        let normalized = normalize_single(&payload, &ORDER);
        let order = OrderStatusRecord::from_record(order_id, &normalized.record);
        let decision = decide(&order);
        let notified_owner = Self::notify_owner(ctx, &decision).await;

        Ok(ToolResult::success(
            normalized.line,
            json!({
                "order_id": order.order_id,
                "status": order.status,
                "provider": order.provider,
                "product": order.product,
                "message": order.message,
                "notified_owner": notified_owner,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{RecordingMessenger, config_for, context, context_with};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn order_api(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/payment/INV-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    fn params() -> OrderStatusParams {
        OrderStatusParams {
            order_id: "INV-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_manual_processing_notifies_owner_once() {
        let server = order_api(json!({
            "success": true,
            "status": "Processing",
            "provider": "Manual",
            "product": "X",
            "keterangan": "y"
        }))
        .await;
        let messenger = Arc::new(RecordingMessenger::default());
        let ctx = context_with(config_for(&server.uri()), messenger.clone());

        let result = OrderStatusTool::execute(params(), &ctx).await;

        assert!(result.success);
        assert!(result.summary.contains('X'));
        assert!(result.summary.contains("Processing"));
        let data = result.data.unwrap();
        assert_eq!(data["notified_owner"], true);
        assert_eq!(data["message"], "y");

        let sent = messenger.texts();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "6280000");
        assert!(sent[0].1.starts_with("Pesanan manual:\nOrder ID: INV-1"));
    }

    #[tokio::test]
    async fn test_completed_order_is_silent() {
        let server = order_api(json!({
            "success": true,
            "status": "Completed",
            "provider": "Auto",
            "product": "Diamond"
        }))
        .await;
        let messenger = Arc::new(RecordingMessenger::default());
        let ctx = context_with(config_for(&server.uri()), messenger.clone());

        let result = OrderStatusTool::execute(params(), &ctx).await;

        assert!(result.success);
        assert_eq!(
            result.summary,
            "Order *Diamond* berstatus *Completed* (provider: Auto)"
        );
        assert_eq!(result.data.unwrap()["notified_owner"], false);
        assert!(messenger.texts().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_does_not_notify() {
        let server = order_api(json!({"success": false})).await;
        let messenger = Arc::new(RecordingMessenger::default());
        let ctx = context_with(config_for(&server.uri()), messenger.clone());

        let result = OrderStatusTool::execute(params(), &ctx).await;

        assert!(!result.success);
        assert_eq!(result.summary, "Order ID INV-1 tidak ditemukan.");
        assert!(result.error.is_none());
        assert!(result.data.is_none());
        assert!(messenger.texts().is_empty());
    }

    #[tokio::test]
    async fn test_notification_failure_is_swallowed() {
        let server = order_api(json!({
            "success": true,
            "status": "Gagal",
            "provider": "Auto",
            "product": "X"
        }))
        .await;
        let messenger = Arc::new(RecordingMessenger::failing());
        let ctx = context_with(config_for(&server.uri()), messenger.clone());

        let result = OrderStatusTool::execute(params(), &ctx).await;

        assert!(result.success);
        assert_eq!(result.data.unwrap()["notified_owner"], true);
        assert_eq!(messenger.texts().len(), 1);
    }

    #[tokio::test]
    async fn test_alert_goes_through_gateway() {
        let server = order_api(json!({
            "success": true,
            "status": "error",
            "provider": "Auto",
            "product": "X"
        }))
        .await;
        Mock::given(method("POST"))
            .and(path("/send-message"))
            .and(body_partial_json(json!({
                "api_key": "test-key",
                "number": "6280000",
                "message": "Pesanan error:\nOrder ID: INV-1\nStatus: error"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(config_for(&server.uri()));
        let result = OrderStatusTool::execute(params(), &ctx).await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_sends_nothing() {
        let server = order_api(json!({
            "success": true,
            "status": "Gagal",
            "provider": "Auto",
            "product": "X"
        }))
        .await;
        Mock::given(method("POST"))
            .and(path("/send-message"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let mut config = config_for(&server.uri());
        config.messaging.api_key = None;
        let ctx = context(config);

        let result = OrderStatusTool::execute(params(), &ctx).await;

        assert!(result.success);
        assert_eq!(result.data.unwrap()["notified_owner"], true);
    }

    #[tokio::test]
    async fn test_timeout_is_a_single_failed_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true}))
                    .set_delay(Duration::from_secs(2)),
            )
            .expect(1)
            .mount(&server)
            .await;
        let messenger = Arc::new(RecordingMessenger::default());
        let ctx = context_with(config_for(&server.uri()), messenger.clone());

        let result = OrderStatusTool::execute(params(), &ctx).await;

        assert!(!result.success);
        assert_eq!(result.summary, "Gagal konek ke API");
        assert!(!result.error.unwrap_or_default().is_empty());
        assert!(messenger.texts().is_empty());
    }

    #[tokio::test]
    async fn test_blank_order_id_is_rejected() {
        let ctx = context(config_for("http://127.0.0.1:9"));
        let result = OrderStatusTool::execute(
            OrderStatusParams {
                order_id: "  ".to_string(),
            },
            &ctx,
        )
        .await;
        assert!(!result.success);
        assert!(result.error.is_none());
    }
}
