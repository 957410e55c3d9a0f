use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use vela_core::lookup::LookupError;
use vela_shared::models::OrderRecord;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProcessTextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    pub extracted_info: Value,
    pub order_found: bool,
    pub order_details: Option<OrderRecord>,
    pub natural_response: Option<String>,
    pub error: Option<LookupError>,
}

/// Reply used when no order number can be pulled out of the text.
const CLARIFICATION_PROMPT: &str = "I couldn't find an order number in your message. \
Could you please provide the order number you're inquiring about?";

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/process-customer-text", post(process_customer_text))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/process-customer-text
/// Extract an order id from customer text, look the order up, phrase a reply.
async fn process_customer_text(
    State(state): State<AppState>,
    Json(req): Json<ProcessTextRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    // 1. Require inbound text
    let text = match req.text.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => return Err(AppError::BadRequest("No text provided".to_string())),
    };

    tracing::info!(text = %text, "processing customer text");

    // 2. Extract the candidate order id
    let info = state.extractor.extract(text);
    tracing::debug!(extracted = ?info, "extracted order info");

    let Some(info) = info else {
        // Short-circuit: ask the customer for an order number. No upstream
        // call of any kind is attempted on this path.
        return Ok(Json(ApiResponse {
            success: true,
            extracted_info: json!({}),
            order_found: false,
            order_details: None,
            natural_response: Some(CLARIFICATION_PROMPT.to_string()),
            error: Some(LookupError {
                message: "No order number found in text".to_string(),
                search_criteria: None,
            }),
        }));
    };

    // 3. Look the order up
    let lookup = state.orders.find_order(Some(&info)).await;
    tracing::info!(order_found = lookup.order.is_some(), "order lookup finished");

    let order_details = lookup.order.as_ref().map(OrderRecord::from);

    // 4. Always compose, even when the lookup failed, so the customer gets
    //    an explanation instead of a bare error
    let details_payload = match &order_details {
        Some(record) => serde_json::to_value(record)?,
        None => json!({ "error": "Order not found" }),
    };
    let natural_response = state
        .composer
        .compose(text, &details_payload, &info.order_id)
        .await;

    // 5. Assemble the response; lookup misses still return 200
    Ok(Json(ApiResponse {
        success: true,
        extracted_info: serde_json::to_value(&info)?,
        order_found: order_details.is_some(),
        order_details,
        natural_response,
        error: lookup.error,
    }))
}
