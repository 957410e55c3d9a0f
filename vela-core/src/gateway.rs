use async_trait::async_trait;
use serde_json::Value;

use crate::extract::ExtractedInfo;
use crate::lookup::LookupResult;

/// Upstream order directory.
///
/// Implementations convert every failure into a populated `LookupResult`
/// error instead of raising past this boundary.
#[async_trait]
pub trait OrderDirectory: Send + Sync {
    async fn find_order(&self, info: Option<&ExtractedInfo>) -> LookupResult;
}

/// Natural-language reply generation over an order-details payload.
///
/// `None` means composition failed; callers surface the reply as absent
/// rather than failing the request.
#[async_trait]
pub trait ReplyComposer: Send + Sync {
    async fn compose(&self, question: &str, order_details: &Value, requested_id: &str)
        -> Option<String>;
}
