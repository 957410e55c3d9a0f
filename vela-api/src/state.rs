use std::sync::Arc;

use vela_core::extract::OrderIdExtractor;
use vela_core::gateway::{OrderDirectory, ReplyComposer};

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<OrderIdExtractor>,
    pub orders: Arc<dyn OrderDirectory>,
    pub composer: Arc<dyn ReplyComposer>,
}
