use std::sync::Arc;

use crate::embedding::MultiTierEmbedder;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct HandlerState {
    pub embedder: Arc<MultiTierEmbedder>,
}

impl HandlerState {
    pub fn new(embedder: Arc<MultiTierEmbedder>) -> Self {
        Self { embedder }
    }
}
