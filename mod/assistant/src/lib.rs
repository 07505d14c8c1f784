//! Assistant module — AI study-helper chat, proxied to Gemini.
//!
//! The frontend sends the running conversation; this module reshapes it
//! into a Gemini `generateContent` call and returns the reply text. With
//! no API key configured the endpoint still answers (with a canned
//! explanation) so the rest of the app keeps working in dev setups.

pub mod api;
pub mod gemini;
pub mod model;

use std::sync::Arc;

use axum::Router;

use careerdost_core::Module;

pub use gemini::{GeminiClient, GeminiConfig};

pub struct AssistantModule {
    client: Arc<GeminiClient>,
}

impl AssistantModule {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Arc::new(GeminiClient::new(config)),
        }
    }
}

impl Module for AssistantModule {
    fn name(&self) -> &str {
        "assistant"
    }

    fn routes(&self) -> Router {
        api::build_router(Arc::clone(&self.client))
    }
}
