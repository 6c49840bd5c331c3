//! # Application State
//!
//! The shared, read-only application state built once at startup: the
//! configuration, the knowledge-base source, and the instantiated AI
//! provider client. Nothing in here is mutated after `build_app_state`
//! returns, so handlers need no locking discipline.

use crate::config::Config;
use fixrag::{providers::ai::gemini::GeminiProvider, providers::ai::AiProvider, KnowledgeBase};
use std::sync::Arc;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// The fault-case knowledge base source, refetched per request.
    pub knowledge_base: KnowledgeBase,
    /// The generative-model provider client.
    pub ai_provider: Arc<dyn AiProvider>,
}

/// Builds the shared application state from the configuration.
pub fn build_app_state(config: Config) -> anyhow::Result<AppState> {
    let mut builder = reqwest::Client::builder();
    if let Some(proxy_url) = &config.proxy_url {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
    }
    // One client shared by both outbound concerns. The knowledge-base fetch
    // applies its own per-request timeout; the model call relies on the
    // provider's defaults.
    let client = builder.build()?;

    let knowledge_base = KnowledgeBase::new(client.clone(), &config.kb_url)?;
    let ai_provider = GeminiProvider::new(client, config.api_url.clone(), config.api_key.clone());

    Ok(AppState {
        config: Arc::new(config),
        knowledge_base,
        ai_provider: Arc::new(ai_provider),
    })
}
