pub mod gemini;

use crate::errors::ModelError;
use crate::prompt::PromptPart;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a generative-model provider.
///
/// This defines a common interface for sending an assembled multimodal
/// prompt to a hosted model and retrieving the raw text completion.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends the ordered content parts as one generation request and returns
    /// the trimmed text of the first completion candidate.
    async fn complete(&self, parts: &[PromptPart]) -> Result<String, ModelError>;
}

dyn_clone::clone_trait_object!(AiProvider);
