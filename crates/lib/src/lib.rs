//! # Fault Diagnosis Core
//!
//! This crate provides the building blocks for a knowledge-grounded equipment
//! fault diagnosis pipeline: loading a fault-case knowledge base from a
//! published spreadsheet, validating user attachments, assembling a multimodal
//! prompt, calling a configurable AI provider, and splitting the completion
//! into an explanation and a control action.

pub mod attachment;
pub mod errors;
pub mod kb;
pub mod prompt;
pub mod providers;
pub mod split;

pub use attachment::{Attachment, ALLOWED_MEDIA_TYPES, MAX_ATTACHMENT_BYTES};
pub use errors::{FileError, KbError, ModelError};
pub use kb::KnowledgeBase;
pub use prompt::{build_prompt, PromptPart};
pub use split::{split_completion, Diagnosis};
