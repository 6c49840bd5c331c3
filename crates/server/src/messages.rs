//! # User-Facing Error Messages
//!
//! The stable `error` strings returned in failure bodies, externalized into
//! one table keyed by error kind. Shipping another locale means shipping
//! another `Messages` value, not different handler code.

/// The message table for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub missing_field: &'static str,
    pub attachment_too_large: &'static str,
    pub attachment_unsupported_type: &'static str,
    pub kb_load_failed: &'static str,
    pub kb_process_failed: &'static str,
    pub model_region_restricted: &'static str,
    pub model_invalid_credentials: &'static str,
    pub model_failed: &'static str,
    pub internal: &'static str,
}

/// The English message table.
pub const EN: Messages = Messages {
    missing_field: "A required field is missing or empty.",
    attachment_too_large: "Attached file exceeds the size limit.",
    attachment_unsupported_type: "Attached file has an unsupported type.",
    kb_load_failed: "Failed to load the fault knowledge base.",
    kb_process_failed: "Failed to process the fault knowledge base.",
    model_region_restricted: "The model provider is not available in this region.",
    model_invalid_credentials: "The model provider rejected the API credentials.",
    model_failed: "The model request failed.",
    internal: "An internal server error occurred.",
};

/// The table used for all responses.
pub const MESSAGES: Messages = EN;
