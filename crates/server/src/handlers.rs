//! # Route Handlers
//!
//! The HTML landing page and the `/chat` diagnosis pipeline. The pipeline is
//! strictly sequential per request: validate the text fields, validate the
//! attachments, load the knowledge base, assemble the prompt, call the model,
//! split the completion. Any failure short-circuits to the response mapping.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, response::Html, Json};
use axum_extra::extract::Multipart;
use fixrag::{
    attachment::{is_empty_placeholder, validate_descriptor},
    build_prompt, split_completion, Attachment,
};
use serde::Serialize;
use tracing::{info, warn};

const INDEX_TEMPLATE_PATH: &str = "templates/index.html";

const FALLBACK_PAGE: &str = "<!DOCTYPE html>\n<html><body>\
    <h1>Fault Diagnosis</h1>\
    <p>The page template is missing. The API at <code>POST /chat</code> is still available.</p>\
    </body></html>";

/// The root handler: serves the diagnosis form.
///
/// Template rendering is delegated to a plain HTML file; when it is missing
/// the page degrades to an inline notice instead of failing the process.
pub async fn index() -> Html<String> {
    let manifest_path = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/index.html");
    let page = match tokio::fs::read_to_string(INDEX_TEMPLATE_PATH).await {
        Ok(page) => page,
        Err(_) => match tokio::fs::read_to_string(manifest_path).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Landing page template not found: {e}");
                FALLBACK_PAGE.to_string()
            }
        },
    };
    Html(page)
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The success body for the `/chat` endpoint.
#[derive(Serialize)]
pub struct ChatResponse {
    pub explanation: String,
    pub control_action: String,
}

/// Collected text fields of one diagnosis request.
#[derive(Default)]
struct ChatForm {
    system_prompt: Option<String>,
    equipment: Option<String>,
    symptoms: Option<String>,
}

impl ChatForm {
    /// Returns a field's trimmed value, or the validation error naming it.
    fn require(value: &Option<String>, field: &'static str) -> Result<String, AppError> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or(AppError::Validation { field })
    }
}

/// The handler for the `/chat` endpoint.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ChatResponse>, AppError> {
    let mut form = ChatForm::default();
    let mut pending: Vec<Attachment> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(anyhow::Error::from)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "system_prompt" => {
                form.system_prompt = Some(field.text().await.map_err(anyhow::Error::from)?);
            }
            "equipment" => {
                form.equipment = Some(field.text().await.map_err(anyhow::Error::from)?);
            }
            "symptoms" => {
                form.symptoms = Some(field.text().await.map_err(anyhow::Error::from)?);
            }
            "files" => {
                let file_name = field.file_name().unwrap_or("").trim().to_string();
                let media_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_default();
                let data = field.bytes().await.map_err(anyhow::Error::from)?.to_vec();

                // A blank file input arrives as an empty part; not an error.
                if is_empty_placeholder(&file_name, data.len()) {
                    continue;
                }
                pending.push(Attachment {
                    file_name,
                    media_type,
                    data,
                });
            }
            _ => warn!("Ignoring unknown multipart field: {name}"),
        }
    }

    // Input validation precedes attachment validation; a request missing a
    // required field reports that even when an attachment is also bad.
    let system_prompt = ChatForm::require(&form.system_prompt, "system_prompt")?;
    let equipment = ChatForm::require(&form.equipment, "equipment")?;
    let symptoms = ChatForm::require(&form.symptoms, "symptoms")?;

    for attachment in &pending {
        validate_descriptor(
            &attachment.file_name,
            &attachment.media_type,
            attachment.data.len(),
        )?;
    }
    let attachments = pending;

    info!(
        "Diagnosis request: equipment='{equipment}', {} attachment(s)",
        attachments.len()
    );

    // The knowledge base is refetched on every request; no caching layer.
    let kb_text = app_state.knowledge_base.load().await?;

    let parts = build_prompt(&system_prompt, &equipment, &symptoms, &kb_text, &attachments);

    let completion = app_state.ai_provider.complete(&parts).await?;

    let diagnosis = split_completion(&completion);
    Ok(Json(ChatResponse {
        explanation: diagnosis.explanation,
        control_action: diagnosis.control_action,
    }))
}
