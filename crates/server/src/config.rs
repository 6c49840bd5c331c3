//! # Application Configuration
//!
//! Environment-driven configuration for the `fixrag-server`. The model API
//! credential is required and checked at startup; everything else has a
//! sensible default. The resulting `Config` is immutable for the lifetime of
//! the process.

use std::env;

/// The published spreadsheet holding the fault-case knowledge base.
pub const DEFAULT_KB_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vQb49fI2IgWq1sa_Lbh6wlq4RZor8lNX6OgBN1MXX3fQ2YxnWIL4EN_6TmhtJE_YXDZKT00WzLz7b7h/pub?gid=104964265&single=true&output=csv";

/// The fixed hosted-model identifier.
pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// The required model API credential is absent from the environment.
    MissingApiKey,
    /// An environment variable is present but unparsable.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingApiKey => write!(
                f,
                "Missing Gemini API key. Please set the GEMINI_API_KEY environment variable."
            ),
            ConfigError::Invalid(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The server configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// The port for the server to listen on. Loaded from `PORT`.
    pub port: u16,
    /// The model API credential. Loaded from `GEMINI_API_KEY`, required.
    pub api_key: String,
    /// The full model endpoint URL. Loaded from `AI_API_URL`, or derived
    /// from the model name.
    pub api_url: String,
    /// The knowledge-base source URL. Loaded from `KB_SHEET_URL`.
    pub kb_url: String,
    /// An optional outbound proxy applied to both HTTP clients. Loaded from
    /// `HTTPS_PROXY`.
    pub proxy_url: Option<String>,
}

/// Derives the Gemini `generateContent` endpoint from a model name.
pub fn model_api_url(model_name: &str) -> String {
    format!("https://generativelanguage.googleapis.com/v1beta/models/{model_name}:generateContent")
}

/// Loads the configuration from the process environment.
///
/// Fails fast when `GEMINI_API_KEY` is absent so a misconfigured deployment
/// never starts serving.
pub fn get_config() -> Result<Config, ConfigError> {
    let api_key = env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    let port = match env::var("PORT") {
        Ok(value) => value
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid(format!("PORT is not a valid port number: {e}")))?,
        Err(_) => 8000,
    };

    let model_name = env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_NAME.to_string());
    let api_url = env::var("AI_API_URL").unwrap_or_else(|_| model_api_url(&model_name));

    let kb_url = env::var("KB_SHEET_URL").unwrap_or_else(|_| DEFAULT_KB_SHEET_URL.to_string());

    let proxy_url = env::var("HTTPS_PROXY")
        .ok()
        .filter(|url| !url.trim().is_empty());

    Ok(Config {
        port,
        api_key,
        api_url,
        kb_url,
        proxy_url,
    })
}
