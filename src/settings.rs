use config::ConfigError;
use std::env;

/// Models known to work with the completion endpoint. The configured or
/// flag-selected model does not have to come from this list.
pub const MODEL_OPTIONS: &[&str] = &[
    "Kwaipilot/KAT-Dev:novita",
    "mistralai/Mixtral-8x7B-Instruct-v0.1",
    "meta-llama/Llama-2-70b-chat-hf",
    "NousResearch/Nous-Hermes-2-Mixtral-8x7B-DPO",
    "openchat/openchat-3.5-1210",
];

const DEFAULT_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    /// Bearer credential. Required, and never logged.
    pub api_token: String,
    pub model: String,
    pub max_retries: u32,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        let api_token = env::var("HF_TOKEN")
            .map_err(|_| ConfigError::NotFound("HF_TOKEN".to_string()))?;

        Ok(Settings {
            api_url: env::var("HF_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_token,
            model: env::var("BLOG_MODEL").unwrap_or_else(|_| MODEL_OPTIONS[0].to_string()),
            max_retries: env::var("RETRY_ATTEMPTS")
                .map(|v| v.parse().unwrap_or(3))
                .unwrap_or(3)
                .max(1),
        })
    }
}
