use std::time::Duration;

use anyhow::Result;

/// Models accepted by the assistants endpoint. A configured model outside
/// this list falls back to the default at startup.
pub const SUPPORTED_ASSISTANT_MODELS: &[&str] = &[
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4-turbo",
    "gpt-4-turbo-preview",
    "gpt-4",
    "gpt-3.5-turbo",
];

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_RUN_TIMEOUT_SECS: u64 = 60;

/// Process-wide configuration, read from the environment once at startup
/// and injected everywhere else.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API credential. Absence is a fatal startup error.
    pub api_key: String,
    /// Upstream API base URL, without trailing slash.
    pub base_url: String,
    /// Model used when creating assistants.
    pub model: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Wall-clock bound for one run-polling loop.
    pub run_timeout: Duration,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// `OPENAI_API_KEY` is required. `OPENAI_BASE_URL`, `OPENAI_MODEL`,
    /// `RAGCHAT_ADDR`, and `RAGCHAT_RUN_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        let Some(api_key) = api_key else {
            anyhow::bail!("OPENAI_API_KEY is not set. Add it to the environment or a .env file.")
        };

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let env_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let model = resolve_model(&env_model);

        let bind_addr = std::env::var("RAGCHAT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

        let run_timeout = std::env::var("RAGCHAT_RUN_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_RUN_TIMEOUT_SECS));

        Ok(Self {
            api_key,
            base_url,
            model,
            bind_addr,
            run_timeout,
        })
    }
}

/// Returns `model` if the assistants endpoint supports it, otherwise the
/// default model.
fn resolve_model(model: &str) -> String {
    if SUPPORTED_ASSISTANT_MODELS.contains(&model) {
        model.to_string()
    } else {
        tracing::warn!(
            model,
            fallback = DEFAULT_MODEL,
            "model is not supported by the assistants API, using fallback"
        );
        DEFAULT_MODEL.to_string()
    }
}
