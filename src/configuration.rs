use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub api_keys: ApiKeySettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Public base URL of this service; the extraction endpoints reach the
    /// scrape endpoint through it.
    pub base_url: String,
}

#[derive(Deserialize, Clone)]
pub struct ApiKeySettings {
    pub openai: String,
    /// Override for the OpenAI API base URL, used to point the model client
    /// at a local mock server in tests.
    pub openai_api_base: Option<String>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 8000)?
        .set_default("application.base_url", "http://localhost:8000")?
        .set_default("api_keys.openai", "")?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    require_openai_key(settings.try_deserialize::<Settings>()?)
}

// Refuse to start without a model credential; every extraction request would
// otherwise fail with a per-request auth error.
fn require_openai_key(settings: Settings) -> Result<Settings, config::ConfigError> {
    if settings.api_keys.openai.trim().is_empty() {
        return Err(config::ConfigError::Message(
            "api_keys.openai is not set; export APP_API_KEYS__OPENAI".to_string(),
        ));
    }
    Ok(settings)
}
