use crate::errors::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Connection settings for the Troika API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn from_env() -> Result<Self, AppError> {
        let base_url = std::env::var("TROIKA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token = std::env::var("TROIKA_TOKEN").ok();
        Self::from_values(base_url, token)
    }

    fn from_values(base_url: String, token: Option<String>) -> Result<Self, AppError> {
        let base_url = base_url.trim().to_string();
        if base_url.is_empty() {
            return Err(AppError::configuration("TROIKA_API_URL must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::configuration("TROIKA_API_URL must be an http(s) URL"));
        }

        let token = token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());

        Ok(Self { base_url, token })
    }
}
