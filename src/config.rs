use std::env;

pub const DEFAULT_API_URL: &str = "https://minicoredc-2025.onrender.com";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub api_base_url: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(env::var("PORT").ok(), env::var("COMMISSION_API_URL").ok())
    }

    fn from_vars(port: Option<String>, api_base_url: Option<String>) -> Self {
        let port = port
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let api_base_url = api_base_url
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self { port, api_base_url }
    }
}
