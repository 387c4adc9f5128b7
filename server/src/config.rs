use anyhow::{Result, anyhow};
use axum::http::HeaderValue;

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub seed_fixtures: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        )?;
        let seed_fixtures = env_bool("SEED_FIXTURES", false);

        Ok(Self {
            cors_allowed_origins,
            seed_fixtures,
        })
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map(|_| origin.to_string())
                .map_err(|_| anyhow!("invalid CORS origin {origin:?}"))
        })
        .collect()
}

fn env_bool(var: &str, default: bool) -> bool {
    std::env::var(var)
        .ok()
        .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}
