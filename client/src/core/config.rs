use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub token_store_path: PathBuf,
    pub request_timeout_secs: u64,
    pub login_path: String,
    pub unauthorized_path: String,
    pub log_level: String,
    pub app_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_store_path: PathBuf::from(".swms/session.json"),
            request_timeout_secs: 10,
            login_path: "/login".to_string(),
            unauthorized_path: "/".to_string(),
            log_level: "info".to_string(),
            app_env: "development".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from environment variables.
    /// Calls dotenv() first so a local `.env` file is honoured.
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let defaults = Self::default();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or(defaults.api_base_url)
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err("Invalid API_BASE_URL: must start with http:// or https://".to_string());
        }

        let token_store_path = env::var("TOKEN_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_store_path);

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => defaults.request_timeout_secs,
        };

        let login_path = env::var("LOGIN_PATH").unwrap_or(defaults.login_path);
        let unauthorized_path = env::var("UNAUTHORIZED_PATH").unwrap_or(defaults.unauthorized_path);
        for (name, path) in [("LOGIN_PATH", &login_path), ("UNAUTHORIZED_PATH", &unauthorized_path)] {
            if !path.starts_with('/') {
                return Err(format!("Invalid {name}: must be an absolute path"));
            }
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);
        let app_env = env::var("APP_ENV").unwrap_or(defaults.app_env);

        Ok(Config {
            api_base_url,
            token_store_path,
            request_timeout_secs,
            login_path,
            unauthorized_path,
            log_level,
            app_env,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Logs the configuration, hiding any credentials embedded in the base URL
    pub fn print_info(&self) {
        info!("Client configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   API base URL: {}", Self::mask_url(&self.api_base_url));
        info!("   Token store: {}", self.token_store_path.display());
        info!("   Request timeout: {}s", self.request_timeout_secs);
        info!(
            "   Login path: {}, unauthorized path: {}",
            self.login_path, self.unauthorized_path
        );
    }

    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        url.to_string()
    }
}

/// Whole seconds, strictly positive
fn parse_timeout_secs(raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err("Invalid REQUEST_TIMEOUT_SECS: must be a positive number".to_string()),
    }
}
