use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROJECTS_API_URL: &str = "PROJECTS_API_URL";
pub const SUBMISSIONS_CSV_URL: &str = "SUBMISSIONS_CSV_URL";
pub const SUBMIT_FORM_URL: &str = "SUBMIT_FORM_URL";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub projects: Option<ProjectsConfig>,
    pub community: Option<CommunityConfig>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            }),
            projects: None,
            community: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream project store (a spreadsheet web app)
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProjectsConfig {
    pub api_url: Option<String>,
}

/// Published CSV export of the community submission sheet
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CommunityConfig {
    pub csv_url: Option<String>,
    pub form_url: Option<String>,
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[projects]
# Deployed projects web app, also read from PROJECTS_API_URL
# api_url = "https://script.google.com/macros/s/DEPLOYMENT_ID/exec"

[community]
# Published CSV of the submission sheet, also read from SUBMISSIONS_CSV_URL
# csv_url = "https://docs.google.com/spreadsheets/d/e/SHEET_ID/pub?output=csv"
# Public submission form, also read from SUBMIT_FORM_URL
# form_url = "https://forms.gle/FORM_ID"
"#;

impl ApiConfig {
    /// Loads the config file, creating it with defaults when missing, and
    /// applies environment overrides
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?.with_env_overrides(|key| std::env::var(key).ok());
        Ok((config, config_path))
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            std::fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
            tracing::info!("Wrote default config to {:?}", config_path);
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?;

        builder.try_deserialize()
    }

    /// Non-blank values returned by `lookup` replace the file's upstream URLs
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(api_url) = lookup(PROJECTS_API_URL) {
            self.projects.get_or_insert_with(Default::default).api_url = Some(api_url);
        }
        if let Some(csv_url) = lookup(SUBMISSIONS_CSV_URL) {
            self.community.get_or_insert_with(Default::default).csv_url = Some(csv_url);
        }
        if let Some(form_url) = lookup(SUBMIT_FORM_URL) {
            self.community.get_or_insert_with(Default::default).form_url = Some(form_url);
        }

        self
    }

    pub fn projects_api_url(&self) -> Option<&str> {
        self.projects
            .as_ref()
            .and_then(|p| p.api_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn submissions_csv_url(&self) -> Option<&str> {
        self.community
            .as_ref()
            .and_then(|c| c.csv_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn submit_form_url(&self) -> Option<&str> {
        self.community
            .as_ref()
            .and_then(|c| c.form_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn server_address(&self) -> (String, u16) {
        match &self.server {
            Some(server) => (server.host.clone(), server.port),
            None => ("127.0.0.1".to_string(), 8080),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("curated").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
