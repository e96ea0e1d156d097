use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    pub auth: AuthSettings,
    pub images: ImageSettings,
    #[serde(default)]
    pub seed_users: Vec<SeedUser>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSettings {
    pub secret_key: String,
    #[serde(default = "default_token_duration_secs")]
    pub token_duration_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_image_folder")]
    pub folder: PathBuf,
    #[serde(default = "default_max_image_size")]
    pub max_size: usize,
}

/// An account created at startup.
#[derive(Clone, serde::Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

fn default_token_duration_secs() -> u64 {
    15 * 60
}

fn default_image_folder() -> PathBuf {
    PathBuf::from("img")
}

fn default_max_image_size() -> usize {
    crate::routes::laptop::MAX_IMAGE_SIZE
}

impl AuthSettings {
    pub fn token_duration(&self) -> Duration {
        Duration::from_secs(self.token_duration_secs)
    }
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // `configuration.yaml` first, then CATALOG__* variables on top,
    // e.g. CATALOG__AUTH__SECRET_KEY or CATALOG__APP_PORT
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("CATALOG")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}
