use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// Runtime configuration, read from `DROPLET_*` environment variables.
///
/// `DROPLET_DATABASE_URL` and `DROPLET_JWT_SECRET` are required; host and
/// port fall back to local defaults.
#[derive(Deserialize, Clone)]
pub struct DropletConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: Secret<String>,
    pub jwt_secret: Secret<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl DropletConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(Environment::with_prefix("DROPLET"))
            .build()?
            .try_deserialize()?;

        if config.jwt_secret.expose_secret().is_empty() {
            return Err(ConfigError::Message(
                "DROPLET_JWT_SECRET must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
