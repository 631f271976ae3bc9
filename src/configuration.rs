use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::ContactEmail;
use crate::email_client::EmailClient;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub site: SiteSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SiteSettings {
    pub title: String,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub recipient_email: String,
    pub auth_token: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_ms: u64,
}

impl EmailClientSettings {
    pub fn client(&self) -> Result<EmailClient, anyhow::Error> {
        let sender = self
            .sender()
            .map_err(anyhow::Error::msg)
            .context("Invalid sender email address.")?;
        EmailClient::new(&self.base_url, sender, self.auth_token.clone(), self.timeout())
    }

    pub fn sender(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.sender_email.clone())
    }

    /// The operator's inbox, where every submission is delivered.
    pub fn recipient(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.recipient_email.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`.",
            )),
        }
    }
}

/// Loads `KEY=value` pairs from `path` into the process environment.
///
/// A missing file is not an error; variables already set are left untouched.
pub fn load_env_file(path: &Path) -> Result<(), anyhow::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to load {}.", path.display())),
    }
}

/// Reads `configuration/base.yaml`, the file for `APP_ENVIRONMENT` and the
/// `APP_*` environment variables, in that order. `EMAIL_USER` wins over any
/// configured recipient.
pub fn get_configuration() -> Result<Settings, anyhow::Error> {
    let base_path = std::env::current_dir().context("Failed to determine current directory.")?;
    let conf_dir = base_path.join("configuration");
    let env: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)
        .context("Failed to parse APP_ENVIRONMENT.")?;

    let settings = config::Config::builder()
        .add_source(config::File::from(conf_dir.join("base.yaml")).required(true))
        .add_source(
            config::File::from(conf_dir.join(format!("{}.yaml", env.as_str()))).required(true),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        )
        .set_override_option("email_client.recipient_email", std::env::var("EMAIL_USER").ok())?
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}
