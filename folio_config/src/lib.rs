use std::{fmt, net::IpAddr, path::Path, path::PathBuf};

use anyhow::Context;
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use folio_models::email_address::EmailAddress;
use serde::Deserialize;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Built-in defaults, loaded below every config file.
const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Prefix of environment variables that override single config keys, e.g.
/// `FOLIO__HTTP__PORT=8080`.
pub const ENV_PREFIX: &str = "FOLIO";

/// Load the config from the process environment and the given files. Later
/// files take precedence over earlier ones.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_env(paths, std::env::vars())
}

/// Load the config from the given files and environment variables.
///
/// Precedence, lowest first: built-in defaults, config files, the short
/// variables `PORT`, `EMAIL_USER` and `EMAIL_PASS`, then `FOLIO__*` variables.
pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: impl IntoIterator<Item = (String, String)>,
) -> anyhow::Result<Config> {
    let env = env.into_iter().collect::<config::Map<_, _>>();

    paths
        .iter()
        .try_fold(
            config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
            |builder, path| {
                let path = path.as_ref();
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file at {}", path.display()))?;
                let source = File::from_str(&content, FileFormat::Toml);
                anyhow::Ok(builder.add_source(source))
            },
        )?
        .add_source(short_env_overrides(&env)?)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(env)),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn short_env_overrides(env: &config::Map<String, String>) -> anyhow::Result<config::Config> {
    let user = env.get("EMAIL_USER").cloned();

    config::Config::builder()
        .set_override_option("http.port", env.get("PORT").cloned())?
        .set_override_option("email.username", user.clone())?
        .set_override_option("email.from", user.clone())?
        .set_override_option("contact.email", user)?
        .set_override_option("email.password", env.get("EMAIL_PASS").cloned())?
        .build()
        .map_err(Into::into)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub username: Option<String>,
    pub password: Option<Secret>,
    /// Account the server authenticates as. Used as the envelope sender.
    pub from: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Operator mailbox that receives contact messages.
    pub email: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Secret(pub String);

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../", "config.toml");

    fn env(vars: &[(&str, &str)]) -> Vec<(String, String)> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn load_default_config() {
        let config = load_with_env(
            &[CONFIG_PATH],
            env(&[
                ("EMAIL_USER", "owner@example.org"),
                ("EMAIL_PASS", "app-password"),
            ]),
        )
        .unwrap();

        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.static_dir, PathBuf::from("public"));
        assert_eq!(config.email.smtp_url, "smtps://smtp.gmail.com");
        assert_eq!(config.email.username.as_deref(), Some("owner@example.org"));
        assert_eq!(
            config.email.password.map(|x| x.0).as_deref(),
            Some("app-password")
        );
        assert_eq!(config.email.from.as_str(), "owner@example.org");
        assert_eq!(config.contact.email.as_str(), "owner@example.org");
        assert_eq!(*config.health.cache_ttl, std::time::Duration::from_secs(10));
    }

    #[test]
    fn defaults_without_files() {
        let paths: [&str; 0] = [];
        let config = load_with_env(&paths, env(&[("EMAIL_USER", "owner@example.org")])).unwrap();

        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.email.smtp_url, "smtps://smtp.gmail.com");
        assert_eq!(config.email.from.as_str(), "owner@example.org");
        assert_eq!(*config.health.cache_ttl, std::time::Duration::from_secs(10));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[http]\nport = 8000\nstatic_dir = \"/srv/www\"\n").unwrap();

        let config = load_with_env(&[path], env(&[("EMAIL_USER", "owner@example.org")])).unwrap();

        assert_eq!(config.http.port, 8000);
        assert_eq!(config.http.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.email.smtp_url, "smtps://smtp.gmail.com");
    }

    #[test]
    fn port_from_env() {
        let config = load_with_env(
            &[CONFIG_PATH],
            env(&[("EMAIL_USER", "owner@example.org"), ("PORT", "8080")]),
        )
        .unwrap();

        assert_eq!(config.http.port, 8080);
        assert!(config.email.password.is_none());
    }

    #[test]
    fn prefixed_env_wins() {
        let config = load_with_env(
            &[CONFIG_PATH],
            env(&[
                ("EMAIL_USER", "owner@example.org"),
                ("PORT", "8080"),
                ("FOLIO__HTTP__PORT", "9090"),
                ("FOLIO__CONTACT__EMAIL", "inbox@example.org"),
            ]),
        )
        .unwrap();

        assert_eq!(config.http.port, 9090);
        assert_eq!(config.email.from.as_str(), "owner@example.org");
        assert_eq!(config.contact.email.as_str(), "inbox@example.org");
    }

    #[test]
    fn operator_address_required() {
        let err = load_with_env(&[CONFIG_PATH], env(&[])).unwrap_err();

        assert!(format!("{err:#}").contains("missing field"));
    }

    #[test]
    fn missing_file() {
        let err = load_with_env(&["/nonexistent/folio.toml"], env(&[])).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/folio.toml"));
    }

    #[test]
    fn password_is_redacted() {
        let secret = Secret("app-password".into());

        assert_eq!(format!("{secret:?}"), "[redacted]");
    }
}
