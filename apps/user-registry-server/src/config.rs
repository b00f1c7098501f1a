//! Layered server configuration: defaults, then YAML, then environment, then CLI.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use user_registry::infra::storage::db::redact_credentials_in_dsn;
use user_registry::{DatabaseConfig, HttpConfig, UserRegistryConfig};

/// Environment prefix; nested keys are separated by `__`,
/// e.g. `USER_REGISTRY__DATABASE__DSN`.
pub const ENV_PREFIX: &str = "USER_REGISTRY__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub user_registry: UserRegistryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let http = HttpConfig::default();
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            request_timeout: http.request_timeout,
            body_limit_bytes: http.body_limit_bytes,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            request_timeout: self.request_timeout,
            body_limit_bytes: self.body_limit_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `user_registry=debug,tower_http=warn`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Values given on the command line; they override every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub dsn: Option<String>,
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and `USER_REGISTRY__*` variables.
    ///
    /// # Errors
    /// Returns an error when a layer cannot be parsed into the config shape.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)
            .extract()
            .context("failed to load configuration")
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.bind_addr.set_port(port);
        }
        if let Some(dsn) = &overrides.dsn {
            self.database.dsn.clone_from(dsn);
        }
    }

    /// Reject values that would only fail later at startup.
    ///
    /// # Errors
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        if self.database.dsn.trim().is_empty() {
            bail!("database.dsn must not be empty");
        }
        if self.user_registry.max_name_length == 0 {
            bail!("user_registry.max_name_length must be positive");
        }
        if self.server.request_timeout.is_zero() {
            bail!("server.request_timeout must be positive");
        }
        if self.server.body_limit_bytes == 0 {
            bail!("server.body_limit_bytes must be positive");
        }
        if let (Some(min), Some(max)) = (self.database.min_conns, self.database.max_conns)
            && min > max
        {
            bail!("database.min_conns ({min}) exceeds database.max_conns ({max})");
        }
        Ok(())
    }

    /// Effective configuration as YAML, with DSN credentials redacted.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        let mut printable = self.clone();
        printable.database.dsn = redact_credentials_in_dsn(&self.database.dsn);
        serde_saphyr::to_string(&printable).context("failed to render configuration as YAML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_any_layer() {
        Jail::expect_with(|_jail| {
            let cfg = AppConfig::load(None).unwrap();
            assert_eq!(cfg.server.bind_addr.to_string(), "127.0.0.1:8080");
            assert_eq!(cfg.server.request_timeout, Duration::from_secs(30));
            assert_eq!(cfg.database.dsn, "sqlite://user_registry.db?mode=rwc");
            assert_eq!(cfg.logging.format, LogFormat::Text);
            assert_eq!(cfg.user_registry.max_name_length, 100);
            cfg.validate().unwrap();
            Ok(())
        });
    }

    #[test]
    fn yaml_then_env_then_cli() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r"
server:
  bind_addr: 0.0.0.0:9000
  request_timeout: 5s
database:
  dsn: sqlite://from-yaml.db?mode=rwc
  acquire_timeout: 2s
logging:
  format: json
user_registry:
  max_name_length: 40
",
            )?;
            jail.set_env("USER_REGISTRY__DATABASE__DSN", "sqlite://from-env.db?mode=rwc");
            jail.set_env("USER_REGISTRY__LOGGING__LEVEL", "debug");

            let mut cfg = AppConfig::load(Some(Path::new("config.yaml"))).unwrap();
            assert_eq!(cfg.server.bind_addr.port(), 9000);
            assert_eq!(cfg.server.request_timeout, Duration::from_secs(5));
            assert_eq!(cfg.database.dsn, "sqlite://from-env.db?mode=rwc");
            assert_eq!(cfg.database.acquire_timeout, Some(Duration::from_secs(2)));
            assert_eq!(cfg.logging.level, "debug");
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert_eq!(cfg.user_registry.max_name_length, 40);

            cfg.apply_cli_overrides(&CliOverrides {
                port: Some(7000),
                dsn: Some("sqlite::memory:".to_owned()),
            });
            assert_eq!(cfg.server.bind_addr.to_string(), "0.0.0.0:7000");
            assert_eq!(cfg.database.dsn, "sqlite::memory:");
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = AppConfig::default();
        cfg.user_registry.max_name_length = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.database.min_conns = Some(5);
        cfg.database.max_conns = Some(2);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("min_conns"));
    }

    #[test]
    fn yaml_dump_redacts_password_and_parses_back() {
        let mut cfg = AppConfig::default();
        cfg.database.dsn = "postgres://app:s3cret@db:5432/users".to_owned();

        let yaml = cfg.to_yaml().unwrap();
        assert!(!yaml.contains("s3cret"));
        assert!(yaml.contains("app:***@db"));

        let parsed: AppConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(parsed.server.bind_addr, cfg.server.bind_addr);
        assert_eq!(parsed.server.request_timeout, cfg.server.request_timeout);
    }

    #[test]
    fn yaml_dump_hides_password_containing_at_sign() {
        let mut cfg = AppConfig::default();
        cfg.database.dsn = "postgres://app:p@ssw0rd@db:5432/users".to_owned();

        let yaml = cfg.to_yaml().unwrap();
        assert!(!yaml.contains("ssw0rd"), "{yaml}");
        assert!(yaml.contains("app:***@db:5432/users"));
    }
}
