//! Process configuration.
//!
//! Values come from (highest precedence first):
//! 1. `DB_*` environment variables, nested under `database`
//! 2. `AWS_REGION`, `DATABASE_URL`, `LISTEN_ADDR`, `LOGLEVEL`
//! 3. Built-in defaults
//!
//! A `.env` file is loaded by `main` before this runs.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RecordsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Display-only deployment region.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub aws_region: Option<String>,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

/// Connection parameters for the student database.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_host", deserialize_with = "lenient_string")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_user", deserialize_with = "lenient_string")]
    pub user: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,

    #[serde(default = "default_name", deserialize_with = "lenient_string")]
    pub name: String,

    /// Full connection URL; overrides the individual parts when set.
    /// `sqlite:` URLs select the embedded backend.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    "root".to_string()
}

fn default_name() -> String {
    "student_db".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: String::new(),
            name: default_name(),
            url: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            aws_region: None,
            listen_addr: default_listen_addr(),
            loglevel: default_loglevel(),
        }
    }
}

// Password is never printed.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("url", &self.url.as_deref().map(redact_url))
            .finish()
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, RecordsError> {
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["aws_region", "listen_addr", "loglevel"]))
            .merge(
                Env::raw()
                    .only(&["database_url"])
                    .map(|_| "database.url".into()),
            )
            .merge(Env::prefixed("DB_").map(|key| {
                format!("database.{}", key.as_str().to_ascii_lowercase()).into()
            }))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, RecordsError> {
        Ok(figment.extract()?)
    }

    /// Region label shown on the page; `unknown` when unset.
    pub fn region(&self) -> &str {
        self.aws_region.as_deref().unwrap_or("unknown")
    }
}

impl DatabaseConfig {
    pub fn is_sqlite(&self) -> bool {
        self.url
            .as_deref()
            .is_some_and(|u| u.starts_with("sqlite:"))
    }
}

/// Strip the userinfo part of a connection URL for logging.
pub fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

// Env values such as `DB_PASSWORD=1234` arrive as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Scalar::deserialize(d).map(String::from)
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Option::<Scalar>::deserialize(d).map(|v| v.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::from_figment(Figment::from(Serialized::defaults(Config::default())))
            .expect("defaults extract");
        assert_eq!(cfg.database.host, "localhost");
        assert_eq!(cfg.database.user, "root");
        assert_eq!(cfg.database.password, "");
        assert_eq!(cfg.database.name, "student_db");
        assert_eq!(cfg.database.port, 3306);
        assert_eq!(cfg.region(), "unknown");
        assert!(!cfg.database.is_sqlite());
    }

    #[test]
    fn numeric_password_is_accepted() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::default("database.password", 1234))
            .merge(Serialized::default("database.port", 3307));
        let cfg = Config::from_figment(figment).expect("extract");
        assert_eq!(cfg.database.password, "1234");
        assert_eq!(cfg.database.port, 3307);
    }

    #[test]
    fn sqlite_url_selects_embedded_backend() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::default("database.url", "sqlite::memory:"));
        let cfg = Config::from_figment(figment).expect("extract");
        assert!(cfg.database.is_sqlite());
    }

    #[test]
    fn redact_hides_credentials() {
        assert_eq!(
            redact_url("mysql://root:secret@db:3306/student_db"),
            "mysql://***@db:3306/student_db"
        );
        assert_eq!(redact_url("sqlite:students.db"), "sqlite:students.db");
    }

    #[test]
    fn debug_output_omits_password() {
        let db = DatabaseConfig {
            password: "hunter2".into(),
            ..DatabaseConfig::default()
        };
        assert!(!format!("{db:?}").contains("hunter2"));
    }

    #[test]
    fn environment_variables_map_onto_config() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DB_HOST", "db.internal");
            jail.set_env("DB_PORT", "3307");
            jail.set_env("DB_USER", "registrar");
            jail.set_env("DB_PASSWORD", "1234");
            jail.set_env("DB_NAME", "campus");
            jail.set_env("DATABASE_URL", "sqlite:students.db");
            jail.set_env("AWS_REGION", "eu-west-1");
            jail.set_env("LISTEN_ADDR", "127.0.0.1:9000");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.database.host, "db.internal");
            assert_eq!(cfg.database.port, 3307);
            assert_eq!(cfg.database.user, "registrar");
            assert_eq!(cfg.database.password, "1234");
            assert_eq!(cfg.database.name, "campus");
            assert_eq!(cfg.database.url.as_deref(), Some("sqlite:students.db"));
            assert!(cfg.database.is_sqlite());
            assert_eq!(cfg.region(), "eu-west-1");
            assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
            Ok(())
        });
    }

    #[test]
    fn unset_environment_keeps_defaults() {
        figment::Jail::expect_with(|_jail| {
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.database.port, 3306);
            assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
            Ok(())
        });
    }
}
