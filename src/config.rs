// Configuración del servidor leída del entorno (con `.env` opcional).
use std::env;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("TIMETABLE_BIND must not be empty")]
    EmptyBind,

    #[error("unknown log level '{0}' (expected one of error, warn, info, debug, trace)")]
    UnknownLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: String,
    pub log_level: String,
    /// Origen permitido para CORS; `None` => permisivo.
    pub cors_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { bind: DEFAULT_BIND.to_string(), log_level: DEFAULT_LOG_LEVEL.to_string(), cors_origin: None }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl AppConfig {
    /// Lee `TIMETABLE_BIND`, `TIMETABLE_LOG_LEVEL` y `TIMETABLE_CORS_ORIGIN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        AppConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Variante con búsqueda inyectable (para pruebas sin tocar el entorno).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match lookup("TIMETABLE_BIND") {
            Some(b) if b.trim().is_empty() => return Err(ConfigError::EmptyBind),
            Some(b) => b.trim().to_string(),
            None => DEFAULT_BIND.to_string(),
        };

        let log_level = lookup("TIMETABLE_LOG_LEVEL")
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(ConfigError::UnknownLogLevel(log_level));
        }

        let cors_origin = lookup("TIMETABLE_CORS_ORIGIN").map(|o| o.trim().to_string()).filter(|o| !o.is_empty());

        Ok(AppConfig { bind, log_level, cors_origin })
    }
}
