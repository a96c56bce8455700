use crate::core::models::participation::TransitionPolicy;
use crate::error::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://volunteer.db";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub port: u16,
    pub max_connections: u32,
    pub transition_policy: TransitionPolicy,
}

impl Config {
    /// Reads the process environment, after `.env` has been loaded.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| Error::ConfigError(format!("invalid PORT: {}", v)))?,
            None => DEFAULT_PORT,
        };
        let max_connections = match lookup("MAX_CONNECTIONS") {
            Some(v) => match v.parse() {
                Ok(n) if n > 0 => n,
                _ => return Err(Error::ConfigError(format!("invalid MAX_CONNECTIONS: {}", v))),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let transition_policy = match lookup("PARTICIPATION_TRANSITIONS") {
            Some(v) => v.parse()?,
            None => TransitionPolicy::default(),
        };
        Ok(Config {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into()),
            port,
            max_connections,
            transition_policy,
        })
    }
}
