use crate::error::Error;

pub static HOST: &str = "HOST";
pub static PORT: &str = "PORT";
pub static API_VERSION: &str = "API_VERSION";
pub static APP_ENV: &str = "APP_ENV";
pub static PROFESSOR_ID: &str = "PROFESSOR_ID";
pub static JSON_LIMIT: &str = "JSON_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_version: String,
    pub environment: String,
    pub author_id: String,
    pub json_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".into(),
            port: 3000,
            api_version: "v1".into(),
            environment: "development".into(),
            author_id: "mock-professor-id".into(),
            json_limit: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Config::default();
        Ok(Config {
            host: lookup(HOST).unwrap_or(default.host),
            port: lookup(PORT).map(|p| p.parse::<u16>()).transpose()?.unwrap_or(default.port),
            api_version: lookup(API_VERSION).unwrap_or(default.api_version),
            environment: lookup(APP_ENV).unwrap_or(default.environment),
            author_id: lookup(PROFESSOR_ID).unwrap_or(default.author_id),
            json_limit: lookup(JSON_LIMIT).map(|l| l.parse::<usize>()).transpose()?.unwrap_or(default.json_limit),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.is_development());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[(PORT, "8080"), (APP_ENV, "production"), (PROFESSOR_ID, "prof-1")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.author_id, "prof-1");
        assert!(!config.is_development());
    }

    #[test]
    fn test_bad_port() {
        let err = Config::from_lookup(lookup(&[(PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, Error::ParseIntError(_)));
    }
}
