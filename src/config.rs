//! Configuration loaded from environment variables.
//!
//! Every setting has a default; a variable that is absent or unparseable
//! falls back to it.
//!
//! | Variable                    | Default       | Description                                 |
//! |-----------------------------|---------------|---------------------------------------------|
//! | `VECTABLE_SCHEMA`           | `hr`          | Namespace the tables are mounted under      |
//! | `VECTABLE_LOG_LEVEL`        | `info`        | tracing filter, e.g. `vectable=debug,info`  |
//! | `VECTABLE_EMPLOYEE_SEED`    | unset         | Seed for the employees loader (unset = random) |
//! | `VECTABLE_VECTOR_DIMENSION` | `4`           | Length of generated employee vectors        |
//! | `VECTABLE_VECTOR_BOUND`     | `20.20165424` | Exclusive upper bound of generated elements |

use std::str::FromStr;

use crate::error::{Error, Result};

pub const DEFAULT_SCHEMA: &str = "hr";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_VECTOR_DIMENSION: usize = 4;
pub const DEFAULT_VECTOR_BOUND: f64 = 20.20165424;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Namespace the tables and functions are registered under.
    pub schema_name: String,

    /// Tracing filter string.
    pub log_level: String,

    /// Seed for the employees loader; `None` draws from entropy.
    pub employee_seed: Option<u64>,

    /// Number of elements in each generated employee vector.
    pub vector_dimension: usize,

    /// Generated vector elements fall in `[0, vector_bound)`.
    pub vector_bound: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_name: DEFAULT_SCHEMA.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            employee_seed: None,
            vector_dimension: DEFAULT_VECTOR_DIMENSION,
            vector_bound: DEFAULT_VECTOR_BOUND,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            schema_name: lookup("VECTABLE_SCHEMA").unwrap_or(defaults.schema_name),
            log_level: lookup("VECTABLE_LOG_LEVEL").unwrap_or(defaults.log_level),
            employee_seed: parse(&lookup, "VECTABLE_EMPLOYEE_SEED"),
            vector_dimension: parse(&lookup, "VECTABLE_VECTOR_DIMENSION")
                .unwrap_or(defaults.vector_dimension),
            vector_bound: parse(&lookup, "VECTABLE_VECTOR_BOUND").unwrap_or(defaults.vector_bound),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_name.trim().is_empty() {
            return Err(Error::Config("schema name is empty".into()));
        }
        if self.vector_dimension == 0 {
            return Err(Error::Config("vector dimension must be positive".into()));
        }
        if !self.vector_bound.is_finite() || self.vector_bound <= 0.0 {
            return Err(Error::Config(format!(
                "vector bound {} must be a positive number",
                self.vector_bound
            )));
        }
        Ok(())
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Config, DEFAULT_VECTOR_BOUND};
    use crate::error::Error;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.schema_name, "hr");
        assert_eq!(config.employee_seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("VECTABLE_SCHEMA", "sales"),
            ("VECTABLE_EMPLOYEE_SEED", "42"),
            ("VECTABLE_VECTOR_DIMENSION", " 8 "),
            ("VECTABLE_VECTOR_BOUND", "not a number"),
        ]);
        assert_eq!(config.schema_name, "sales");
        assert_eq!(config.employee_seed, Some(42));
        assert_eq!(config.vector_dimension, 8);
        assert_eq!(config.vector_bound, DEFAULT_VECTOR_BOUND);
    }

    #[test]
    fn test_validate() {
        let config = Config {
            vector_dimension: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = Config {
            vector_bound: -1.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
