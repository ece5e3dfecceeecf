use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub seed: SeedConfig,
}

/// Initial stock per ledger, parsed from environment variables.
///
/// Each variable is a comma-separated list of `kind=quantity` pairs, e.g.
/// `AMMUNITION_STOCK="weapon=500,military vehicle=40"`.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub ammunition: Vec<(String, u64)>,
    pub fuel: Vec<(String, u64)>,
    pub vehicles: Vec<(String, u64)>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let seed = SeedConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            seed,
        })
    }
}

impl FromEnv for SeedConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            ammunition: parse_seed(
                "AMMUNITION_STOCK",
                "weapon=500,military vehicle=40",
            )?,
            fuel: parse_seed("FUEL_STOCK", "diesel=1000,petrol=800")?,
            vehicles: parse_seed("VEHICLE_STOCK", "truck=25,apc=10")?,
        })
    }
}

fn parse_seed(key: &str, default: &str) -> Result<Vec<(String, u64)>, ConfigError> {
    let raw = env_or_default(key, default);

    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (kind, quantity) = pair.split_once('=').ok_or_else(|| ConfigError::ParseError {
                key: key.to_string(),
                details: format!("expected 'kind=quantity', got '{}'", pair),
            })?;
            let quantity = quantity.trim().parse().map_err(|e| ConfigError::ParseError {
                key: key.to_string(),
                details: format!("quantity for '{}': {}", kind.trim(), e),
            })?;
            Ok((kind.trim().to_string(), quantity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_defaults_when_unset() {
        temp_env::with_vars(
            [
                ("AMMUNITION_STOCK", None::<&str>),
                ("FUEL_STOCK", None),
                ("VEHICLE_STOCK", None),
            ],
            || {
                let seed = SeedConfig::from_env().unwrap();
                assert_eq!(
                    seed.ammunition,
                    vec![
                        ("weapon".to_string(), 500),
                        ("military vehicle".to_string(), 40)
                    ]
                );
                assert_eq!(seed.fuel.len(), 2);
                assert_eq!(seed.vehicles.len(), 2);
            },
        );
    }

    #[test]
    fn test_seed_parses_custom_pairs() {
        temp_env::with_var("FUEL_STOCK", Some("diesel=10, kerosene=3"), || {
            let parsed = parse_seed("FUEL_STOCK", "").unwrap();
            assert_eq!(
                parsed,
                vec![("diesel".to_string(), 10), ("kerosene".to_string(), 3)]
            );
        });
    }

    #[test]
    fn test_seed_rejects_malformed_pair() {
        temp_env::with_var("FUEL_STOCK", Some("diesel"), || {
            let result = parse_seed("FUEL_STOCK", "");
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_seed_rejects_non_numeric_quantity() {
        temp_env::with_var("FUEL_STOCK", Some("diesel=lots"), || {
            let result = parse_seed("FUEL_STOCK", "");
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("FUEL_STOCK"));
        });
    }

    #[test]
    fn test_empty_seed_is_allowed() {
        temp_env::with_var("VEHICLE_STOCK", Some(""), || {
            let parsed = parse_seed("VEHICLE_STOCK", "").unwrap();
            assert!(parsed.is_empty());
        });
    }
}
