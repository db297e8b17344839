use chrono::FixedOffset;
use service_core::config::{self as core_config, get_env, parse_flag, Environment};
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct ServiflexConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub storage: StorageConfig,
    pub mongodb: MongoConfig,
    pub security: SecurityConfig,
    pub swagger: SwaggerConfig,
    pub schedule: ScheduleConfig,
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub enabled: bool,
}

/// Offset in which working hours are declared and appointment instants are
/// read back as wall-clock times.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub utc_offset: FixedOffset,
}

impl ServiflexConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let environment = Environment::current()?;
        let is_prod = environment.is_prod();

        let backend: StorageBackend = get_env("STORAGE_BACKEND", Some("mongo"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        // The memory backend never talks to MongoDB, so the URI may be absent.
        let uri_default = match backend {
            StorageBackend::Mongo => None,
            StorageBackend::Memory => Some("mongodb://localhost:27017"),
        };

        Ok(ServiflexConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("serviflex-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            storage: StorageConfig { backend },
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", uri_default, is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("serviflex_db"), is_prod)?,
            },
            security: SecurityConfig {
                allowed_origins: parse_origins(&get_env("ALLOWED_ORIGINS", Some("*"), is_prod)?),
            },
            swagger: SwaggerConfig {
                enabled: parse_flag(&get_env("SWAGGER_ENABLED", Some("true"), is_prod)?),
            },
            schedule: ScheduleConfig {
                utc_offset: parse_utc_offset(&get_env(
                    "SCHEDULE_UTC_OFFSET",
                    Some("+00:00"),
                    is_prod,
                )?)?,
            },
            seed_demo_data: parse_flag(&get_env("SEED_DEMO_DATA", Some("false"), is_prod)?),
        })
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `+HH:MM` / `-HH:MM` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, AppError> {
    let invalid = || AppError::ConfigError(anyhow::anyhow!("Invalid UTC offset: {}", raw));

    let raw = raw.trim();
    let (sign, rest) = match raw.chars().next() {
        Some('+') => (1, &raw[1..]),
        Some('-') => (-1, &raw[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offsets() {
        assert_eq!(parse_utc_offset("+00:00").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("-03:00").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 19800);
    }

    #[test]
    fn rejects_malformed_offsets() {
        assert!(parse_utc_offset("03:00").is_err());
        assert!(parse_utc_offset("+3").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("-01:75").is_err());
    }

    #[test]
    fn splits_origin_list() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn storage_backend_names() {
        assert_eq!("Mongo".parse::<StorageBackend>(), Ok(StorageBackend::Mongo));
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("s3".parse::<StorageBackend>().is_err());
    }
}
