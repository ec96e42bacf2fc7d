//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::Coordinate;
use crate::itinerary::{AggregatorConfig, GeocodeFailurePolicy};
use crate::maps::{
    DEFAULT_GEOLOCATION_BASE_URL, DEFAULT_MAPS_BASE_URL, MapsConfig, validate_api_key,
};
use crate::refresh::{DEFAULT_INTERVAL, RefreshConfig};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_GEOCODE_MAX_CONCURRENT: usize = 5;

/// Errors reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub maps_base_url: String,
    pub geolocation_base_url: String,
    pub refresh_interval: Duration,

    /// Fixed origin; when absent the geolocation service is asked.
    pub origin: Option<Coordinate>,

    /// Stop list to load; when absent the built-in list is used.
    pub stops_file: Option<PathBuf>,

    pub geocode_policy: GeocodeFailurePolicy,
    pub label_origin: bool,
    pub bind_addr: SocketAddr,
    pub http_timeout_secs: u64,
    pub geocode_max_concurrent: usize,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("MAPS_API_KEY").ok_or(ConfigError::MissingVar("MAPS_API_KEY"))?;
        validate_api_key(&api_key).map_err(|e| invalid("MAPS_API_KEY", "<redacted>", e))?;

        let refresh_secs: u64 = parse_or(&get, "REFRESH_INTERVAL_SECS", DEFAULT_INTERVAL.as_secs())?;
        if refresh_secs == 0 {
            return Err(invalid("REFRESH_INTERVAL_SECS", "0", "must be at least 1"));
        }

        let origin = match get("ORIGIN") {
            Some(raw) => Some(
                Coordinate::parse(&raw).map_err(|e| invalid("ORIGIN", &raw, e))?,
            ),
            None => None,
        };

        let mut geocode_policy: GeocodeFailurePolicy = parse_or(
            &get,
            "GEOCODE_POLICY",
            GeocodeFailurePolicy::AbortCycle,
        )?;
        if let (GeocodeFailurePolicy::Placeholder(text), Some(custom)) =
            (&mut geocode_policy, get("GEOCODE_PLACEHOLDER"))
        {
            *text = custom;
        }

        let label_origin = match get("LABEL_ORIGIN") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid("LABEL_ORIGIN", &raw, "expected true or false")
            })?,
            None => true,
        };

        let geocode_max_concurrent: usize = parse_or(
            &get,
            "GEOCODE_MAX_CONCURRENT",
            DEFAULT_GEOCODE_MAX_CONCURRENT,
        )?;
        if geocode_max_concurrent == 0 {
            return Err(invalid("GEOCODE_MAX_CONCURRENT", "0", "must be at least 1"));
        }

        Ok(Self {
            api_key,
            maps_base_url: get("MAPS_BASE_URL").unwrap_or_else(|| DEFAULT_MAPS_BASE_URL.to_string()),
            geolocation_base_url: get("GEOLOCATION_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEOLOCATION_BASE_URL.to_string()),
            refresh_interval: Duration::from_secs(refresh_secs),
            origin,
            stops_file: get("STOPS_FILE").map(PathBuf::from),
            geocode_policy,
            label_origin,
            bind_addr: parse_or(&get, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            http_timeout_secs: parse_or(&get, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            geocode_max_concurrent,
        })
    }

    /// Settings for the directions client.
    pub fn directions(&self) -> MapsConfig {
        MapsConfig::new(&self.api_key)
            .with_base_url(&self.maps_base_url)
            .with_timeout(self.http_timeout_secs)
    }

    /// Settings for the reverse geocoding client.
    pub fn geocoding(&self) -> MapsConfig {
        self.directions()
            .with_max_concurrent(self.geocode_max_concurrent)
    }

    /// Settings for the geolocation client.
    pub fn geolocation(&self) -> MapsConfig {
        MapsConfig::new(&self.api_key)
            .with_base_url(&self.geolocation_base_url)
            .with_timeout(self.http_timeout_secs)
    }

    pub fn refresh(&self) -> RefreshConfig {
        RefreshConfig::new(
            self.refresh_interval,
            AggregatorConfig::new(self.geocode_policy.clone(), self.label_origin),
        )
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match get(name) {
        Some(raw) => raw.parse().map_err(|e| invalid(name, &raw, e)),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
