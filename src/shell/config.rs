// Runtime configuration read from the environment (and a `.env` file when present).

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::modules::attendance::adapters::outbound::directory::Employee;
use crate::modules::wfh::adapters::outbound::office_locator_static::Office;
use crate::modules::wfh::core::geo::Coordinates;
use crate::shared::core::business_time::IST_OFFSET_MINUTES;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub http_addr: SocketAddr,
    pub business_utc_offset_minutes: i32,
    pub settings_cache_ttl: Duration,
    pub settings_cache_capacity: u64,
    pub notification_buffer: usize,
    pub log_filter: String,
    pub offices: Vec<Office>,
    /// Seed for the in-memory employee directory.
    pub employees: Vec<Employee>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            business_utc_offset_minutes: IST_OFFSET_MINUTES,
            settings_cache_ttl: Duration::from_secs(60),
            settings_cache_capacity: 1024,
            notification_buffer: 256,
            log_filter: "info".into(),
            offices: Vec::new(),
            employees: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            http_addr: parsed(&lookup, "HTTP_ADDR", defaults.http_addr)?,
            business_utc_offset_minutes: parsed(
                &lookup,
                "BUSINESS_UTC_OFFSET_MINUTES",
                defaults.business_utc_offset_minutes,
            )?,
            settings_cache_ttl: Duration::from_secs(parsed(
                &lookup,
                "SETTINGS_CACHE_TTL_SECS",
                defaults.settings_cache_ttl.as_secs(),
            )?),
            settings_cache_capacity: parsed(
                &lookup,
                "SETTINGS_CACHE_CAPACITY",
                defaults.settings_cache_capacity,
            )?,
            notification_buffer: parsed(&lookup, "NOTIFICATION_BUFFER", defaults.notification_buffer)?,
            log_filter: lookup("LOG_FILTER").unwrap_or(defaults.log_filter),
            offices: match lookup("OFFICE_LOCATIONS") {
                Some(raw) => parse_offices(&raw)?,
                None => defaults.offices,
            },
            employees: lookup("EMPLOYEES")
                .map(|raw| parse_employees(&raw))
                .unwrap_or(defaults.employees),
        })
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// `name:lat:lon` entries separated by `;`.
fn parse_offices(raw: &str) -> Result<Vec<Office>, ConfigError> {
    let invalid = || ConfigError::Invalid {
        key: "OFFICE_LOCATIONS",
        value: raw.to_string(),
    };
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.rsplitn(3, ':');
            let longitude: f64 = parts.next().and_then(|v| v.trim().parse().ok()).ok_or_else(invalid)?;
            let latitude: f64 = parts.next().and_then(|v| v.trim().parse().ok()).ok_or_else(invalid)?;
            let name = parts.next().map(str::trim).filter(|n| !n.is_empty()).ok_or_else(invalid)?;
            let location = Coordinates {
                latitude,
                longitude,
            };
            if !location.is_valid() {
                return Err(invalid());
            }
            Ok(Office {
                name: name.to_string(),
                location,
            })
        })
        .collect()
}

/// `employee_id[:department]` entries separated by `;`.
fn parse_employees(raw: &str) -> Vec<Employee> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (employee_id, department) = match entry.split_once(':') {
                Some((id, dept)) => (id.trim(), Some(dept.trim()).filter(|d| !d.is_empty())),
                None => (entry, None),
            };
            Employee {
                employee_id: employee_id.to_string(),
                name: employee_id.to_string(),
                department: department.map(str::to_string),
            }
        })
        .collect()
}
