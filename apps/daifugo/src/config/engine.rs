//! Environment-driven engine settings.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::domain::rules::{DEFAULT_JOKERS, DEFAULT_MAX_MEMBERS, MIN_PLAYERS};

pub const JOKERS_VAR: &str = "DAIFUGO_JOKERS";
pub const MAX_MEMBERS_VAR: &str = "DAIFUGO_MAX_MEMBERS";
pub const ROOM_TTL_VAR: &str = "DAIFUGO_ROOM_TTL_SECS";
pub const REAPER_INTERVAL_VAR: &str = "DAIFUGO_REAPER_INTERVAL_SECS";
pub const EVENT_BUFFER_VAR: &str = "DAIFUGO_EVENT_BUFFER";

const MAX_JOKERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("{var}: {value} is outside {min}..={max}")]
    OutOfRange {
        var: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Jokers added to each freshly dealt deck.
    pub joker_count: usize,
    /// Room capacity.
    pub max_members: usize,
    /// Idle time after which the reaper deletes a room.
    pub room_ttl: Duration,
    pub reaper_interval: Duration,
    /// Per-room notification buffer; slower subscribers lag and skip.
    pub event_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            joker_count: DEFAULT_JOKERS,
            max_members: DEFAULT_MAX_MEMBERS,
            room_ttl: Duration::from_secs(30 * 60),
            reaper_interval: Duration::from_secs(60),
            event_buffer: 32,
        }
    }
}

impl EngineConfig {
    /// Read settings from the environment. Unset variables keep their
    /// defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let joker_count = ranged(JOKERS_VAR, defaults.joker_count, 0, MAX_JOKERS)?;
        let max_members = ranged(
            MAX_MEMBERS_VAR,
            defaults.max_members,
            MIN_PLAYERS,
            DEFAULT_MAX_MEMBERS,
        )?;
        let room_ttl = var_or(ROOM_TTL_VAR, defaults.room_ttl.as_secs())?;
        let reaper_interval = ranged(
            REAPER_INTERVAL_VAR,
            defaults.reaper_interval.as_secs(),
            1,
            u64::MAX,
        )?;
        let event_buffer = ranged(EVENT_BUFFER_VAR, defaults.event_buffer, 1, usize::MAX)?;

        Ok(Self {
            joker_count,
            max_members,
            room_ttl: Duration::from_secs(room_ttl),
            reaper_interval: Duration::from_secs(reaper_interval),
            event_buffer,
        })
    }
}

fn var_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

fn ranged<T>(var: &'static str, default: T, min: T, max: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Copy + TryInto<u64>,
{
    let value = var_or(var, default)?;
    if value < min || value > max {
        let wide = |v: T| v.try_into().unwrap_or(u64::MAX);
        return Err(ConfigError::OutOfRange {
            var,
            value: wide(value),
            min: wide(min),
            max: wide(max),
        });
    }
    Ok(value)
}
