//! Runtime configuration from the environment (and `.env`).

use crate::domain::{Month, Week};
use crate::scroll::{ScrollConfig, ScrollConfigError};
use log::LevelFilter;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_DATA: &str = "SKIMAP_DATA";
pub const ENV_LAYOUT: &str = "SKIMAP_LAYOUT";
pub const ENV_SENSITIVITY: &str = "SKIMAP_SENSITIVITY";
pub const ENV_COMMIT_THRESHOLD: &str = "SKIMAP_COMMIT_THRESHOLD";
pub const ENV_SEED: &str = "SKIMAP_SEED";
pub const ENV_LOG: &str = "SKIMAP_LOG";
pub const ENV_LOG_LEVEL: &str = "SKIMAP_LOG_LEVEL";
pub const ENV_MONTH: &str = "SKIMAP_MONTH";
pub const ENV_WEEK: &str = "SKIMAP_WEEK";

const DEFAULT_LOG_FILE: &str = "skimap.log";
const DEFAULT_SEED: u64 = 2024;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("scroll tuning rejected: {0}")]
    Scroll(#[from] ScrollConfigError),
}

/// Section arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewLayout {
    /// Home and Map; the chart is an overlay revealed by sub-scrolling.
    #[default]
    Compact,
    /// Home, Map and a standalone chart section.
    Extended,
}

impl ViewLayout {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "extended" => Some(Self::Extended),
            _ => None,
        }
    }

    pub const fn section_count(self) -> usize {
        match self {
            Self::Compact => 2,
            Self::Extended => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Extended => "extended",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// CSV file to load; `None` uses the built-in table.
    pub data_path: Option<PathBuf>,
    pub layout: ViewLayout,
    pub scroll: ScrollConfig,
    /// Seeds the synthetic fallback dataset and the snowfall.
    pub seed: u64,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub month: Month,
    pub week: Week,
    /// Values that were present but unusable; defaults were used instead.
    pub warnings: Vec<ConfigError>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            layout: ViewLayout::default(),
            scroll: ScrollConfig::default(),
            seed: DEFAULT_SEED,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: LevelFilter::Info,
            month: Month::November,
            week: Week::First,
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        let read = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = read(ENV_DATA) {
            config.data_path = Some(PathBuf::from(path));
        }
        if let Some(path) = read(ENV_LOG) {
            config.log_file = PathBuf::from(path);
        }

        let layout = read(ENV_LAYOUT);
        let sensitivity = read(ENV_SENSITIVITY);
        let commit = read(ENV_COMMIT_THRESHOLD);
        let seed = read(ENV_SEED);
        let level = read(ENV_LOG_LEVEL);
        let month = read(ENV_MONTH);
        let week = read(ENV_WEEK);

        if let Some(layout) =
            parse_with(ENV_LAYOUT, layout, "layout", ViewLayout::parse, &mut warnings)
        {
            config.layout = layout;
        }
        if let Some(seed) =
            parse_with(ENV_SEED, seed, "seed", |v| v.trim().parse().ok(), &mut warnings)
        {
            config.seed = seed;
        }
        if let Some(level) = parse_with(
            ENV_LOG_LEVEL,
            level,
            "log level",
            |v| v.trim().parse().ok(),
            &mut warnings,
        ) {
            config.log_level = level;
        }
        if let Some(month) = parse_with(ENV_MONTH, month, "month", Month::parse, &mut warnings) {
            config.month = month;
        }
        if let Some(week) = parse_with(ENV_WEEK, week, "week", Week::parse, &mut warnings) {
            config.week = week;
        }

        let mut scroll = ScrollConfig {
            section_count: config.layout.section_count(),
            ..ScrollConfig::default()
        };
        if let Some(value) =
            parse_with(ENV_SENSITIVITY, sensitivity, "number", parse_finite, &mut warnings)
        {
            scroll.sensitivity = value;
        }
        if let Some(value) =
            parse_with(ENV_COMMIT_THRESHOLD, commit, "number", parse_finite, &mut warnings)
        {
            scroll.commit_threshold = value;
        }
        config.scroll = match scroll.validate() {
            Ok(()) => scroll,
            Err(err) => {
                warnings.push(err.into());
                ScrollConfig {
                    section_count: config.layout.section_count(),
                    ..ScrollConfig::default()
                }
            }
        };

        config.warnings = warnings;
        config
    }
}

fn parse_with<T>(
    key: &'static str,
    raw: Option<String>,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
    warnings: &mut Vec<ConfigError>,
) -> Option<T> {
    let raw = raw?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        warnings.push(ConfigError::Invalid {
            key,
            value: raw,
            expected,
        });
    }
    parsed
}

fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
