use clap::Parser;
use skimap::config::{
    ENV_DATA, ENV_LAYOUT, ENV_LOG, ENV_LOG_LEVEL, ENV_MONTH, ENV_SEED, ENV_WEEK,
};

#[derive(Debug, Parser)]
#[command(name = "skimap", version, about = "French ski resort map and bluebird days")]
pub struct CliArgs {
    /// Print the bluebird ranking and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless ranking as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Bluebird CSV to load instead of the built-in table
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Section layout: compact or extended
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<String>,

    /// Month for the headless ranking (e.g. january, feb)
    #[arg(long, value_name = "MONTH")]
    pub month: Option<String>,

    /// Week for the headless ranking (1-4)
    #[arg(long, value_name = "WEEK")]
    pub week: Option<String>,

    /// Seed for synthetic fallback data and snowfall
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Log file used while the interactive UI is running
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    /// Flags win over the environment: they are written back into it before
    /// the configuration is read.
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.data {
            std::env::set_var(ENV_DATA, path);
        }
        if let Some(layout) = &self.layout {
            std::env::set_var(ENV_LAYOUT, layout);
        }
        if let Some(month) = &self.month {
            std::env::set_var(ENV_MONTH, month);
        }
        if let Some(week) = &self.week {
            std::env::set_var(ENV_WEEK, week);
        }
        if let Some(seed) = self.seed {
            std::env::set_var(ENV_SEED, seed.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(ENV_LOG, path);
        }
        if self.debug {
            std::env::set_var(ENV_LOG_LEVEL, "debug");
        }
    }
}
