use std::path::PathBuf;

use clap::Parser;

use crate::data::{field::Field, selection::Selection};

/// Prints the dashboard panels for one selection.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "HEALTH_EXPLORER_CONFIG", default_value = "config.yml")]
    pub config: PathBuf,
    /// Numeric column to summarise (defaults to the configured selection)
    #[arg(short, long)]
    pub measurement: Option<Field>,
    /// Categorical column to group by (defaults to the configured selection)
    #[arg(short, long)]
    pub group: Option<Field>,
    /// Keep rows missing the measurement or group value
    #[arg(long, conflicts_with = "exclude_missing")]
    pub include_missing: bool,
    /// Drop rows missing the measurement or group value
    #[arg(long)]
    pub exclude_missing: bool,
    /// Lowest age to include
    #[arg(long)]
    pub age_min: Option<f64>,
    /// Highest age to include
    #[arg(long)]
    pub age_max: Option<f64>,
    /// Number of table rows to print
    #[arg(short, long, default_value_t = 20)]
    pub rows: usize,
}

impl Args {
    /// Overlays the command line onto the configured default selection.
    pub fn selection(&self, defaults: &Selection) -> Selection {
        Selection {
            measurement: self.measurement.unwrap_or(defaults.measurement),
            group: self.group.unwrap_or(defaults.group),
            exclude_missing: self.missing_override().unwrap_or(defaults.exclude_missing),
            age_min: self.age_min.unwrap_or(defaults.age_min),
            age_max: self.age_max.unwrap_or(defaults.age_max),
        }
    }

    // Neither flag leaves the configured choice in place.
    fn missing_override(&self) -> Option<bool> {
        match (self.include_missing, self.exclude_missing) {
            (true, _) => Some(false),
            (_, true) => Some(true),
            _ => None,
        }
    }
}
