use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_yaml::from_reader;
use tracing::{debug, info, instrument};

use crate::{data::selection::Selection, error::ExplorerError, logging::DEFAULT_LOG_DIR};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExplorerConfig {
    #[serde(rename = "dataset-path")]
    pub dataset_path: PathBuf,
    #[serde(rename = "log-dir", default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(rename = "default-selection", default)]
    pub default_selection: Selection,
}

fn default_log_dir() -> String {
    DEFAULT_LOG_DIR.to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

const DEFAULT_DATA: &str = r#"
dataset-path: "data/nhanes_sample.csv"
log-dir: "logs"
host: "127.0.0.1"
port: 8080
default-selection:
  measurement: "BMI"
  group: "Gender"
  exclude-missing: true
  age-min: 0
  age-max: 80
"#;

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/nhanes_sample.csv"),
            log_dir: default_log_dir(),
            host: default_host(),
            port: default_port(),
            default_selection: Selection::default(),
        }
    }
}

impl ExplorerConfig {
    /// Reads the configuration from a YAML file.
    ///
    /// If the file does not exist, it creates a default configuration file.
    ///
    /// # Arguments
    ///
    /// * `filename` - Optional path to the configuration file.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `ExplorerConfig` on success or an `Error` on failure.
    #[instrument(level = "info", skip(filename))]
    pub fn read_config<P: AsRef<Path>>(filename: Option<P>) -> Result<Self, ExplorerError> {
        let path = filename
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(|| Path::new("config.yml").to_path_buf());

        info!(path = %path.display(), "Reading configuration");

        if !path.exists() {
            info!(
                "Config file does not exist. Creating default config at {}",
                path.display()
            );
            let mut file = File::create(&path)?;
            file.write_all(DEFAULT_DATA.as_bytes())?;
            debug!("Default configuration file created");
            return Ok(ExplorerConfig::default());
        }

        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let config: Self = from_reader(reader)?;
        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Checks that the default selection is one the dashboard could offer.
    pub fn validate(&self) -> Result<(), ExplorerError> {
        self.default_selection.validate()
    }

    /// Address the HTTP server binds to.
    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
