use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::scoring::DEFAULT_FORM_WINDOW;

const DEFAULT_SCHEDULE_FILE: &str = "The Schedule/schedule.csv";
const DEFAULT_RESULTS_DIR: &str = "The Results";
const DEFAULT_PREDICTIONS_DIR: &str = "The Gambles";

/// Where a season's files live. Relative paths resolve against `data_dir`.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub data_dir: PathBuf,
    pub schedule_file: PathBuf,
    pub results_dir: PathBuf,
    pub predictions_dir: PathBuf,
    pub form_window: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            schedule_file: PathBuf::from(DEFAULT_SCHEDULE_FILE),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            predictions_dir: PathBuf::from(DEFAULT_PREDICTIONS_DIR),
            form_window: DEFAULT_FORM_WINDOW,
        }
    }
}

impl PoolConfig {
    /// Reads `.env.local`, then `.env`, then the process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");

        let defaults = Self::default();
        let form_window = match env::var("POOL_FORM_WINDOW") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .context("POOL_FORM_WINDOW must be a whole number")?,
            Err(_) => defaults.form_window,
        };

        Ok(Self {
            data_dir: env_path("POOL_DATA_DIR").unwrap_or(defaults.data_dir),
            schedule_file: env_path("POOL_SCHEDULE_FILE").unwrap_or(defaults.schedule_file),
            results_dir: env_path("POOL_RESULTS_DIR").unwrap_or(defaults.results_dir),
            predictions_dir: env_path("POOL_PREDICTIONS_DIR").unwrap_or(defaults.predictions_dir),
            form_window: form_window.max(1),
        })
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir.join(&self.schedule_file)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.data_dir.join(&self.results_dir)
    }

    pub fn predictions_dir(&self) -> PathBuf {
        self.data_dir.join(&self.predictions_dir)
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
}
