use crate::language::Dataset;
use crate::locale::Locale;
use crate::round::RoundSettings;
use crate::timer::{DEFAULT_ROUND_SECS, DEFAULT_TICK_INTERVAL};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub round_secs: f64,
    pub tick_interval_ms: u64,
    pub dataset: Dataset,
    pub locale: Locale,
    pub base_font_size: u16,
    pub safety_padding: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_secs: DEFAULT_ROUND_SECS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            dataset: Dataset::NounsTh,
            locale: Locale::Th,
            base_font_size: 4,
            safety_padding: 2,
        }
    }
}

impl Config {
    /// Replace values the game cannot run with
    pub fn validate(mut self) -> Self {
        let defaults = Config::default();
        if !self.round_secs.is_finite() || self.round_secs <= 0.0 {
            warn!(
                "config: round_secs {} is not usable, using {}",
                self.round_secs, defaults.round_secs
            );
            self.round_secs = defaults.round_secs;
        }
        if self.tick_interval_ms == 0 {
            warn!(
                "config: tick_interval_ms 0 is not usable, using {}",
                defaults.tick_interval_ms
            );
            self.tick_interval_ms = defaults.tick_interval_ms;
        }
        self.base_font_size = self.base_font_size.max(1);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn round_settings(&self) -> RoundSettings {
        RoundSettings {
            round_secs: self.round_secs,
            tick_interval: self.tick_interval(),
            base_font_size: self.base_font_size,
            safety_padding: f64::from(self.safety_padding),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "blurt") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("blurt_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg.validate(),
                Err(err) => warn!(
                    "config: ignoring unreadable {}: {err}",
                    self.path.display()
                ),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
