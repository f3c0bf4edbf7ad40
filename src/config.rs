extern crate notify;

use crate::car::CarConfig;
use crate::wheel_trail::TrailConfig;
use log::info;
use notify::{DebouncedEvent, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub car: CarConfig,
    pub trail: TrailConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    SerdeError(serde_json::Error),
    NotifyError(notify::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}
impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::SerdeError(e)
    }
}
impl From<notify::Error> for ConfigError {
    fn from(e: notify::Error) -> Self {
        ConfigError::NotifyError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "config io error: {}", e),
            ConfigError::SerdeError(e) => write!(f, "malformed config: {}", e),
            ConfigError::NotifyError(e) => write!(f, "cannot watch config: {}", e),
            ConfigError::Invalid(what) => write!(f, "invalid config: {}", what),
        }
    }
}

impl std::error::Error for ConfigError {}

impl SandboxConfig {
    pub fn from_json_str(json: &str) -> Result<SandboxConfig, ConfigError> {
        let config: SandboxConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<SandboxConfig, ConfigError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: SandboxConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let car = &self.car;
        let trail = &self.trail;
        let positive = [
            ("car.max_speed", car.max_speed),
            ("car.acceleration", car.acceleration),
            ("car.deceleration", car.deceleration),
            ("car.max_delta", car.max_delta),
            ("trail.trail_width", trail.trail_width),
            ("trail.fade_interval", trail.fade_interval),
        ];
        for (name, value) in positive.iter() {
            if !(*value > 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !(car.turn_speed >= 0.0) || !(car.speed_epsilon >= 0.0) {
            return Err(ConfigError::Invalid(
                "car.turn_speed and car.speed_epsilon must not be negative".to_owned(),
            ));
        }
        if !(trail.min_point_spacing >= 0.0) {
            return Err(ConfigError::Invalid(
                "trail.min_point_spacing must not be negative".to_owned(),
            ));
        }
        if trail.max_points < 2 {
            return Err(ConfigError::Invalid(format!(
                "trail.max_points must be at least 2, got {}",
                trail.max_points
            )));
        }
        Ok(())
    }
}

/// Reports writes to a config file, debounced by `notify`.
pub struct ConfigWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
    events: Receiver<DebouncedEvent>,
}

impl ConfigWatcher {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<ConfigWatcher, ConfigError> {
        let (tx, rx) = channel();
        let mut watcher: RecommendedWatcher = Watcher::new(tx, Duration::from_secs_f32(0.2))?;
        watcher.watch(path.as_ref(), RecursiveMode::NonRecursive)?;

        Ok(ConfigWatcher {
            path: path.as_ref().to_owned(),
            _watcher: watcher,
            events: rx,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never blocks. Returns the reloaded config if the file changed since
    /// the last poll.
    pub fn poll(&self) -> Option<Result<SandboxConfig, ConfigError>> {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            match event {
                DebouncedEvent::Write(_) | DebouncedEvent::Create(_) => changed = true,
                DebouncedEvent::Rename(_, to) if to == self.path => changed = true,
                DebouncedEvent::Error(e, _) => return Some(Err(e.into())),
                _ => {}
            }
        }

        if changed {
            Some(SandboxConfig::load_json(&self.path))
        } else {
            None
        }
    }
}
