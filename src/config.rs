use derive_more::{Deref, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use palette::rgb::FromHexError;
use ringmath::geometry::DEFAULT_SCALE_WIDTH;
use ringmath::{
    AngleRange, GaugeConfig, GaugeState, GeometryError, OffScalePolicy, RadiusParameters,
    ValueFormat,
};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// An sRGB color written as `#rrggbb` (or `#rgb`).
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GaugeSection {
    pub value: f64,
    pub step_size: f64,
    pub min_angle: i32,
    pub max_angle: i32,
    pub scale_width: f64,
    pub interactive: bool,
    pub value_format: ValueFormat,
    pub off_scale: OffScalePolicy,
}

impl Default for GaugeSection {
    fn default() -> Self {
        let angles = AngleRange::default();
        Self {
            value: 0.0,
            step_size: 0.0,
            min_angle: angles.min,
            max_angle: angles.max,
            scale_width: DEFAULT_SCALE_WIDTH,
            interactive: false,
            value_format: ValueFormat::default(),
            off_scale: OffScalePolicy::default(),
        }
    }
}

impl GaugeSection {
    pub fn radius(&self) -> RadiusParameters {
        RadiusParameters::new(self.scale_width, 0.0)
    }

    pub fn gauge_config(&self) -> GaugeConfig {
        GaugeConfig {
            step_size: self.step_size,
            angles: AngleRange::new(self.min_angle, self.max_angle),
            radius: self.radius(),
            off_scale: self.off_scale,
            interactive: self.interactive,
            value_format: self.value_format,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub scale: HexColor,
    pub trail: HexColor,
    pub value: HexColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            scale: HexColor::rgb(0xa9, 0xa9, 0xa9),
            trail: HexColor::rgb(0xff, 0xa5, 0x00),
            value: HexColor::rgb(0xff, 0xff, 0xff),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gauge: GaugeSection,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Config {
    /// Rejects scale widths that leave no ring to draw. The geometry engine
    /// itself accepts them and renders a degenerate ring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(self.gauge.radius().validate()?)
    }

    pub fn gauge_state(&self) -> GaugeState {
        GaugeState::new(self.gauge.gauge_config(), self.gauge.value)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid gauge geometry: {0}")]
    Geometry(#[from] GeometryError),
}

pub const ENV_PREFIX: &str = "PERCENT_RING";

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "percent-ring", "percent-ring")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Loads `path` (or the default location), falling back to the built-in
/// defaults when the file is missing or broken.
pub fn load_or_default(path: Option<&Path>) -> Config {
    let result = match path {
        Some(p) => load_config_from(p),
        None => load_config(),
    };

    match result {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
