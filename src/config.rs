use crate::theme::ThemeOverrides;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Dark-mode strategy for the `dark:` / `light:` variants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DarkMode {
    Strategy(DarkStrategy),
    Selectors(DarkSelectors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkStrategy {
    Class,
    Media,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DarkSelectors {
    #[serde(default = "default_light_selector")]
    pub light: String,
    #[serde(default = "default_dark_selector")]
    pub dark: String,
}

impl Default for DarkMode {
    fn default() -> Self {
        Self::Strategy(DarkStrategy::Class)
    }
}

/// Target unit for converted `rem` lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Rpx,
    Vw,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Prefix {
    One(String),
    Many(Vec<String>),
}

impl Prefix {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(prefix) => std::slice::from_ref(prefix),
            Self::Many(prefixes) => prefixes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PresetOptions {
    pub dark: DarkMode,
    pub attributify_pseudo: bool,
    pub variable_prefix: String,
    pub prefix: Option<Prefix>,
    pub preflight: bool,
    pub arbitrary_variants: bool,
    pub unit: Unit,
}

impl Default for PresetOptions {
    fn default() -> Self {
        Self {
            dark: DarkMode::default(),
            attributify_pseudo: false,
            variable_prefix: DEFAULT_VARIABLE_PREFIX.to_string(),
            prefix: None,
            preflight: true,
            arbitrary_variants: true,
            unit: Unit::default(),
        }
    }
}

pub const DEFAULT_VARIABLE_PREFIX: &str = "un-";

/// Contents of an `mpcss.toml`: preset options at the top level plus a
/// `[theme]` table of overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub options: PresetOptions,
    #[serde(default)]
    pub theme: ThemeOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn default_light_selector() -> String {
    ".light".to_string()
}

fn default_dark_selector() -> String {
    ".dark".to_string()
}
