//! Renderer configuration and per-call plot options, loadable from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fixed parameters of a renderer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RendererConfig {
    /// Control cycle duration in seconds, used to derive jerk.
    #[serde(default = "default_delta_time")]
    pub delta_time: f64,
    /// Resolution used when the output is a raster image.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            delta_time: default_delta_time(),
            dpi: default_dpi(),
        }
    }
}

impl RendererConfig {
    pub fn new(delta_time: f64) -> Self {
        Self {
            delta_time,
            ..Self::default()
        }
    }
}

/// Options recognized by a single render call.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RenderOptions {
    /// Display interactively after saving, blocking until the window closes.
    #[serde(default)]
    pub show: bool,
    #[serde(default = "default_true")]
    pub plot_acceleration: bool,
    #[serde(default = "default_true")]
    pub plot_jerk: bool,
    /// Added sample-wise to the time axis; must match the sample count.
    #[serde(default)]
    pub time_offsets: Option<Vec<f64>>,
    /// Applied to the first panel.
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show: false,
            plot_acceleration: true,
            plot_jerk: true,
            time_offsets: None,
            title: None,
        }
    }
}

/// On-disk configuration for the command-line front end.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PlotConfig {
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub options: RenderOptions,
}

fn default_delta_time() -> f64 {
    0.01
}
fn default_dpi() -> u32 {
    120
}
fn default_true() -> bool {
    true
}

pub fn parse_config(text: &str) -> Result<PlotConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlotConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}
