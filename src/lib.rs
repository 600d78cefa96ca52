//! # trajectory_plot
//!
//! A small library for visualizing sampled multi-axis motion trajectories in Rust.
//!
//! This library provides the following modules:
//! - `sample` for the per-cycle snapshots produced by a trajectory generator.
//! - `limits` for the per-axis kinematic bounds drawn as guide lines.
//! - `series` for stacking samples into tables and deriving jerk.
//! - `layout` for building the figure object and deciding which limit lines to draw.
//! - `canvas` for painting a figure, with a gnuplot backend.
//! - `render` for the end-to-end render call.
//! - `config` for renderer settings and plot options.
//!
//! Author: Anton Khrustalev, creapunk

pub mod canvas;
pub mod config;
pub mod error;
pub mod layout;
pub mod limits;
pub mod render;
pub mod sample;
pub mod series;

// Re-export main structs for convenience:
pub use canvas::{Canvas, GnuplotCanvas, OutputFormat};
pub use config::{load_config, PlotConfig, RenderOptions, RendererConfig};
pub use error::{ConfigError, RenderError};
pub use layout::{Bound, FigureLayout, Panel, Quantity};
pub use limits::Limits;
pub use render::{plot_trajectory, TrajectoryRenderer};
pub use sample::{Recording, Sample, Trajectory};
pub use series::{derive_jerk, MotionSeries, SeriesTable};
