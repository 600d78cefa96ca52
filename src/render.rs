use std::path::Path;

use tracing::{debug, info};

use crate::canvas::{Canvas, GnuplotCanvas, OutputFormat};
use crate::config::{RenderOptions, RendererConfig};
use crate::error::RenderError;
use crate::layout::FigureLayout;
use crate::limits::Limits;
use crate::sample::Sample;
use crate::series::MotionSeries;

/// Turns a sampled trajectory into a saved multi-panel figure.
///
/// The renderer keeps only its configuration. Every call validates its
/// inputs, derives jerk, lays out one panel per degree of freedom and hands
/// the result to a [`Canvas`].
#[derive(Clone, Debug)]
pub struct TrajectoryRenderer {
    config: RendererConfig,
}

impl TrajectoryRenderer {
    pub fn new(config: RendererConfig) -> Result<Self, RenderError> {
        if !config.delta_time.is_finite() || config.delta_time <= 0.0 {
            return Err(RenderError::InvalidCycleTime(config.delta_time));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Validates the inputs and builds the figure without drawing it.
    pub fn layout(
        &self,
        samples: &[Sample],
        limits: &Limits,
        degrees_of_freedom: usize,
        options: &RenderOptions,
    ) -> Result<FigureLayout, RenderError> {
        check_samples(samples, degrees_of_freedom)?;
        if let Some(offsets) = &options.time_offsets {
            if offsets.len() != samples.len() {
                return Err(RenderError::ShapeMismatch {
                    what: "time_offsets",
                    index: 0,
                    expected: samples.len(),
                    found: offsets.len(),
                });
            }
        }
        limits.validate(degrees_of_freedom, options.plot_jerk)?;

        info!(
            dofs = degrees_of_freedom,
            samples = samples.len(),
            "plotting trajectory"
        );
        debug!(control_cycle = self.config.delta_time);

        let series = MotionSeries::from_samples(samples, degrees_of_freedom, self.config.delta_time);
        debug!(rows = series.rows(), cols = series.dofs(), "stacked motion tables");

        let time = match &options.time_offsets {
            Some(offsets) => samples
                .iter()
                .zip(offsets)
                .map(|(s, offset)| s.time + offset)
                .collect(),
            None => samples.iter().map(|s| s.time).collect(),
        };

        let boundaries = samples
            .last()
            .and_then(|s| s.trajectory.as_ref())
            .map(|t| t.intermediate_durations.as_slice())
            .unwrap_or_default();
        if !boundaries.is_empty() {
            debug!(markers = boundaries.len(), "trajectory has phase boundaries");
        }

        Ok(FigureLayout::build(
            time,
            &series,
            limits,
            options,
            boundaries,
            self.config.dpi,
        ))
    }

    /// Renders to `output_path`. Inputs are checked before the output
    /// extension. On error nothing is written there.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        samples: &[Sample],
        limits: &Limits,
        degrees_of_freedom: usize,
        output_path: &Path,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let figure = self.layout(samples, limits, degrees_of_freedom, options)?;
        let format = OutputFormat::from_path(output_path)?;

        write_atomically(output_path, format, |staged| canvas.paint(&figure, staged, format))?;
        info!(path = %output_path.display(), "figure saved");

        if options.show {
            canvas.show(&figure)?;
        }
        Ok(())
    }
}

/// Renders with gnuplot in one call.
pub fn plot_trajectory(
    config: RendererConfig,
    samples: &[Sample],
    limits: &Limits,
    degrees_of_freedom: usize,
    output_path: &Path,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let renderer = TrajectoryRenderer::new(config)?;
    renderer.render(
        &mut GnuplotCanvas::new(),
        samples,
        limits,
        degrees_of_freedom,
        output_path,
        options,
    )
}

fn check_samples(samples: &[Sample], dofs: usize) -> Result<(), RenderError> {
    if samples.is_empty() {
        return Err(RenderError::EmptySequence);
    }
    if dofs == 0 {
        return Err(RenderError::ShapeMismatch {
            what: "degrees_of_freedom",
            index: 0,
            expected: 1,
            found: 0,
        });
    }
    for (index, sample) in samples.iter().enumerate() {
        let fields = [
            ("position", sample.position.len()),
            ("velocity", sample.velocity.len()),
            ("acceleration", sample.acceleration.len()),
        ];
        for (what, found) in fields {
            if found != dofs {
                return Err(RenderError::ShapeMismatch {
                    what,
                    index,
                    expected: dofs,
                    found,
                });
            }
        }
    }
    Ok(())
}

/// Paints into a sibling temp file and moves it over `output` only once
/// painting succeeded.
fn write_atomically<F>(output: &Path, format: OutputFormat, paint: F) -> Result<(), RenderError>
where
    F: FnOnce(&Path) -> Result<(), RenderError>,
{
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staged = tempfile::Builder::new()
        .prefix(".trajplot-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile_in(dir)?;
    paint(staged.path())?;
    staged.persist(output).map_err(|e| RenderError::Io(e.error))?;
    Ok(())
}
