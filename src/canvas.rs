//! Drawing surfaces for a [`FigureLayout`].

use std::fs;
use std::path::Path;

use gnuplot::Coordinate::Graph;
use gnuplot::DashType::Dash;
use gnuplot::{AxesCommon, Caption, Color, Figure, LineStyle, LineWidth};
use tracing::debug;

use crate::error::RenderError;
use crate::layout::FigureLayout;

/// File formats a figure can be saved as, chosen by path extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Png,
    Svg,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(RenderError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Something a figure can be painted on.
///
/// The renderer owns the layout; a canvas only turns it into pixels or
/// vector output, so no plotting state survives between render calls.
pub trait Canvas {
    /// Writes `figure` to `path` in `format`. The file must be complete
    /// when this returns.
    fn paint(&mut self, figure: &FigureLayout, path: &Path, format: OutputFormat) -> Result<(), RenderError>;

    /// Displays `figure` and blocks until the viewer is dismissed.
    fn show(&mut self, figure: &FigureLayout) -> Result<(), RenderError>;
}

/// Paints figures through a gnuplot child process.
#[derive(Debug, Default)]
pub struct GnuplotCanvas;

impl GnuplotCanvas {
    pub fn new() -> Self {
        Self
    }

    fn compose(figure: &FigureLayout) -> Figure {
        let mut fg = Figure::new();
        fg.set_multiplot_layout(figure.panels.len(), 1);

        let (t_first, t_last) = figure.time_span();
        for panel in &figure.panels {
            let axes = fg.axes2d();
            if let Some(title) = &panel.title {
                axes.set_title(title, &[]);
            }
            axes.set_y_label(&panel.y_label, &[]);
            if let Some(label) = &panel.x_label {
                axes.set_x_label(label, &[]);
            }
            axes.set_x_grid(true);
            axes.set_y_grid(true);
            axes.set_legend(Graph(1.0), Graph(1.0), &[], &[]);

            for curve in &panel.curves {
                axes.lines(
                    &figure.time,
                    &curve.values,
                    &[Caption(curve.caption.as_str()), Color(curve.color.into())],
                );
            }
            for guide in &panel.guides {
                axes.lines(
                    &[t_first, t_last],
                    &[guide.value, guide.value],
                    &[Color(guide.color.into()), LineStyle(Dash), LineWidth(guide.width)],
                );
            }
            let (low, high) = panel.marker_span();
            for marker in &panel.markers {
                axes.lines(
                    &[marker.time, marker.time],
                    &[low, high],
                    &[Color("black".into()), LineStyle(Dash), LineWidth(marker.width)],
                );
            }
        }
        fg
    }
}

impl Canvas for GnuplotCanvas {
    fn paint(&mut self, figure: &FigureLayout, path: &Path, format: OutputFormat) -> Result<(), RenderError> {
        let mut fg = Self::compose(figure);
        let width_in = figure.width_in as f32;
        let height_in = figure.height_in as f32;
        let width_px = (figure.width_in * figure.dpi as f64).round() as u32;
        let height_px = (figure.height_in * figure.dpi as f64).round() as u32;

        debug!(?format, path = %path.display(), "saving figure");
        let saved = match format {
            OutputFormat::Pdf => fg.save_to_pdf(path, width_in, height_in),
            OutputFormat::Png => fg.save_to_png(path, width_px, height_px),
            OutputFormat::Svg => fg.save_to_svg(path, width_px, height_px),
        };
        saved.map_err(|e| RenderError::Plot(e.to_string()))?;
        // Waits for gnuplot to flush the output file.
        fg.close();

        if fs::metadata(path)?.len() == 0 {
            return Err(RenderError::Plot(format!("gnuplot wrote nothing to {}", path.display())));
        }
        Ok(())
    }

    fn show(&mut self, figure: &FigureLayout) -> Result<(), RenderError> {
        let mut fg = Self::compose(figure);
        fg.set_post_commands("pause mouse close");
        fg.show().map_err(|e| RenderError::Plot(e.to_string()))?;
        fg.close();
        Ok(())
    }
}
