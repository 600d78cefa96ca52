//! The explicit figure object a render call builds and hands to a [`Canvas`].
//!
//! A [`FigureLayout`] is pure data: one [`Panel`] per degree of freedom with
//! its curves, the limit guide lines that survived the declutter rule, and
//! the phase-boundary markers. Nothing here talks to a plotting library.
//!
//! [`Canvas`]: crate::canvas::Canvas

use tracing::debug;

use crate::config::RenderOptions;
use crate::limits::Limits;
use crate::series::MotionSeries;

/// A limit is only drawn when it lies within this factor of the observed extreme.
pub const LIMIT_SCALE: f64 = 1.4;

/// Markers are thinned once there are more than this many.
pub const MARKER_THIN_THRESHOLD: usize = 20;

pub const FIGURE_WIDTH_IN: f64 = 8.0;

/// Height grows with the panel count so every panel keeps the same aspect.
pub fn figure_height_in(dofs: usize) -> f64 {
    2.0 + 3.0 * dofs as f64
}

/// Whether an upper limit is close enough to the data to be worth a line.
pub fn upper_limit_visible(limit: f64, global_max: f64) -> bool {
    limit < LIMIT_SCALE * global_max
}

/// Whether a lower limit is close enough to the data to be worth a line.
pub fn lower_limit_visible(limit: f64, global_min: f64) -> bool {
    limit > LIMIT_SCALE * global_min
}

pub fn marker_width(count: usize) -> f64 {
    if count > MARKER_THIN_THRESHOLD {
        0.25
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    Position,
    Velocity,
    Acceleration,
    Jerk,
}

impl Quantity {
    pub fn label(self) -> &'static str {
        match self {
            Quantity::Position => "Position",
            Quantity::Velocity => "Velocity",
            Quantity::Acceleration => "Acceleration",
            Quantity::Jerk => "Jerk",
        }
    }

    fn curve_color(self) -> &'static str {
        match self {
            Quantity::Position => "#1f77b4",
            Quantity::Velocity => "#ff7f0e",
            Quantity::Acceleration => "#2ca02c",
            Quantity::Jerk => "#d62728",
        }
    }

    fn guide_color(self) -> &'static str {
        match self {
            Quantity::Position => "grey",
            Quantity::Velocity => "orange",
            Quantity::Acceleration => "green",
            Quantity::Jerk => "red",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Upper,
    Lower,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub quantity: Quantity,
    pub caption: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// A dashed horizontal line across the whole time axis.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideLine {
    pub quantity: Quantity,
    pub bound: Bound,
    pub value: f64,
    pub color: &'static str,
    pub width: f64,
}

/// A dashed vertical line at a phase boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseMarker {
    pub time: f64,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub dof: usize,
    pub title: Option<String>,
    pub y_label: String,
    pub x_label: Option<String>,
    pub curves: Vec<Curve>,
    pub guides: Vec<GuideLine>,
    pub markers: Vec<PhaseMarker>,
    pub global_min: f64,
    pub global_max: f64,
}

impl Panel {
    /// Finds a guide line by what it bounds.
    pub fn guide(&self, quantity: Quantity, bound: Bound) -> Option<&GuideLine> {
        self.guides
            .iter()
            .find(|g| g.quantity == quantity && g.bound == bound)
    }

    pub fn curve(&self, quantity: Quantity) -> Option<&Curve> {
        self.curves.iter().find(|c| c.quantity == quantity)
    }

    /// Vertical extent for phase markers: the data plus every drawn guide
    /// line, never degenerate.
    pub fn marker_span(&self) -> (f64, f64) {
        let (low, high) = self
            .guides
            .iter()
            .fold((self.global_min, self.global_max), |(low, high), g| {
                (low.min(g.value), high.max(g.value))
            });
        if high > low {
            (low, high)
        } else {
            (low - 1.0, high + 1.0)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FigureLayout {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub time: Vec<f64>,
    pub panels: Vec<Panel>,
}

impl FigureLayout {
    /// Lays out one panel per dof. Limits must already be validated for
    /// `series.dofs()`.
    pub fn build(
        time: Vec<f64>,
        series: &MotionSeries,
        limits: &Limits,
        options: &RenderOptions,
        phase_boundaries: &[f64],
        dpi: u32,
    ) -> Self {
        let dofs = series.dofs();
        let width = marker_width(phase_boundaries.len());
        let panels = (0..dofs)
            .map(|dof| {
                let mut panel = build_panel(dof, series, limits, options);
                panel.markers = phase_boundaries
                    .iter()
                    .map(|&t| PhaseMarker { time: t, width })
                    .collect();
                panel
            })
            .collect::<Vec<_>>();

        let mut layout = Self {
            width_in: FIGURE_WIDTH_IN,
            height_in: figure_height_in(dofs),
            dpi,
            time,
            panels,
        };
        if let Some(first) = layout.panels.first_mut() {
            first.title = options.title.clone();
        }
        if let Some(last) = layout.panels.last_mut() {
            last.x_label = Some("t".to_string());
        }
        layout
    }

    pub fn time_span(&self) -> (f64, f64) {
        let first = self.time.first().copied().unwrap_or(0.0);
        let last = self.time.last().copied().unwrap_or(first);
        (first, last)
    }
}

fn build_panel(dof: usize, series: &MotionSeries, limits: &Limits, options: &RenderOptions) -> Panel {
    let mut global_max = series
        .position
        .column_max(dof)
        .max(series.velocity.column_max(dof))
        .max(series.acceleration.column_max(dof));
    let mut global_min = series
        .position
        .column_min(dof)
        .min(series.velocity.column_min(dof))
        .min(series.acceleration.column_min(dof));
    if options.plot_jerk {
        global_max = global_max.max(series.jerk.column_max(dof));
        global_min = global_min.min(series.jerk.column_min(dof));
    }

    let n = dof + 1;
    let curve = |quantity: Quantity, values: Vec<f64>| Curve {
        quantity,
        caption: format!("{} {}", quantity.label(), n),
        color: quantity.curve_color(),
        values,
    };
    let mut curves = vec![
        curve(Quantity::Position, series.position.column(dof)),
        curve(Quantity::Velocity, series.velocity.column(dof)),
    ];
    if options.plot_acceleration {
        curves.push(curve(Quantity::Acceleration, series.acceleration.column(dof)));
    }
    if options.plot_jerk {
        curves.push(curve(Quantity::Jerk, series.jerk.column(dof)));
    }

    let mut guides = Vec::new();
    let mut guide = |quantity: Quantity, bound: Bound, value: Option<f64>, width: f64| {
        let Some(value) = value else { return };
        let visible = match bound {
            Bound::Upper => upper_limit_visible(value, global_max),
            Bound::Lower => lower_limit_visible(value, global_min),
        };
        if visible {
            debug!(dof = n, ?quantity, ?bound, value, "drawing limit line");
            guides.push(GuideLine {
                quantity,
                bound,
                value,
                color: quantity.guide_color(),
                width,
            });
        }
    };

    guide(Quantity::Position, Bound::Lower, limits.min_position(dof), 1.1);
    guide(Quantity::Position, Bound::Upper, limits.max_position(dof), 1.1);
    guide(Quantity::Velocity, Bound::Upper, limits.max_velocity(dof), 3.1);
    guide(Quantity::Velocity, Bound::Lower, limits.min_velocity(dof), 1.1);
    if options.plot_acceleration {
        guide(Quantity::Acceleration, Bound::Upper, limits.max_acceleration(dof), 1.1);
        guide(Quantity::Acceleration, Bound::Lower, limits.min_acceleration(dof), 1.1);
    }
    if options.plot_jerk {
        guide(Quantity::Jerk, Bound::Upper, limits.max_jerk(dof), 1.1);
        guide(Quantity::Jerk, Bound::Lower, limits.min_jerk(dof), 1.1);
    }

    Panel {
        dof,
        title: None,
        y_label: format!("DoF {}", n),
        x_label: None,
        curves,
        guides,
        markers: Vec::new(),
        global_min,
        global_max,
    }
}
