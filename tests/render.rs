// Integration tests for the render pipeline, driven through a canvas that
// records what it was asked to paint instead of spawning gnuplot.

use std::fs;
use std::path::{Path, PathBuf};

use trajectory_plot::{
    Bound, Canvas, FigureLayout, Limits, OutputFormat, Quantity, RenderError, RenderOptions,
    RendererConfig, Sample, TrajectoryRenderer,
};

#[derive(Default)]
struct RecordingCanvas {
    painted: Vec<(FigureLayout, PathBuf, OutputFormat)>,
    shown: usize,
    fail_paint: bool,
}

impl Canvas for RecordingCanvas {
    fn paint(&mut self, figure: &FigureLayout, path: &Path, format: OutputFormat) -> Result<(), RenderError> {
        fs::write(path, b"figure")?;
        if self.fail_paint {
            return Err(RenderError::Plot("backend exploded".to_string()));
        }
        self.painted.push((figure.clone(), path.to_path_buf(), format));
        Ok(())
    }

    fn show(&mut self, _figure: &FigureLayout) -> Result<(), RenderError> {
        self.shown += 1;
        Ok(())
    }
}

fn single_axis_samples() -> Vec<Sample> {
    let acc = [0.0, 2.0, 4.0, 2.0, 0.0];
    acc.iter()
        .enumerate()
        .map(|(i, &a)| Sample::new(i as f64, vec![i as f64 * 0.1], vec![i as f64 * 0.2], vec![a]))
        .collect()
}

fn two_axis_samples(n: usize) -> Vec<Sample> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.01;
            Sample::new(t, vec![t, -t], vec![1.0, -1.0], vec![0.0, 0.0])
        })
        .collect()
}

fn renderer(delta_time: f64) -> TrajectoryRenderer {
    TrajectoryRenderer::new(RendererConfig::new(delta_time)).unwrap()
}

#[test]
fn renders_jerk_with_zeroed_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("single.pdf");
    let limits = Limits::new(vec![1.0], vec![5.0]).with_max_jerk(vec![2.5]);
    let mut canvas = RecordingCanvas::default();

    renderer(1.0)
        .render(&mut canvas, &single_axis_samples(), &limits, 1, &out, &RenderOptions::default())
        .unwrap();

    assert!(out.exists());
    assert_eq!(canvas.painted.len(), 1);
    let (figure, staged, format) = &canvas.painted[0];
    assert_eq!(*format, OutputFormat::Pdf);
    assert_ne!(staged, &out);
    assert!(!staged.exists());

    let panel = &figure.panels[0];
    let jerk = panel.curve(Quantity::Jerk).unwrap();
    assert_eq!(jerk.values, vec![0.0, 2.0, 2.0, -2.0, 0.0]);
    // global max 4.0 -> 2.5 < 5.6 drawn; floor -2.5 > -2.8 drawn
    assert!(panel.guide(Quantity::Jerk, Bound::Upper).is_some());
    assert!(panel.guide(Quantity::Jerk, Bound::Lower).is_some());
    assert_eq!(canvas.shown, 0);
}

#[test]
fn time_offsets_shift_the_axis() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("offset.png");
    let limits = Limits::new(vec![1.0], vec![5.0]).with_max_jerk(vec![1.0]);
    let options = RenderOptions {
        time_offsets: Some(vec![10.0; 5]),
        ..RenderOptions::default()
    };
    let mut canvas = RecordingCanvas::default();

    renderer(1.0)
        .render(&mut canvas, &single_axis_samples(), &limits, 1, &out, &options)
        .unwrap();

    let figure = &canvas.painted[0].0;
    assert_eq!(figure.time, vec![10.0, 11.0, 12.0, 13.0, 14.0]);
    assert_eq!(figure.time_span(), (10.0, 14.0));
}

#[test]
fn mismatched_time_offsets_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("offset.pdf");
    let limits = Limits::new(vec![1.0], vec![5.0]).with_max_jerk(vec![1.0]);
    let options = RenderOptions {
        time_offsets: Some(vec![0.0; 3]),
        ..RenderOptions::default()
    };
    let err = renderer(1.0)
        .render(&mut RecordingCanvas::default(), &single_axis_samples(), &limits, 1, &out, &options)
        .unwrap_err();
    assert!(matches!(err, RenderError::ShapeMismatch { what: "time_offsets", .. }));
    assert!(!out.exists());
}

#[test]
fn empty_sequence_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.pdf");
    let limits = Limits::new(vec![1.0], vec![1.0]).with_max_jerk(vec![1.0]);
    let mut canvas = RecordingCanvas::default();

    let err = renderer(0.01)
        .render(&mut canvas, &[], &limits, 1, &out, &RenderOptions::default())
        .unwrap_err();

    assert!(matches!(err, RenderError::EmptySequence));
    assert!(canvas.painted.is_empty());
    assert!(!out.exists());
}

#[test]
fn arity_mismatch_is_a_shape_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("shape.pdf");
    let limits = Limits::new(vec![1.0; 3], vec![1.0; 3]).with_max_jerk(vec![1.0; 3]);

    let err = renderer(0.01)
        .render(
            &mut RecordingCanvas::default(),
            &two_axis_samples(4),
            &limits,
            3,
            &out,
            &RenderOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        RenderError::ShapeMismatch {
            what: "position",
            index: 0,
            expected: 3,
            found: 2,
        }
    ));
    assert!(!out.exists());
}

#[test]
fn missing_jerk_limit_only_matters_when_jerk_is_plotted() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nojerk.svg");
    let limits = Limits::new(vec![1.0, 1.0], vec![1.0, 1.0]);
    let samples = two_axis_samples(10);

    let err = renderer(0.01)
        .render(&mut RecordingCanvas::default(), &samples, &limits, 2, &out, &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::MissingLimits { field: "max_jerk", .. }));
    assert!(!out.exists());

    let options = RenderOptions {
        plot_jerk: false,
        ..RenderOptions::default()
    };
    let mut canvas = RecordingCanvas::default();
    renderer(0.01)
        .render(&mut canvas, &samples, &limits, 2, &out, &options)
        .unwrap();
    assert!(out.exists());
    let figure = &canvas.painted[0].0;
    for panel in &figure.panels {
        assert!(panel.curve(Quantity::Jerk).is_none());
        assert!(panel.guides.iter().all(|g| g.quantity != Quantity::Jerk));
    }
}

#[test]
fn failed_paint_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("keep.pdf");
    fs::write(&out, b"previous").unwrap();
    let limits = Limits::new(vec![1.0, 1.0], vec![1.0, 1.0]).with_max_jerk(vec![1.0, 1.0]);
    let mut canvas = RecordingCanvas {
        fail_paint: true,
        ..RecordingCanvas::default()
    };

    let err = renderer(0.01)
        .render(&mut canvas, &two_axis_samples(3), &limits, 2, &out, &RenderOptions::default())
        .unwrap_err();

    assert!(matches!(err, RenderError::Plot(_)));
    assert_eq!(fs::read(&out).unwrap(), b"previous");
    let leftovers = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn unsupported_extension_is_rejected_before_painting() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("figure.gif");
    let limits = Limits::new(vec![1.0, 1.0], vec![1.0, 1.0]).with_max_jerk(vec![1.0, 1.0]);
    let mut canvas = RecordingCanvas::default();

    let err = renderer(0.01)
        .render(&mut canvas, &two_axis_samples(3), &limits, 2, &out, &RenderOptions::default())
        .unwrap_err();

    assert!(matches!(err, RenderError::UnsupportedFormat(_)));
    assert!(canvas.painted.is_empty());
}

#[test]
fn input_errors_win_over_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("x.gif");
    let limits = Limits::new(vec![1.0], vec![1.0]).with_max_jerk(vec![1.0]);
    let mut canvas = RecordingCanvas::default();

    let err = renderer(0.01)
        .render(&mut canvas, &[], &limits, 1, &out, &RenderOptions::default())
        .unwrap_err();

    assert!(matches!(err, RenderError::EmptySequence));
    assert!(canvas.painted.is_empty());
    assert!(!out.exists());
}

#[test]
fn phase_markers_come_from_the_last_sample() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("phases.pdf");
    let limits = Limits::new(vec![1.0, 1.0], vec![1.0, 1.0]).with_max_jerk(vec![1.0, 1.0]);

    let mut few = two_axis_samples(5);
    let last = few.pop().unwrap().with_trajectory(vec![0.01, 0.02, 0.03]);
    few.push(last);
    let mut canvas = RecordingCanvas::default();
    renderer(0.01)
        .render(&mut canvas, &few, &limits, 2, &out, &RenderOptions::default())
        .unwrap();
    let figure = &canvas.painted[0].0;
    for panel in &figure.panels {
        assert_eq!(panel.markers.len(), 3);
        assert!(panel.markers.iter().all(|m| m.width == 1.0));
    }

    let mut many = two_axis_samples(5);
    let last = many.pop().unwrap().with_trajectory((0..25).map(|i| i as f64 * 0.001).collect());
    many.push(last);
    let mut canvas = RecordingCanvas::default();
    renderer(0.01)
        .render(&mut canvas, &many, &limits, 2, &out, &RenderOptions::default())
        .unwrap();
    let figure = &canvas.painted[0].0;
    assert!(figure.panels.iter().all(|p| p.markers.len() == 25));
    assert!(figure.panels[1].markers.iter().all(|m| m.width == 0.25));
}

#[test]
fn show_runs_after_saving() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("shown.pdf");
    let limits = Limits::new(vec![1.0, 1.0], vec![1.0, 1.0]).with_max_jerk(vec![1.0, 1.0]);
    let options = RenderOptions {
        show: true,
        ..RenderOptions::default()
    };
    let mut canvas = RecordingCanvas::default();

    renderer(0.01)
        .render(&mut canvas, &two_axis_samples(3), &limits, 2, &out, &options)
        .unwrap();

    assert_eq!(canvas.painted.len(), 1);
    assert_eq!(canvas.shown, 1);
    assert!(out.exists());
}

#[test]
fn figure_height_scales_with_dofs() {
    let limits = Limits::new(vec![1.0, 1.0], vec![1.0, 1.0]).with_max_jerk(vec![1.0, 1.0]);
    let figure = renderer(0.01)
        .layout(&two_axis_samples(3), &limits, 2, &RenderOptions::default())
        .unwrap();
    assert_eq!(figure.width_in, 8.0);
    assert_eq!(figure.height_in, 8.0);
    assert_eq!(figure.dpi, 120);
    assert_eq!(figure.panels.len(), 2);
}
