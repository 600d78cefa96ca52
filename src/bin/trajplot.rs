use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use trajectory_plot::{load_config, plot_trajectory, PlotConfig, Recording};

/// Plot a recorded trajectory: one panel per degree of freedom.
#[derive(Debug, Parser)]
#[command(name = "trajplot", version, about)]
struct Args {
    /// Recording to plot (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Output figure; the extension selects pdf, png or svg
    #[arg(short, long)]
    output: PathBuf,

    /// Optional TOML configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Control cycle in seconds, overrides the recording and config
    #[arg(long)]
    delta_time: Option<f64>,

    /// Figure title
    #[arg(long)]
    title: Option<String>,

    /// Leave the acceleration curve out
    #[arg(long)]
    no_acceleration: bool,

    /// Leave the jerk curve out
    #[arg(long)]
    no_jerk: bool,

    /// Open the figure in a window after saving
    #[arg(long)]
    show: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => PlotConfig::default(),
    };

    tracing::info!("Loading recording from: {}", args.input.display());
    let recording = Recording::load(&args.input)?;
    let config = apply_overrides(&args, &recording, config);

    plot_trajectory(
        config.renderer,
        &recording.samples,
        &recording.limits,
        recording.degrees_of_freedom,
        &args.output,
        &config.options,
    )?;
    Ok(())
}

/// Layers the recording and command-line flags over the loaded config.
/// `--delta-time` beats the recording, which beats `[renderer]`.
fn apply_overrides(args: &Args, recording: &Recording, mut config: PlotConfig) -> PlotConfig {
    if let Some(dt) = args.delta_time.or(recording.delta_time) {
        config.renderer.delta_time = dt;
    }
    if let Some(title) = &args.title {
        config.options.title = Some(title.clone());
    }
    if args.no_acceleration {
        config.options.plot_acceleration = false;
    }
    if args.no_jerk {
        config.options.plot_jerk = false;
    }
    if args.show {
        config.options.show = true;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajectory_plot::config::parse_config;
    use trajectory_plot::Limits;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["trajplot", "--input", "rec.json", "--output", "out.pdf"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn recording(delta_time: Option<f64>) -> Recording {
        Recording {
            delta_time,
            degrees_of_freedom: 1,
            limits: Limits::new(vec![1.0], vec![1.0]),
            samples: Vec::new(),
        }
    }

    fn file_config() -> PlotConfig {
        parse_config(
            r#"
            [renderer]
            delta_time = 0.5

            [options]
            title = "From file"
            plot_acceleration = true
            plot_jerk = true
            "#,
        )
        .unwrap()
    }

    #[test]
    fn config_file_stands_without_overrides() {
        let config = apply_overrides(&args(&[]), &recording(None), file_config());
        assert_eq!(config, file_config());
    }

    #[test]
    fn recording_cycle_beats_config_file() {
        let config = apply_overrides(&args(&[]), &recording(Some(0.002)), file_config());
        assert_eq!(config.renderer.delta_time, 0.002);
    }

    #[test]
    fn flag_cycle_beats_recording() {
        let config = apply_overrides(
            &args(&["--delta-time", "0.004"]),
            &recording(Some(0.002)),
            file_config(),
        );
        assert_eq!(config.renderer.delta_time, 0.004);
    }

    #[test]
    fn flags_override_file_options() {
        let config = apply_overrides(
            &args(&["--title", "From flag", "--no-acceleration", "--no-jerk", "--show"]),
            &recording(None),
            file_config(),
        );
        assert_eq!(config.options.title.as_deref(), Some("From flag"));
        assert!(!config.options.plot_acceleration);
        assert!(!config.options.plot_jerk);
        assert!(config.options.show);
        assert_eq!(config.renderer.delta_time, 0.5);
    }

    #[test]
    fn input_and_output_are_required() {
        assert!(Args::try_parse_from(["trajplot", "--input", "rec.json"]).is_err());
    }
}

