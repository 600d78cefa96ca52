use std::error::Error;
use std::path::Path;

use trajectory_plot::{Limits, RenderOptions, RendererConfig, Sample, TrajectoryRenderer};

fn main() -> Result<(), Box<dyn Error>> {
    // -----------------------
    // 1. Set up parameters
    // -----------------------
    let delta_time: f64 = 0.001; // Control cycle (s)
    let phase_time: f64 = 0.25; // Duration of every jerk phase (s)
    let jerks: [f64; 3] = [40.0, 25.0, 60.0]; // Peak jerk per axis

    // Jerk sign for each of the 7 phases of a symmetric S-curve.
    let pattern: [f64; 7] = [1.0, 0.0, -1.0, 0.0, -1.0, 0.0, 1.0];

    // -------------------------
    // 2. Integrate the profile
    // -------------------------
    let dofs = jerks.len();
    let mut pos = vec![0.0_f64; dofs];
    let mut vel = vec![0.0_f64; dofs];
    let mut acc = vec![0.0_f64; dofs];

    let ticks_per_phase = (phase_time / delta_time).round() as usize;
    let total_ticks = ticks_per_phase * pattern.len();

    let mut samples = Vec::with_capacity(total_ticks + 1);
    samples.push(Sample::new(0.0, pos.clone(), vel.clone(), acc.clone()));
    for tick in 0..total_ticks {
        let phase = tick / ticks_per_phase;
        for dof in 0..dofs {
            let j = pattern[phase] * jerks[dof];
            let t = delta_time;
            let a0 = acc[dof];
            let v0 = vel[dof];
            pos[dof] += v0 * t + a0 * t * t / 2.0 + j * t * t * t / 6.0;
            vel[dof] += a0 * t + j * t * t / 2.0;
            acc[dof] += j * t;
        }
        let time = (tick + 1) as f64 * delta_time;
        samples.push(Sample::new(time, pos.clone(), vel.clone(), acc.clone()));
    }

    // Phase boundaries ride on the last sample.
    let boundaries = (1..pattern.len()).map(|i| i as f64 * phase_time).collect();
    if let Some(last) = samples.pop() {
        samples.push(last.with_trajectory(boundaries));
    }

    // ---------------------
    // 3. Limits and options
    // ---------------------
    let limits = Limits::new(
        jerks.iter().map(|j| j * phase_time * phase_time * 2.2).collect(),
        jerks.iter().map(|j| j * phase_time * 1.1).collect(),
    )
    .with_max_jerk(jerks.iter().map(|j| j * 1.2).collect());

    let options = RenderOptions {
        title: Some("Constant-jerk S-curve".to_string()),
        ..RenderOptions::default()
    };

    // --------------
    // 4. Plot data
    // --------------
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let renderer = TrajectoryRenderer::new(RendererConfig::new(delta_time))?;
    renderer.render(
        &mut trajectory_plot::GnuplotCanvas::new(),
        &samples,
        &limits,
        dofs,
        Path::new("trajectory_plot.pdf"),
        &options,
    )?;

    println!("Plot generated: trajectory_plot.pdf ({} samples).", samples.len());
    Ok(())
}
