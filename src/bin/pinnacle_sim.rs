//! `pinnacle-sim`: a small CLI that drives [`pinnacle_pointing::Pipeline`]
//! without real Pinnacle hardware, so an engineer can watch the pipeline
//! work from a terminal.
//!
//! Grounded on InputPlumber's `main.rs` (env_logger init, `RUST_LOG`
//! default) and `cli/mod.rs` (`clap::Parser` argument shape).

use std::error::Error;
use std::fs;

use clap::{Parser, ValueEnum};
use log::info;

use pinnacle_pointing::sim::{ScriptedSensor, ScriptedSink};
use pinnacle_pointing::{PipelineConfig, Sample, WrappingMillis};

/// Built-in deterministic sample streams mirroring spec.md §8's scenarios.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scenario {
    /// Scenario A: a tap well inside the tapping term.
    Tap,
    /// Scenario B: a long press, held past the tapping term.
    LongPress,
    /// Scenario C: a straight diagonal drag, then lift into glide.
    Drag,
    /// Scenario D: a circular scroll stroke traced around the annulus.
    Scroll,
    /// Scenario E: a swipe inward from the edge (rejected as a scroll).
    Swipe,
}

/// Replay a scripted or synthetic sample stream through the pointing-device
/// pipeline and print the resulting mouse reports.
#[derive(Debug, Parser)]
#[command(name = "pinnacle-sim", version, about)]
struct Args {
    /// Optional YAML `PipelineConfig` file; defaults are used if omitted.
    #[arg(long)]
    config: Option<String>,

    /// YAML file containing a list of samples (`{x, y, z, touch_down}`) to replay.
    #[arg(long, conflicts_with = "scenario")]
    script: Option<String>,

    /// A built-in scenario to replay instead of a script file.
    #[arg(long, value_enum, default_value = "tap")]
    scenario: Scenario,

    /// Milliseconds between ticks, matching `PipelineConfig::glide_interval_ms`
    /// unless overridden.
    #[arg(long)]
    interval_ms: Option<u16>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_yaml_file(path)?,
        None => PipelineConfig::default(),
    };
    let interval_ms = args.interval_ms.unwrap_or(config.glide_interval_ms);

    let samples = match &args.script {
        Some(path) => load_script(path)?,
        None => builtin_scenario(args.scenario, config.scale),
    };

    let scripted_ticks = samples.len();
    info!("pinnacle-sim: replaying {scripted_ticks} ticks at {interval_ms}ms/tick");

    let sensor = ScriptedSensor::new(samples);
    let sink = ScriptedSink::default();
    let clock = WrappingMillis::new();
    let mut pipeline = pinnacle_pointing::Pipeline::new(sensor, sink, clock, config);
    pipeline.init().ok();

    // Keep ticking past the scripted samples so any inertial glide they
    // armed gets to play out; once the script and any glide are both spent
    // the pipeline settles into all-empty reports.
    for tick in 0usize.. {
        let report = pipeline.process_sample();
        println!("{report:?}");
        if pipeline.state().is_sensor_disabled() {
            break;
        }
        if tick >= scripted_ticks && report.is_empty() {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(interval_ms as u64));
    }

    Ok(())
}

fn load_script(path: &str) -> Result<Vec<Sample>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Synthesizes one of spec.md §8's literal scenarios A/B/C/D/E as a sample
/// stream, scaled to `scale`.
fn builtin_scenario(scenario: Scenario, scale: u16) -> Vec<Sample> {
    let center = scale / 2;
    match scenario {
        Scenario::Tap => vec![
            Sample { x: center, y: center, z: 50, touch_down: true },
            Sample { x: center, y: center, z: 0, touch_down: false },
        ],
        Scenario::LongPress => vec![
            Sample { x: center, y: center, z: 50, touch_down: true },
            Sample { x: center, y: center, z: 50, touch_down: true },
            Sample { x: center, y: center, z: 0, touch_down: false },
        ],
        Scenario::Drag => {
            let mut samples = Vec::new();
            for i in 0..26u16 {
                samples.push(Sample { x: 400 + i * 4, y: 400 + i * 4, z: 50, touch_down: true });
            }
            samples.push(Sample { x: 0, y: 0, z: 0, touch_down: false });
            samples
        }
        Scenario::Scroll => {
            let radius = (scale as f64) * 0.95 / 2.0;
            let mut samples = Vec::new();
            let steps = 40;
            for i in 0..=steps {
                let angle = std::f64::consts::PI * (i as f64) / (steps as f64);
                let x = center as f64 + radius * angle.cos();
                let y = center as f64 + radius * angle.sin();
                samples.push(Sample { x: x as u16, y: y as u16, z: 50, touch_down: true });
            }
            samples.push(Sample { x: 0, y: 0, z: 0, touch_down: false });
            samples
        }
        Scenario::Swipe => {
            let edge = (scale as f64) * 0.97;
            let mut samples = Vec::new();
            for i in 0..10u16 {
                let x = edge - (i as f64) * (edge - center as f64) / 10.0;
                samples.push(Sample { x: x as u16, y: center, z: 50, touch_down: true });
            }
            samples.push(Sample { x: 0, y: 0, z: 0, touch_down: false });
            samples
        }
    }
}
