use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ascent_sim::config::{presets, SimulationConfig};
use ascent_sim::gnc::{AltitudeTurn, PitchProgram};
use ascent_sim::io::{csv, json::RunSummary, write_summary_file};
use ascent_sim::sim::{simulate_with, Trajectory};
use ascent_sim::telemetry::{self, Comparison, FlightLog, ReferenceSeries, SEPARATION_ALTITUDE};
use ascent_sim::vehicle::StagingSchedule;

#[derive(Parser, Debug)]
#[command(name = "ascent-sim")]
#[command(about = "Two-stage rocket ascent simulator with flight-telemetry comparison")]
#[command(version)]
struct Args {
    /// TOML configuration file (takes precedence over --preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Named preset configuration
    #[arg(short, long, default_value = "avangard")]
    preset: String,

    /// Override total simulated duration, s
    #[arg(long)]
    duration: Option<f64>,

    /// Override integration step, s
    #[arg(long)]
    dt: Option<f64>,

    /// Pitch program steering the run
    #[arg(short, long, value_enum, default_value = "time")]
    guidance: GuidanceMode,

    /// Flight log (JSON) to compare against
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Directory to search for the most recent flight log
    #[arg(long, conflicts_with = "reference")]
    reference_dir: Option<PathBuf>,

    /// Comparison probe time, s (repeatable; defaults to burnouts, turn end, run end)
    #[arg(long = "probe")]
    probes: Vec<f64>,

    /// Write the simulated trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the truncated reference series as CSV
    #[arg(long)]
    reference_csv: Option<PathBuf>,

    /// Write a JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Approximate number of trajectory rows to print
    #[arg(long, default_value_t = 30)]
    rows: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GuidanceMode {
    /// Time-scheduled linear turn from the configuration
    Time,
    /// Altitude-triggered turn flown by the live flight software
    Altitude,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => presets::by_name(&args.preset)?,
    };
    if let Some(d) = args.duration {
        config.run.total_duration = d;
    }
    if let Some(dt) = args.dt {
        config.run.step_size = dt;
    }

    let altitude_turn = AltitudeTurn::default();
    let guidance: &dyn PitchProgram = match args.guidance {
        GuidanceMode::Time => &config.guidance,
        GuidanceMode::Altitude => &altitude_turn,
    };

    let trajectory = simulate_with(&config, guidance).context("simulation rejected")?;
    print_report(&config, &trajectory, args.rows);

    let log_path = match (&args.reference, &args.reference_dir) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(dir)) => telemetry::find_latest(dir)?,
        (None, None) => None,
    };

    let mut summary = RunSummary::new(&config, &trajectory);

    if let Some(path) = log_path {
        info!(path = %path.display(), "comparing against flight log");
        let log = FlightLog::load(&path)?;
        let reference = ReferenceSeries::new(log.flight_data.clone())?;
        let probes = if args.probes.is_empty() {
            telemetry::default_probe_times(&config)
        } else {
            args.probes.clone()
        };
        let comparison = telemetry::compare(&trajectory, &reference, &probes, config.run.total_duration);
        print_comparison(&comparison);

        if let Some(out) = &args.reference_csv {
            let file = std::fs::File::create(out)
                .with_context(|| format!("creating {}", out.display()))?;
            csv::write_reference(file, &comparison.reference)?;
        }
        summary = summary
            .with_comparison(comparison)
            .with_flight_log(log.summary(SEPARATION_ALTITUDE));
    } else if args.reference_dir.is_some() {
        info!("no flight log found, skipping comparison");
    }

    if let Some(out) = &args.csv {
        csv::write_trajectory_file(out, &trajectory.samples)
            .with_context(|| format!("writing {}", out.display()))?;
        info!(path = %out.display(), "trajectory written");
    }
    if let Some(out) = &args.summary {
        write_summary_file(out, &summary)
            .with_context(|| format!("writing {}", out.display()))?;
        info!(path = %out.display(), "summary written");
    }

    Ok(())
}

fn print_report(config: &SimulationConfig, trajectory: &Trajectory, rows: usize) {
    let env = &config.environment;
    let vehicle = &config.vehicle;

    println!();
    println!("====================================================================");
    println!("  ASCENT SIMULATION — {} ({})", vehicle.name, trajectory.config_name);
    println!("====================================================================");
    println!();
    println!("  Vehicle");
    println!("  ──────────────────────────────────────────────────────────────────");
    let schedule = StagingSchedule::new(vehicle);
    for (i, s) in vehicle.stages.iter().enumerate() {
        println!(
            "  S{} {:<12} wet {:>8.0} kg  dry {:>8.0} kg  burn {:>5.1} s  Isp {:>5.0} s  ignition t={:>5.1} s",
            i + 1,
            s.name,
            s.wet_mass,
            s.dry_mass,
            s.burn_duration,
            s.vacuum_isp,
            schedule.ignition_time(i).unwrap_or(0.0)
        );
    }
    println!(
        "  Cd {:.3}  area {:.4} m^2  ideal delta-v {:.0} m/s",
        vehicle.drag_coefficient,
        vehicle.reference_area,
        vehicle.total_delta_v(env.g0)
    );
    println!(
        "  Lift-off mass {:.0} kg  powered flight {:.1} s",
        vehicle.liftoff_mass(),
        vehicle.total_burn_duration()
    );
    println!("  Guidance: {}", trajectory.guidance);
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &trajectory.events {
        println!(
            "  {:<18} t={:>6.1}s   alt={:>9.0}m   vel={:>7.1}m/s   pitch={:>5.1}",
            e.kind.to_string(),
            e.time,
            e.sample.altitude,
            e.sample.speed,
            e.sample.pitch
        );
    }
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>10}  {:>10}  {:>9}  {:>6}  {:>9}  {:>5}",
        "t (s)", "alt (m)", "range (m)", "vel (m/s)", "pitch", "mass(kg)", "stage"
    );
    println!("  {}", "─".repeat(66));

    let interval = (trajectory.len() / rows.max(1)).max(1);
    let last = trajectory.len().saturating_sub(1);
    for (i, s) in trajectory.samples.iter().enumerate() {
        if i % interval != 0 && i != last {
            continue;
        }
        println!(
            "  {:>7.1}  {:>10.1}  {:>10.1}  {:>9.1}  {:>6.1}  {:>9.0}  {:>5}",
            s.time,
            s.altitude,
            s.downrange,
            s.speed,
            s.pitch,
            s.mass,
            s.stage + 1
        );
    }
    println!();
    println!(
        "  Simulation: {} samples, dt={} s",
        trajectory.len(),
        trajectory.step_size
    );
    println!("====================================================================");
    println!();
}

fn print_comparison(comparison: &Comparison) {
    println!("  Model vs. Flight Log");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>10}  {:>10}  {:>9}  {:>9}  {:>9}  {:>9}",
        "t (s)", "alt model", "alt log", "dh (m)", "vel model", "vel log", "dv (m/s)"
    );
    for p in &comparison.probes {
        println!(
            "  {:>7.1}  {:>10.0}  {:>10.0}  {:>9.0}  {:>9.0}  {:>9.0}  {:>9.0}{}",
            p.time,
            p.sim_altitude,
            p.ref_altitude,
            p.altitude_error(),
            p.sim_speed,
            p.ref_speed,
            p.speed_error(),
            if p.extrapolated { "  *extrapolated" } else { "" }
        );
    }
    for t in &comparison.skipped {
        println!("  {:>7.1}  outside simulated run", t);
    }
    if comparison.reference_truncated {
        println!("  Flight log truncated to {} samples within the run", comparison.reference.len());
    }
    println!();
}
