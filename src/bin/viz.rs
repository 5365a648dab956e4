use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use ascent_sim::config::presets;
use ascent_sim::dynamics::TrajectorySample;
use ascent_sim::sim::{self, Trajectory};
use ascent_sim::telemetry::{self, FlightLog, ReferenceSample, ReferenceSeries};

#[derive(Parser, Debug)]
#[command(name = "ascent-viz")]
#[command(about = "Plot a simulated ascent over recorded flight telemetry")]
struct Args {
    #[arg(short, long, default_value = "avangard")]
    preset: String,

    /// Flight log (JSON) to overlay
    #[arg(short, long)]
    reference: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = presets::by_name(&args.preset)?;
    let trajectory = sim::simulate(&config)?;

    let reference = match &args.reference {
        Some(path) => {
            let log = FlightLog::load(path)?;
            let series = ReferenceSeries::new(log.flight_data)?;
            let probes = telemetry::default_probe_times(&config);
            telemetry::compare(&trajectory, &series, &probes, config.run.total_duration).reference
        }
        None => Vec::new(),
    };

    let app = AscentViz { trajectory, reference };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Ascent Simulator", options, Box::new(|_| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("{e}"))
}

struct AscentViz {
    trajectory: Trajectory,
    reference: Vec<ReferenceSample>,
}

impl AscentViz {
    fn model_points(&self, f: impl Fn(&TrajectorySample) -> [f64; 2]) -> PlotPoints {
        let step = (self.trajectory.len() / 2000).max(1);
        self.trajectory.samples.iter().step_by(step).map(f).collect::<Vec<_>>().into()
    }

    fn reference_points(&self, f: impl Fn(&ReferenceSample) -> [f64; 2]) -> PlotPoints {
        self.reference.iter().map(f).collect::<Vec<_>>().into()
    }
}

impl eframe::App for AscentViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!(
                "Run: {}  |  Guidance: {}",
                self.trajectory.config_name, self.trajectory.guidance
            ));
            let apogee = self.trajectory.max_altitude().map_or(0.0, |s| s.altitude);
            let max_v = self.trajectory.max_speed().map_or(0.0, |s| s.speed);
            ui.label(format!(
                "Max altitude: {:.1} km  |  Max speed: {:.0} m/s  |  Samples: {}  |  Log points: {}",
                apogee / 1000.0,
                max_v,
                self.trajectory.len(),
                self.reference.len(),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Altitude (km)");
                    let model = self.model_points(|s| [s.time, s.altitude / 1000.0]);
                    let log = self.reference_points(|r| [r.mission_time, r.altitude / 1000.0]);
                    Plot::new("altitude")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Flight log", log));
                            plot_ui.line(Line::new("Model", model));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Speed (m/s)");
                    let model = self.model_points(|s| [s.time, s.speed]);
                    let log = self.reference_points(|r| [r.mission_time, r.speed]);
                    Plot::new("speed")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Flight log", log));
                            plot_ui.line(Line::new("Model", model));
                        });
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Pitch (deg)");
                    let model = self.model_points(|s| [s.time, s.pitch]);
                    let log = self.reference_points(|r| [r.mission_time, r.pitch]);
                    Plot::new("pitch")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Flight log", log));
                            plot_ui.line(Line::new("Model", model));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Trajectory Profile (km)");
                    let profile = self.model_points(|s| {
                        [s.downrange / 1000.0, s.altitude / 1000.0]
                    });
                    Plot::new("profile")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Downrange (km)")
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Trajectory", profile));
                        });
                });
            });
        });
    }
}
