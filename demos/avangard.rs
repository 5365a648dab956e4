use ascent_sim::config::presets;
use ascent_sim::io::csv;
use ascent_sim::io::json::{self, RunSummary};
use ascent_sim::sim;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = presets::avangard();

    println!("Simulating {} ...", config.vehicle.name);
    let trajectory = sim::simulate(&config)?;

    let summary = RunSummary::new(&config, &trajectory);
    if let Some(peak) = summary.max_altitude {
        println!("Max altitude: {:.1} km at t={:.1} s", peak.value / 1000.0, peak.time);
    }
    if let Some(peak) = summary.max_speed {
        println!("Max speed: {:.1} m/s", peak.value);
    }
    for event in &trajectory.events {
        println!("  {:<18} t={:.1} s", event.kind.to_string(), event.time);
    }

    csv::write_trajectory_file("avangard_trajectory.csv", &trajectory.samples)?;
    json::write_summary_file("avangard_summary.json", &summary)?;

    println!("Exported: avangard_trajectory.csv, avangard_summary.json");
    Ok(())
}
