use std::io::Write;
use std::path::Path;

use crate::dynamics::TrajectorySample;
use crate::telemetry::ReferenceSample;

/// Write trajectory data to CSV.
///
/// Columns: time, downrange, altitude, speed, vx, vy, pitch, mass, stage, thrust
pub fn write_trajectory<W: Write>(writer: W, trajectory: &[TrajectorySample]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in trajectory {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file<P: AsRef<Path>>(path: P, trajectory: &[TrajectorySample]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_trajectory(file, trajectory)
}

/// Write recorded telemetry (e.g. the truncated overlay series) to CSV.
pub fn write_reference<W: Write>(writer: W, reference: &[ReferenceSample]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in reference {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, altitude: f64) -> TrajectorySample {
        TrajectorySample {
            time,
            downrange: 0.0,
            altitude,
            speed: 0.0,
            vx: 0.0,
            vy: 0.0,
            pitch: 90.0,
            mass: 59_300.0,
            stage: 0,
            thrust: 0.0,
        }
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let traj = vec![sample(0.0, 0.0), sample(0.1, 0.06)];

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,downrange,altitude,speed,vx,vy,pitch,mass,stage,thrust");
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[2].starts_with("0.1,"));
    }

    #[test]
    fn reference_csv_columns() {
        let reference = vec![ReferenceSample { mission_time: 1.5, altitude: 10.0, speed: 2.0, pitch: 90.0 }];
        let mut buf = Vec::new();
        write_reference(&mut buf, &reference).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("mission_time,altitude,speed,pitch\n1.5,10.0,2.0,90.0"));
    }
}
