pub mod stage;
pub mod config;
pub mod propulsion;
pub mod staging;

pub use stage::{Stage, StageBuilder};
pub use config::{VehicleBuilder, VehicleConfig};
pub use staging::{ActiveStage, StagingSchedule};
