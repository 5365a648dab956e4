pub mod state;
pub mod planar;

pub use state::{SimulationState, TrajectorySample};
pub use planar::{Forces, PlanarModel};
