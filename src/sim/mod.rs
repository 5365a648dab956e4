pub mod integrator;
pub mod runner;
pub mod event;

pub use runner::{simulate, simulate_with, Trajectory};
pub use integrator::euler_step;
pub use event::{EventKind, SimEvent};
