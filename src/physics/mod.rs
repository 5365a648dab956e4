pub mod environment;
pub mod aerodynamics;

pub use environment::Environment;
pub use aerodynamics::{drag_force, Aero};
