pub mod guidance;

pub use guidance::{AltitudeTurn, GuidanceProfile, PitchProgram};
