pub mod csv;
pub mod json;

pub use json::{write_summary_file, RunSummary};
