pub mod probe;
pub mod status;
pub mod thresholds;
