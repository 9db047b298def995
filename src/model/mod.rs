pub mod flags;
pub mod markers;
pub mod table;
pub mod thresholds;
