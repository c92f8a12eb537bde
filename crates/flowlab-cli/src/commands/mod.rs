pub mod config;
pub mod estimate;
pub mod method;
pub mod sequence;
