pub mod analysis;
pub mod config;
pub mod log;
pub mod observation;
