pub mod analysis;
pub mod observation;
pub mod utils;
