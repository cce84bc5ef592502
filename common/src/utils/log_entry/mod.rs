pub mod analysis;
pub mod io;
pub mod network;
pub mod observation;
pub mod system;
