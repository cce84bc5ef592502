pub mod event_store;
pub mod management;
pub mod observation_manager;
pub mod utils;
