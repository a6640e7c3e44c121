pub mod config;
pub mod forms;
