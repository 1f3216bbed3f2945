pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod gate;
pub mod render;
pub mod server;
pub mod types;
pub mod view;
