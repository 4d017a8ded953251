pub mod commands;
pub mod config;
pub mod contexts;
pub mod logging;
