pub mod config;
pub mod core;
pub mod detector;
pub mod snapshot;

// Comparison and verdict handling
pub mod compare;
pub mod handler;
pub mod runner;

// Terminal surface
pub mod cli;
pub mod logging;
