pub mod config;
pub mod error;
pub mod export;
pub mod grouping;
pub mod import;
pub mod telemetry;
