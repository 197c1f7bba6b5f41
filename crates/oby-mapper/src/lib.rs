pub mod config;
pub mod error;
pub mod mapping;
pub mod schema;
pub mod telemetry;
