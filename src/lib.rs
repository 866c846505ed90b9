pub mod client;
pub mod config;
pub mod constants;
pub mod datasets;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;
