pub mod config;
pub mod constants;
pub mod error;
pub mod key;
pub mod logging;
pub mod merge;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod validate;

// Fetcher seam: the port lives in app, the reqwest adapter in infra
pub mod app;
pub mod infra;
