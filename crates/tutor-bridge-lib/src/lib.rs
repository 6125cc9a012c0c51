// Tutor Bridge Library
// Bridges the Runbook Tutor agent to the local desktop registry and the
// assistant-management service

pub mod actions;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{BridgeError, BridgeResult};
