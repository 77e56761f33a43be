//! Provisioning of the quiz bot web service on Koyeb: configuration
//! checks, CLI discovery and authentication, planning, and the app and
//! service creation calls.

pub mod error;
pub mod models;
pub mod services;

pub use error::{OrchestratorError, Result};
