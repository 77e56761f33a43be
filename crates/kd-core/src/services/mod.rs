pub mod auth;
pub mod config_validator;
pub mod koyeb;
pub mod orchestrator;
pub mod planner;
pub mod project_file;
pub mod provisioner;
pub mod secrets;
pub mod tool_probe;
