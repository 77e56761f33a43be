pub mod app;
pub mod config;
pub mod environment;
pub mod service;
pub mod stage;

pub use app::AppIdentity;
pub use config::{ConfigWarning, DeploymentConfig, ProjectFile, Secret, ValidatedConfig};
pub use environment::Environment;
pub use service::{EnvVar, HealthCheck, PortMapping, ScalingBounds, ServiceDescriptor};
pub use stage::Stage;
