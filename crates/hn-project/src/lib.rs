//! hn-project: network definition files and validation.
//!
//! A network is described in YAML or JSON as a [`NetworkDef`]: a liquid, a
//! list of vertices, the components joining them and the boundary conditions.
//! [`build_system`] turns a definition into an [`hn_system::System`].

pub mod build;
pub mod schema;
pub mod validate;

pub use build::build_system;
pub use schema::*;
pub use validate::{ValidationError, validate_network};

use std::path::Path;
use tracing::info;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("System error: {0}")]
    System(#[from] hn_system::SystemError),
}

/// Parse and validate a YAML document.
pub fn from_yaml_str(content: &str) -> ProjectResult<NetworkDef> {
    let network: NetworkDef = serde_yaml::from_str(content)?;
    validate_network(&network)?;
    Ok(network)
}

pub fn load_yaml(path: &Path) -> ProjectResult<NetworkDef> {
    let content = std::fs::read_to_string(path)?;
    let network = from_yaml_str(&content)?;
    info!(path = %path.display(), network = %network.name, "network loaded");
    Ok(network)
}

pub fn save_yaml(path: &Path, network: &NetworkDef) -> ProjectResult<()> {
    validate_network(network)?;
    let content = serde_yaml::to_string(network)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<NetworkDef> {
    let content = std::fs::read_to_string(path)?;
    let network: NetworkDef = serde_json::from_str(&content)?;
    validate_network(&network)?;
    info!(path = %path.display(), network = %network.name, "network loaded");
    Ok(network)
}

pub fn save_json(path: &Path, network: &NetworkDef) -> ProjectResult<()> {
    validate_network(network)?;
    let content = serde_json::to_string_pretty(network)?;
    std::fs::write(path, content)?;
    Ok(())
}
