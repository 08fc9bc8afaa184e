//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<DeepnoteConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {:?}", path))?;
    let config: DeepnoteConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config: {:?}", path))?;
    config.validate()?;
    log::debug!(
        "loaded {:?}: {} voices, {} chords, {} cues",
        path,
        config.voices.len(),
        config.chords.len(),
        config.cues.len()
    );
    Ok(config)
}

/// The bundled example configuration
pub const EXAMPLE_CONFIG: &str = include_str!("../../deepnote.example.yaml");
