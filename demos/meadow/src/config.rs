//! TOML run file: `[sim]`, `[initial]` and `[params]`, each optional.

use std::path::Path;

use anyhow::{Context, Result};
use eco_core::SimConfig;
use eco_models::{EcologyParams, InitialState};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeadowConfig {
    pub sim:     SimConfig,
    pub initial: InitialState,
    pub params:  EcologyParams,
}

impl MeadowConfig {
    /// Read `path`, or fall back to every default when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
