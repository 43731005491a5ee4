//! Engine files: which filters run, in which order, and which generator ends
//! the pipeline.
//!
//! ```toml
//! name = "page"
//!
//! [options]
//! buffer = "out"
//!
//! [[filters]]
//! name = "erase"
//! options = { erase = ["comment", "debug"] }
//!
//! [[filters]]
//! name = "control-flow"
//!
//! [generator]
//! name = "array"
//! ```

use crate::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wf_pipeline::Options;

/// One stage of an engine file, looked up by name in a registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDecl {
    pub name: String,
    #[serde(default)]
    pub options: Options,
}

impl StageDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Options::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineFile {
    #[serde(default = "default_name")]
    pub name: String,

    /// Options offered to every declared stage
    #[serde(default)]
    pub options: Options,

    #[serde(default)]
    pub filters: Vec<StageDecl>,

    #[serde(default = "default_generator")]
    pub generator: StageDecl,
}

fn default_name() -> String {
    "wf".to_string()
}

fn default_generator() -> StageDecl {
    StageDecl::new("buffer")
}

impl Default for EngineFile {
    fn default() -> Self {
        Self {
            name: default_name(),
            options: Options::new(),
            filters: ["control-flow", "inline-dynamic", "merge-static"]
                .into_iter()
                .map(StageDecl::new)
                .collect(),
            generator: default_generator(),
        }
    }
}

impl EngineFile {
    /// Load the engine file at `path`, or the default engine without one.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        toml::from_str(&content).map_err(|e| CliError::EngineFile {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CliError::EngineFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| CliError::io(path, e))
    }
}
