//! Weft CLI Library
//!
//! Loads serialized IR trees, builds the engine declared in a TOML engine
//! file from the registered filters and generators, and runs it.

pub mod cli;
pub mod commands;
pub mod diagnostics;
pub mod engine;

// CLI-specific error handling
pub mod error {
    use miette::Diagnostic;
    use std::path::PathBuf;
    use thiserror::Error;
    use wf_core::error::{CompileError, ConfigError};

    #[derive(Error, Debug, Diagnostic)]
    pub enum CliError {
        #[error("IO error on {}: {source}", .path.display())]
        #[diagnostic(code(wf::io))]
        Io {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("Engine file error in {}: {message}", .path.display())]
        #[diagnostic(
            code(wf::engine_file),
            help("see `wf stages` for the filters and generators an engine file can declare")
        )]
        EngineFile { path: PathBuf, message: String },

        #[error(transparent)]
        #[diagnostic(transparent)]
        Compile(#[from] CompileError),

        #[error("Invalid input: {0}")]
        #[diagnostic(code(wf::invalid_input))]
        InvalidInput(String),
    }

    impl From<ConfigError> for CliError {
        fn from(err: ConfigError) -> Self {
            CliError::Compile(err.into())
        }
    }

    impl CliError {
        pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
            CliError::Io {
                path: path.into(),
                source,
            }
        }
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
