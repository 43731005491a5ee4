#[macro_use]
pub mod macros;

pub mod config;
pub mod pipeline;
pub mod registry;
pub mod stage;

pub use config::{OptionKind, OptionSpec, OptionValue, Options, ResolvedOptions};
pub use pipeline::{Engine, EngineBuilder, PipelineBuilder};
pub use registry::StageRegistry;
pub use stage::{ConfigurableStage, Stage};
