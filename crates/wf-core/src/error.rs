use crate::node::Node;
use miette::Diagnostic;
use std::result;
use thiserror::Error;

/// Problems detected while binding stage options at engine construction.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("stage `{stage}` does not recognize option `{option}`")]
    #[diagnostic(
        code(wf::config::unknown_option),
        help("run `wf stages` to list the options each stage accepts")
    )]
    UnknownOption { stage: String, option: String },

    #[error("global option `{option}` of engine `{engine}` is not recognized by any stage")]
    #[diagnostic(code(wf::config::unknown_global_option))]
    UnknownGlobalOption { engine: String, option: String },

    #[error("stage `{stage}` requires option `{option}`")]
    #[diagnostic(code(wf::config::missing_option))]
    MissingOption { stage: String, option: String },

    #[error("option `{option}` of stage `{stage}` expects {expected}, found {found}")]
    #[diagnostic(code(wf::config::invalid_option))]
    InvalidOption {
        stage: String,
        option: String,
        expected: String,
        found: String,
    },

    #[error("unknown stage `{name}`")]
    #[diagnostic(
        code(wf::config::unknown_stage),
        help("run `wf stages` to list the registered stages")
    )]
    UnknownStage { name: String },
}

/// Every way a stage, an engine or a codec can fail.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A stage received a node it neither handles nor may pass through.
    #[error("[{stage}] unexpected `{}` node: {message}", .node.tag())]
    #[diagnostic(code(wf::shape))]
    Shape {
        stage: String,
        node: Box<Node>,
        message: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigError),

    /// A core-vocabulary node could not be mapped to output text.
    #[error("[{stage}] cannot generate output: {message}")]
    #[diagnostic(code(wf::generation))]
    Generation {
        stage: String,
        node: Option<Box<Node>>,
        message: String,
    },

    #[error("malformed IR encoding: {message}")]
    #[diagnostic(code(wf::decode))]
    Decode { message: String },

    /// The tree has no representation in the requested encoding.
    #[error("cannot encode IR tree: {message}")]
    #[diagnostic(code(wf::encode))]
    Encode { message: String },

    /// A stage of an engine failed; `source` is that stage's error verbatim.
    #[error("stage #{position} `{stage}` of engine `{engine}` failed: {source}")]
    #[diagnostic(code(wf::pipeline))]
    Pipeline {
        engine: String,
        position: usize,
        stage: String,
        #[source]
        source: Box<CompileError>,
    },
}

pub type Result<T> = result::Result<T, CompileError>;

impl CompileError {
    pub fn shape(stage: impl Into<String>, node: Node, message: impl Into<String>) -> Self {
        CompileError::Shape {
            stage: stage.into(),
            node: Box::new(node),
            message: message.into(),
        }
    }

    pub fn generation(
        stage: impl Into<String>,
        node: Option<Node>,
        message: impl Into<String>,
    ) -> Self {
        CompileError::Generation {
            stage: stage.into(),
            node: node.map(Box::new),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        CompileError::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        CompileError::Encode {
            message: message.into(),
        }
    }

    pub fn pipeline(
        engine: impl Into<String>,
        position: usize,
        stage: impl Into<String>,
        source: CompileError,
    ) -> Self {
        CompileError::Pipeline {
            engine: engine.into(),
            position,
            stage: stage.into(),
            source: Box::new(source),
        }
    }

    /// The first failure, with every pipeline annotation stripped.
    pub fn root_cause(&self) -> &CompileError {
        let mut current = self;
        while let CompileError::Pipeline { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Name of the innermost stage that rejected its input.
    pub fn failing_stage(&self) -> Option<&str> {
        let mut stage = None;
        let mut current = self;
        loop {
            match current {
                CompileError::Pipeline {
                    stage: name,
                    source,
                    ..
                } => {
                    stage = Some(name.as_str());
                    current = source.as_ref();
                }
                CompileError::Shape { stage: name, .. }
                | CompileError::Generation { stage: name, .. } => return Some(name.as_str()),
                _ => return stage,
            }
        }
    }

    /// Positions of the failing stage, outermost engine first.
    pub fn position_path(&self) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self;
        while let CompileError::Pipeline {
            position, source, ..
        } = current
        {
            path.push(*position);
            current = source.as_ref();
        }
        path
    }

    /// The offending node, when the error carries one.
    pub fn node(&self) -> Option<&Node> {
        match self.root_cause() {
            CompileError::Shape { node, .. } => Some(node.as_ref()),
            CompileError::Generation { node, .. } => node.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(err: serde_json::Error) -> Self {
        CompileError::decode(err.to_string())
    }
}
