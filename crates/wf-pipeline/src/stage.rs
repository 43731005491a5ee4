use crate::config::{OptionSpec, Options, ResolvedOptions};
use std::rc::Rc;
use std::sync::Arc;
use wf_core::error::ConfigError;

/// A compilation stage: a pure transformation of one value into another.
///
/// Parsers turn source text into a [`Node`](wf_core::Node), filters rewrite
/// nodes, generators turn nodes into program text. `run` only borrows its
/// input, so a stage can never alter the value it was given, and it must
/// return the same output for the same input every time. Stages hold no
/// per-invocation state; the same instance may be run any number of times and
/// shared between engines.
pub trait Stage {
    type Input: ?Sized;
    type Output;

    fn name(&self) -> &str;
    fn run(&self, input: &Self::Input) -> wf_core::Result<Self::Output>;
}

/// A stage that an engine can construct from declared options.
pub trait ConfigurableStage: Stage + Sized {
    const NAME: &'static str;

    fn option_specs() -> &'static [OptionSpec] {
        &[]
    }

    fn from_options(options: &ResolvedOptions) -> Result<Self, ConfigError>;

    /// Bind `global` and `local` against [`Self::option_specs`] and build the
    /// stage.
    fn configure(global: &Options, local: &Options) -> Result<Self, ConfigError> {
        let options = ResolvedOptions::bind(Self::NAME, Self::option_specs(), global, local)?;
        Self::from_options(&options)
    }

    fn with_defaults() -> Result<Self, ConfigError> {
        Self::configure(&Options::new(), &Options::new())
    }
}

impl<S: Stage + ?Sized> Stage for &S {
    type Input = S::Input;
    type Output = S::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, input: &Self::Input) -> wf_core::Result<Self::Output> {
        (**self).run(input)
    }
}

impl<S: Stage + ?Sized> Stage for Box<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, input: &Self::Input) -> wf_core::Result<Self::Output> {
        (**self).run(input)
    }
}

impl<S: Stage + ?Sized> Stage for Rc<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, input: &Self::Input) -> wf_core::Result<Self::Output> {
        (**self).run(input)
    }
}

impl<S: Stage + ?Sized> Stage for Arc<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, input: &Self::Input) -> wf_core::Result<Self::Output> {
        (**self).run(input)
    }
}
