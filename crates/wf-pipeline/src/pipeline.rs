use crate::config::{OptionSpec, OptionValue, Options};
use crate::registry::StageRegistry;
use crate::stage::{ConfigurableStage, Stage};
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, debug_span};
use wf_core::error::{CompileError, ConfigError};
use wf_core::Result;

/// Construction-time bookkeeping shared by both builder states.
struct Declaration {
    engine: String,
    global: Options,
    stages: Vec<String>,
    recognized: BTreeSet<String>,
}

impl Declaration {
    fn bind<S: ConfigurableStage>(&mut self, local: &Options) -> Result<S> {
        let stage = S::configure(&self.global, local)?;
        self.recognize(S::option_specs());
        Ok(stage)
    }

    fn bind_registered<I: ?Sized + 'static, O: 'static>(
        &mut self,
        registry: &StageRegistry<I, O>,
        name: &str,
        local: &Options,
    ) -> Result<Box<dyn Stage<Input = I, Output = O>>> {
        let stage = registry.build(name, &self.global, local)?;
        if let Some(specs) = registry.specs(name) {
            self.recognize(specs);
        }
        Ok(stage)
    }

    fn recognize(&mut self, specs: &[OptionSpec]) {
        self.recognized
            .extend(specs.iter().map(|spec| spec.name.to_string()));
    }

    fn push(&mut self, name: &str) -> usize {
        self.stages.push(name.to_string());
        self.stages.len() - 1
    }
}

fn run_stage<S: Stage>(
    engine: &str,
    position: usize,
    stage: &S,
    input: &S::Input,
) -> Result<S::Output> {
    let span = debug_span!("stage", engine, position, stage = stage.name());
    let _guard = span.enter();
    stage.run(input).map_err(|err| {
        debug!(error = %err, "stage failed, aborting engine");
        CompileError::pipeline(engine, position, stage.name(), err)
    })
}

/// Start of an engine declaration, before its first stage is known.
pub struct EngineBuilder {
    decl: Declaration,
}

impl EngineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            decl: Declaration {
                engine: name.into(),
                global: Options::new(),
                stages: Vec::new(),
                recognized: BTreeSet::new(),
            },
        }
    }

    /// Options offered to every declared stage; stage options win on
    /// collision.
    pub fn global_options(mut self, options: Options) -> Self {
        self.decl.global.extend(options);
        self
    }

    pub fn global_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.decl.global.insert(name.into(), value.into());
        self
    }

    /// Append an already constructed stage, for example a shared instance or
    /// another engine.
    pub fn add_stage<S>(self, stage: S) -> PipelineBuilder<S::Input, S::Output>
    where
        S: Stage + 'static,
        S::Output: 'static,
    {
        let mut decl = self.decl;
        let position = decl.push(stage.name());
        let engine = decl.engine.clone();
        let run = move |input: &S::Input| run_stage(&engine, position, &stage, input);
        PipelineBuilder {
            decl,
            run: Box::new(run),
        }
    }

    /// Construct `S` from `options` and append it.
    pub fn stage<S>(mut self, options: Options) -> Result<PipelineBuilder<S::Input, S::Output>>
    where
        S: ConfigurableStage + 'static,
        S::Output: 'static,
    {
        let stage = self.decl.bind::<S>(&options)?;
        Ok(self.add_stage(stage))
    }

    /// Construct the stage registered as `name` and append it.
    pub fn declare<I: ?Sized + 'static, O: 'static>(
        mut self,
        registry: &StageRegistry<I, O>,
        name: &str,
        options: &Options,
    ) -> Result<PipelineBuilder<I, O>> {
        let stage = self.decl.bind_registered(registry, name, options)?;
        Ok(self.add_stage(stage))
    }
}

/// Engine declaration whose stages turn `Src` into `Dst` so far.
pub struct PipelineBuilder<Src: ?Sized, Dst> {
    decl: Declaration,
    run: Box<dyn Fn(&Src) -> Result<Dst>>,
}

impl<Src: ?Sized + 'static, Mid: 'static> PipelineBuilder<Src, Mid> {
    pub fn add_stage<S>(self, stage: S) -> PipelineBuilder<Src, S::Output>
    where
        S: Stage<Input = Mid> + 'static,
        S::Output: 'static,
    {
        let PipelineBuilder {
            mut decl,
            run: previous,
        } = self;
        let position = decl.push(stage.name());
        let engine = decl.engine.clone();
        let run = move |input: &Src| {
            let mid = previous(input)?;
            run_stage(&engine, position, &stage, &mid)
        };
        PipelineBuilder {
            decl,
            run: Box::new(run),
        }
    }

    pub fn stage<S>(mut self, options: Options) -> Result<PipelineBuilder<Src, S::Output>>
    where
        S: ConfigurableStage<Input = Mid> + 'static,
        S::Output: 'static,
    {
        let stage = self.decl.bind::<S>(&options)?;
        Ok(self.add_stage(stage))
    }

    pub fn declare<O: 'static>(
        mut self,
        registry: &StageRegistry<Mid, O>,
        name: &str,
        options: &Options,
    ) -> Result<PipelineBuilder<Src, O>> {
        let stage = self.decl.bind_registered(registry, name, options)?;
        Ok(self.add_stage(stage))
    }

    /// Finish the declaration. Fails if a global option is recognized by none
    /// of the declared stages.
    pub fn build(self) -> Result<Engine<Src, Mid>> {
        let PipelineBuilder { decl, run } = self;
        if let Some(option) = decl
            .global
            .keys()
            .find(|option| !decl.recognized.contains(option.as_str()))
        {
            return Err(ConfigError::UnknownGlobalOption {
                engine: decl.engine.clone(),
                option: option.clone(),
            }
            .into());
        }
        debug!(engine = %decl.engine, stages = %decl.stages.iter().join(" -> "), "engine built");
        Ok(Engine {
            name: decl.engine,
            stages: decl.stages,
            run,
        })
    }
}

/// An ordered composition of stages, itself a [`Stage`].
///
/// Running an engine threads the input through every stage in declaration
/// order. The first failing stage ends the run; its error comes back wrapped
/// in [`CompileError::Pipeline`] with the stage's position, and no later stage
/// is invoked.
pub struct Engine<Src: ?Sized, Dst> {
    name: String,
    stages: Vec<String>,
    run: Box<dyn Fn(&Src) -> Result<Dst>>,
}

impl Engine<(), ()> {
    pub fn builder(name: impl Into<String>) -> EngineBuilder {
        EngineBuilder::new(name)
    }
}

impl<Src: ?Sized, Dst> Engine<Src, Dst> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage_names(&self) -> &[String] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<Src: ?Sized, Dst> Stage for Engine<Src, Dst> {
    type Input = Src;
    type Output = Dst;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &Src) -> Result<Dst> {
        (self.run)(input)
    }
}

impl<Src: ?Sized, Dst> fmt::Debug for Engine<Src, Dst> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("name", &self.name)
            .field("stages", &self.stages)
            .finish()
    }
}
