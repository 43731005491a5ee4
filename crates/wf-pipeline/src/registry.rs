use crate::config::{OptionSpec, Options};
use crate::stage::{ConfigurableStage, Stage};
use std::collections::BTreeMap;
use wf_core::error::ConfigError;

struct RegistryEntry<I: ?Sized, O> {
    specs: &'static [OptionSpec],
    construct: fn(&Options, &Options) -> Result<Box<dyn Stage<Input = I, Output = O>>, ConfigError>,
}

/// Stages of one shape (`I -> O`) that can be declared by name, for engines
/// described in configuration files rather than in code.
pub struct StageRegistry<I: ?Sized + 'static, O: 'static> {
    entries: BTreeMap<&'static str, RegistryEntry<I, O>>,
}

fn construct<S>(
    global: &Options,
    local: &Options,
) -> Result<Box<dyn Stage<Input = S::Input, Output = S::Output>>, ConfigError>
where
    S: ConfigurableStage + 'static,
{
    Ok(Box::new(S::configure(global, local)?))
}

impl<I: ?Sized + 'static, O: 'static> StageRegistry<I, O> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn register<S>(&mut self) -> &mut Self
    where
        S: ConfigurableStage<Input = I, Output = O> + 'static,
    {
        self.entries.insert(
            S::NAME,
            RegistryEntry {
                specs: S::option_specs(),
                construct: construct::<S>,
            },
        );
        self
    }

    pub fn with<S>(mut self) -> Self
    where
        S: ConfigurableStage<Input = I, Output = O> + 'static,
    {
        self.register::<S>();
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn specs(&self, name: &str) -> Option<&'static [OptionSpec]> {
        self.entries.get(name).map(|entry| entry.specs)
    }

    pub fn build(
        &self,
        name: &str,
        global: &Options,
        local: &Options,
    ) -> Result<Box<dyn Stage<Input = I, Output = O>>, ConfigError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| ConfigError::UnknownStage {
                name: name.to_string(),
            })?;
        (entry.construct)(global, local)
    }
}

impl<I: ?Sized + 'static, O: 'static> Default for StageRegistry<I, O> {
    fn default() -> Self {
        Self::new()
    }
}
