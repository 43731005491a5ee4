//! Engines built from an [`EngineFile`].

use crate::cli::{EngineFile, StageDecl};
use crate::Result;
use std::collections::BTreeSet;
use tracing::info;
use wf_codegen::default_generators;
use wf_core::error::ConfigError;
use wf_core::Node;
use wf_optimize::default_filters;
use wf_pipeline::{Engine, EngineBuilder, Options, PipelineBuilder, StageRegistry};

fn declare_filters(
    builder: EngineBuilder,
    registry: &StageRegistry<Node, Node>,
    filters: &[StageDecl],
) -> Result<Option<PipelineBuilder<Node, Node>>> {
    let Some((first, rest)) = filters.split_first() else {
        return Ok(None);
    };
    let mut pipeline = builder.declare(registry, &first.name, &first.options)?;
    for decl in rest {
        pipeline = pipeline.declare(registry, &decl.name, &decl.options)?;
    }
    Ok(Some(pipeline))
}

/// The declared filters followed by the generator.
pub fn compile_engine(file: &EngineFile, generator: Option<&str>) -> Result<Engine<Node, String>> {
    let filters = default_filters();
    let generators = default_generators();
    let generator = match generator {
        Some(name) => StageDecl::new(name),
        None => file.generator.clone(),
    };

    let builder = EngineBuilder::new(&file.name).global_options(file.options.clone());
    let engine = match declare_filters(builder, &filters, &file.filters)? {
        Some(pipeline) => pipeline
            .declare(&generators, &generator.name, &generator.options)?
            .build()?,
        None => EngineBuilder::new(&file.name)
            .global_options(file.options.clone())
            .declare(&generators, &generator.name, &generator.options)?
            .build()?,
    };
    info!(engine = %engine.name(), stages = engine.len(), "engine ready");
    Ok(engine)
}

/// The declared filters alone, for rendering. Global options that only the
/// generator would read are dropped; a global that neither the filters nor
/// the generator recognize is still an error. `None` when no filter is
/// declared.
pub fn filter_engine(file: &EngineFile) -> Result<Option<Engine<Node, Node>>> {
    let filters = default_filters();
    let generator_specs = default_generators()
        .specs(&file.generator.name)
        .ok_or_else(|| ConfigError::UnknownStage {
            name: file.generator.name.clone(),
        })?;
    let recognized: BTreeSet<&str> = file
        .filters
        .iter()
        .filter_map(|decl| filters.specs(&decl.name))
        .flatten()
        .map(|spec| spec.name)
        .collect();
    if let Some(option) = file.options.keys().find(|name| {
        !recognized.contains(name.as_str())
            && !generator_specs.iter().any(|spec| spec.name == name.as_str())
    }) {
        return Err(ConfigError::UnknownGlobalOption {
            engine: file.name.clone(),
            option: option.clone(),
        }
        .into());
    }
    let globals: Options = file
        .options
        .iter()
        .filter(|(name, _)| recognized.contains(name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let builder = EngineBuilder::new(&file.name).global_options(globals);
    match declare_filters(builder, &filters, &file.filters)? {
        Some(pipeline) => Ok(Some(pipeline.build()?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wf_core::error::CompileError;
    use wf_core::node;
    use wf_pipeline::{options, Stage};

    #[test]
    fn test_default_engine_compiles_hello_world() {
        let engine = compile_engine(&EngineFile::default(), None).unwrap();
        assert_eq!(
            engine.stage_names(),
            ["control-flow", "inline-dynamic", "merge-static", "buffer"]
        );
        let tree = node![
            sequence,
            node![static, "Hello "],
            node![dynamic, "name"],
            node![static, "!"]
        ];
        assert!(engine.run(&tree).unwrap().contains("_buf.push_str(&(name).to_string());"));
    }

    #[test]
    fn test_generator_override_and_empty_filter_list() {
        let file = EngineFile {
            filters: Vec::new(),
            ..EngineFile::default()
        };
        let engine = compile_engine(&file, Some("array")).unwrap();
        assert_eq!(engine.stage_names(), ["array"]);
        assert!(filter_engine(&file).unwrap().is_none());
    }

    #[test]
    fn test_generator_globals_do_not_reach_render() {
        let file = EngineFile {
            options: options! { "buffer" => "out", "indent" => 4 },
            ..EngineFile::default()
        };
        assert!(compile_engine(&file, None).is_err());
        assert!(filter_engine(&file).is_err());

        let file = EngineFile {
            options: options! { "buffer" => "out" },
            ..EngineFile::default()
        };
        assert!(compile_engine(&file, None).is_ok());
        let filters = filter_engine(&file).unwrap().unwrap();
        assert_eq!(filters.len(), 3);
    }

    #[test]
    fn test_misspelled_globals_fail_for_render_too() {
        let file = EngineFile {
            options: options! { "bufer" => "out" },
            ..EngineFile::default()
        };
        let expected = ConfigError::UnknownGlobalOption {
            engine: "wf".to_string(),
            option: "bufer".to_string(),
        };

        let err = compile_engine(&file, None).unwrap_err();
        assert!(matches!(
            err,
            crate::CliError::Compile(CompileError::Configuration(ref found)) if *found == expected
        ));
        let err = filter_engine(&file).unwrap_err();
        assert!(matches!(
            err,
            crate::CliError::Compile(CompileError::Configuration(ref found)) if *found == expected
        ));
    }

    #[test]
    fn test_unknown_stage_names() {
        let file = EngineFile {
            filters: vec![StageDecl::new("minify")],
            ..EngineFile::default()
        };
        let err = compile_engine(&file, None).unwrap_err();
        assert!(matches!(
            err,
            crate::CliError::Compile(CompileError::Configuration(ConfigError::UnknownStage { .. }))
        ));
    }
}
