//! Compilation command implementation

use crate::cli::EngineFile;
use crate::commands::common::{load_tree, write_output};
use crate::engine::compile_engine;
use crate::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;
use tracing::info;
use wf_pipeline::Stage;

/// Arguments for the compile command
#[derive(Debug, Clone, Args)]
pub struct CompileArgs {
    /// Tree to compile (`.wfir` for the binary form, JSON otherwise)
    pub input: PathBuf,

    /// Engine file declaring the filters and the generator
    #[arg(short, long)]
    pub engine: Option<PathBuf>,

    /// Generator to use instead of the engine file's
    #[arg(short, long)]
    pub generator: Option<String>,

    /// Write the program here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the compile command
pub fn compile_command(args: CompileArgs) -> Result<()> {
    let file = EngineFile::load(args.engine.as_deref())?;
    let engine = compile_engine(&file, args.generator.as_deref())?;
    let tree = load_tree(&args.input)?;
    info!(input = %args.input.display(), nodes = tree.node_count(), "compiling");

    let program = engine.run(&tree)?;
    write_output(args.output.as_deref(), program.as_bytes())?;

    if let Some(output) = &args.output {
        eprintln!(
            "{} Compiled {} to {}",
            style("✓").green(),
            args.input.display(),
            output.display()
        );
    }
    Ok(())
}
