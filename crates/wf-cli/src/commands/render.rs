//! Render command: run the declared filters, then evaluate the tree with the
//! reference renderer.

use crate::cli::EngineFile;
use crate::commands::common::{load_tree, write_output};
use crate::engine::filter_engine;
use crate::{CliError, Result};
use clap::Args;
use std::path::PathBuf;
use wf_core::expr::{is_identifier, parse_literal};
use wf_core::render::{render, Bindings};
use wf_core::Literal;
use wf_pipeline::Stage;

/// Arguments for the render command
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Tree to render (`.wfir` for the binary form, JSON otherwise)
    pub input: PathBuf,

    /// Engine file; only its filters are used
    #[arg(short, long)]
    pub engine: Option<PathBuf>,

    /// Bind a name, e.g. `name=World` or `count=3`. Values that are not
    /// literal expressions are taken as text.
    #[arg(short, long = "bind", value_name = "NAME=VALUE")]
    pub bindings: Vec<String>,
}

pub fn parse_binding(raw: &str) -> Result<(String, Literal)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidInput(format!("binding `{raw}` is not NAME=VALUE")))?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(CliError::InvalidInput(format!(
            "`{name}` is not a valid binding name"
        )));
    }
    let value = parse_literal(value).unwrap_or_else(|| Literal::from(value));
    Ok((name.to_string(), value))
}

/// Execute the render command
pub fn render_command(args: RenderArgs) -> Result<()> {
    let bindings = args
        .bindings
        .iter()
        .map(|raw| parse_binding(raw))
        .collect::<Result<Bindings>>()?;
    let file = EngineFile::load(args.engine.as_deref())?;
    let engine = filter_engine(&file)?;

    let mut tree = load_tree(&args.input)?;
    if let Some(engine) = engine {
        tree = engine.run(&tree)?;
    }
    let rendered = render(&tree, &bindings)?;
    write_output(None, rendered.as_bytes())
}
