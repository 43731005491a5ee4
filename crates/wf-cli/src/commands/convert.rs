//! Conversions between the JSON and binary tree forms.

use crate::commands::common::{load_tree, write_output};
use crate::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;
use wf_core::binary;
use wf_core::json::{write_node_to_string, write_node_to_string_pretty};

/// Arguments for the encode command
#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// JSON tree to encode
    pub input: PathBuf,

    /// Binary file to write
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the decode command
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Binary tree to decode
    pub input: PathBuf,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

pub fn encode_command(args: EncodeArgs) -> Result<()> {
    let tree = load_tree(&args.input)?;
    let bytes = binary::encode(&tree)?;
    info!(nodes = tree.node_count(), bytes = bytes.len(), "encoded tree");
    write_output(Some(args.output.as_path()), &bytes)
}

pub fn decode_command(args: DecodeArgs) -> Result<()> {
    let tree = load_tree(&args.input)?;
    let mut json = if args.compact {
        write_node_to_string(&tree)?
    } else {
        write_node_to_string_pretty(&tree)?
    };
    json.push('\n');
    write_output(args.output.as_deref(), json.as_bytes())
}
