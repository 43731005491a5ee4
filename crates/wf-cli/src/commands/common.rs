//! Reading trees and writing results.

use crate::{CliError, Result};
use std::io::Write;
use std::path::Path;
use wf_core::json::load_node_from_str;
use wf_core::{binary, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Json,
    Binary,
}

impl TreeFormat {
    /// `.wfir` files hold the binary form, anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("wfir") => TreeFormat::Binary,
            _ => TreeFormat::Json,
        }
    }
}

pub fn load_tree(path: &Path) -> Result<Node> {
    let tree = match TreeFormat::from_path(path) {
        TreeFormat::Binary => {
            let bytes = std::fs::read(path).map_err(|e| CliError::io(path, e))?;
            binary::decode(&bytes)?
        }
        TreeFormat::Json => {
            let text = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
            load_node_from_str(&text)?
        }
    };
    Ok(tree)
}

/// Write `content` to `output`, or to stdout without one.
pub fn write_output(output: Option<&Path>, content: &[u8]) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content).map_err(|e| CliError::io(path, e)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content)
                .and_then(|_| stdout.flush())
                .map_err(|e| CliError::io("<stdout>", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wf_core::node;

    #[test]
    fn test_format_follows_the_extension() {
        assert_eq!(TreeFormat::from_path(Path::new("a.wfir")), TreeFormat::Binary);
        assert_eq!(TreeFormat::from_path(Path::new("a.json")), TreeFormat::Json);
        assert_eq!(TreeFormat::from_path(Path::new("tree")), TreeFormat::Json);
    }

    #[test]
    fn test_load_both_forms() {
        let dir = TempDir::new().unwrap();
        let tree = node![sequence, node![static, "a"], node![dynamic, "b"]];

        let json = dir.path().join("tree.json");
        std::fs::write(&json, r#"["sequence", ["static", "a"], ["dynamic", "b"]]"#).unwrap();
        let wfir = dir.path().join("tree.wfir");
        std::fs::write(&wfir, binary::encode(&tree).unwrap()).unwrap();

        assert_eq!(load_tree(&json).unwrap(), tree);
        assert_eq!(load_tree(&wfir).unwrap(), tree);
        assert!(matches!(
            load_tree(&dir.path().join("missing.json")),
            Err(CliError::Io { .. })
        ));
    }
}
