//! Reference renderer for the core vocabulary.
//!
//! Evaluates a tree directly instead of generating a program: static text is
//! emitted as is, dynamic expressions are either literals or identifiers
//! looked up in [`Bindings`]. It cannot run block fragments, which are target
//! language code. Filters are checked against it to prove that they keep the
//! rendered output unchanged.

use crate::error::CompileError;
use crate::expr::{is_identifier, parse_literal};
use crate::node::{Arg, Literal, Node};
use crate::tag::names;
use crate::Result;
use std::collections::BTreeMap;

pub const RENDER_STAGE: &str = "render";

/// Values available to embedded expressions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: BTreeMap<String, Literal>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Literal>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Literal> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Literal>> FromIterator<(K, V)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}

pub fn render(node: &Node, bindings: &Bindings) -> Result<String> {
    let mut out = String::new();
    render_into(node, bindings, &mut out)?;
    Ok(out)
}

fn render_into(node: &Node, bindings: &Bindings, out: &mut String) -> Result<()> {
    match node.tag().as_str() {
        names::SEQUENCE => {
            for arg in node.args() {
                match arg {
                    Arg::Node(child) => render_into(child, bindings, out)?,
                    Arg::Literal(_) => generation_bail!(
                        RENDER_STAGE,
                        node,
                        "sequence arguments must be nodes"
                    ),
                }
            }
        }
        names::STATIC => out.push_str(single_text(node)?),
        names::DYNAMIC => {
            let value = evaluate(node, single_text(node)?, bindings)?;
            out.push_str(&value.to_string());
        }
        names::BLOCK => generation_bail!(
            RENDER_STAGE,
            node,
            "block fragments cannot be evaluated by the reference renderer"
        ),
        _ => shape_bail!(
            RENDER_STAGE,
            node,
            "only the core vocabulary can be rendered"
        ),
    }
    Ok(())
}

fn single_text(node: &Node) -> Result<&str> {
    match node.args() {
        [arg] => arg.as_text().ok_or_else(|| {
            CompileError::generation(
                RENDER_STAGE,
                Some(node.clone()),
                format!("`{}` expects a text literal", node.tag()),
            )
        }),
        args => Err(CompileError::generation(
            RENDER_STAGE,
            Some(node.clone()),
            format!("`{}` expects 1 argument, found {}", node.tag(), args.len()),
        )),
    }
}

fn evaluate(node: &Node, expr: &str, bindings: &Bindings) -> Result<Literal> {
    if let Some(literal) = parse_literal(expr) {
        return Ok(literal);
    }
    if is_identifier(expr) {
        return match bindings.get(expr.trim()) {
            Some(value) => Ok(value.clone()),
            None => generation_bail!(RENDER_STAGE, node, "`{}` is not bound", expr.trim()),
        };
    }
    generation_bail!(
        RENDER_STAGE,
        node,
        "`{}` is neither a literal nor an identifier",
        expr
    )
}
