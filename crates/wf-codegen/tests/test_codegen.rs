// Generated program text for the reference generators.

use pretty_assertions::assert_eq;
use wf_codegen::{default_generators, ArrayCodegen, BufferCodegen};
use wf_core::error::{CompileError, ConfigError};
use wf_core::render::{render, Bindings};
use wf_core::{node, Node, Result};
use wf_pipeline::{options, ConfigurableStage, Options, Stage};

fn hello() -> Node {
    node![
        sequence,
        node![static, "Hello "],
        node![dynamic, "name"],
        node![static, "!"]
    ]
}

/// Block-free tree mixing escapes, literals and nested sequences.
fn escaped() -> Node {
    node![
        sequence,
        node![static, "Hi \"you\"\n\t"],
        node![dynamic, "name"],
        node![static, " caf\u{e9} \\ "],
        node![dynamic, "42"],
        node![sequence, node![dynamic, "\"x\""], node![static, "{"], node![dynamic, "2.5"]],
        node![static, "}"]
    ]
}

const STATIC_LINES: [(&str, &str); 2] = [
    ("_buf.push_str(\"", "\");"),
    ("_buf.push(String::from(\"", "\"));"),
];
const DYNAMIC_LINES: [(&str, &str); 2] = [
    ("_buf.push_str(&(", ").to_string());"),
    ("_buf.push((", ").to_string());"),
];

fn strip_line<'a>(line: &'a str, forms: &[(&str, &str)]) -> Option<&'a str> {
    forms
        .iter()
        .find_map(|(prefix, suffix)| line.strip_prefix(prefix)?.strip_suffix(suffix))
}

fn unescape(body: &str) -> String {
    let mut out = String::new();
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let hex: String = chars.by_ref().skip(1).take_while(|c| *c != '}').collect();
                out.push(char::from_u32(u32::from_str_radix(&hex, 16).unwrap()).unwrap());
            }
            Some(other) => out.push(other),
            None => panic!("dangling escape in {body:?}"),
        }
    }
    out
}

/// Evaluates a block-free program by reading back its push statements; each
/// expression is evaluated the way the reference renderer evaluates it.
fn run_program(code: &str, bindings: &Bindings) -> Result<String> {
    let mut out = String::new();
    for line in code.lines().map(str::trim) {
        if let Some(expr) = strip_line(line, &DYNAMIC_LINES) {
            out.push_str(&render(&Node::dynamic(expr), bindings)?);
        } else if let Some(body) = strip_line(line, &STATIC_LINES) {
            out.push_str(&unescape(body));
        } else {
            assert!(
                line.starts_with("let mut _buf") || line == "_buf" || line == "_buf.concat()",
                "unexpected line {line:?}"
            );
        }
    }
    Ok(out)
}

fn branching() -> Node {
    node![
        sequence,
        node![block, "if user.admin {"],
        node![static, "root"],
        node![block, "} else {"],
        node![dynamic, " user.name "],
        node![block, "}"],
        node![static, "\n"]
    ]
}

#[test]
fn test_buffer_generator() -> Result<()> {
    let codegen = BufferCodegen::with_defaults()?;
    assert_eq!(
        codegen.run(&hello())?,
        "let mut _buf = String::new();\n\
         _buf.push_str(\"Hello \");\n\
         _buf.push_str(&(name).to_string());\n\
         _buf.push_str(\"!\");\n\
         _buf\n"
    );
    assert_eq!(
        codegen.run(&branching())?,
        "let mut _buf = String::new();\n\
         if user.admin {\n\
         \x20   _buf.push_str(\"root\");\n\
         } else {\n\
         \x20   _buf.push_str(&(user.name).to_string());\n\
         }\n\
         _buf.push_str(\"\\n\");\n\
         _buf\n"
    );
    Ok(())
}

#[test]
fn test_array_generator_with_custom_buffer() -> Result<()> {
    let codegen = ArrayCodegen::configure(&Options::new(), &options! { "buffer" => "parts" })?;
    assert_eq!(
        codegen.run(&hello())?,
        "let mut parts: Vec<String> = Vec::new();\n\
         parts.push(String::from(\"Hello \"));\n\
         parts.push((name).to_string());\n\
         parts.push(String::from(\"!\"));\n\
         parts.concat()\n"
    );
    Ok(())
}

#[test]
fn test_generators_emit_the_same_pieces_in_the_same_order() -> Result<()> {
    let buffer = BufferCodegen::with_defaults()?.run(&branching())?;
    let array = ArrayCodegen::with_defaults()?.run(&branching())?;

    let pieces = |code: &str| -> Vec<String> {
        code.lines()
            .map(str::trim)
            .filter(|line| line.contains("push"))
            .map(|line| {
                line.replace("_buf.push_str(&(", "(")
                    .replace("_buf.push_str(", "")
                    .replace("_buf.push(String::from(", "")
                    .replace("_buf.push((", "(")
                    .trim_end_matches(';')
                    .trim_end_matches(')')
                    .to_string()
            })
            .collect()
    };
    assert_eq!(pieces(&buffer), pieces(&array));
    assert_eq!(
        buffer.lines().filter(|line| line.contains('{') || line.contains('}')).count(),
        array.lines().filter(|line| line.contains('{') || line.contains('}')).count()
    );
    Ok(())
}

#[test]
fn test_programs_evaluate_to_the_rendered_text() -> Result<()> {
    let bindings = Bindings::new().with("name", "World");
    let buffer = BufferCodegen::with_defaults()?;
    let array = ArrayCodegen::with_defaults()?;

    for tree in [hello(), escaped()] {
        let expected = render(&tree, &bindings)?;
        assert_eq!(run_program(&buffer.run(&tree)?, &bindings)?, expected);
        assert_eq!(run_program(&array.run(&tree)?, &bindings)?, expected);
    }
    assert_eq!(
        render(&escaped(), &bindings)?,
        "Hi \"you\"\n\tWorld caf\u{e9} \\ 42x{2.5}"
    );
    Ok(())
}

#[test]
fn test_generators_are_deterministic_and_pure() -> Result<()> {
    let buffer = BufferCodegen::with_defaults()?;
    let array = ArrayCodegen::with_defaults()?;

    for tree in [hello(), branching(), escaped()] {
        let snapshot = tree.clone();
        assert_eq!(buffer.run(&tree)?, buffer.run(&tree)?);
        assert_eq!(array.run(&tree)?, array.run(&tree)?);
        assert_eq!(tree, snapshot);
    }
    Ok(())
}

#[test]
fn test_higher_level_tags_are_shape_errors() -> Result<()> {
    let codegen = BufferCodegen::with_defaults()?;
    let err = codegen
        .run(&node![sequence, node![if, "x", node![static, "a"]]])
        .unwrap_err();
    assert!(matches!(err, CompileError::Shape { .. }));
    assert_eq!(err.failing_stage(), Some("buffer"));
    Ok(())
}

#[test]
fn test_malformed_core_nodes_are_generation_errors() -> Result<()> {
    let codegen = ArrayCodegen::with_defaults()?;
    for tree in [
        node![static, 1],
        node![static, "a", "b"],
        node![dynamic, ""],
        node![block, "   "],
        node![sequence, "loose"],
    ] {
        let err = codegen.run(&tree).unwrap_err();
        assert!(
            matches!(err, CompileError::Generation { .. }),
            "{tree}: {err}"
        );
    }
    Ok(())
}

#[test]
fn test_buffer_name_must_be_a_variable() {
    let err = BufferCodegen::configure(&Options::new(), &options! { "buffer" => "a.b" }).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidOption {
            stage: "buffer".into(),
            option: "buffer".into(),
            expected: "a variable name".into(),
            found: "\"a.b\"".into(),
        }
    );
}

#[test]
fn test_registry_lists_both_generators() -> Result<()> {
    let generators = default_generators();
    assert_eq!(generators.names().collect::<Vec<_>>(), vec!["array", "buffer"]);
    let array = generators.build("array", &options! { "buffer" => "out" }, &Options::new())?;
    assert!(array.run(&hello())?.starts_with("let mut out: Vec<String>"));
    Ok(())
}
