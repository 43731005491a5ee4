//! Integration tests for the Weft CLI

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wf_core::json::load_node_from_str;

const HELLO: &str = r#"["sequence", ["static", "Hello "], ["dynamic", "name"], ["static", "!"]]"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn wf() -> Command {
    Command::cargo_bin("wf").unwrap()
}

#[test]
fn test_cli_help() {
    wf().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weft"));
}

#[test]
fn test_cli_version() {
    wf().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_compile_with_default_engine() {
    let dir = TempDir::new().unwrap();
    let tree = write(dir.path(), "hello.json", HELLO);

    wf().arg("compile").arg(&tree).assert().success().stdout(
        "let mut _buf = String::new();\n\
         _buf.push_str(\"Hello \");\n\
         _buf.push_str(&(name).to_string());\n\
         _buf.push_str(\"!\");\n\
         _buf\n",
    );
}

#[test]
fn test_compile_with_engine_file() {
    let dir = TempDir::new().unwrap();
    let tree = write(
        dir.path(),
        "page.json",
        r#"["sequence",
            ["comment", "header"],
            ["if", "user.admin", ["static", "admin "]],
            ["dynamic", "\"v\""],
            ["static", "1"]]"#,
    );
    let engine = write(
        dir.path(),
        "page.toml",
        r#"
        name = "page"

        [options]
        buffer = "parts"

        [[filters]]
        name = "erase"

        [[filters]]
        name = "control-flow"

        [[filters]]
        name = "inline-dynamic"

        [[filters]]
        name = "flatten"

        [[filters]]
        name = "merge-static"

        [generator]
        name = "array"
        "#,
    );
    let output = dir.path().join("page.rs");

    wf().arg("compile")
        .arg(&tree)
        .arg("--engine")
        .arg(&engine)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "let mut parts: Vec<String> = Vec::new();\n\
         if user.admin {\n\
         \x20   parts.push(String::from(\"admin \"));\n\
         }\n\
         parts.push(String::from(\"v1\"));\n\
         parts.concat()\n"
    );
}

#[test]
fn test_generator_flag_overrides_engine_file() {
    let dir = TempDir::new().unwrap();
    let tree = write(dir.path(), "hello.json", HELLO);

    wf().args(["compile", "--generator", "array"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("let mut _buf: Vec<String>"));
}

#[test]
fn test_render_with_bindings() {
    let dir = TempDir::new().unwrap();
    let tree = write(dir.path(), "hello.json", HELLO);

    wf().arg("render")
        .arg(&tree)
        .args(["--bind", "name=World"])
        .assert()
        .success()
        .stdout("Hello World!");
}

#[test]
fn test_encode_then_decode() {
    let dir = TempDir::new().unwrap();
    let tree = write(dir.path(), "hello.json", HELLO);
    let binary = dir.path().join("hello.wfir");

    wf().arg("encode")
        .arg(&tree)
        .arg("--output")
        .arg(&binary)
        .assert()
        .success();
    assert!(fs::read(&binary).unwrap().starts_with(b"WFIR\x01"));

    let decoded = wf().arg("decode").arg(&binary).output().unwrap();
    assert!(decoded.status.success());
    assert_eq!(
        load_node_from_str(&String::from_utf8(decoded.stdout).unwrap()).unwrap(),
        load_node_from_str(HELLO).unwrap()
    );

    // the binary form compiles like the JSON one
    wf().arg("compile")
        .arg(&binary)
        .assert()
        .success()
        .stdout(predicate::str::contains("_buf.push_str(\"Hello \");"));
}

#[test]
fn test_unknown_tag_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let tree = write(
        dir.path(),
        "bad.json",
        r#"["sequence", ["static", "a"], ["include", "footer"]]"#,
    );

    wf().arg("compile")
        .arg(&tree)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("control-flow"))
        .stderr(predicate::str::contains("include"));
}

#[test]
fn test_unknown_option_fails_at_construction() {
    let dir = TempDir::new().unwrap();
    let tree = write(dir.path(), "hello.json", HELLO);
    let engine = write(
        dir.path(),
        "bad.toml",
        r#"
        [[filters]]
        name = "flatten"
        options = { unwrap = true }
        "#,
    );

    wf().arg("compile")
        .arg(&tree)
        .arg("--engine")
        .arg(&engine)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "stage `flatten` does not recognize option `unwrap`",
        ));
}

#[test]
fn test_misspelled_global_fails_for_compile_and_render() {
    let dir = TempDir::new().unwrap();
    let tree = write(dir.path(), "hello.json", HELLO);
    let engine = write(
        dir.path(),
        "typo.toml",
        r#"
        [options]
        bufer = "out"
        "#,
    );

    for extra in [vec!["compile"], vec!["render", "--bind", "name=World"]] {
        wf().args(&extra)
            .arg(&tree)
            .arg("--engine")
            .arg(&engine)
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("global option `bufer`"));
    }
}

#[test]
fn test_malformed_binary_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.wfir");
    fs::write(&path, b"WFIR\x01N\x00\x00").unwrap();

    wf().arg("decode")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed IR encoding"));
}

#[test]
fn test_stages_lists_filters_and_generators() {
    wf().arg("stages")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge-static"))
        .stdout(predicate::str::contains("control-flow"))
        .stdout(predicate::str::contains("pass_through"))
        .stdout(predicate::str::contains("buffer"))
        .stdout(predicate::str::contains("array"));
}
