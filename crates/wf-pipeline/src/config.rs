//! Per-stage configuration.
//!
//! A stage declares the options it understands as a static list of
//! [`OptionSpec`]s. When an engine instantiates the stage, the engine-wide
//! options and the stage's own options are merged and checked against that
//! list once; the stage only ever sees the resolved, read-only result.

use derive_more::From;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wf_core::error::ConfigError;

/// Value of a single option, as written in an engine file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, From)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<OptionValue>),
}

impl OptionValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "int",
            OptionValue::Float(_) => "float",
            OptionValue::Text(_) => "text",
            OptionValue::List(_) => "list",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(items: Vec<&str>) -> Self {
        OptionValue::List(items.into_iter().map(OptionValue::from).collect())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items.into_iter().map(OptionValue::Text).collect())
    }
}

pub type Options = BTreeMap<String, OptionValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Int,
    /// Integers are accepted where a float is expected.
    Float,
    Text,
    TextList,
}

impl OptionKind {
    pub fn describe(self) -> &'static str {
        match self {
            OptionKind::Bool => "a boolean",
            OptionKind::Int => "an integer",
            OptionKind::Float => "a number",
            OptionKind::Text => "a string",
            OptionKind::TextList => "a list of strings",
        }
    }

    pub fn accepts(self, value: &OptionValue) -> bool {
        match (self, value) {
            (OptionKind::Bool, OptionValue::Bool(_))
            | (OptionKind::Int, OptionValue::Int(_))
            | (OptionKind::Float, OptionValue::Float(_) | OptionValue::Int(_))
            | (OptionKind::Text, OptionValue::Text(_)) => true,
            (OptionKind::TextList, OptionValue::List(items)) => {
                items.iter().all(|item| matches!(item, OptionValue::Text(_)))
            }
            _ => false,
        }
    }
}

/// Declaration of one option a stage understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    pub required: bool,
    pub doc: &'static str,
}

impl OptionSpec {
    pub const fn optional(name: &'static str, kind: OptionKind, doc: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            doc,
        }
    }

    pub const fn required(name: &'static str, kind: OptionKind, doc: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            doc,
        }
    }
}

/// Options of one stage instance after merging and validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
    stage: String,
    values: Options,
}

impl ResolvedOptions {
    /// Merge `global` and `local` for `stage` and check the result against
    /// `specs`.
    ///
    /// Every key of `local` must be declared. Global keys that the stage does
    /// not declare are ignored, since they are meant for other stages. Local
    /// values override global ones.
    pub fn bind(
        stage: &str,
        specs: &[OptionSpec],
        global: &Options,
        local: &Options,
    ) -> Result<Self, ConfigError> {
        if let Some(unknown) = local
            .keys()
            .find(|name| !specs.iter().any(|spec| spec.name == name.as_str()))
        {
            return Err(ConfigError::UnknownOption {
                stage: stage.to_string(),
                option: unknown.clone(),
            });
        }

        let mut values = Options::new();
        for spec in specs {
            match local.get(spec.name).or_else(|| global.get(spec.name)) {
                Some(value) if spec.kind.accepts(value) => {
                    values.insert(spec.name.to_string(), value.clone());
                }
                Some(value) => {
                    return Err(ConfigError::InvalidOption {
                        stage: stage.to_string(),
                        option: spec.name.to_string(),
                        expected: spec.kind.describe().to_string(),
                        found: value.kind_name().to_string(),
                    })
                }
                None if spec.required => {
                    return Err(ConfigError::MissingOption {
                        stage: stage.to_string(),
                        option: spec.name.to_string(),
                    })
                }
                None => {}
            }
        }

        Ok(Self {
            stage: stage.to_string(),
            values,
        })
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.get(name) {
            Some(OptionValue::Bool(value)) => *value,
            _ => default,
        }
    }

    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        match self.get(name) {
            Some(OptionValue::Int(value)) => *value,
            _ => default,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_text)
    }

    pub fn text_or(&self, name: &str, default: &str) -> String {
        self.text(name).unwrap_or(default).to_string()
    }

    pub fn text_list_or(&self, name: &str, default: &[&str]) -> Vec<String> {
        match self.get(name) {
            Some(OptionValue::List(items)) => items
                .iter()
                .filter_map(OptionValue::as_text)
                .map(str::to_string)
                .collect(),
            _ => default.iter().map(|item| item.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[OptionSpec] = &[
        OptionSpec::required("buffer", OptionKind::Text, "buffer variable"),
        OptionSpec::optional("erase", OptionKind::TextList, "tags to erase"),
        OptionSpec::optional("ratio", OptionKind::Float, "a number"),
    ];

    #[test]
    fn local_overrides_global() {
        let global = options! { "buffer" => "_buf", "ratio" => 2, "unrelated" => true };
        let local = options! { "buffer" => "out" };

        let resolved = ResolvedOptions::bind("gen", SPECS, &global, &local).unwrap();

        assert_eq!(resolved.text("buffer"), Some("out"));
        assert_eq!(resolved.get("ratio"), Some(&OptionValue::Int(2)));
        assert!(!resolved.has("unrelated"));
        assert_eq!(resolved.text_list_or("erase", &["comment"]), vec!["comment"]);
    }

    #[test]
    fn unknown_local_option_is_rejected() {
        let err = ResolvedOptions::bind(
            "gen",
            SPECS,
            &Options::new(),
            &options! { "buffer" => "b", "bufer" => "typo" },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownOption {
                stage: "gen".into(),
                option: "bufer".into()
            }
        );
    }

    #[test]
    fn missing_and_mistyped_options() {
        let missing = ResolvedOptions::bind("gen", SPECS, &Options::new(), &Options::new());
        assert!(matches!(missing, Err(ConfigError::MissingOption { .. })));

        let mistyped = ResolvedOptions::bind(
            "gen",
            SPECS,
            &Options::new(),
            &options! { "buffer" => "b", "erase" => vec![OptionValue::from(1)] },
        );
        assert_eq!(
            mistyped.unwrap_err().to_string(),
            "option `erase` of stage `gen` expects a list of strings, found list"
        );
    }
}
