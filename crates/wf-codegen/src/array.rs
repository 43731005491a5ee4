use crate::emitter::{string_literal, Emitter};
use crate::generator::{buffer_name, Codegen, Generator};
use wf_core::error::ConfigError;
use wf_pipeline::{OptionKind, OptionSpec, ResolvedOptions};

pub type ArrayCodegen = Codegen<ArrayGenerator>;

/// Collects output pieces in a `Vec<String>` and joins them at the end.
#[derive(Debug, Clone)]
pub struct ArrayGenerator {
    pub buffer: String,
}

impl Generator for ArrayGenerator {
    const NAME: &'static str = "array";

    fn option_specs() -> &'static [OptionSpec] {
        const SPECS: &[OptionSpec] = &[OptionSpec::optional(
            "buffer",
            OptionKind::Text,
            "name of the parts vector (default `_buf`)",
        )];
        SPECS
    }

    fn from_options(options: &ResolvedOptions) -> Result<Self, ConfigError> {
        Ok(ArrayGenerator {
            buffer: buffer_name(options, crate::buffer::DEFAULT_BUFFER)?,
        })
    }

    fn preamble(&self, out: &mut Emitter) {
        out.push_line(&format!("let mut {}: Vec<String> = Vec::new();", self.buffer));
    }

    fn on_static(&self, text: &str, out: &mut Emitter) {
        out.push_line(&format!(
            "{}.push(String::from({}));",
            self.buffer,
            string_literal(text)
        ));
    }

    fn on_dynamic(&self, expr: &str, out: &mut Emitter) {
        out.push_line(&format!("{}.push(({}).to_string());", self.buffer, expr));
    }

    fn postamble(&self, out: &mut Emitter) {
        out.push_line(&format!("{}.concat()", self.buffer));
    }
}
