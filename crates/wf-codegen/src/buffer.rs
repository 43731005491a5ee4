use crate::emitter::{string_literal, Emitter};
use crate::generator::{buffer_name, Codegen, Generator};
use wf_core::error::ConfigError;
use wf_pipeline::{OptionKind, OptionSpec, ResolvedOptions};

pub type BufferCodegen = Codegen<BufferGenerator>;

/// Appends every piece of output to one `String`.
///
/// ```text
/// let mut _buf = String::new();
/// _buf.push_str("Hello ");
/// _buf.push_str(&(name).to_string());
/// _buf
/// ```
#[derive(Debug, Clone)]
pub struct BufferGenerator {
    pub buffer: String,
}

pub const DEFAULT_BUFFER: &str = "_buf";

impl Generator for BufferGenerator {
    const NAME: &'static str = "buffer";

    fn option_specs() -> &'static [OptionSpec] {
        const SPECS: &[OptionSpec] = &[OptionSpec::optional(
            "buffer",
            OptionKind::Text,
            "name of the output variable (default `_buf`)",
        )];
        SPECS
    }

    fn from_options(options: &ResolvedOptions) -> Result<Self, ConfigError> {
        Ok(BufferGenerator {
            buffer: buffer_name(options, DEFAULT_BUFFER)?,
        })
    }

    fn preamble(&self, out: &mut Emitter) {
        out.push_line(&format!("let mut {} = String::new();", self.buffer));
    }

    fn on_static(&self, text: &str, out: &mut Emitter) {
        out.push_line(&format!("{}.push_str({});", self.buffer, string_literal(text)));
    }

    fn on_dynamic(&self, expr: &str, out: &mut Emitter) {
        out.push_line(&format!("{}.push_str(&({}).to_string());", self.buffer, expr));
    }

    fn postamble(&self, out: &mut Emitter) {
        out.push_line(&self.buffer);
    }
}
