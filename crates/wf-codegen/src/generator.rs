use crate::emitter::Emitter;
use tracing::debug;
use wf_core::error::{CompileError, ConfigError};
use wf_core::tag::names;
use wf_core::{generation_bail, shape_bail, Arg, Node, Result};
use wf_pipeline::{ConfigurableStage, OptionSpec, ResolvedOptions, Stage};

/// How each core node is spelled in the generated program.
///
/// Callbacks are invoked in tree order between one `preamble` and one
/// `postamble`. Generators are interchangeable: the programs they produce for
/// the same tree must render the same output.
pub trait Generator: Sized {
    const NAME: &'static str;

    fn option_specs() -> &'static [OptionSpec] {
        &[]
    }

    fn from_options(options: &ResolvedOptions) -> std::result::Result<Self, ConfigError>;

    fn preamble(&self, out: &mut Emitter);
    fn on_static(&self, text: &str, out: &mut Emitter);
    fn on_dynamic(&self, expr: &str, out: &mut Emitter);

    fn on_block(&self, code: &str, out: &mut Emitter) {
        out.push_code(code);
    }

    fn postamble(&self, out: &mut Emitter);
}

/// Runs a [`Generator`] over a tree as a Node -> String stage.
#[derive(Debug, Clone)]
pub struct Codegen<G> {
    generator: G,
}

impl<G: Generator> Codegen<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generate(&self, node: &Node) -> Result<String> {
        let mut out = Emitter::new();
        self.generator.preamble(&mut out);
        self.walk(node, &mut out)?;
        self.generator.postamble(&mut out);
        let code = out.finish();
        debug!(generator = G::NAME, bytes = code.len(), "generated program");
        Ok(code)
    }

    fn walk(&self, node: &Node, out: &mut Emitter) -> Result<()> {
        match node.tag().as_str() {
            names::SEQUENCE => {
                for arg in node.args() {
                    match arg {
                        Arg::Node(child) => self.walk(child, out)?,
                        Arg::Literal(literal) => generation_bail!(
                            G::NAME,
                            node,
                            "sequence arguments must be nodes, found {} literal",
                            literal.kind()
                        ),
                    }
                }
            }
            names::STATIC => {
                let text = single_text(G::NAME, node)?;
                if !text.is_empty() {
                    self.generator.on_static(text, out);
                }
            }
            names::DYNAMIC => {
                let expr = code_text(G::NAME, node)?;
                self.generator.on_dynamic(expr, out);
            }
            names::BLOCK => {
                let code = code_text(G::NAME, node)?;
                self.generator.on_block(code, out);
            }
            _ => shape_bail!(
                G::NAME,
                node,
                "generators accept only sequence, static, dynamic and block"
            ),
        }
        Ok(())
    }
}

fn single_text<'a>(stage: &str, node: &'a Node) -> Result<&'a str> {
    match node.args() {
        [arg] => arg.as_text().ok_or_else(|| {
            CompileError::generation(
                stage,
                Some(node.clone()),
                format!("`{}` expects a text literal, found {arg}", node.tag()),
            )
        }),
        args => Err(CompileError::generation(
            stage,
            Some(node.clone()),
            format!("`{}` expects 1 argument, found {}", node.tag(), args.len()),
        )),
    }
}

fn code_text<'a>(stage: &str, node: &'a Node) -> Result<&'a str> {
    let code = single_text(stage, node)?.trim();
    if code.is_empty() {
        generation_bail!(stage, node, "`{}` needs non-empty code", node.tag());
    }
    Ok(code)
}

impl<G: Generator> Stage for Codegen<G> {
    type Input = Node;
    type Output = String;

    fn name(&self) -> &str {
        G::NAME
    }

    fn run(&self, input: &Node) -> Result<String> {
        self.generate(input)
    }
}

impl<G: Generator> ConfigurableStage for Codegen<G> {
    const NAME: &'static str = G::NAME;

    fn option_specs() -> &'static [OptionSpec] {
        G::option_specs()
    }

    fn from_options(options: &ResolvedOptions) -> std::result::Result<Self, ConfigError> {
        G::from_options(options).map(Codegen::new)
    }
}

/// Read the `buffer` option shared by the reference generators.
pub(crate) fn buffer_name(
    options: &ResolvedOptions,
    default: &str,
) -> std::result::Result<String, ConfigError> {
    let name = options.text_or("buffer", default);
    if !wf_core::expr::is_identifier(&name) || name.contains('.') {
        return Err(ConfigError::InvalidOption {
            stage: options.stage().to_string(),
            option: "buffer".to_string(),
            expected: "a variable name".to_string(),
            found: format!("{name:?}"),
        });
    }
    Ok(name)
}
