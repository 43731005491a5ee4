//! Diagnostic and error reporting utilities

use crate::CliError;
use miette::{GraphicalReportHandler, GraphicalTheme};
use tracing::warn;

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() {
    let installed = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }));
    if let Err(err) = installed {
        warn!("failed to install the miette report handler: {}", err);
    }
}

/// Plain-text report of `err`: message, diagnostic code and help.
pub fn report(err: &CliError) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor()).with_width(200);
    if handler.render_report(&mut out, err).is_err() {
        return err.to_string();
    }
    out
}

/// Print `err` to stderr through the installed miette handler.
pub fn render_cli_error(err: CliError) {
    eprintln!("{:?}", miette::Report::new(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::error::{CompileError, ConfigError};
    use wf_core::node;

    #[test]
    fn test_config_errors_carry_code_and_help() {
        let err = CliError::from(ConfigError::UnknownOption {
            stage: "flatten".into(),
            option: "unwrap".into(),
        });
        let text = report(&err);
        assert!(text.contains("stage `flatten` does not recognize option `unwrap`"));
        assert!(text.contains("wf::config::unknown_option"));
        assert!(text.contains("wf stages"));
    }

    #[test]
    fn test_pipeline_errors_name_the_stage() {
        let err = CliError::from(CompileError::pipeline(
            "wf",
            0,
            "control-flow",
            CompileError::shape("control-flow", node![include, "x"], "no"),
        ));
        let text = report(&err);
        assert!(text.contains("stage #0 `control-flow` of engine `wf` failed"));
    }
}
