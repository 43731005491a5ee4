//! Lists the stages an engine file can declare.

use crate::Result;
use console::style;
use wf_codegen::default_generators;
use wf_optimize::default_filters;
use wf_pipeline::StageRegistry;

pub fn stages_command() -> Result<()> {
    println!("{}", style("Filters").cyan().bold());
    print_registry(&default_filters());
    println!();
    println!("{}", style("Generators").cyan().bold());
    print_registry(&default_generators());
    Ok(())
}

fn print_registry<I: ?Sized + 'static, O: 'static>(registry: &StageRegistry<I, O>) {
    for name in registry.names() {
        println!("  {}", style(name).green());
        for spec in registry.specs(name).unwrap_or_default() {
            println!(
                "      {:<14} {:<18} {}{}",
                spec.name,
                spec.kind.describe(),
                spec.doc,
                if spec.required { " (required)" } else { "" }
            );
        }
    }
}
