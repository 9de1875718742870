//! `trellis list`: the built-in blueprints.

use trellis_adapters::InMemoryStore;
use trellis_core::application::BlueprintService;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let service = BlueprintService::new(Box::new(InMemoryStore::with_builtin()?));
    let blueprints = service.list_info()?;

    // --output-format json wins over the table default.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Blueprints:")?;
            for info in &blueprints {
                output.print(&format!(
                    "  {:<16} {:>5} files  {:>2} roots  {}",
                    info.name, info.files, info.roots, info.description
                ))?;
            }
        }
        ListFormat::List => {
            for info in &blueprints {
                output.print(&info.name)?;
            }
        }
        ListFormat::Json => output.json(&blueprints)?,
    }

    Ok(())
}
