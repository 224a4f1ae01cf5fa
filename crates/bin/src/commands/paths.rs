//! Paths command - lists the paths a rule set validates in a model.

use formstate::validation::validation_paths;

use super::{CommandResult, load_model, load_rules};
use crate::cli::CheckArgs;
use crate::output::{OutputFormat, print_json};

/// Run the paths command
pub fn run(args: &CheckArgs, format: OutputFormat) -> CommandResult<()> {
    let model = load_model(&args.model)?;
    let definition = load_rules(&args.rules)?;
    let paths = validation_paths(&model, &definition);

    match format {
        OutputFormat::Human => {
            for path in &paths {
                println!("{path}");
            }
        }
        OutputFormat::Json => print_json(&paths)?,
    }

    Ok(())
}
