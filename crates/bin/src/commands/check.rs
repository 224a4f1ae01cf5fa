//! Check command - validates a model against a rule set.

use formstate::validation::validate_model;

use super::{CommandResult, load_model, load_rules};
use crate::cli::CheckArgs;
use crate::output::{OutputFormat, print_json, print_table};

/// Run the check command. Returns whether the model is valid.
pub fn run(args: &CheckArgs, format: OutputFormat) -> CommandResult<bool> {
    let model = load_model(&args.model)?;
    let definition = load_rules(&args.rules)?;
    let errors = validate_model(&model, &definition);

    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = errors
                .iter()
                .map(|(path, error)| {
                    vec![
                        path.to_string(),
                        error.map_or_else(|| "ok".to_string(), str::to_string),
                    ]
                })
                .collect();
            print_table(&["PATH", "RESULT"], &rows);
            let failing = errors.errors().count();
            if failing == 0 {
                println!("valid ({} fields checked)", errors.len());
            } else {
                println!("invalid: {failing} of {} fields failed", errors.len());
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "valid": errors.is_valid(),
                "errors": errors,
            }))?;
        }
    }

    Ok(errors.is_valid())
}
