//! Set command - writes or deletes a value at a path.

use formstate::{Path, PathMode, Update, Value};

use super::{CommandResult, load_model};
use crate::cli::SetArgs;
use crate::output::{OutputFormat, print_json};

/// Run the set command
pub fn run(args: &SetArgs, format: OutputFormat) -> CommandResult<()> {
    let model = load_model(&args.model)?;
    let path = Path::parse(&args.path);
    let update = match (&args.value, args.delete) {
        (_, true) => Update::Delete,
        (Some(raw), false) => Update::Set(parse_value(raw)),
        (None, false) => return Err("either --value or --delete is required".into()),
    };
    let mode = if args.strict {
        PathMode::Strict
    } else {
        PathMode::Lenient
    };

    let next = model.update(&path, update, mode)?;
    tracing::info!(path = %path, "Updated model");

    match format {
        OutputFormat::Human => {
            let json = serde_json::Value::from(&next);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Json => print_json(&next)?,
    }

    Ok(())
}

/// Parses `raw` as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}
