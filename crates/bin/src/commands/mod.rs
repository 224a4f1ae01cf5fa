//! Subcommand implementations.

use std::{fs, io::Write, path::Path as FsPath};

use formstate::{ValidationDefinition, Value, validation::rules};

pub mod check;
pub mod paths;
pub mod set;

pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Maps a command outcome to the process exit status: 0 valid, 1 invalid,
/// 2 error. An error is written to `err` once.
pub fn exit_status(outcome: CommandResult<bool>, err: &mut impl Write) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            2
        }
    }
}

/// Reads a model from a JSON file.
pub fn load_model(file: &FsPath) -> CommandResult<Value> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("failed to read model {}: {e}", file.display()))?;
    let model: Value = serde_json::from_str(&text)
        .map_err(|e| format!("model {} is not valid JSON: {e}", file.display()))?;
    tracing::debug!(file = %file.display(), "Loaded model");
    Ok(model)
}

/// Reads and compiles a declarative rule set from a JSON file.
pub fn load_rules(file: &FsPath) -> CommandResult<ValidationDefinition> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("failed to read rules {}: {e}", file.display()))?;
    let definition = rules::compile_str(&text)?;
    tracing::debug!(file = %file.display(), "Compiled rule set");
    Ok(definition)
}
