//! # Path Arguments
//!
//! Pure checks on the `--input` and `--output` arguments. Nothing here
//! touches the filesystem: a rejected argument leaves no trace on disk.

use std::path::PathBuf;

use crate::error::CommandError;

/// Characters no path argument may contain.
pub const INVALID_CHARS: [char; 6] = ['*', '?', '"', '<', '>', '|'];

/// Extensions accepted for schema-definition documents.
pub const INPUT_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Check the input argument and return it as a path.
pub fn validate_input(raw: &str) -> Result<PathBuf, CommandError> {
    check_common(raw, "Input")?;
    if !has_extension(raw, &INPUT_EXTENSIONS) {
        return Err(CommandError::Path(
            "Input file must have a .json, .yaml, or .yml extension.".into(),
        ));
    }
    Ok(PathBuf::from(raw))
}

/// Check the output argument and return it as a path.
pub fn validate_output(raw: &str) -> Result<PathBuf, CommandError> {
    check_common(raw, "Output")?;
    if !has_extension(raw, &["json"]) {
        return Err(CommandError::Path(
            "Output file must have a .json extension.".into(),
        ));
    }
    Ok(PathBuf::from(raw))
}

fn check_common(raw: &str, role: &str) -> Result<(), CommandError> {
    if raw.trim().is_empty() {
        return Err(CommandError::Path(format!("{role} file path is required.")));
    }
    if raw.contains(INVALID_CHARS) {
        return Err(CommandError::Path(format!(
            "{role} file path contains invalid characters: * ? \" < > |"
        )));
    }
    Ok(())
}

// Case-insensitive, and only on the final component so `dir.json/` fails.
fn has_extension(raw: &str, allowed: &[&str]) -> bool {
    raw.rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && !ext.contains(['/', '\\']))
        .is_some_and(|(_, ext)| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}
