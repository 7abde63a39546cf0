//! Interactive input: the directory prompt and the final keypress.

use std::path::PathBuf;

use console::Term;
use dialoguer::Input;

use gbfr_core::error::AppError;
use gbfr_core::result::AppResult;

/// Ask for the directory to convert.
pub fn ask_directory() -> AppResult<PathBuf> {
    let answer: String = Input::new()
        .with_prompt("Enter the path to convert")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AppError::validation(format!("Failed to read input: {e}")))?;

    check_directory(&answer)
}

/// Normalize user input and require an existing directory.
pub fn check_directory(raw: &str) -> AppResult<PathBuf> {
    let cleaned = normalize_input(raw);
    if cleaned.is_empty() {
        return Err(AppError::validation("Directory does not exist!"));
    }

    let path = PathBuf::from(cleaned);
    if !path.is_dir() {
        return Err(AppError::validation("Directory does not exist!"));
    }

    Ok(path)
}

/// Trim whitespace and the quotes a terminal adds to dropped folders.
fn normalize_input(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    trimmed
}

/// Block until a key is pressed, when attached to a terminal.
pub fn wait_for_keypress() {
    let term = Term::stdout();
    if !term.is_term() {
        return;
    }

    println!("Press any key to exit...");
    let _ = term.read_key();
}
