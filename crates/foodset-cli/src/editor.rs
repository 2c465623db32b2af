//! Interactive input support
//!
//! Lets users paste import data into their editor, and asks for
//! confirmation before destructive commands.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Starting text for an import; an empty JSON array
const IMPORT_TEMPLATE: &str = "[\n  \n]\n";

#[cfg(windows)]
const FALLBACK_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const FALLBACK_EDITOR: &str = "vi";

/// Open the user's editor on an empty array and return what they saved
///
/// Fails if the file comes back untouched, so closing the editor does not
/// replace the dataset with nothing.
pub fn import_from_editor() -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("foodset-import-")
        .suffix(".json")
        .tempfile()
        .context("Failed to create a file for the editor")?;
    file.write_all(IMPORT_TEMPLATE.as_bytes())
        .context("Failed to prepare the import file")?;

    let (program, args) = editor_command(env::var("EDITOR").ok(), env::var("VISUAL").ok());
    let status = Command::new(&program)
        .args(&args)
        .arg(file.path())
        .status()
        .with_context(|| format!("Failed to run editor '{}'. Set $EDITOR to one that works.", program))?;
    if !status.success() {
        bail!("Editor '{}' exited with {}", program, status);
    }

    let text = fs::read_to_string(file.path()).context("Failed to read the edited import file")?;
    if is_untouched(&text) {
        bail!("Nothing to import: the editor was closed without adding any items");
    }
    Ok(text)
}

/// Program and leading arguments from $EDITOR, then $VISUAL
///
/// Values like `code --wait` are split on whitespace.
fn editor_command(editor: Option<String>, visual: Option<String>) -> (String, Vec<String>) {
    let configured = [editor, visual]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty());

    match configured {
        Some(value) => {
            let mut parts = value.split_whitespace().map(str::to_string);
            let program = parts.next().unwrap_or_else(|| FALLBACK_EDITOR.to_string());
            (program, parts.collect())
        }
        None => (FALLBACK_EDITOR.to_string(), Vec::new()),
    }
}

fn is_untouched(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.is_empty() || compact == "[]"
}

/// True when stdin is a terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Ask a yes/no question; anything but yes (or no terminal) means no
pub fn confirm(prompt: &str) -> Result<bool> {
    if !is_interactive() {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
