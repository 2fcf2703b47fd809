use anyhow::Result;
use std::io::{self, BufRead, Write};
use tidyname_core::interrupt::PromptGuard;

/// Ask a `[y/N]` question on stderr. Anything but `y`/`yes` (including EOF)
/// is a no.
pub fn confirm(question: &str) -> Result<bool> {
    let _guard = PromptGuard::activate();
    confirm_with_input(question, &mut io::stdin().lock())
}

fn confirm_with_input<R: BufRead>(question: &str, reader: &mut R) -> Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
