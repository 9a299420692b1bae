//! Credential prompting
//!
//! Reads secrets without echoing when a terminal is attached, and falls back
//! to plain stdin lines otherwise so the binary stays scriptable. Prompts go
//! to stderr; stdout carries only command output. Secrets are returned in a
//! `Zeroizing` wrapper so they are wiped when dropped.

use std::io::{self, BufRead, IsTerminal, Write};

use zeroize::Zeroizing;

use crate::error::{PassbookError, PassbookResult};

/// Prompt for a secret string without echoing it
pub fn prompt_credential(prompt: &str) -> PassbookResult<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        let secret = rpassword::prompt_password(prompt)
            .map_err(|e| PassbookError::Storage(format!("Failed to read credential: {}", e)))?;
        return Ok(Zeroizing::new(secret));
    }

    // Non-interactive input: one line per prompt
    eprint!("{}", prompt);
    io::stderr()
        .flush()
        .map_err(|e| PassbookError::Storage(format!("Failed to write prompt: {}", e)))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PassbookError::Storage(format!("Failed to read credential: {}", e)))?;

    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }

    Ok(Zeroizing::new(line))
}
