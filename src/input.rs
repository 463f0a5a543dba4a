//! Stdin input utilities.

use std::io::{self, BufRead, IsTerminal};

/// Read candidate lines from stdin if piped (not a terminal).
///
/// Returns one entry per input line with the trailing newline stripped, or
/// an empty list if stdin is a terminal.
pub fn read_lines() -> Result<Vec<String>, String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        lines.push(line.map_err(|e| format!("failed to read stdin: {}", e))?);
    }
    Ok(lines)
}
