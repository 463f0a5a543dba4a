//! External line-search fallback.
//!
//! Feeds all candidate lines to an external `grep -E -n` process and recovers
//! the matching input lines from its "line-number:content" output. This is a
//! plain regex/substring contract, not abbreviation matching; it exists only
//! as a degraded mode that bypasses the enumerator and synthesizer entirely.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

/// Run `pattern` over `lines` through an external grep process.
///
/// Returns the 0-based indices of matching lines in input order. grep exit
/// status 1 (no matches) is not an error; anything above 1 is.
pub fn filter_grep(pattern: &str, lines: &[String]) -> Result<Vec<usize>, String> {
    let mut child = Command::new("grep")
        .args(["-E", "-n", pattern])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to spawn grep: {}", e))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| "failed to open grep stdin".to_string())?;
    let input = lines.join("\n");

    // Writer thread avoids deadlock when grep's output fills the pipe
    // before it has consumed all input.
    let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

    let output = child
        .wait_with_output()
        .map_err(|e| format!("failed to read grep output: {}", e))?;
    writer
        .join()
        .map_err(|_| "grep writer thread panicked".to_string())?
        .map_err(|e| format!("failed to write to grep: {}", e))?;

    match output.status.code() {
        Some(0) | Some(1) => {}
        Some(code) => return Err(format!("grep exited with status {}", code)),
        None => return Err("grep terminated by signal".to_string()),
    }

    Ok(parse_matches(
        &String::from_utf8_lossy(&output.stdout),
        lines.len(),
    ))
}

/// Parse grep -n output ("line-number:content") into 0-based input indices.
///
/// Lines that don't carry a parseable 1-based number are skipped, as are
/// numbers outside the input range.
fn parse_matches(out: &str, line_count: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = out
        .lines()
        .filter_map(|line| line.split(':').next())
        .filter_map(|num| num.parse::<usize>().ok())
        .filter(|&n| n >= 1 && n <= line_count)
        .map(|n| n - 1)
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}
