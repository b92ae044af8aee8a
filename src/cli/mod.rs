pub mod audit;
pub mod dedup;
pub mod matching;
pub mod score;

use std::io::{BufRead, Write};

/// Ask for explicit confirmation before a destructive operation.
pub(crate) fn confirm(prompt: &str) -> std::io::Result<bool> {
    print!("{prompt} (y/N): ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
