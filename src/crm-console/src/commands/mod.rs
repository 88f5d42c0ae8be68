//! Subcommand handlers, one module per resource.

pub mod auth;
pub mod campaigns;
pub mod customers;
pub mod dashboard;
pub mod orders;

use std::io::{self, Write};

/// Interactive confirmation for destructive or outward-facing actions
/// (delete, send). Bypassed with `--yes`.
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Comma-separated flag values ("a, b,c") into a trimmed list.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::split_list;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(split_list("mug, shirt , ,cap"), vec!["mug", "shirt", "cap"]);
        assert!(split_list("").is_empty());
    }
}
