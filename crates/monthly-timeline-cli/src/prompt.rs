//! Interactive period prompt

use anyhow::{Context, Result};
use monthly_timeline_core::Period;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Input Year-Month (ex. 09-2024) : ";

/// Ask for the period once and parse the answer.
///
/// A malformed answer is an error; there is no second attempt.
pub fn read_period<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Period> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read period from stdin")?;
    if read == 0 {
        anyhow::bail!("no period given (stdin closed before MM-YYYY was entered)");
    }

    Ok(line.parse()?)
}
