//! Interactive tagging console.
//!
//! Reads one sentence per line and answers with its space-joined tags.
//! The line `q` (or end of input) ends the session.

use std::io::{BufRead, Write};

use anyhow::Context;
use postag_core::{Model, ViterbiDecoder};
use tracing::warn;

const QUIT: &str = "q";

/// Runs the console loop and returns the number of sentences tagged.
pub fn run_console<R, W>(
    decoder: &ViterbiDecoder,
    model: &Model,
    input: R,
    mut output: W,
) -> anyhow::Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Please enter a sentence ({QUIT} to quit):")?;
    output.flush()?;

    let mut tagged = 0;
    for line in input.lines() {
        let line = line.context("failed to read console input")?;
        if line.trim() == QUIT {
            break;
        }

        match decoder.decode(&line, model) {
            Ok(tags) => {
                writeln!(output, "{}", tags.join(" "))?;
                tagged += 1;
            }
            Err(err) => {
                warn!(%err, "failed to tag console input");
                writeln!(output, "error: {err}")?;
            }
        }
        output.flush()?;
    }

    Ok(tagged)
}
