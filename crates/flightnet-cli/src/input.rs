use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Enter the transition sequence: ";

/// The trace to analyze: `arg` when given, otherwise one line read after
/// printing [`PROMPT`].
///
/// The line terminator is dropped; everything else, including surrounding
/// whitespace, is part of the trace.
pub fn read_trace<R, W>(arg: Option<String>, mut reader: R, mut prompt: W) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    if let Some(trace) = arg {
        return Ok(trace);
    }

    prompt.write_all(PROMPT.as_bytes())?;
    prompt.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
