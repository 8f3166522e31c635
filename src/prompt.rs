//! Interactive line input and user-facing messages.
//!
//! Core logic never touches stdin/stdout directly; it talks to a
//! [`Prompter`], and tests hand it a [`ConsolePrompter`] over in-memory
//! buffers.

use crate::error::PdfModError;
use colored::{Color, Colorize};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Capability to ask the user for a line and to show them messages.
pub trait Prompter {
    /// Show `message` and read one line, trimmed of surrounding whitespace.
    ///
    /// End of input yields an empty string.
    fn prompt(&mut self, message: &str) -> Result<String, PdfModError>;

    /// Print a line of output.
    fn say(&mut self, message: &str);

    /// Print a line in the given color.
    fn say_colored(&mut self, message: &str, color: Color) {
        self.say(&message.color(color).to_string());
    }
}

/// Line-oriented prompter over any reader/writer pair.
#[derive(Debug)]
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn prompt(&mut self, message: &str) -> Result<String, PdfModError> {
        // A broken output stream does not stop input from being read.
        if let Err(e) = write!(self.output, "{}", message.blue()) {
            warn!(error = %e, "failed to write prompt");
        }
        if let Err(e) = self.output.flush() {
            warn!(error = %e, "failed to flush prompt");
        }

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(PdfModError::Input)?;
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            warn!(error = %e, "failed to write message");
        }
    }
}
