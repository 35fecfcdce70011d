//! # Console
//!
//! Line-oriented terminal I/O behind a small trait, so the menus can be
//! driven by a scripted input in tests.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout  ◄── menus, prompts (no newline), tables                        │
//! │  stdin   ──► one answer per line                                        │
//! │  stderr  ◄── error lines from failed commands                           │
//! │                                                                         │
//! │  EOF on stdin ──► CliError::InputClosed                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

use retail_db::Table;

use crate::error::{CliError, CliResult};

/// Shown before every menu choice.
pub const CHOICE_PROMPT: &str = "Please make your choice: ";

/// Printed when a menu choice isn't a number.
pub const INVALID_INPUT: &str = "Your input is invalid!";

/// A line-oriented terminal.
pub trait Terminal {
    /// Reads one line without its line terminator. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Writes `text` to standard output as-is and flushes.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Writes one line to standard error.
    fn error(&mut self, line: &str) -> io::Result<()>;

    /// Writes one line to standard output.
    fn say(&mut self, line: &str) -> CliResult<()> {
        self.write(line)?;
        self.write("\n")?;
        Ok(())
    }

    /// Shows `label` and returns the answer.
    ///
    /// ## Errors
    /// * `CliError::InputClosed` - Input ended before an answer
    fn prompt(&mut self, label: &str) -> CliResult<String> {
        self.write(label)?;
        self.read_line()?.ok_or(CliError::InputClosed)
    }

    /// Reads a menu choice, re-prompting until the line is an integer.
    fn read_choice(&mut self) -> CliResult<i64> {
        loop {
            let line = self.prompt(CHOICE_PROMPT)?;
            match line.trim().parse::<i64>() {
                Ok(choice) => return Ok(choice),
                Err(_) => self.say(INVALID_INPUT)?,
            }
        }
    }

    /// Prints a header line and one line per row, every cell padded to
    /// `width`. Prints nothing for a table without rows.
    fn render_table(&mut self, table: &Table, width: usize) -> CliResult<()> {
        if table.is_empty() {
            return Ok(());
        }

        self.say(&pad_row(&table.headers, width))?;
        for row in &table.rows {
            self.say(&pad_row(row, width))?;
        }
        Ok(())
    }
}

/// Left-aligns every cell in a field of `width` characters. Longer values
/// are not cut.
pub fn pad_row<S: AsRef<str>>(cells: &[S], width: usize) -> String {
    cells
        .iter()
        .map(|cell| format!("{:<width$}", cell.as_ref(), width = width))
        .collect()
}

// =============================================================================
// Console
// =============================================================================

/// [`Terminal`] over any reader and pair of writers.
#[derive(Debug)]
pub struct Console<R, W, E> {
    input: R,
    output: W,
    errors: E,
}

impl Console<StdinLock<'static>, Stdout, Stderr> {
    /// The process's standard streams.
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R, W, E> Console<R, W, E> {
    pub fn new(input: R, output: W, errors: E) -> Self {
        Console {
            input,
            output,
            errors,
        }
    }
}

impl<R> Console<R, Vec<u8>, Vec<u8>> {
    /// Everything written to standard output so far.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Everything written to standard error so far.
    pub fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.errors).into_owned()
    }
}

impl<R: BufRead, W: Write, E: Write> Terminal for Console<R, W, E> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    fn error(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.errors, "{}", line)?;
        self.errors.flush()
    }
}
