//! I/O boundary traits for testability
//!
//! These traits abstract the terminal, allowing the game service
//! to be driven by scripted input in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use colored::Colorize;

/// How a line of narration should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Header,
    Clue,
    Hint,
    Warning,
    Success,
    Failure,
}

/// Line-oriented player console.
pub trait Console: Send + Sync {
    /// Read one line without its trailing newline; `None` at end of input.
    fn read_line(&self) -> io::Result<Option<String>>;

    /// Write one line of narration.
    fn write_line(&self, tone: Tone, line: &str) -> io::Result<()>;

    /// Show a prompt without a line break.
    fn prompt(&self, msg: &str) -> io::Result<()>;
}

/// Real console on stdin/stdout with colored output.
///
/// Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE through `colored`.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_line(&self, tone: Tone, line: &str) -> io::Result<()> {
        let text = match tone {
            Tone::Plain => line.normal(),
            Tone::Header => line.cyan().bold(),
            Tone::Clue => line.yellow(),
            Tone::Hint => line.magenta().italic(),
            Tone::Warning => line.yellow().bold(),
            Tone::Success => line.green().bold(),
            Tone::Failure => line.red().bold(),
        };
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text)
    }

    fn prompt(&self, msg: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{} ", msg.cyan())?;
        out.flush()
    }
}

/// Console fed from a fixed script, recording everything written.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: Mutex<VecDeque<String>>,
    output: Mutex<Vec<(Tone, String)>>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: Mutex::new(lines.into_iter().map(Into::into).collect()),
            output: Mutex::new(Vec::new()),
        }
    }

    /// Written lines, without their tone.
    pub fn lines(&self) -> Vec<String> {
        self.output
            .lock()
            .map(|out| out.iter().map(|(_, line)| line.clone()).collect())
            .unwrap_or_default()
    }

    /// Written lines with the given tone.
    pub fn lines_with(&self, tone: Tone) -> Vec<String> {
        self.output
            .lock()
            .map(|out| {
                out.iter()
                    .filter(|(t, _)| *t == tone)
                    .map(|(_, line)| line.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Script lines not consumed yet.
    pub fn remaining_input(&self) -> usize {
        self.input.lock().map(|input| input.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> io::Error {
    io::Error::other("console lock poisoned")
}

impl Console for ScriptedConsole {
    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(self.input.lock().map_err(poisoned)?.pop_front())
    }

    fn write_line(&self, tone: Tone, line: &str) -> io::Result<()> {
        self.output
            .lock()
            .map_err(poisoned)?
            .push((tone, line.to_string()));
        Ok(())
    }

    fn prompt(&self, _msg: &str) -> io::Result<()> {
        Ok(())
    }
}
