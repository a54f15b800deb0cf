//! Text reporter for human-readable display
//!
//! Info lines are marked blue, warnings yellow, errors red, and echoed shell
//! commands dimmed. Colors can be turned off for captured output.

use crate::output::{Reporter, Severity};
use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

/// Reporter writing one line per message
pub struct TextReporter<W: Write + Send> {
    writer: Mutex<W>,
    color: bool,
}

impl TextReporter<io::Stdout> {
    /// Reporter printing to standard output, colored when it is a terminal
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal();
        Self::new(io::stdout(), color)
    }
}

impl TextReporter<Vec<u8>> {
    /// Reporter collecting uncolored lines in memory
    pub fn buffered() -> Self {
        Self::new(Vec::new(), false)
    }

    /// Everything reported so far
    pub fn output(&self) -> String {
        match self.writer.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl<W: Write + Send> TextReporter<W> {
    /// Create a reporter over any writer
    pub fn new(writer: W, color: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            color,
        }
    }

    fn write_line(&self, line: &str) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Console output is best effort; a closed pipe must not abort the install.
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

impl<W: Write + Send> Reporter for TextReporter<W> {
    fn report(&self, severity: Severity, message: &str) {
        self.write_line(&render_line(severity, message, self.color));
    }

    fn shell(&self, args: &[String]) {
        self.write_line(&render_shell(args, self.color));
    }
}

/// Render a message with its severity marker
pub fn render_line(severity: Severity, message: &str, color: bool) -> String {
    let marker = severity.marker();
    if !color {
        return format!("{}{}", marker, message);
    }
    let marker = match severity {
        Severity::Info => marker.blue(),
        Severity::Warning => marker.yellow(),
        Severity::Error => marker.red(),
    };
    format!("{}{}", marker, message)
}

/// Render a command line: the program bare, every argument JSON-quoted
pub fn render_shell(args: &[String], color: bool) -> String {
    let marker = if color {
        "$) ".dimmed().to_string()
    } else {
        "$) ".to_string()
    };

    let Some((program, rest)) = args.split_first() else {
        return marker;
    };

    let quoted: Vec<String> = rest.iter().map(|arg| quote(arg)).collect();
    format!("{}{} {}", marker, program, quoted.join(" "))
}

fn quote(arg: &str) -> String {
    serde_json::to_string(arg).unwrap_or_else(|_| format!("\"{}\"", arg))
}
