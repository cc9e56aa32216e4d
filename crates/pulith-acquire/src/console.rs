//! User-facing output: status lines filtered by quiet level, warnings,
//! errors, yes/no confirmation and paging.

use crate::error::Result;
use ::console::Term;
use pulith_platform::command::Command;
use std::io::BufRead;
use std::path::Path;

/// Minimum quiet level that hides a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Hidden from `-q` on.
    Info   = 1,
    /// Hidden from `-qq` on.
    Notice = 2,
}

pub trait Console {
    fn quiet(&self) -> u8;

    /// Unconditional output, e.g. URI listings.
    fn print(&self, line: &str);

    fn status(&self, level: Level, line: &str) {
        if self.quiet() < level as u8 {
            self.print(line);
        }
    }

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    /// Ask a yes/no question; `default` is the answer to an empty reply.
    fn confirm(&self, question: &str, default: bool) -> bool;

    /// Show a file to the user.
    fn page(&self, path: &Path) -> Result<()>;

    fn width(&self) -> usize { 80 }
}

/// Print `title` followed by `items`, space separated, indented by two
/// columns and wrapped at the console width.
pub fn show_list(console: &dyn Console, level: Level, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    console.status(level, title);

    let width = console.width().max(20);
    let mut line = String::from(" ");
    for item in items {
        if line.len() > 1 && line.len() + 1 + item.len() > width {
            console.status(level, &line);
            line = String::from(" ");
        }
        line.push(' ');
        line.push_str(item);
    }
    console.status(level, &line);
}

/// Interpret a reply to a yes/no question.
pub fn parse_answer(answer: &str, default: bool) -> bool {
    let answer = answer.trim();
    if answer.is_empty() {
        return default;
    }
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Read one reply line from `input` and interpret it. End of input or a
/// read error gives `default`.
pub fn read_answer<R: BufRead>(mut input: R, default: bool) -> bool {
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => parse_answer(&answer, default),
        Err(e) => {
            tracing::debug!("no answer to prompt: {e}");
            default
        }
    }
}

/// Human readable size with decimal prefixes: `512 `, `40.0 k`, `1234 k`.
/// Callers append the unit, e.g. `B`.
pub fn size_to_str(size: u64) -> String {
    const PREFIXES: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];

    let mut scaled = size as f64;
    for (i, prefix) in PREFIXES.iter().enumerate() {
        if scaled < 100.0 && i != 0 {
            return format!("{scaled:.1} {prefix}");
        }
        if scaled < 10_000.0 {
            return format!("{scaled:.0} {prefix}");
        }
        scaled /= 1000.0;
    }
    format!("{:.0} Y", scaled * 1000.0)
}

/// Console over the process terminal.
#[derive(Debug, Clone)]
pub struct TermConsole {
    quiet: u8,
    out:   Term,
    err:   Term,
}

impl TermConsole {
    pub fn new(quiet: u8) -> Self {
        Self {
            quiet,
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }
}

impl Console for TermConsole {
    fn quiet(&self) -> u8 { self.quiet }

    fn print(&self, line: &str) {
        let _ = self.out.write_line(line);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{message}");
        let _ = self.err.write_line(&format!("W: {message}"));
    }

    fn error(&self, message: &str) {
        let _ = self.err.write_line(&format!("E: {message}"));
    }

    fn confirm(&self, question: &str, default: bool) -> bool {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        if self.out.write_str(&format!("{question} {hint} ")).is_err() {
            return default;
        }
        let _ = self.out.flush();
        if !self.out.is_term() {
            return read_answer(std::io::stdin().lock(), default);
        }
        match self.out.read_line() {
            Ok(answer) => parse_answer(&answer, default),
            Err(e) => {
                tracing::debug!("no answer to prompt: {e}");
                default
            }
        }
    }

    fn page(&self, path: &Path) -> Result<()> {
        let pager = std::env::var("PAGER").unwrap_or_else(|_| "sensible-pager".to_string());
        let mut words = pager.split_whitespace();
        let program = words.next().unwrap_or("sensible-pager");
        Command::new(program).args(words).arg(path).status()?;
        Ok(())
    }

    fn width(&self) -> usize {
        let (_, cols) = self.out.size();
        usize::from(cols)
    }
}
