use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::fmt;
use std::process::{Command as StdCommand, Output, Stdio};

/// Subprocess builder that never goes through a shell: every argument is
/// passed to the program as-is.
#[derive(Debug)]
pub struct Command {
    inner:   StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            inner: StdCommand::new(&program),
            program,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.inner.env(key, val);
        self
    }

    fn spawn_error(&self, e: std::io::Error) -> Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::CommandNotFound {
                cmd: self.program.clone(),
            }
        } else {
            Error::CommandFailed {
                cmd:    self.program.clone(),
                source: e,
            }
        }
    }

    /// Run to completion, capturing stdout. A non-zero exit is an error.
    pub fn capture(mut self) -> Result<Output> {
        self.inner.stdin(Stdio::null()).stderr(Stdio::inherit());
        let output = self.inner.output().map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(Error::ExitStatus {
                cmd:    self.program,
                status: output.status,
            });
        }
        Ok(output)
    }

    /// Run with inherited stdio and wait for it, e.g. for a pager.
    pub fn status(mut self) -> Result<()> {
        let status = self.inner.status().map_err(|e| self.spawn_error(e))?;
        if !status.success() {
            return Err(Error::ExitStatus {
                cmd: self.program,
                status,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.inner.get_args() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
