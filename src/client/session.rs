//! Interactive Session
//!
//! The dispatcher loop: reads one line of user text per iteration,
//! maps it to an executor, and keeps the session alive across
//! recoverable failures.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::client::commands::{self, HELP_TEXT};
use crate::error::{FilebayError, Result};
use crate::network::Connection;

/// The six user-facing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Exit,
    Get,
    Help,
    Ls,
    Put,
    Rm,
}

/// Immutable token-to-command lookup table
///
/// Built at session construction and passed in explicitly rather than
/// living in a process-wide singleton.
pub struct CommandTable(HashMap<&'static str, UserCommand>);

impl Default for CommandTable {
    fn default() -> Self {
        CommandTable(HashMap::from([
            ("exit", UserCommand::Exit),
            ("get", UserCommand::Get),
            ("help", UserCommand::Help),
            ("ls", UserCommand::Ls),
            ("put", UserCommand::Put),
            ("rm", UserCommand::Rm),
        ]))
    }
}

impl CommandTable {
    /// Look up a command token
    pub fn lookup(&self, token: &str) -> Option<UserCommand> {
        self.0.get(token).copied()
    }
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Connected,
    Terminated,
}

/// Outcome of dispatching one input line
enum Dispatch {
    Continue,
    Terminate,
}

/// An interactive client session over one connection
pub struct Session {
    conn: Connection,
    commands: CommandTable,
    local_dir: PathBuf,
}

impl Session {
    /// Create a session over an established connection
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            commands: CommandTable::default(),
            local_dir: PathBuf::from("."),
        }
    }

    /// Set the directory `get` writes into and `put` reads from
    pub fn local_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.local_dir = dir.into();
        self
    }

    /// Run the session to completion
    ///
    /// Reads command lines from `input` until `exit` or end-of-input,
    /// writing listings, file content, help and failure reports to
    /// `out`. Only transport-level errors unwind out of here; every
    /// recoverable failure becomes one report line and the loop
    /// continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let mut state = State::Connected;

        let mut lines = input.lines();
        while state == State::Connected {
            // End-of-input is equivalent to exit.
            let Some(line) = lines.next() else {
                tracing::debug!("end of input");
                state = State::Terminated;
                continue;
            };
            let line = line?;
            tracing::debug!("command {}", line);

            match self.dispatch(&line, out) {
                Ok(Dispatch::Continue) => {}
                Ok(Dispatch::Terminate) => state = State::Terminated,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => writeln!(out, "{}", e)?,
            }
        }

        tracing::debug!("session terminated");
        Ok(())
    }

    /// Parse one line and invoke the matching executor
    fn dispatch<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Dispatch> {
        let mut tokens = line.split_whitespace();
        let Some(token) = tokens.next() else {
            // Blank lines are ignored.
            return Ok(Dispatch::Continue);
        };
        let arg = tokens.next();
        if tokens.next().is_some() {
            return Err(FilebayError::InvalidCommand(line.to_string()));
        }

        let command = self
            .commands
            .lookup(token)
            .ok_or_else(|| FilebayError::InvalidCommand(line.to_string()))?;

        // A filename argument exactly when the command wants one.
        match (command, arg) {
            (UserCommand::Exit, None) => return Ok(Dispatch::Terminate),
            (UserCommand::Help, None) => out.write_all(HELP_TEXT.as_bytes())?,
            (UserCommand::Ls, None) => commands::ls(&mut self.conn, out)?,
            (UserCommand::Get, Some(name)) => {
                commands::get(&mut self.conn, out, &self.local_dir, name)?
            }
            (UserCommand::Put, Some(name)) => {
                commands::put(&mut self.conn, &self.local_dir, name)?
            }
            (UserCommand::Rm, Some(name)) => commands::rm(&mut self.conn, name)?,
            _ => return Err(FilebayError::InvalidCommand(line.to_string())),
        }
        Ok(Dispatch::Continue)
    }
}
