use std::io::{self, Write};
use std::path::PathBuf;

use crossterm::style::Stylize;

use crate::command::Command;
use crate::error::{EditorError, EditorResult};
use crate::input::LineSource;
use crate::session::{SaveOutcome, Session};
use crate::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Listening,
    Terminated,
}

/// Why [`Editor::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// An exit command was entered.
    Quit,
    /// The input ran out.
    EndOfInput,
}

/// The read-parse-dispatch loop driving one window.
pub struct Editor<W> {
    pub session: Session<W>,
    source: Option<Box<dyn LineSource + Send>>,
    stdout: Box<dyn Write + Send>,
    stderr: Box<dyn Write + Send>,
    color: bool,
    state: LoopState,
}

impl<W: Window> Editor<W> {
    pub fn new(session: Session<W>, source: Box<dyn LineSource + Send>) -> Self {
        Self {
            session,
            source: Some(source),
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
            color: false,
            state: LoopState::Listening,
        }
    }

    /// Redirects status and error lines.
    pub fn with_output(
        mut self,
        stdout: Box<dyn Write + Send>,
        stderr: Box<dyn Write + Send>,
    ) -> Self {
        self.stdout = stdout;
        self.stderr = stderr;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Loads the path given at startup. A failure ends the loop before it runs.
    pub fn launch(&mut self, path: Option<PathBuf>) -> EditorResult<()> {
        self.session
            .launch(path)
            .map_err(|err| self.fail(err.into()))
    }

    pub fn run(&mut self) -> EditorResult<LoopExit> {
        match self.listen() {
            Ok(exit) => {
                self.close();
                Ok(exit)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Releases the reader and stops listening.
    fn close(&mut self) {
        self.source = None;
        self.state = LoopState::Terminated;
    }

    fn fail(&mut self, err: EditorError) -> EditorError {
        self.close();
        if let Err(output) = self.draw_error(&err.to_string()) {
            tracing::debug!(err = %output, "could not report error");
        }
        err
    }

    fn listen(&mut self) -> EditorResult<LoopExit> {
        while self.state == LoopState::Listening {
            let Some(source) = self.source.as_mut() else {
                return Ok(LoopExit::EndOfInput);
            };
            let Some(line) = source.read_line().map_err(EditorError::Input)? else {
                tracing::debug!("input exhausted");
                return Ok(LoopExit::EndOfInput);
            };

            self.handle_line(&line)?;
        }

        Ok(LoopExit::Quit)
    }

    /// Runs one line of input and returns the resulting state.
    pub fn handle_line(&mut self, line: &str) -> EditorResult<LoopState> {
        match Command::parse(line) {
            Ok(command) => {
                tracing::debug!(?command, "parsed command");
                self.execute(command)?;
            }
            Err(err) => self.draw_info(&err.to_string())?,
        }

        Ok(self.state)
    }

    pub fn execute(&mut self, command: Command) -> EditorResult<()> {
        match command {
            Command::Quit => self.state = LoopState::Terminated,
            Command::Save => {
                let outcome = self.session.save();
                self.report(outcome)?;
            }
            Command::SaveAs(path) => {
                let outcome = self.session.save_as(Some(PathBuf::from(path)));
                self.report(outcome)?;
            }
            Command::Open(path) => self.session.open(&PathBuf::from(path))?,
        }

        Ok(())
    }

    fn report(&mut self, outcome: SaveOutcome) -> EditorResult<()> {
        match outcome {
            SaveOutcome::Skipped => Ok(()),
            SaveOutcome::Saved { path, reopen } => {
                self.draw_info(&format!("saved {}", path.display()))?;
                reopen.map_err(EditorError::from)
            }
            SaveOutcome::Failed(err) => self.draw_error(&err.to_string()),
        }
    }

    fn draw_error(&mut self, error: &str) -> EditorResult<()> {
        let line = format!("ERROR: {error}");
        let written = if self.color {
            writeln!(self.stderr, "{}", line.red())
        } else {
            writeln!(self.stderr, "{line}")
        };

        written
            .and_then(|_| self.stderr.flush())
            .map_err(EditorError::Output)
    }

    fn draw_info(&mut self, info: &str) -> EditorResult<()> {
        writeln!(self.stdout, "{info}")
            .and_then(|_| self.stdout.flush())
            .map_err(EditorError::Output)
    }
}
