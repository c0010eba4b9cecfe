use std::io::{self, BufRead, BufReader, Write};

use crossterm::tty::IsTty;

const PROMPT: &str = "> ";

/// Blocking reader of command lines. `Ok(None)` means the input is exhausted.
pub trait LineSource {
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads lines from any buffered stream. Used when stdin is a pipe or file,
/// and by tests.
pub struct StreamReader<R> {
    reader: R,
}

impl<R: BufRead> StreamReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for StreamReader<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        next_line(&mut self.reader)
    }
}

/// Interactive reader for a terminal: prints a prompt before each read.
pub struct ConsoleReader {
    stdin: BufReader<io::Stdin>,
    stdout: io::Stdout,
}

impl ConsoleReader {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(io::stdin()),
            stdout: io::stdout(),
        }
    }
}

impl Default for ConsoleReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for ConsoleReader {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        write!(self.stdout, "{PROMPT}")?;
        self.stdout.flush()?;
        next_line(&mut self.stdin)
    }
}

/// Picks the console reader when stdin is a terminal, the stream reader otherwise.
pub fn stdin_source() -> Box<dyn LineSource + Send> {
    if io::stdin().is_tty() {
        tracing::debug!("reading commands from the console");
        Box::new(ConsoleReader::new())
    } else {
        tracing::debug!("reading commands from a stream");
        Box::new(StreamReader::new(BufReader::new(io::stdin())))
    }
}

fn next_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_stream_reader_strips_terminators() {
        let mut source = StreamReader::new(Cursor::new("open a.txt\r\nsave\nquit"));

        assert_eq!(source.read_line().unwrap(), Some("open a.txt".to_string()));
        assert_eq!(source.read_line().unwrap(), Some("save".to_string()));
        assert_eq!(source.read_line().unwrap(), Some("quit".to_string()));
        assert_eq!(source.read_line().unwrap(), None);
    }

    #[test]
    fn test_stream_reader_keeps_blank_lines() {
        let mut source = StreamReader::new(Cursor::new("\n  \n"));

        assert_eq!(source.read_line().unwrap(), Some(String::new()));
        assert_eq!(source.read_line().unwrap(), Some("  ".to_string()));
        assert_eq!(source.read_line().unwrap(), None);
    }
}
