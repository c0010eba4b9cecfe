use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: {0} <file>")]
    MissingArgument(&'static str),

    #[error("unrecognized command: {0}")]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `close`, `quit` or `exit`
    Quit,
    /// Save to the current path
    Save,
    /// Save to the given path and switch to it
    SaveAs(String),
    /// Load the given path into the window
    Open(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        if ["close", "quit", "exit"]
            .iter()
            .any(|word| line.eq_ignore_ascii_case(word))
        {
            return Ok(Command::Quit);
        }

        if line.eq_ignore_ascii_case("save") {
            return Ok(Command::Save);
        }

        // `saveas` has to be tried before `open`; the prefixes are case-sensitive.
        if line.starts_with("saveas") {
            return argument(line, "saveas").map(Command::SaveAs);
        }

        if line.starts_with("open") {
            return argument(line, "open").map(Command::Open);
        }

        Err(CommandError::Unrecognized(line.to_string()))
    }
}

/// Everything after the first word, with runs of spaces collapsed to one.
fn argument(line: &str, keyword: &'static str) -> Result<String, CommandError> {
    let words: Vec<&str> = line.split(' ').filter(|word| !word.is_empty()).collect();

    match words.get(1..) {
        Some(rest) if !rest.is_empty() => Ok(rest.join(" ")),
        _ => Err(CommandError::MissingArgument(keyword)),
    }
}
