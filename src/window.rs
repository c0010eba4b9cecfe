use std::io;

use crossterm::terminal::SetTitle;
use crossterm::tty::IsTty;

pub const BASE_TITLE: &str = "tedit";

pub trait Window: Send {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);

    fn title(&self) -> &str;
    fn set_title(&mut self, title: String);

    /// True until the buffer has been loaded from or written to a file.
    fn is_new_file(&self) -> bool;
    fn set_new_file(&mut self, new_file: bool);
}

/// In-memory window with no display attached.
#[derive(Debug, Clone)]
pub struct BufferWindow {
    text: String,
    title: String,
    new_file: bool,
}

impl BufferWindow {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            title: BASE_TITLE.to_string(),
            new_file: true,
        }
    }
}

impl Default for BufferWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl Window for BufferWindow {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn is_new_file(&self) -> bool {
        self.new_file
    }

    fn set_new_file(&mut self, new_file: bool) {
        self.new_file = new_file;
    }
}

/// A [`BufferWindow`] that mirrors its title into the terminal title bar.
#[derive(Debug)]
pub struct TerminalWindow {
    inner: BufferWindow,
    stdout: Option<io::Stdout>,
}

impl TerminalWindow {
    pub fn new() -> Self {
        let stdout = io::stdout();
        let mut window = Self {
            inner: BufferWindow::new(),
            stdout: stdout.is_tty().then_some(stdout),
        };
        window.show_title();
        window
    }

    fn show_title(&mut self) {
        if let Some(stdout) = self.stdout.as_mut() {
            if let Err(err) = execute!(stdout, SetTitle(self.inner.title())) {
                tracing::debug!(%err, "could not set terminal title");
            }
        }
    }
}

impl Default for TerminalWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl Window for TerminalWindow {
    fn text(&self) -> &str {
        self.inner.text()
    }

    fn set_text(&mut self, text: String) {
        self.inner.set_text(text);
    }

    fn title(&self) -> &str {
        self.inner.title()
    }

    fn set_title(&mut self, title: String) {
        self.inner.set_title(title);
        self.show_title();
    }

    fn is_new_file(&self) -> bool {
        self.inner.is_new_file()
    }

    fn set_new_file(&mut self, new_file: bool) {
        self.inner.set_new_file(new_file);
    }
}
