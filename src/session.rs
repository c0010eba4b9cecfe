use std::path::{Path, PathBuf};

use crate::buffer::{self, FileError};
use crate::window::{Window, BASE_TITLE};

/// Result of a save attempt.
#[derive(Debug)]
pub enum SaveOutcome {
    /// There was no destination, nothing happened.
    Skipped,
    /// The file was written. `reopen` is the result of loading it back.
    Saved {
        path: PathBuf,
        reopen: Result<(), FileError>,
    },
    Failed(FileError),
}

#[derive(Debug)]
pub struct Session<W> {
    window: W,
    current_path: Option<PathBuf>,
    last_saved: String,
}

impl<W: Window> Session<W> {
    /// An untitled session around `window`.
    pub fn new(window: W) -> Self {
        let last_saved = window.text().to_string();
        Self {
            window,
            current_path: None,
            last_saved,
        }
    }

    /// Points the session at a path given at startup. An existing file is
    /// opened; a path that doesn't exist yet becomes the target of the first save.
    pub fn launch(&mut self, path: Option<PathBuf>) -> Result<(), FileError> {
        match path {
            Some(path) if path.exists() => self.open(&path)?,
            Some(path) => {
                tracing::info!(path = %path.display(), "starting new file");
                self.window.set_title(title_for(&path));
                self.current_path = Some(path);
            }
            None => {}
        }

        Ok(())
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn last_saved(&self) -> &str {
        &self.last_saved
    }

    /// Whether the buffer has changed since the last open or save.
    pub fn is_modified(&self) -> bool {
        self.window.text() != self.last_saved
    }

    pub fn open(&mut self, path: &Path) -> Result<(), FileError> {
        let text = buffer::read(path)?;
        tracing::info!(path = %path.display(), bytes = text.len(), "opened file");

        self.current_path = Some(path.to_path_buf());
        self.window.set_text(text);
        self.window.set_new_file(false);
        self.window.set_title(title_for(path));
        self.last_saved = self.window.text().to_string();

        Ok(())
    }

    pub fn save(&mut self) -> SaveOutcome {
        self.save_as(self.current_path.clone())
    }

    /// Writes the buffer to `destination` and switches the session to it.
    ///
    /// The last-saved snapshot is taken whenever a destination was given, even
    /// if the write failed, so [`Session::is_modified`] reports `false` after a
    /// failed save.
    pub fn save_as(&mut self, destination: Option<PathBuf>) -> SaveOutcome {
        let Some(destination) = destination else {
            return SaveOutcome::Skipped;
        };

        let outcome = match buffer::write(&destination, self.window.text()) {
            Ok(()) => {
                tracing::info!(path = %destination.display(), "saved file");
                let reopen = self.open(&destination);
                SaveOutcome::Saved {
                    path: destination,
                    reopen,
                }
            }
            Err(err) => {
                tracing::warn!(%err, "save failed");
                SaveOutcome::Failed(err)
            }
        };
        self.last_saved = self.window.text().to_string();

        outcome
    }
}

fn title_for(path: &Path) -> String {
    format!("{BASE_TITLE} - {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::BufferWindow;
    use std::fs;

    fn session() -> Session<BufferWindow> {
        Session::new(BufferWindow::new())
    }

    #[test]
    fn test_open_loads_text_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("myfile.txt");
        fs::write(&path, "hello").unwrap();

        let mut session = session();
        session.open(&path).unwrap();

        assert_eq!(session.window().text(), "hello");
        assert_eq!(session.current_path(), Some(path.as_path()));
        assert_eq!(session.last_saved(), "hello");
        assert!(!session.window().is_new_file());
        assert_eq!(
            session.window().title(),
            format!("{BASE_TITLE} - {}", path.display())
        );
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();

        let err = session.open(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert_eq!(session.current_path(), None);
    }

    #[test]
    fn test_save_as_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.txt");
        let mut session = session();
        session.window_mut().set_text("some text\nover two lines".to_string());

        let outcome = session.save_as(Some(path.clone()));

        assert!(matches!(outcome, SaveOutcome::Saved { path: ref p, reopen: Ok(()) } if *p == path));
        assert_eq!(fs::read_to_string(&path).unwrap(), "some text\nover two lines");
        assert_eq!(session.current_path(), Some(path.as_path()));
        assert_eq!(session.last_saved(), "some text\nover two lines");
        assert!(!session.window().is_new_file());
        assert!(!session.is_modified());
    }

    #[test]
    fn test_save_as_without_destination_is_noop() {
        let mut session = session();
        session.window_mut().set_text("draft".to_string());

        let outcome = session.save_as(None);

        assert!(matches!(outcome, SaveOutcome::Skipped));
        assert_eq!(session.current_path(), None);
        assert_eq!(session.last_saved(), "");
        assert!(session.is_modified());
    }

    #[test]
    fn test_save_untitled_buffer_is_noop() {
        let mut session = session();
        session.window_mut().set_text("draft".to_string());

        assert!(matches!(session.save(), SaveOutcome::Skipped));
        assert!(session.window().is_new_file());
    }

    #[test]
    fn test_save_writes_current_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "v1").unwrap();

        let mut session = session();
        session.open(&path).unwrap();
        session.window_mut().set_text("v2".to_string());
        assert!(session.is_modified());

        assert!(matches!(session.save(), SaveOutcome::Saved { reopen: Ok(()), .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
        assert!(!session.is_modified());
    }

    #[test]
    fn test_failed_save_still_updates_last_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "A").unwrap();

        let mut session = session();
        session.open(&path).unwrap();
        session.window_mut().set_text("B".to_string());

        // Replace the file with a directory so the write fails.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let outcome = session.save();

        assert!(matches!(outcome, SaveOutcome::Failed(FileError::Write { .. })));
        assert_eq!(session.last_saved(), "B");
        assert!(!session.is_modified());
        assert_eq!(session.current_path(), Some(path.as_path()));
    }

    #[test]
    fn test_launch_with_existing_file_opens_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "contents").unwrap();

        let mut session = session();
        session.launch(Some(path.clone())).unwrap();

        assert_eq!(session.window().text(), "contents");
        assert!(!session.window().is_new_file());
    }

    #[test]
    fn test_launch_with_new_path_saves_there() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.txt");

        let mut session = session();
        session.launch(Some(path.clone())).unwrap();
        assert!(session.window().is_new_file());
        assert_eq!(session.current_path(), Some(path.as_path()));
        assert!(!path.exists());

        session.window_mut().set_text("first draft".to_string());
        assert!(matches!(session.save(), SaveOutcome::Saved { reopen: Ok(()), .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "first draft");
        assert!(!session.window().is_new_file());
    }

    #[test]
    fn test_launch_without_path_is_untitled() {
        let mut session = session();
        session.launch(None).unwrap();

        assert_eq!(session.current_path(), None);
        assert_eq!(session.window().title(), BASE_TITLE);
        assert!(session.window().is_new_file());
    }

    #[test]
    fn test_launch_with_unreadable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();

        let err = session.launch(Some(dir.path().to_path_buf())).unwrap_err();

        assert!(matches!(err, FileError::Read { .. }));
        assert_eq!(err.path(), dir.path());
        assert_eq!(session.current_path(), None);
        assert!(session.window().is_new_file());
    }
}
