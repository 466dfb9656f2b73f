use std::path::{Path, PathBuf};

use crate::error::ClipboardError;

/// Destination for text the user asked to copy.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Blocking, user-facing warnings.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Keeps every copied text in memory, newest last.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    entries: Vec<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.entries.push(text.to_string());
        Ok(())
    }
}

/// Writes copied text to a file, replacing its previous contents.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Rejects every write. Stands in for a clipboard the environment refuses.
#[derive(Debug, Clone)]
pub struct FailingClipboard {
    reason: String,
}

impl FailingClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Clipboard for FailingClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError {
            reason: self.reason.clone(),
        })
    }
}

/// Prints alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("Warning: {}", message);
    }
}

/// Collects alerts for later inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
