//! Diagnostics events emitted while a batch runs.
//!
//! Every stage reports what it derived through an [`EventDispatcher`]. A
//! dispatcher without handlers drops events, so turning diagnostics off never
//! changes what the pipeline computes, only what is shown.

use serde::Serialize;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

pub mod json_handler;

pub use json_handler::JsonEventHandler;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    // Inference events
    AudiofileCount {
        count: usize,
    },
    PrefixWidth {
        width: usize,
    },
    CoverArtPath {
        path: String,
    },

    // Per-chapter events
    ChapterPlanned {
        chapter_number: String,
        old_path: String,
        new_path: String,
    },
    OutputDirectoryPrepared {
        path: String,
        error: Option<String>,
    },
    TransformFinished {
        chapter_number: String,
        succeeded: bool,
        raw_output: String,
    },
    FinalizeFailed {
        chapter_number: String,
        message: String,
    },

    // Batch events
    BatchComplete {
        planned: usize,
        converted: usize,
        failed_chapters: Vec<String>,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes events as a plain-text trace, one or more lines per event.
pub struct TraceEventHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl TraceEventHandler {
    /// Create a trace handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a trace handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn render(event: &Event) -> String {
        match event {
            Event::AudiofileCount { count } => format!("Audiofile count: {count}"),
            Event::PrefixWidth { width } => format!("File number length: {width}"),
            Event::CoverArtPath { path } => format!("Cover art path: {path}"),
            Event::ChapterPlanned {
                chapter_number,
                old_path,
                new_path,
            } => format!("Chapter {chapter_number}: {old_path} -> {new_path}"),
            Event::OutputDirectoryPrepared { path, error: None } => {
                format!("Output directory ready: {path}")
            }
            Event::OutputDirectoryPrepared {
                path,
                error: Some(error),
            } => format!("Output directory {path} could not be created: {error}"),
            Event::TransformFinished {
                chapter_number,
                succeeded,
                raw_output,
            } => {
                let status = if *succeeded { "Succeeded" } else { "Failed" };
                let mut text = format!("Conversion {status}: chapter {chapter_number}");
                if !raw_output.is_empty() {
                    text.push('\n');
                    text.push_str(raw_output.trim_end());
                }
                text
            }
            Event::FinalizeFailed {
                chapter_number,
                message,
            } => format!("Could not replace chapter {chapter_number}: {message}"),
            Event::BatchComplete {
                planned,
                converted,
                failed_chapters,
            } => {
                let mut text = format!(
                    "Processed {planned} chapter(s): {converted} converted, {} failed",
                    failed_chapters.len()
                );
                if !failed_chapters.is_empty() {
                    text.push_str(&format!(" ({})", failed_chapters.join(", ")));
                }
                text
            }
        }
    }
}

impl Default for TraceEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for TraceEventHandler {
    fn handle(&self, event: &Event) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", Self::render(event));
            let _ = output.flush();
        }
    }
}

/// Writer that appends into a shared buffer, for asserting on handler output.
#[cfg(any(test, feature = "test-mocks"))]
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

#[cfg(any(test, feature = "test-mocks"))]
impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-mocks"))]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut bytes) => {
                bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
            Err(_) => Err(io::Error::other("shared buffer poisoned")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
