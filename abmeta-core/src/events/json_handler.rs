//! JSON lines handler for diagnostics events
//!
//! Emits one JSON object per event so the trace can be consumed by scripts
//! instead of read by a person.

use super::{Event, EventHandler};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event handler that outputs events as JSON lines to stdout
pub struct JsonEventHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventHandler {
    /// Create a new JSON handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a new JSON handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }
}

impl Default for JsonEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for JsonEventHandler {
    fn handle(&self, event: &Event) {
        let json_str = match serde_json::to_string(event) {
            Ok(json_str) => json_str,
            Err(e) => {
                log::warn!("Could not serialize diagnostics event: {}", e);
                return;
            }
        };
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", json_str);
            let _ = output.flush();
        }
    }
}
