//! Console output sinks.

use log::info;
use std::cell::RefCell;

/// Text console shared by all modules.
pub trait Console {
    fn writeln(&self, text: &str);
}

/// Console that forwards every line to the log file.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogConsole;

impl Console for LogConsole {
    fn writeln(&self, text: &str) {
        info!("event=console_line module=console status=ok text={text}");
    }
}

/// Console that keeps lines in memory, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    lines: RefCell<Vec<String>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Removes and returns every buffered line.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }
}

impl Console for MemoryConsole {
    fn writeln(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{Console, MemoryConsole};

    #[test]
    fn memory_console_buffers_and_drains() {
        let console = MemoryConsole::new();
        console.writeln("Loaded module map");
        console.writeln("Mode GUIDED");
        assert_eq!(console.lines().len(), 2);
        assert_eq!(console.drain(), ["Loaded module map", "Mode GUIDED"]);
        assert!(console.lines().is_empty());
    }
}
