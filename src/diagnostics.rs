//! Best-effort diagnostic output.
//!
//! Nothing in this crate treats a diagnostic as a failure: compiler and linker info logs and
//! warnings about unsupported input are written to a [Diagnostics] channel and execution
//! continues. [Console] writes to the browser's developer console, [DiagnosticLog] keeps the lines
//! in memory so that they can be shown elsewhere (or inspected).

use std::cell::RefCell;

use web_sys::console;

/// A channel that accepts diagnostic lines.
pub trait Diagnostics {
    fn log(&self, message: &str);

    fn warn(&self, message: &str);
}

impl<'a, T> Diagnostics for &'a T
where
    T: Diagnostics + ?Sized,
{
    fn log(&self, message: &str) {
        (**self).log(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }
}

/// Writes diagnostics to the browser console with `console.log` and `console.warn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Console;

impl Diagnostics for Console {
    fn log(&self, message: &str) {
        console::log_1(&message.into());
    }

    fn warn(&self, message: &str) {
        console::warn_1(&message.into());
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Level {
    Log,
    Warn,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Collects diagnostics in emission order.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        DiagnosticLog::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn push(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push(Diagnostic {
            level,
            message: message.to_string(),
        });
    }
}

impl Diagnostics for DiagnosticLog {
    fn log(&self, message: &str) {
        self.push(Level::Log, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }
}
