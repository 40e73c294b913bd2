/// Sink for the patcher's human-readable progress and diagnostic messages.
///
/// The patcher takes an `Option<&dyn Logger>`: `None` is silent operation.
/// Any `Fn(&str)` closure is a logger, so callers rarely implement this by hand.
pub trait Logger {
    fn log(&self, message: &str);
}

impl<F> Logger for F
where
    F: Fn(&str),
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Collects messages in memory. Handy for tests and for callers that want to
/// report diagnostics after the fact.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    messages: std::cell::RefCell<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

pub(crate) fn emit(logger: Option<&dyn Logger>, message: &str) {
    if let Some(sink) = logger {
        sink.log(message);
    }
}
