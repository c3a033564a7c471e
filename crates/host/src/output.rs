use std::sync::{Arc, Mutex};

/// Kind of content routed to the output window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Text,
    Markdown,
    Code,
}

/// Rendering target behind the output window.
///
/// The host decides what "window" means: a dock panel, a terminal, a capture
/// buffer in tests. Implementations receive one logical block per call.
pub trait OutputSink: Send + Sync {
    fn write(&self, kind: OutputKind, text: &str);
}

impl<T: OutputSink + ?Sized> OutputSink for Arc<T> {
    fn write(&self, kind: OutputKind, text: &str) {
        (**self).write(kind, text);
    }
}

/// Sink that prints to stdout. Markdown passes through unrendered; code
/// blocks are indented.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn write(&self, kind: OutputKind, text: &str) {
        match kind {
            OutputKind::Text | OutputKind::Markdown => println!("{text}"),
            OutputKind::Code => {
                for line in text.lines() {
                    println!("    {line}");
                }
            }
        }
    }
}

/// Sink that records everything written, for tests and embedded panels.
#[derive(Debug, Default)]
pub struct BufferSink {
    blocks: Mutex<Vec<(OutputKind, String)>>,
}

impl BufferSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    #[must_use]
    pub fn blocks(&self) -> Vec<(OutputKind, String)> {
        self.blocks.lock().expect("output buffer mutex poisoned").clone()
    }
}

impl OutputSink for BufferSink {
    fn write(&self, kind: OutputKind, text: &str) {
        self.blocks
            .lock()
            .expect("output buffer mutex poisoned")
            .push((kind, text.to_string()));
    }
}

/// The session output window scripts print into.
///
/// One window per host session; scripts reach it through the facade. The
/// title is mutable behind a lock so any script can retitle the window
/// without exclusive access to the session.
pub struct OutputWindow {
    title: Mutex<String>,
    sink: Box<dyn OutputSink>,
}

impl OutputWindow {
    pub fn new(sink: impl OutputSink + 'static) -> Self {
        Self {
            title: Mutex::new(String::new()),
            sink: Box::new(sink),
        }
    }

    /// Window backed by stdout.
    #[must_use]
    pub fn console() -> Self {
        Self::new(ConsoleSink)
    }

    pub fn print_text(&self, text: &str) {
        self.sink.write(OutputKind::Text, text);
    }

    pub fn print_md(&self, markdown: &str) {
        self.sink.write(OutputKind::Markdown, markdown);
    }

    pub fn print_code(&self, code: &str) {
        self.sink.write(OutputKind::Code, code);
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.title.lock().expect("output title mutex poisoned").clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.title.lock().expect("output title mutex poisoned") = title.into();
    }
}
