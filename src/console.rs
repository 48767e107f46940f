// Output capture for program runs

/// Destination for the text of `likh` statements
///
/// One call per executed `likh`, in execution order, with the printed value
/// already formatted.
pub trait OutputSink {
    fn print(&mut self, text: String);
}

/// Mock console that buffers printed lines in memory
#[derive(Debug, Clone, Default)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    pub fn new() -> Self {
        Console { lines: Vec::new() }
    }

    /// All lines printed so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputSink for Console {
    fn print(&mut self, text: String) {
        self.lines.push(text);
    }
}

/// What an output line represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Text printed by the program
    Output,
    /// A compile or runtime error message
    Error,
    /// The completion message
    Success,
}

impl OutputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputKind::Output => "output",
            OutputKind::Error => "error",
            OutputKind::Success => "success",
        }
    }
}

/// One line of a run's result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: OutputKind,
    pub text: String,
}

impl OutputLine {
    pub fn output(text: impl Into<String>) -> Self {
        OutputLine {
            kind: OutputKind::Output,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        OutputLine {
            kind: OutputKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        OutputLine {
            kind: OutputKind::Success,
            text: text.into(),
        }
    }
}
