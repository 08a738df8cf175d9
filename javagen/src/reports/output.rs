//! Where reports go.

/// Sink for report elements.
///
/// Reports say what they show; the sink decides how it looks.
pub trait Output {
    /// Underlined heading.
    fn title(&mut self, text: &str);
    /// `name:` heading for the lines that follow.
    fn section(&mut self, name: &str);
    fn key_value(&mut self, key: &str, value: &str);
    fn list_item(&mut self, text: &str);
    /// A file left as it was.
    fn skipped_item(&mut self, text: &str);
    fn warning(&mut self, msg: &str);
    fn error(&mut self, msg: &str);
    /// `── label ──` rule, e.g. between previewed files.
    fn divider(&mut self, label: &str);
    fn preformatted(&mut self, text: &str);
    fn newline(&mut self);
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Writes reports to stdout; warnings and errors go to stderr.
#[derive(Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        println!("{text}\n{}", "─".repeat(text.chars().count()));
    }

    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{key}: {value}");
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn skipped_item(&mut self, text: &str) {
        println!("  = {text}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {msg}");
    }

    fn divider(&mut self, label: &str) {
        println!("── {label} ──");
    }

    fn preformatted(&mut self, text: &str) {
        println!("{text}");
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Output collecting rendered lines, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn title(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn section(&mut self, name: &str) {
        self.lines.push(format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{key}: {value}"));
    }

    fn list_item(&mut self, text: &str) {
        self.lines.push(format!("  - {text}"));
    }

    fn skipped_item(&mut self, text: &str) {
        self.lines.push(format!("  = {text}"));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push(format!("warning: {msg}"));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push(format!("error: {msg}"));
    }

    fn divider(&mut self, label: &str) {
        self.lines.push(format!("── {label} ──"));
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}
