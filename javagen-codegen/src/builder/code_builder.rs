use super::{CodeFragment, Renderable};

const INDENT: &str = "    ";

/// Accumulates Java source text, tracking the current nesting depth.
///
/// ```
/// use javagen_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::java();
/// builder.apply_fragment(CodeFragment::block(
///     "public final class Pet {",
///     vec![CodeFragment::line("private String name;")],
///     Some("}".to_string()),
/// ));
///
/// assert_eq!(builder.build(), "public final class Pet {\n    private String name;\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    depth: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn java() -> Self {
        Self::default()
    }

    /// Append `s` on its own line at the current depth.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Append an empty line. Blank lines carry no indentation.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Append an empty line unless the text is empty or already ends with one.
    pub fn push_separator(&mut self) -> &mut Self {
        if !self.buffer.is_empty() && !self.buffer.ends_with("\n\n") {
            self.buffer.push('\n');
        }
        self
    }

    fn push_comment(&mut self, open: &str, lines: &[String]) {
        self.push_line(open);
        for line in lines {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {line}"));
            }
        }
        self.push_line(" */");
    }

    fn nested(&mut self, fragments: Vec<CodeFragment>) {
        self.depth += 1;
        for fragment in fragments {
            self.apply_fragment(fragment);
        }
        self.depth -= 1;
    }

    /// Append every fragment of `node`.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.nested(body);
                if let Some(close) = close {
                    self.push_line(&close);
                }
            }
            CodeFragment::Indent(body) => self.nested(body),
            CodeFragment::Javadoc(lines) => self.push_comment("/**", &lines),
            CodeFragment::BlockComment(lines) => self.push_comment("/*", &lines),
        }
    }

    pub fn build(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}
