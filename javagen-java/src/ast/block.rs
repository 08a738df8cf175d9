//! Statement blocks.

use javagen_codegen::builder::{CodeFragment, Renderable};

/// A sequence of Java statements, possibly with nested blocks.
///
/// The braces of the enclosing construct are not part of the block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JavaBlock {
    fragments: Vec<CodeFragment>,
}

impl JavaBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, statement: impl Into<String>) -> Self {
        self.push_line(statement);
        self
    }

    pub fn lines<I, S>(mut self, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for statement in statements {
            self.push_line(statement);
        }
        self
    }

    pub fn blank(mut self) -> Self {
        self.fragments.push(CodeFragment::Blank);
        self
    }

    /// `header` followed by the indented `body` and a closing `}`.
    pub fn block(mut self, header: impl Into<String>, body: JavaBlock) -> Self {
        self.push_block(header, body);
        self
    }

    /// Like [`block`](Self::block) with a custom closing line, e.g. `});`.
    pub fn block_with_close(
        mut self,
        header: impl Into<String>,
        body: JavaBlock,
        close: impl Into<String>,
    ) -> Self {
        self.fragments.push(CodeFragment::block(
            header,
            body.fragments,
            Some(close.into()),
        ));
        self
    }

    /// An `if` / `else if` / `else` chain. Every header after the first is
    /// prefixed with the closing brace of the previous branch.
    pub fn branches<S: Into<String>>(mut self, branches: Vec<(S, JavaBlock)>) -> Self {
        if branches.is_empty() {
            return self;
        }
        for (index, (header, body)) in branches.into_iter().enumerate() {
            let header = header.into();
            let header = if index == 0 { header } else { format!("}} {header}") };
            self.fragments.push(CodeFragment::Line(header));
            self.fragments.push(CodeFragment::Indent(body.fragments));
        }
        self.fragments.push(CodeFragment::line("}"));
        self
    }

    /// Apply `f` only when `condition` holds.
    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition { f(self) } else { self }
    }

    /// Inline another node, e.g. a method of an anonymous class.
    pub fn emit(mut self, node: &impl Renderable) -> Self {
        self.fragments.extend(node.to_fragments());
        self
    }

    pub fn append(mut self, other: JavaBlock) -> Self {
        self.fragments.extend(other.fragments);
        self
    }

    pub fn push_line(&mut self, statement: impl Into<String>) {
        self.fragments.push(CodeFragment::Line(statement.into()));
    }

    pub fn push_block(&mut self, header: impl Into<String>, body: JavaBlock) {
        self.fragments.push(CodeFragment::block(
            header,
            body.fragments,
            Some("}".to_string()),
        ));
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl Renderable for JavaBlock {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.fragments.clone()
    }
}
