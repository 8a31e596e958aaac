//! The output buffer: an append-only text sink with indentation and
//! scope-bracket tracking. It has no semantic knowledge; emission rules
//! decide what to write, the buffer only keeps lines indented and braces
//! balanced.

use crate::options::EmitterOptions;

#[derive(Debug)]
pub struct OutputBuffer {
    output: String,
    options: EmitterOptions,
    indent: usize,
    scopes_opened: usize,
    scopes_closed: usize,
    at_line_start: bool,
}

impl OutputBuffer {
    pub fn new(options: EmitterOptions) -> Self {
        Self {
            output: String::new(),
            options,
            indent: 0,
            scopes_opened: 0,
            scopes_closed: 0,
            at_line_start: true,
        }
    }

    /// An empty buffer that continues at this buffer's indentation level.
    /// Used for staging text that is later spliced back via [`Self::splice`].
    pub fn nested(&self) -> Self {
        Self {
            output: String::new(),
            options: self.options,
            indent: self.indent,
            scopes_opened: 0,
            scopes_closed: 0,
            at_line_start: self.at_line_start,
        }
    }

    /// Append text with no trailing newline. Embedded newlines are honored
    /// and subsequent lines are indented at the current level.
    pub fn append(&mut self, text: &str) {
        let mut first = true;
        for line in text.split('\n') {
            if !first {
                self.push_newline();
            }
            first = false;
            if line.is_empty() {
                continue;
            }
            if self.at_line_start {
                self.push_indent();
            }
            self.output.push_str(line);
            self.at_line_start = false;
        }
    }

    /// Append text followed by a newline.
    pub fn append_line(&mut self, text: &str) {
        self.append(text);
        self.push_newline();
    }

    /// A bare newline; consecutive calls produce blank lines.
    pub fn append_newline(&mut self) {
        self.push_newline();
    }

    /// Open a `{ ... }` scope: brace on its own line, indent one level.
    pub fn open_scope(&mut self) {
        if !self.at_line_start {
            self.push_newline();
        }
        if self.at_line_start {
            self.push_indent();
        }
        self.output.push('{');
        self.at_line_start = false;
        self.push_newline();
        self.indent += 1;
        self.scopes_opened += 1;
    }

    /// Close the innermost scope. No trailing newline; callers append `;` or
    /// a newline as their rule requires.
    pub fn close_scope(&mut self) {
        self.close_scope_inner(false);
    }

    /// Close the innermost scope and follow the brace with `;`.
    pub fn close_scope_with_semi(&mut self) {
        self.close_scope_inner(true);
    }

    fn close_scope_inner(&mut self, semicolon: bool) {
        if self.indent > 0 {
            self.indent -= 1;
        }
        self.scopes_closed += 1;
        if !self.at_line_start {
            self.push_newline();
        }
        self.push_indent();
        self.output.push('}');
        if semicolon {
            self.output.push(';');
        }
        self.at_line_start = false;
    }

    /// Append already-formatted text verbatim, bypassing indentation. Used
    /// when splicing staged fragments that carry their own layout.
    pub fn append_raw(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.output.push_str(text);
        self.at_line_start = text.ends_with('\n');
    }

    /// Splice a staged buffer into this one, merging its scope accounting.
    pub fn splice(&mut self, staged: OutputBuffer) {
        self.scopes_opened += staged.scopes_opened;
        self.scopes_closed += staged.scopes_closed;
        self.append_raw(&staged.output);
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    pub fn is_balanced(&self) -> bool {
        self.scopes_opened == self.scopes_closed
    }

    pub fn scopes_opened(&self) -> usize {
        self.scopes_opened
    }

    pub fn scopes_closed(&self) -> usize {
        self.scopes_closed
    }

    pub fn last_char(&self) -> Option<char> {
        self.output.chars().last()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent * self.options.indent_width {
            self.output.push(' ');
        }
        self.at_line_start = false;
    }

    fn push_newline(&mut self) {
        self.output.push_str(self.options.newline.as_str());
        self.at_line_start = true;
    }
}
