//! Emitter configuration.

/// Newline sequence used in the generated text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NewLineKind {
    #[default]
    LineFeed,
    CarriageReturnLineFeed,
}

impl NewLineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LineFeed => "\n",
            Self::CarriageReturnLineFeed => "\r\n",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EmitterOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    pub newline: NewLineKind,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            newline: NewLineKind::LineFeed,
        }
    }
}
