//! The formatting context threaded through the generator.

/// The quote character preferred for string literals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Quote {
    Single,
    #[default]
    Double,
}

impl Quote {
    pub const fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    /// The opposite quote character.
    #[must_use]
    pub const fn opposite(self) -> Quote {
        match self {
            Quote::Single => Quote::Double,
            Quote::Double => Quote::Single,
        }
    }
}

/// Formatting preferences for generated source.
///
/// The core generator emits minimum-legal whitespace on a single line per
/// statement; `line_width` and `magic_trailing_comma` are carried for the
/// formatter layer that reuses the generator when deciding whether to
/// explode a collection across lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Maximum line length hint.
    pub line_width: usize,
    pub quote: Quote,
    /// Whether multi-line structures keep a trailing comma.
    pub magic_trailing_comma: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            indent_width: 4,
            line_width: 88,
            quote: Quote::default(),
            magic_trailing_comma: true,
        }
    }
}

impl Style {
    pub(crate) fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }
}
