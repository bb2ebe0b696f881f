use flint_python_ast::Location;

pub(super) const EOF_CHAR: char = '\0';

/// A character cursor over the source buffer that tracks the 1-based
/// line/column position of the next character.
#[derive(Clone, Debug)]
pub(super) struct Cursor<'source> {
    chars: std::str::Chars<'source>,
    location: Location,
}

impl<'source> Cursor<'source> {
    pub(super) fn new(source: &'source str) -> Self {
        Self {
            chars: source.chars(),
            location: Location::default(),
        }
    }

    /// The position of the next character.
    pub(super) fn location(&self) -> Location {
        self.location
    }

    /// The next character without consuming it, or [`EOF_CHAR`] at the end
    /// of input.
    pub(super) fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    /// The character after [`Cursor::first`].
    pub(super) fn second(&self) -> char {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    pub(super) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// The remaining source text.
    pub(super) fn rest(&self) -> &'source str {
        self.chars.as_str()
    }

    /// Consume the next character. A `\n` (or a `\r` not followed by `\n`)
    /// advances the position to the next line.
    pub(super) fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        match c {
            '\n' => self.location.newline(),
            '\r' if self.first() != '\n' => self.location.newline(),
            _ => self.location.go_right(),
        }
        Some(c)
    }

    /// Consume the next character if it is `c`.
    pub(super) fn eat_char(&mut self, c: char) -> bool {
        if self.first() == c {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Skip `count` bytes of the remaining source. The skipped text must
    /// lie on a single line and end on a character boundary.
    pub(super) fn skip_bytes(&mut self, count: usize) {
        let rest = self.chars.as_str();
        let skipped = &rest[..count];
        self.chars = rest[count..].chars();
        for _ in skipped.chars() {
            self.location.go_right();
        }
    }
}
