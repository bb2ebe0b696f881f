//! Indentation tracking for the lexer.
//!
//! Leading whitespace is measured two ways at once: as a column (tabs
//! advance to the next multiple of 8) and as a raw character count. Two
//! indentations compare consistently only if both measures agree on the
//! ordering; a disagreement means the tab/space mix is ambiguous and the
//! line is rejected, the way Python 3 raises `TabError`.

use std::cmp::Ordering;

const TAB_SIZE: u32 = 8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub(super) struct Indentation {
    column: u32,
    character: u32,
}

impl Indentation {
    pub(super) const fn root() -> Self {
        Self {
            column: 0,
            character: 0,
        }
    }

    #[must_use]
    pub(super) fn add_space(self) -> Self {
        Self {
            column: self.column + 1,
            character: self.character + 1,
        }
    }

    #[must_use]
    pub(super) fn add_tab(self) -> Self {
        Self {
            column: (self.column / TAB_SIZE + 1) * TAB_SIZE,
            character: self.character + 1,
        }
    }

    pub(super) fn try_compare(self, other: Indentation) -> Result<Ordering, AmbiguousIndentation> {
        let column_ordering = self.column.cmp(&other.column);
        let character_ordering = self.character.cmp(&other.character);
        if column_ordering == character_ordering {
            Ok(column_ordering)
        } else {
            Err(AmbiguousIndentation)
        }
    }
}

/// The indentations of two lines cannot be ordered: one is deeper by
/// columns, the other by characters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) struct AmbiguousIndentation;

/// The stack of open indentation levels. The bottom level is implicit and
/// cannot be popped.
#[derive(Debug, Clone, Default)]
pub(super) struct Indentations {
    stack: Vec<Indentation>,
}

impl Indentations {
    pub(super) fn current(&self) -> Indentation {
        self.stack.last().copied().unwrap_or(Indentation::root())
    }

    pub(super) fn indent(&mut self, indent: Indentation) {
        debug_assert_eq!(
            indent.try_compare(self.current()),
            Ok(Ordering::Greater)
        );
        self.stack.push(indent);
    }

    /// Pop one level, or `None` at the implicit bottom.
    pub(super) fn dedent(&mut self) -> Option<Indentation> {
        self.stack.pop()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_with_tab_expands_to_tab_stop() {
        let indent = Indentation::root().add_space().add_tab();
        assert_eq!(indent, Indentation {
            column: 8,
            character: 2
        });
    }

    #[test]
    fn ambiguous_mix_is_rejected() {
        // One tab vs. two spaces: deeper by column, also deeper by
        // character count on one side only.
        let tab = Indentation::root().add_tab();
        let spaces = Indentation::root().add_space().add_space();
        assert_eq!(tab.try_compare(spaces), Err(AmbiguousIndentation));
    }

    #[test]
    fn eight_spaces_equal_one_tab_column() {
        let tab = Indentation::root().add_tab();
        let mut spaces = Indentation::root();
        for _ in 0..8 {
            spaces = spaces.add_space();
        }
        // Equal columns but unequal character counts: still ambiguous.
        assert_eq!(tab.try_compare(spaces), Err(AmbiguousIndentation));
    }
}
