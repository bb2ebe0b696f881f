/// Source code location.
///
/// Both coordinates are 1-based: `row` is the physical line and `column`
/// the character position within it, counting from the first character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    row: u32,
    column: u32,
}

impl Default for Location {
    fn default() -> Self {
        Self { row: 1, column: 1 }
    }
}

impl Location {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    pub fn row(self) -> u32 {
        self.row
    }

    pub fn column(self) -> u32 {
        self.column
    }

    /// Advance within the current line.
    pub fn go_right(&mut self) {
        self.column += 1;
    }

    /// Advance to the start of the next line.
    pub fn newline(&mut self) {
        self.row += 1;
        self.column = 1;
    }

    pub fn with_col_offset(self, offset: u32) -> Self {
        Self {
            row: self.row,
            column: self.column + offset,
        }
    }

    pub fn fmt_with(
        self,
        f: &mut std::fmt::Formatter,
        e: &impl std::fmt::Display,
    ) -> std::fmt::Result {
        write!(f, "{} at line {} column {}", e, self.row, self.column)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Location::new(1, 2) > Location::new(1, 1));
        assert!(Location::new(2, 1) > Location::new(1, 1));
        assert!(Location::new(2, 1) > Location::new(1, 2));
        assert!(Location::new(1, 1) < Location::new(1, 2));
    }

    #[test]
    fn test_newline() {
        let mut loc = Location::new(1, 7);
        loc.newline();
        assert_eq!(loc, Location::new(2, 1));
        loc.go_right();
        assert_eq!(loc, Location::new(2, 2));
    }
}
