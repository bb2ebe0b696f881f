//! String literal support: prefix recognition and escape decoding.

use flint_python_ast::Location;

use crate::error::{LexicalError, LexicalErrorType};

bitflags::bitflags! {
    /// The prefix letters of a string literal.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) struct StringPrefix: u8 {
        const BYTES = 1 << 0;
        const RAW = 1 << 1;
        const FSTRING = 1 << 2;
        const UNICODE = 1 << 3;
    }
}

impl StringPrefix {
    /// Interpret `name` as a string prefix, if it is one of the valid
    /// combinations of `r`, `b`, `u` and `f` (any case, either order).
    pub(crate) fn try_from_name(name: &str) -> Option<StringPrefix> {
        if name.len() > 2 {
            return None;
        }
        let mut prefix = StringPrefix::empty();
        for c in name.chars() {
            let flag = match c {
                'r' | 'R' => StringPrefix::RAW,
                'b' | 'B' => StringPrefix::BYTES,
                'f' | 'F' => StringPrefix::FSTRING,
                'u' | 'U' => StringPrefix::UNICODE,
                _ => return None,
            };
            if prefix.contains(flag) {
                return None;
            }
            prefix.insert(flag);
        }
        // `u` combines with nothing; `b` and `f` exclude each other.
        if prefix.contains(StringPrefix::UNICODE) && prefix != StringPrefix::UNICODE {
            return None;
        }
        if prefix.contains(StringPrefix::BYTES | StringPrefix::FSTRING) {
            return None;
        }
        Some(prefix)
    }

    pub(crate) const fn is_raw(self) -> bool {
        self.contains(StringPrefix::RAW)
    }

    pub(crate) const fn is_bytes(self) -> bool {
        self.contains(StringPrefix::BYTES)
    }

    pub(crate) const fn is_fstring(self) -> bool {
        self.contains(StringPrefix::FSTRING)
    }

    pub(crate) const fn is_unicode(self) -> bool {
        self.contains(StringPrefix::UNICODE)
    }
}

/// Decode the escape sequences of a non-raw string literal body.
///
/// `start` is the source position of the first character of `body`; error
/// positions are derived from it.
pub(crate) fn decode_string(body: &str, start: Location) -> Result<String, LexicalError> {
    let mut decoder = Decoder::new(body, start);
    let mut value = String::with_capacity(body.len());
    while let Some(c) = decoder.bump() {
        if c == '\\' {
            if let Some(c) = decoder.decode_escape(false)? {
                value.push(c);
            }
        } else {
            value.push(c);
        }
    }
    Ok(value)
}

/// Decode the body of a bytes literal. Source characters outside the
/// escapes must be ASCII; `raw` skips escape processing but keeps the
/// ASCII requirement.
pub(crate) fn decode_bytes(body: &str, raw: bool, start: Location) -> Result<Vec<u8>, LexicalError> {
    let mut decoder = Decoder::new(body, start);
    let mut value = Vec::with_capacity(body.len());
    while let Some(c) = decoder.bump() {
        if c == '\\' && !raw {
            if let Some(c) = decoder.decode_escape(true)? {
                value.push(c as u8);
            }
        } else if c.is_ascii() {
            value.push(c as u8);
        } else {
            return Err(decoder.error_before(LexicalErrorType::NonAsciiBytes));
        }
    }
    Ok(value)
}

struct Decoder<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    location: Location,
    /// The position of the most recently consumed character.
    last: Location,
}

impl<'a> Decoder<'a> {
    fn new(body: &'a str, start: Location) -> Self {
        Self {
            chars: body.chars().peekable(),
            location: start,
            last: start,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.last = self.location;
        if c == '\n' || (c == '\r' && self.chars.peek() != Some(&'\n')) {
            self.location.newline();
        } else {
            self.location.go_right();
        }
        Some(c)
    }

    fn error_before(&self, error: LexicalErrorType) -> LexicalError {
        LexicalError::new(error, self.last)
    }

    /// Decode one escape sequence; the leading backslash has been
    /// consumed. Returns `None` for an escaped physical newline.
    fn decode_escape(&mut self, bytes_mode: bool) -> Result<Option<char>, LexicalError> {
        let escape_start = self.last;
        let Some(c) = self.bump() else {
            return Err(LexicalError::new(LexicalErrorType::TruncatedEscape, escape_start));
        };
        let decoded = match c {
            '\n' => return Ok(None),
            '\r' => {
                if self.chars.peek() == Some(&'\n') {
                    self.bump();
                }
                return Ok(None);
            }
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '0'..='7' => {
                let mut value = c.to_digit(8).unwrap();
                for _ in 0..2 {
                    let Some(digit) = self.chars.peek().and_then(|c| c.to_digit(8)) else {
                        break;
                    };
                    value = value * 8 + digit;
                    self.bump();
                }
                if value > 0xFF && bytes_mode {
                    return Err(LexicalError::new(LexicalErrorType::InvalidEscape(c), escape_start));
                }
                char::from_u32(value).unwrap()
            }
            'x' => self.decode_hex(2, escape_start)?,
            'u' if !bytes_mode => self.decode_hex(4, escape_start)?,
            'U' if !bytes_mode => self.decode_hex(8, escape_start)?,
            'N' if !bytes_mode => self.decode_named(escape_start)?,
            c => {
                return Err(LexicalError::new(
                    LexicalErrorType::InvalidEscape(c),
                    escape_start,
                ));
            }
        };
        Ok(Some(decoded))
    }

    fn decode_hex(&mut self, digits: u32, escape_start: Location) -> Result<char, LexicalError> {
        let mut value = 0;
        for _ in 0..digits {
            let Some(digit) = self.bump().and_then(|c| c.to_digit(16)) else {
                return Err(LexicalError::new(LexicalErrorType::TruncatedEscape, escape_start));
            };
            value = value * 16 + digit;
        }
        char::from_u32(value)
            .ok_or_else(|| LexicalError::new(LexicalErrorType::InvalidUnicodeEscape, escape_start))
    }

    fn decode_named(&mut self, escape_start: Location) -> Result<char, LexicalError> {
        if self.bump() != Some('{') {
            return Err(LexicalError::new(LexicalErrorType::TruncatedEscape, escape_start));
        }
        let mut name = String::new();
        loop {
            match self.bump() {
                Some('}') => break,
                Some(c) => name.push(c),
                None => {
                    return Err(LexicalError::new(
                        LexicalErrorType::TruncatedEscape,
                        escape_start,
                    ));
                }
            }
        }
        unicode_names2::character(&name).ok_or_else(|| {
            LexicalError::new(LexicalErrorType::UnknownCharacterName, escape_start)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Result<String, LexicalError> {
        decode_string(body, Location::default())
    }

    #[test]
    fn test_prefix_combinations() {
        assert_eq!(StringPrefix::try_from_name("rb"), Some(StringPrefix::RAW | StringPrefix::BYTES));
        assert_eq!(StringPrefix::try_from_name("BR"), Some(StringPrefix::RAW | StringPrefix::BYTES));
        assert_eq!(StringPrefix::try_from_name("Rf"), Some(StringPrefix::RAW | StringPrefix::FSTRING));
        assert_eq!(StringPrefix::try_from_name("u"), Some(StringPrefix::UNICODE));
        assert_eq!(StringPrefix::try_from_name("bf"), None);
        assert_eq!(StringPrefix::try_from_name("ub"), None);
        assert_eq!(StringPrefix::try_from_name("rr"), None);
        assert_eq!(StringPrefix::try_from_name("self"), None);
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(decode(r"a\nb\t\\\'\x41").unwrap(), "a\nb\t\\'A");
        assert_eq!(decode(r"\101\x7e").unwrap(), "A~");
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(decode(r"\u0394").unwrap(), "\u{394}");
        assert_eq!(decode(r"\U0001F600").unwrap(), "\u{1F600}");
        assert_eq!(decode(r"\N{LATIN SMALL LETTER A}").unwrap(), "a");
    }

    #[test]
    fn test_escaped_newline_joins() {
        assert_eq!(decode("a\\\nb").unwrap(), "ab");
    }

    #[test]
    fn test_invalid_escape() {
        let err = decode(r"\q").unwrap_err();
        assert_eq!(err.error, LexicalErrorType::InvalidEscape('q'));
    }

    #[test]
    fn test_bytes_reject_non_ascii() {
        let err = decode_bytes("caf\u{e9}", false, Location::default()).unwrap_err();
        assert_eq!(err.error, LexicalErrorType::NonAsciiBytes);
    }

    #[test]
    fn test_bytes_hex_escape() {
        assert_eq!(decode_bytes(r"\xff\x00a", false, Location::default()).unwrap(), vec![0xff, 0, b'a']);
    }
}
