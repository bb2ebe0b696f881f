//! Literal rendering: string, bytes and f-string text escaping.

use crate::stylist::Quote;

/// Render a string constant with the preferred quote.
///
/// Values containing a newline keep their triple-quoted form; everything
/// else renders on one line with the newline escapes spelled out.
pub(crate) fn str_repr(value: &str, quote: Quote) -> String {
    if value.contains('\n') {
        triple_quoted_repr(value, quote)
    } else {
        single_line_repr(value, quote)
    }
}

fn single_line_repr(value: &str, quote: Quote) -> String {
    let q = quote.as_char();
    let mut repr = String::with_capacity(value.len() + 2);
    repr.push(q);
    for c in value.chars() {
        match c {
            '\\' => repr.push_str("\\\\"),
            '\n' => repr.push_str("\\n"),
            '\r' => repr.push_str("\\r"),
            '\t' => repr.push_str("\\t"),
            c if c == q => {
                repr.push('\\');
                repr.push(c);
            }
            c if (c as u32) < 0x20 => {
                repr.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => repr.push(c),
        }
    }
    repr.push(q);
    repr
}

fn triple_quoted_repr(value: &str, quote: Quote) -> String {
    let q = quote.as_char();
    let mut repr = String::with_capacity(value.len() + 6);
    for _ in 0..3 {
        repr.push(q);
    }
    for c in value.chars() {
        match c {
            '\\' => repr.push_str("\\\\"),
            '\r' => repr.push_str("\\r"),
            // Escaping every quote keeps runs of them from closing the
            // literal early or colliding with the terminator.
            c if c == q => {
                repr.push('\\');
                repr.push(c);
            }
            c if (c as u32) < 0x20 && c != '\n' && c != '\t' => {
                repr.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => repr.push(c),
        }
    }
    for _ in 0..3 {
        repr.push(q);
    }
    repr
}

/// Render a bytes constant: `b"..."` with non-printable bytes hex-escaped.
pub(crate) fn bytes_repr(value: &[u8], quote: Quote) -> String {
    let q = quote.as_char();
    let mut repr = String::with_capacity(value.len() + 3);
    repr.push('b');
    repr.push(q);
    for &byte in value {
        match byte {
            b'\\' => repr.push_str("\\\\"),
            b'\n' => repr.push_str("\\n"),
            b'\r' => repr.push_str("\\r"),
            b'\t' => repr.push_str("\\t"),
            byte if byte == q as u8 => {
                repr.push('\\');
                repr.push(byte as char);
            }
            0x20..=0x7e => repr.push(byte as char),
            byte => repr.push_str(&format!("\\x{byte:02x}")),
        }
    }
    repr.push(q);
    repr
}

/// Escape a literal f-string text segment (the text between replacement
/// fields). Braces double; quotes, backslashes and control characters
/// escape so the segment cannot terminate the enclosing literal.
pub(crate) fn fstring_text(value: &str, quote: Quote) -> String {
    let q = quote.as_char();
    let mut text = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '{' => text.push_str("{{"),
            '}' => text.push_str("}}"),
            '\\' => text.push_str("\\\\"),
            '\n' => text.push_str("\\n"),
            '\r' => text.push_str("\\r"),
            '\t' => text.push_str("\\t"),
            c if c == q => {
                text.push('\\');
                text.push(c);
            }
            c if (c as u32) < 0x20 => {
                text.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => text.push(c),
        }
    }
    text
}

/// Render a float the way Python spells it: integral values keep a
/// trailing `.0`, non-finite values use an overflowing literal.
pub(crate) fn float_repr(value: f64) -> String {
    if value.is_infinite() {
        // f64::MAX_10_EXP is 308, so 1e309 reliably overflows to inf.
        return if value > 0.0 {
            "1e309".to_owned()
        } else {
            "-1e309".to_owned()
        };
    }
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_repr() {
        assert_eq!(str_repr("ab", Quote::Double), "\"ab\"");
        assert_eq!(str_repr("a\"b", Quote::Double), "\"a\\\"b\"");
        assert_eq!(str_repr("a'b", Quote::Double), "\"a'b\"");
        assert_eq!(str_repr("a\tb", Quote::Single), "'a\\tb'");
    }

    #[test]
    fn test_multiline_values_render_triple_quoted() {
        assert_eq!(str_repr("a\nb", Quote::Double), "\"\"\"a\nb\"\"\"");
    }

    #[test]
    fn test_bytes_repr() {
        assert_eq!(bytes_repr(b"a\x00b", Quote::Double), "b\"a\\x00b\"");
    }

    #[test]
    fn test_float_repr_keeps_float_shape() {
        assert_eq!(float_repr(1.0), "1.0");
        assert_eq!(float_repr(0.5), "0.5");
        assert_eq!(float_repr(f64::INFINITY), "1e309");
    }

    #[test]
    fn test_fstring_text_escapes_braces() {
        assert_eq!(fstring_text("a{b}c", Quote::Double), "a{{b}}c");
    }
}
