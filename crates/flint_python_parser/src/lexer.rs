//! The tokenizer.
//!
//! [`Lexer`] walks a UTF-8 source buffer and yields spanned tokens,
//! implementing Python's significant-indentation rules: leading whitespace
//! at the start of a logical line becomes INDENT/DEDENT tokens, physical
//! newlines become NEWLINE tokens unless the lexer is inside brackets
//! (implicit line joining) or the line is blank or comment-only, and a
//! trailing backslash joins physical lines. Strings, bytes, f-strings and
//! numbers are classified here; string escapes are decoded before the
//! token is emitted.
//!
//! The lexer is an iterator over [`LexResult`]s. The first error ends the
//! stream.

mod cursor;
mod fstring;
mod indentation;

use std::cmp::Ordering;
use std::collections::VecDeque;

use flint_python_ast::Location;
use num_bigint::BigInt;
use num_traits::Num;
use unicode_normalization::UnicodeNormalization;

use crate::error::{LexicalError, LexicalErrorType};
use crate::string::{self, StringPrefix};
use crate::token::Tok;
use crate::Mode;

use cursor::{Cursor, EOF_CHAR};
use fstring::FStringContext;
use indentation::{Indentation, Indentations};

/// A token with its start and end positions.
pub type Spanned = (Location, Tok, Location);
/// One step of tokenization.
pub type LexResult = Result<Spanned, LexicalError>;

/// Create a lexer over `source`.
pub fn lex(source: &str, mode: Mode) -> Lexer<'_> {
    Lexer::new(source, mode)
}

pub struct Lexer<'source> {
    cursor: Cursor<'source>,
    mode: Mode,
    pending: VecDeque<Spanned>,
    indentations: Indentations,
    /// Open bracket depth across `()`, `[]` and `{}`. Nonzero depth
    /// suppresses NEWLINE, INDENT and DEDENT.
    nesting: u32,
    fstrings: Vec<FStringContext>,
    /// No token has been emitted on the current logical line yet.
    at_line_start: bool,
    finished: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str, mode: Mode) -> Self {
        Self {
            cursor: Cursor::new(source),
            mode,
            pending: VecDeque::new(),
            indentations: Indentations::default(),
            nesting: 0,
            fstrings: Vec::new(),
            at_line_start: true,
            finished: false,
        }
    }

    fn push(&mut self, start: Location, tok: Tok, end: Location) {
        self.pending.push_back((start, tok, end));
    }

    fn emit(&mut self, start: Location, tok: Tok) {
        let end = self.cursor.location();
        self.at_line_start = false;
        self.push(start, tok, end);
    }

    /// Lex forward until at least one token lands in the queue or the
    /// stream ends.
    fn advance(&mut self) -> Result<(), LexicalError> {
        if self
            .fstrings
            .last()
            .is_some_and(FStringContext::is_in_text)
        {
            return self.lex_fstring_text();
        }
        if self.at_line_start && self.nesting == 0 && matches!(self.mode, Mode::Module) {
            return self.lex_line_start();
        }
        self.skip_trivia()?;
        let start = self.cursor.location();
        let Some(c) = self.cursor.bump() else {
            return self.finalize();
        };
        match c {
            c if is_identifier_start(c) => self.lex_identifier_or_prefixed_string(c, start),
            '0'..='9' => self.lex_number(c, start),
            '.' if self.cursor.first().is_ascii_digit() => self.lex_number('.', start),
            '\'' | '"' => self.lex_string(StringPrefix::empty(), c, start),
            '\n' | '\r' => {
                if c == '\r' {
                    self.cursor.eat_char('\n');
                }
                // Inside brackets the newline joins lines; on a blank line
                // there is nothing to terminate.
                if self.nesting == 0 && !self.at_line_start {
                    self.push(start, Tok::Newline, self.cursor.location());
                    self.at_line_start = true;
                }
                Ok(())
            }
            c => self.lex_operator(c, start),
        }
    }

    /// Measure the indentation of a fresh logical line and emit
    /// INDENT/DEDENT tokens as needed. Blank and comment-only lines are
    /// consumed without emitting anything.
    fn lex_line_start(&mut self) -> Result<(), LexicalError> {
        let line_start = self.cursor.location();
        let mut indent = Indentation::root();
        loop {
            match self.cursor.first() {
                ' ' => {
                    self.cursor.bump();
                    indent = indent.add_space();
                }
                '\t' => {
                    self.cursor.bump();
                    indent = indent.add_tab();
                }
                '\x0c' => {
                    // A form feed resets the indentation measurement.
                    self.cursor.bump();
                    indent = Indentation::root();
                }
                '\\' => {
                    let backslash = self.cursor.location();
                    self.cursor.bump();
                    if !self.eat_newline() {
                        return Err(LexicalError::new(
                            LexicalErrorType::LineContinuation,
                            backslash,
                        ));
                    }
                }
                '#' => {
                    self.skip_comment();
                }
                '\n' | '\r' => {
                    let c = self.cursor.bump().unwrap();
                    if c == '\r' {
                        self.cursor.eat_char('\n');
                    }
                    return Ok(());
                }
                EOF_CHAR if self.cursor.is_eof() => {
                    return self.finalize();
                }
                _ => break,
            }
        }
        let location = self.cursor.location();
        match indent
            .try_compare(self.indentations.current())
            .map_err(|_| LexicalError::new(LexicalErrorType::AmbiguousIndentation, location))?
        {
            Ordering::Equal => {}
            Ordering::Greater => {
                self.indentations.indent(indent);
                self.push(line_start, Tok::Indent, location);
            }
            Ordering::Less => loop {
                self.indentations.dedent();
                self.push(location, Tok::Dedent, location);
                match indent
                    .try_compare(self.indentations.current())
                    .map_err(|_| {
                        LexicalError::new(LexicalErrorType::AmbiguousIndentation, location)
                    })? {
                    Ordering::Equal => break,
                    Ordering::Less => {}
                    Ordering::Greater => {
                        return Err(LexicalError::new(
                            LexicalErrorType::InconsistentDedent,
                            location,
                        ));
                    }
                }
            },
        }
        self.at_line_start = false;
        Ok(())
    }

    /// Skip insignificant whitespace, comments and backslash line joins.
    fn skip_trivia(&mut self) -> Result<(), LexicalError> {
        loop {
            match self.cursor.first() {
                ' ' | '\t' | '\x0c' => {
                    self.cursor.bump();
                }
                '\\' => {
                    let backslash = self.cursor.location();
                    self.cursor.bump();
                    if !self.eat_newline() {
                        return Err(LexicalError::new(
                            LexicalErrorType::LineContinuation,
                            backslash,
                        ));
                    }
                }
                '#' => {
                    self.skip_comment();
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consume one physical newline, if present.
    fn eat_newline(&mut self) -> bool {
        match self.cursor.first() {
            '\n' => {
                self.cursor.bump();
                true
            }
            '\r' => {
                self.cursor.bump();
                self.cursor.eat_char('\n');
                true
            }
            _ => false,
        }
    }

    /// Skip a `#` comment up to (not including) the line terminator.
    fn skip_comment(&mut self) {
        let rest = self.cursor.rest();
        match memchr::memchr2(b'\n', b'\r', rest.as_bytes()) {
            Some(index) => self.cursor.skip_bytes(index),
            None => self.cursor.skip_bytes(rest.len()),
        }
    }

    /// Emit the final NEWLINE, close all open blocks and emit the end
    /// marker.
    fn finalize(&mut self) -> Result<(), LexicalError> {
        let location = self.cursor.location();
        if !self.fstrings.is_empty() {
            return Err(LexicalError::new(
                LexicalErrorType::UnterminatedFString,
                location,
            ));
        }
        if self.nesting == 0 {
            if !self.at_line_start {
                self.push(location, Tok::Newline, location);
                self.at_line_start = true;
            }
            while !self.indentations.is_empty() {
                self.indentations.dedent();
                self.push(location, Tok::Dedent, location);
            }
        }
        self.push(location, Tok::EndOfFile, location);
        self.finished = true;
        Ok(())
    }

    fn lex_identifier_or_prefixed_string(
        &mut self,
        first: char,
        start: Location,
    ) -> Result<(), LexicalError> {
        let mut name = String::new();
        name.push(first);
        while is_identifier_continue(self.cursor.first()) {
            name.push(self.cursor.bump().unwrap());
        }
        if matches!(self.cursor.first(), '\'' | '"') {
            if let Some(prefix) = StringPrefix::try_from_name(&name) {
                let quote = self.cursor.bump().unwrap();
                return self.lex_string(prefix, quote, start);
            }
        }
        if let Some(tok) = Tok::keyword(&name) {
            self.emit(start, tok);
            return Ok(());
        }
        let name = if name.is_ascii() {
            name
        } else {
            name.nfkc().collect()
        };
        self.emit(start, Tok::Name { name });
        Ok(())
    }

    fn lex_number(&mut self, first: char, start: Location) -> Result<(), LexicalError> {
        let tok = if first == '0' && matches!(self.cursor.first(), 'x' | 'X' | 'o' | 'O' | 'b' | 'B')
        {
            let (radix, message) = match self.cursor.bump().unwrap() {
                'x' | 'X' => (16, "invalid hexadecimal literal"),
                'o' | 'O' => (8, "invalid octal literal"),
                _ => (2, "invalid binary literal"),
            };
            let digits = self.radix_run(radix, true)?;
            if digits.is_empty() || is_identifier_continue(self.cursor.first()) {
                return Err(LexicalError::new(
                    LexicalErrorType::InvalidNumber(message),
                    self.cursor.location(),
                ));
            }
            let value = BigInt::from_str_radix(&digits, radix).map_err(|_| {
                LexicalError::new(LexicalErrorType::InvalidNumber(message), start)
            })?;
            Tok::Int { value }
        } else {
            self.lex_decimal_number(first, start)?
        };
        self.emit(start, tok);
        Ok(())
    }

    /// A decimal integer, float or imaginary literal; `first` has been
    /// consumed and is either a digit or the `.` of a fraction.
    fn lex_decimal_number(&mut self, first: char, start: Location) -> Result<Tok, LexicalError> {
        let mut literal = String::new();
        let mut is_float = false;
        if first == '.' {
            literal.push('.');
            is_float = true;
            literal += &self.radix_run(10, false)?;
        } else {
            literal.push(first);
            literal += &self.radix_run(10, false)?;
            if self.cursor.first() == '.' && self.cursor.second() != '.' {
                self.cursor.bump();
                literal.push('.');
                is_float = true;
                literal += &self.radix_run(10, false)?;
            }
        }
        if matches!(self.cursor.first(), 'e' | 'E') {
            let exponent_ok = match self.cursor.second() {
                '0'..='9' => true,
                '+' | '-' => true,
                _ => false,
            };
            if exponent_ok {
                self.cursor.bump();
                literal.push('e');
                is_float = true;
                if matches!(self.cursor.first(), '+' | '-') {
                    literal.push(self.cursor.bump().unwrap());
                }
                let digits = self.radix_run(10, false)?;
                if digits.is_empty() {
                    return Err(LexicalError::new(
                        LexicalErrorType::InvalidNumber("invalid decimal literal"),
                        self.cursor.location(),
                    ));
                }
                literal += &digits;
            }
        }
        if matches!(self.cursor.first(), 'j' | 'J') {
            self.cursor.bump();
            let imag = literal.parse::<f64>().map_err(|_| {
                LexicalError::new(LexicalErrorType::InvalidNumber("invalid imaginary literal"), start)
            })?;
            self.check_number_end()?;
            return Ok(Tok::Complex { real: 0.0, imag });
        }
        self.check_number_end()?;
        if is_float {
            let value = literal.parse::<f64>().map_err(|_| {
                LexicalError::new(LexicalErrorType::InvalidNumber("invalid decimal literal"), start)
            })?;
            Ok(Tok::Float { value })
        } else {
            if literal.len() > 1
                && literal.starts_with('0')
                && literal.bytes().any(|b| b != b'0')
            {
                return Err(LexicalError::new(
                    LexicalErrorType::InvalidNumber(
                        "leading zeros in decimal integer literals are not permitted",
                    ),
                    start,
                ));
            }
            let value = BigInt::parse_bytes(literal.as_bytes(), 10).ok_or_else(|| {
                LexicalError::new(LexicalErrorType::InvalidNumber("invalid decimal literal"), start)
            })?;
            Ok(Tok::Int { value })
        }
    }

    /// A numeric literal must not run into an identifier or another digit.
    fn check_number_end(&self) -> Result<(), LexicalError> {
        if is_identifier_start(self.cursor.first()) || self.cursor.first().is_ascii_digit() {
            return Err(LexicalError::new(
                LexicalErrorType::InvalidNumber("invalid decimal literal"),
                self.cursor.location(),
            ));
        }
        Ok(())
    }

    /// Collect a run of digits of the given radix, stripping underscore
    /// separators. An underscore must sit between two digits
    /// (`allow_leading_underscore` admits one directly after a radix
    /// prefix).
    fn radix_run(
        &mut self,
        radix: u32,
        allow_leading_underscore: bool,
    ) -> Result<String, LexicalError> {
        let mut digits = String::new();
        let mut prev_was_digit = false;
        loop {
            let c = self.cursor.first();
            if c.is_digit(radix) {
                digits.push(c);
                self.cursor.bump();
                prev_was_digit = true;
            } else if c == '_' {
                if !(prev_was_digit || (allow_leading_underscore && digits.is_empty())) {
                    return Err(LexicalError::new(
                        LexicalErrorType::InvalidNumber(
                            "underscores in numeric literals must separate digits",
                        ),
                        self.cursor.location(),
                    ));
                }
                if !self.cursor.second().is_digit(radix) {
                    return Err(LexicalError::new(
                        LexicalErrorType::InvalidNumber(
                            "underscores in numeric literals must separate digits",
                        ),
                        self.cursor.location(),
                    ));
                }
                self.cursor.bump();
                prev_was_digit = false;
            } else {
                return Ok(digits);
            }
        }
    }

    /// Lex a string or bytes literal; the prefix (possibly empty) and the
    /// opening quote have been consumed.
    fn lex_string(
        &mut self,
        prefix: StringPrefix,
        quote: char,
        start: Location,
    ) -> Result<(), LexicalError> {
        let triple = if self.cursor.first() == quote && self.cursor.second() == quote {
            self.cursor.bump();
            self.cursor.bump();
            true
        } else {
            false
        };
        if prefix.is_fstring() {
            self.fstrings
                .push(FStringContext::new(prefix.is_raw(), quote, triple));
            self.emit(start, Tok::FStringStart);
            return Ok(());
        }
        let body_start = self.cursor.location();
        let unterminated = if triple {
            LexicalErrorType::UnterminatedTripleQuotedString
        } else {
            LexicalErrorType::UnterminatedString
        };
        let mut body = String::new();
        loop {
            let Some(c) = self.cursor.bump() else {
                return Err(LexicalError::new(unterminated, start));
            };
            match c {
                '\\' => {
                    body.push('\\');
                    if let Some(c) = self.cursor.bump() {
                        body.push(c);
                        if c == '\r' && self.cursor.eat_char('\n') {
                            body.push('\n');
                        }
                    }
                }
                c if c == quote => {
                    if !triple {
                        break;
                    }
                    if self.cursor.first() == quote && self.cursor.second() == quote {
                        self.cursor.bump();
                        self.cursor.bump();
                        break;
                    }
                    body.push(c);
                }
                '\n' => {
                    if !triple {
                        return Err(LexicalError::new(unterminated, start));
                    }
                    body.push('\n');
                }
                '\r' => {
                    if !triple {
                        return Err(LexicalError::new(unterminated, start));
                    }
                    self.cursor.eat_char('\n');
                    body.push('\n');
                }
                c => body.push(c),
            }
        }
        let tok = if prefix.is_bytes() {
            let value = string::decode_bytes(&body, prefix.is_raw(), body_start)?;
            Tok::Bytes { value }
        } else {
            let value = if prefix.is_raw() {
                body
            } else {
                string::decode_string(&body, body_start)?
            };
            let kind = prefix.is_unicode().then(|| "u".to_owned());
            Tok::String { value, kind }
        };
        self.emit(start, tok);
        Ok(())
    }

    /// Lex literal f-string text up to the next replacement field, closing
    /// brace of a format spec, or closing quote.
    fn lex_fstring_text(&mut self) -> Result<(), LexicalError> {
        let (raw, quote, triple) = {
            let ctx = self.fstrings.last().unwrap();
            (ctx.is_raw(), ctx.quote(), ctx.is_triple())
        };
        let start = self.cursor.location();
        let mut text = String::new();
        loop {
            let location = self.cursor.location();
            if self.cursor.is_eof() {
                return Err(LexicalError::new(
                    LexicalErrorType::UnterminatedFString,
                    location,
                ));
            }
            let c = self.cursor.first();
            match c {
                c if c == quote => {
                    if triple
                        && !(self.cursor.second() == quote && {
                            let mut probe = self.cursor.clone();
                            probe.bump();
                            probe.bump();
                            probe.first() == quote
                        })
                    {
                        self.cursor.bump();
                        text.push(c);
                        continue;
                    }
                    // Closing quote.
                    if self.fstrings.last().unwrap().has_open_field() {
                        return Err(LexicalError::new(
                            LexicalErrorType::UnclosedReplacementField,
                            location,
                        ));
                    }
                    self.cursor.bump();
                    if triple {
                        self.cursor.bump();
                        self.cursor.bump();
                    }
                    self.flush_fstring_middle(raw, &mut text, start)?;
                    self.emit(location, Tok::FStringEnd);
                    self.fstrings.pop();
                    return Ok(());
                }
                '{' => {
                    if self.cursor.second() == '{' {
                        self.cursor.bump();
                        self.cursor.bump();
                        text.push('{');
                        continue;
                    }
                    self.flush_fstring_middle(raw, &mut text, start)?;
                    self.cursor.bump();
                    self.emit(location, Tok::Lbrace);
                    self.nesting += 1;
                    let nesting = self.nesting;
                    self.fstrings.last_mut().unwrap().open_field(nesting);
                    return Ok(());
                }
                '}' => {
                    if self.cursor.second() == '}' {
                        self.cursor.bump();
                        self.cursor.bump();
                        text.push('}');
                        continue;
                    }
                    if self.fstrings.last().unwrap().field_in_spec() {
                        // The `}` closes the replacement field whose format
                        // spec we are lexing.
                        self.flush_fstring_middle(raw, &mut text, start)?;
                        self.cursor.bump();
                        self.emit(location, Tok::Rbrace);
                        self.nesting = self.nesting.saturating_sub(1);
                        self.fstrings.last_mut().unwrap().close_field();
                        return Ok(());
                    }
                    return Err(LexicalError::new(LexicalErrorType::SingleRbrace, location));
                }
                '\n' | '\r' => {
                    if !triple {
                        return Err(LexicalError::new(
                            LexicalErrorType::UnterminatedString,
                            location,
                        ));
                    }
                    self.cursor.bump();
                    if c == '\r' {
                        self.cursor.eat_char('\n');
                    }
                    text.push('\n');
                }
                '\\' => {
                    self.cursor.bump();
                    text.push('\\');
                    if let Some(c) = self.cursor.bump() {
                        text.push(c);
                        if c == '\r' && self.cursor.eat_char('\n') {
                            text.push('\n');
                        }
                    }
                }
                c => {
                    self.cursor.bump();
                    text.push(c);
                }
            }
        }
    }

    fn flush_fstring_middle(
        &mut self,
        raw: bool,
        text: &mut String,
        start: Location,
    ) -> Result<(), LexicalError> {
        if text.is_empty() {
            return Ok(());
        }
        let body = std::mem::take(text);
        let value = if raw {
            body
        } else {
            string::decode_string(&body, start)?
        };
        let end = self.cursor.location();
        self.at_line_start = false;
        self.push(start, Tok::FStringMiddle { value }, end);
        Ok(())
    }

    /// Whether the cursor sits at the top level of an open f-string
    /// replacement field (where `:` starts the format spec and `}` closes
    /// the field).
    fn at_fstring_field_top(&self) -> bool {
        self.fstrings.last().is_some_and(|ctx| {
            !ctx.field_in_spec() && ctx.field_nesting() == Some(self.nesting)
        })
    }

    fn lex_operator(&mut self, c: char, start: Location) -> Result<(), LexicalError> {
        let tok = match c {
            '(' => {
                self.nesting += 1;
                Tok::Lpar
            }
            ')' => {
                self.nesting = self.nesting.saturating_sub(1);
                Tok::Rpar
            }
            '[' => {
                self.nesting += 1;
                Tok::Lsqb
            }
            ']' => {
                self.nesting = self.nesting.saturating_sub(1);
                Tok::Rsqb
            }
            '{' => {
                self.nesting += 1;
                Tok::Lbrace
            }
            '}' => {
                if self.at_fstring_field_top() {
                    self.emit(start, Tok::Rbrace);
                    self.nesting = self.nesting.saturating_sub(1);
                    self.fstrings.last_mut().unwrap().close_field();
                    return Ok(());
                }
                self.nesting = self.nesting.saturating_sub(1);
                Tok::Rbrace
            }
            ':' => {
                if self.at_fstring_field_top() {
                    // The top-level `:` of a replacement field starts the
                    // format spec, even before a would-be `:=`.
                    self.emit(start, Tok::Colon);
                    self.fstrings.last_mut().unwrap().enter_spec();
                    return Ok(());
                }
                if self.cursor.eat_char('=') {
                    Tok::ColonEqual
                } else {
                    Tok::Colon
                }
            }
            '!' => {
                if self.cursor.eat_char('=') {
                    Tok::NotEqual
                } else {
                    Tok::Exclamation
                }
            }
            '=' => {
                if self.cursor.eat_char('=') {
                    Tok::EqEqual
                } else {
                    Tok::Equal
                }
            }
            '+' => {
                if self.cursor.eat_char('=') {
                    Tok::PlusEqual
                } else {
                    Tok::Plus
                }
            }
            '-' => {
                if self.cursor.eat_char('=') {
                    Tok::MinusEqual
                } else if self.cursor.eat_char('>') {
                    Tok::Rarrow
                } else {
                    Tok::Minus
                }
            }
            '*' => {
                if self.cursor.eat_char('*') {
                    if self.cursor.eat_char('=') {
                        Tok::DoubleStarEqual
                    } else {
                        Tok::DoubleStar
                    }
                } else if self.cursor.eat_char('=') {
                    Tok::StarEqual
                } else {
                    Tok::Star
                }
            }
            '/' => {
                if self.cursor.eat_char('/') {
                    if self.cursor.eat_char('=') {
                        Tok::DoubleSlashEqual
                    } else {
                        Tok::DoubleSlash
                    }
                } else if self.cursor.eat_char('=') {
                    Tok::SlashEqual
                } else {
                    Tok::Slash
                }
            }
            '%' => {
                if self.cursor.eat_char('=') {
                    Tok::PercentEqual
                } else {
                    Tok::Percent
                }
            }
            '@' => {
                if self.cursor.eat_char('=') {
                    Tok::AtEqual
                } else {
                    Tok::At
                }
            }
            '&' => {
                if self.cursor.eat_char('=') {
                    Tok::AmperEqual
                } else {
                    Tok::Amper
                }
            }
            '|' => {
                if self.cursor.eat_char('=') {
                    Tok::VbarEqual
                } else {
                    Tok::Vbar
                }
            }
            '^' => {
                if self.cursor.eat_char('=') {
                    Tok::CircumflexEqual
                } else {
                    Tok::CircumFlex
                }
            }
            '<' => {
                if self.cursor.eat_char('<') {
                    if self.cursor.eat_char('=') {
                        Tok::LeftShiftEqual
                    } else {
                        Tok::LeftShift
                    }
                } else if self.cursor.eat_char('=') {
                    Tok::LessEqual
                } else {
                    Tok::Less
                }
            }
            '>' => {
                if self.cursor.eat_char('>') {
                    if self.cursor.eat_char('=') {
                        Tok::RightShiftEqual
                    } else {
                        Tok::RightShift
                    }
                } else if self.cursor.eat_char('=') {
                    Tok::GreaterEqual
                } else {
                    Tok::Greater
                }
            }
            '~' => Tok::Tilde,
            ',' => Tok::Comma,
            ';' => Tok::Semi,
            '.' => {
                if self.cursor.first() == '.' && self.cursor.second() == '.' {
                    self.cursor.bump();
                    self.cursor.bump();
                    Tok::Ellipsis
                } else {
                    Tok::Dot
                }
            }
            c => {
                return Err(LexicalError::new(
                    LexicalErrorType::UnrecognizedToken { tok: c },
                    start,
                ));
            }
        };
        self.emit(start, tok);
        Ok(())
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult;

    fn next(&mut self) -> Option<LexResult> {
        loop {
            if let Some(spanned) = self.pending.pop_front() {
                return Some(Ok(spanned));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.advance() {
                self.finished = true;
                return Some(Err(err));
            }
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    if c.is_ascii() {
        c == '_' || c.is_ascii_alphabetic()
    } else {
        unicode_ident::is_xid_start(c)
    }
}

fn is_identifier_continue(c: char) -> bool {
    if c.is_ascii() {
        c == '_' || c.is_ascii_alphanumeric()
    } else {
        unicode_ident::is_xid_continue(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source, Mode::Module)
            .map(|result| TokenKind::from(&result.unwrap().1))
            .collect()
    }

    fn tokens(source: &str) -> Vec<Tok> {
        lex(source, Mode::Module)
            .map(|result| result.unwrap().1)
            .collect()
    }

    fn first_error(source: &str) -> LexicalError {
        lex(source, Mode::Module)
            .find_map(Result::err)
            .expect("expected a lexical error")
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), [TokenKind::EndOfFile]);
    }

    #[test]
    fn test_newline_synthesized_at_eof() {
        assert_eq!(
            kinds("x"),
            [TokenKind::Name, TokenKind::Newline, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_produce_no_tokens() {
        assert_eq!(
            kinds("\n\n# comment\n   \nx = 1\n"),
            [
                TokenKind::Name,
                TokenKind::Equal,
                TokenKind::Int,
                TokenKind::Newline,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_indent_dedent_balance() {
        let kinds = kinds("if x:\n    if y:\n        pass\npass\n");
        let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, 2);
        assert_eq!(dedents, 2);
    }

    #[test]
    fn test_dedent_emitted_at_eof() {
        assert_eq!(
            kinds("if x:\n    pass"),
            [
                TokenKind::If,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Pass,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_bracket_suppression() {
        // Every physical newline lies inside brackets: no NEWLINE, INDENT
        // or DEDENT between them.
        let kinds = kinds("x = (\n    1,\n    2,\n)\n");
        assert_eq!(
            kinds,
            [
                TokenKind::Name,
                TokenKind::Equal,
                TokenKind::Lpar,
                TokenKind::Int,
                TokenKind::Comma,
                TokenKind::Int,
                TokenKind::Comma,
                TokenKind::Rpar,
                TokenKind::Newline,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_backslash_continuation() {
        assert_eq!(
            kinds("x = 1 + \\\n    2\n"),
            [
                TokenKind::Name,
                TokenKind::Equal,
                TokenKind::Int,
                TokenKind::Plus,
                TokenKind::Int,
                TokenKind::Newline,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_tokenization_is_deterministic() {
        let source = "def f(a, b=1):\n    return a + b\n";
        let first: Vec<_> = lex(source, Mode::Module).collect();
        let second: Vec<_> = lex(source, Mode::Module).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_operators_maximal_munch() {
        assert_eq!(
            kinds("a **= b // c := d -> e\n")[..9],
            [
                TokenKind::Name,
                TokenKind::DoubleStarEqual,
                TokenKind::Name,
                TokenKind::DoubleSlash,
                TokenKind::Name,
                TokenKind::ColonEqual,
                TokenKind::Name,
                TokenKind::Rarrow,
                TokenKind::Name,
            ]
        );
    }

    #[test]
    fn test_number_classification() {
        let toks = tokens("17 0x_ff 0o21 0b101 1_000 3.14 10. .5 1e3 1_0.5e-2 4j 2.5J\n");
        assert_eq!(toks[0], Tok::Int { value: BigInt::from(17) });
        assert_eq!(toks[1], Tok::Int { value: BigInt::from(255) });
        assert_eq!(toks[2], Tok::Int { value: BigInt::from(17) });
        assert_eq!(toks[3], Tok::Int { value: BigInt::from(5) });
        assert_eq!(toks[4], Tok::Int { value: BigInt::from(1000) });
        assert_eq!(toks[5], Tok::Float { value: 3.14 });
        assert_eq!(toks[6], Tok::Float { value: 10.0 });
        assert_eq!(toks[7], Tok::Float { value: 0.5 });
        assert_eq!(toks[8], Tok::Float { value: 1000.0 });
        assert_eq!(toks[9], Tok::Float { value: 0.105 });
        assert_eq!(toks[10], Tok::Complex { real: 0.0, imag: 4.0 });
        assert_eq!(toks[11], Tok::Complex { real: 0.0, imag: 2.5 });
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            first_error("1__0\n").error,
            LexicalErrorType::InvalidNumber(_)
        ));
        assert!(matches!(
            first_error("1_\n").error,
            LexicalErrorType::InvalidNumber(_)
        ));
        assert!(matches!(
            first_error("0123\n").error,
            LexicalErrorType::InvalidNumber(_)
        ));
        assert!(matches!(
            first_error("0x\n").error,
            LexicalErrorType::InvalidNumber(_)
        ));
    }

    #[test]
    fn test_string_values_decoded() {
        let toks = tokens("'a\\nb' r'a\\nb' b'\\x41' u'x'\n");
        assert_eq!(
            toks[0],
            Tok::String { value: "a\nb".to_owned(), kind: None }
        );
        assert_eq!(
            toks[1],
            Tok::String { value: "a\\nb".to_owned(), kind: None }
        );
        assert_eq!(toks[2], Tok::Bytes { value: b"A".to_vec() });
        assert_eq!(
            toks[3],
            Tok::String { value: "x".to_owned(), kind: Some("u".to_owned()) }
        );
    }

    #[test]
    fn test_triple_quoted_string() {
        let toks = tokens("'''line1\nline2'''\n");
        assert_eq!(
            toks[0],
            Tok::String { value: "line1\nline2".to_owned(), kind: None }
        );
        // The newline inside the literal does not terminate the logical
        // line.
        assert_eq!(toks[1], Tok::Newline);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(first_error("'abc\n").error, LexicalErrorType::UnterminatedString);
        assert_eq!(
            first_error("'''abc\n").error,
            LexicalErrorType::UnterminatedTripleQuotedString
        );
    }

    #[test]
    fn test_fstring_token_stream() {
        assert_eq!(
            kinds("f\"hi {name}!\"\n"),
            [
                TokenKind::FStringStart,
                TokenKind::FStringMiddle,
                TokenKind::Lbrace,
                TokenKind::Name,
                TokenKind::Rbrace,
                TokenKind::FStringMiddle,
                TokenKind::FStringEnd,
                TokenKind::Newline,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_fstring_conversion_and_nested_spec() {
        assert_eq!(
            kinds("f\"hi {name!r:>{w}}\"\n"),
            [
                TokenKind::FStringStart,
                TokenKind::FStringMiddle,
                TokenKind::Lbrace,
                TokenKind::Name,
                TokenKind::Exclamation,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::FStringMiddle,
                TokenKind::Lbrace,
                TokenKind::Name,
                TokenKind::Rbrace,
                TokenKind::Rbrace,
                TokenKind::FStringEnd,
                TokenKind::Newline,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_fstring_double_braces_are_literal() {
        let toks = tokens("f\"{{}}\"\n");
        assert_eq!(toks[1], Tok::FStringMiddle { value: "{}".to_owned() });
    }

    #[test]
    fn test_fstring_walrus_is_spec_delimiter() {
        // At the top level of a replacement field, `:` always starts the
        // format spec; `x := 1` needs parentheses.
        assert_eq!(
            kinds("f\"{x := 1}\"\n")[..7],
            [
                TokenKind::FStringStart,
                TokenKind::Lbrace,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::FStringMiddle,
                TokenKind::Rbrace,
                TokenKind::FStringEnd,
            ]
        );
    }

    #[test]
    fn test_fstring_nested_dict_display() {
        assert_eq!(
            kinds("f\"{ {'a': 1} }\"\n"),
            [
                TokenKind::FStringStart,
                TokenKind::Lbrace,
                TokenKind::Lbrace,
                TokenKind::String,
                TokenKind::Colon,
                TokenKind::Int,
                TokenKind::Rbrace,
                TokenKind::Rbrace,
                TokenKind::FStringEnd,
                TokenKind::Newline,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_fstring_single_rbrace_rejected() {
        assert_eq!(first_error("f\"}\"\n").error, LexicalErrorType::SingleRbrace);
    }

    #[test]
    fn test_ambiguous_indentation_rejected() {
        let error = first_error("if x:\n\tpass\n        pass\n");
        assert_eq!(error.error, LexicalErrorType::AmbiguousIndentation);
    }

    #[test]
    fn test_inconsistent_dedent_rejected() {
        let error = first_error("if x:\n        pass\n    pass\n");
        assert_eq!(error.error, LexicalErrorType::InconsistentDedent);
    }

    #[test]
    fn test_stray_character() {
        assert_eq!(
            first_error("x = 1 ?\n").error,
            LexicalErrorType::UnrecognizedToken { tok: '?' }
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let (start, tok, end) = lex("x = 1\n", Mode::Module).next().unwrap().unwrap();
        assert_eq!(tok, Tok::Name { name: "x".to_owned() });
        assert_eq!(start, Location::new(1, 1));
        assert_eq!(end, Location::new(1, 2));
        let spanned: Vec<_> = lex("x = 1\n", Mode::Module).map(Result::unwrap).collect();
        let (int_start, _, int_end) = &spanned[2];
        assert_eq!(*int_start, Location::new(1, 5));
        assert_eq!(*int_end, Location::new(1, 6));
    }

    #[test]
    fn test_soft_keywords_are_names() {
        assert_eq!(
            kinds("match = 1\n")[..1],
            [TokenKind::Name]
        );
        assert_eq!(kinds("type(x)\n")[..1], [TokenKind::Name]);
    }

    #[test]
    fn test_nfkc_normalization() {
        // U+00B5 MICRO SIGN normalizes to U+03BC GREEK SMALL LETTER MU.
        let toks = tokens("µ = 1\n");
        assert_eq!(toks[0], Tok::Name { name: "\u{3bc}".to_owned() });
    }
}
