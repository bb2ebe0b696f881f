//! Lexer state for f-strings.
//!
//! An f-string interleaves literal text with replacement fields; the lexer
//! keeps a stack of [`FStringContext`]s (f-strings nest through replacement
//! fields) and each context tracks its own stack of open fields. A field
//! remembers the bracket nesting level of its interior so that the `}`
//! closing the field can be told apart from a `}` closing a dict or set
//! display inside it.

/// One open `{...}` replacement field.
#[derive(Debug, Copy, Clone)]
struct ReplacementField {
    /// The lexer's bracket nesting level directly inside the field.
    nesting: u32,
    /// Whether the field's `:` format spec has started.
    in_spec: bool,
}

#[derive(Debug, Clone)]
pub(super) struct FStringContext {
    raw: bool,
    quote: char,
    triple: bool,
    fields: Vec<ReplacementField>,
}

impl FStringContext {
    pub(super) fn new(raw: bool, quote: char, triple: bool) -> Self {
        Self {
            raw,
            quote,
            triple,
            fields: Vec::new(),
        }
    }

    pub(super) fn is_raw(&self) -> bool {
        self.raw
    }

    pub(super) fn quote(&self) -> char {
        self.quote
    }

    pub(super) fn is_triple(&self) -> bool {
        self.triple
    }

    /// Whether the lexer is in text mode for this f-string: either in the
    /// literal body (no open field) or in the text of a format spec.
    pub(super) fn is_in_text(&self) -> bool {
        self.fields.last().map_or(true, |field| field.in_spec)
    }

    /// Whether any replacement field is open.
    pub(super) fn has_open_field(&self) -> bool {
        !self.fields.is_empty()
    }

    /// The interior nesting level of the innermost open field.
    pub(super) fn field_nesting(&self) -> Option<u32> {
        self.fields.last().map(|field| field.nesting)
    }

    /// Whether the innermost open field has entered its format spec.
    pub(super) fn field_in_spec(&self) -> bool {
        self.fields.last().is_some_and(|field| field.in_spec)
    }

    pub(super) fn open_field(&mut self, nesting: u32) {
        self.fields.push(ReplacementField {
            nesting,
            in_spec: false,
        });
    }

    pub(super) fn close_field(&mut self) {
        self.fields.pop();
    }

    pub(super) fn enter_spec(&mut self) {
        if let Some(field) = self.fields.last_mut() {
            field.in_spec = true;
        }
    }
}
