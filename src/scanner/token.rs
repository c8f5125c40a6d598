//! Token definitions for the restricted YAML grammar.

/// A token with its kind and the indent it was produced at.
///
/// `indent` is the line's leading-space count captured when the token began.
/// For tokens produced after `:` or `-` the scanner has already adjusted the
/// line indent to the column of the following content, so the parser sees
/// nested collections at the column they actually start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub indent: i32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, indent: i32) -> Self {
        Self { kind, indent }
    }
}

/// Every token the scanner can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A line break, carrying the following line's indent.
    NewLine,
    /// A `%` directive line (only between documents).
    Directive(String),
    /// Scalar content in any style, already unescaped and folded.
    Scalar(String),
    /// `?` explicit key indicator.
    Key,
    /// `:` value indicator.
    Value,
    /// `-` block sequence entry.
    SequenceEntry,
    /// `!...` node tag (lexed, ignored by the parser).
    Tag(String),
    /// `---`
    DocumentStart,
    /// `...`
    DocumentEnd,
    /// End of input.
    StreamEnd,
}

impl TokenKind {
    /// Whether this token carries document content, as opposed to structure
    /// of the stream itself.
    #[inline]
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            TokenKind::Scalar(_)
                | TokenKind::Key
                | TokenKind::Value
                | TokenKind::SequenceEntry
                | TokenKind::Tag(_)
        )
    }

    /// Display name used in trace output.
    pub fn type_name(&self) -> &'static str {
        match self {
            TokenKind::NewLine => "new-line",
            TokenKind::Directive(_) => "directive",
            TokenKind::Scalar(_) => "scalar",
            TokenKind::Key => "key",
            TokenKind::Value => "value",
            TokenKind::SequenceEntry => "sequence-entry",
            TokenKind::Tag(_) => "tag",
            TokenKind::DocumentStart => "document-start",
            TokenKind::DocumentEnd => "document-end",
            TokenKind::StreamEnd => "stream-end",
        }
    }
}
