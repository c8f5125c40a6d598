//! Token recognition for the restricted YAML grammar.
//!
//! The scanner owns the character reader and produces one token at a time on
//! demand, with a single-token cache behind `peek_token`/`skip`. Indentation
//! is whatever the reader accumulated for the current line, with one twist:
//! after `:` and `-` the line indent is moved to the column of the following
//! content, so a nested collection can start on the same line as the
//! indicator that introduced it.

pub(crate) mod block;
pub(crate) mod scalars;
pub mod token;

pub use token::{Token, TokenKind};

use crate::error::{Marker, Reporter, ScanError};
use crate::options::ReaderOptions;
use crate::source::{CharReader, EOF_CHAR};

/// Where the scanner sits relative to document markers. Directives are only
/// recognized between documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    BetweenDocs,
    InDoc,
}

/// Streaming tokenizer over a normalized character reader.
pub struct Scanner<T: Iterator<Item = char>> {
    source: CharReader<T>,
    options: ReaderOptions,
    reporter: Reporter,
    cached: Option<Token>,
    mode: Mode,
    /// Indent of the line that carried the most recent `:` or `-`. The plain
    /// scalar reader stops when a continuation line does not clear this.
    key_indent: i32,
}

impl<T: Iterator<Item = char>> Scanner<T> {
    #[inline]
    pub fn new(source: T) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: T, options: ReaderOptions) -> Self {
        Self {
            source: CharReader::new(source),
            options,
            reporter: Reporter::new(options.throw_on_error),
            cached: None,
            mode: Mode::BetweenDocs,
            key_indent: -1,
        }
    }

    /// Get current position marker.
    #[inline]
    pub fn mark(&self) -> Marker {
        self.source.mark()
    }

    #[inline]
    pub(crate) fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    #[inline]
    pub(crate) fn reporter_mut(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    /// Peek at the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<&Token, ScanError> {
        if self.cached.is_none() {
            let token = self.fetch()?;
            log::trace!("token {} at indent {}", token.kind.type_name(), token.indent);
            if token.kind.is_content() {
                self.mode = Mode::InDoc;
            }
            self.cached = Some(token);
        }
        self.cached
            .as_ref()
            .ok_or_else(|| ScanError::new(self.source.mark(), "internal error: no cached token"))
    }

    /// Consume the current token.
    #[inline]
    pub fn skip(&mut self) {
        self.cached = None;
    }

    /// Recognize the next token. Always advances past at least one character
    /// per reported error, so scanning cannot stall.
    fn fetch(&mut self) -> Result<Token, ScanError> {
        loop {
            if self.mode == Mode::BetweenDocs && self.options.ignore_text_outside_document_markers
            {
                self.skip_outside_document();
            }
            match self.source.peek() {
                EOF_CHAR => {
                    return Ok(Token::new(TokenKind::StreamEnd, self.source.indent() as i32));
                }
                '\t' if self.source.at_indent() => {
                    self.reporter.report(
                        self.source.mark(),
                        "tab characters must not be used for indentation",
                    )?;
                    self.source.read();
                }
                ' ' | '\t' => {
                    self.source.read();
                }
                '\n' => {
                    self.source.read();
                    while self.source.peek() == ' ' {
                        self.source.read();
                    }
                    return Ok(Token::new(TokenKind::NewLine, self.source.indent() as i32));
                }
                '#' => self.skip_comment(),
                '.' if self.source.position() == 0 => {
                    if let Some(token) = self.scan_document_end()? {
                        return Ok(token);
                    }
                    return Ok(self.scan_plain());
                }
                '-' => {
                    if self.source.position() == 0 {
                        if let Some(token) = self.scan_document_start() {
                            return Ok(token);
                        }
                    }
                    if let Some(token) = self.scan_sequence_entry() {
                        return Ok(token);
                    }
                    return Ok(self.scan_plain());
                }
                '%' if self.mode == Mode::BetweenDocs => return Ok(self.scan_directive()),
                '\'' => {
                    let indent = self.source.indent() as i32;
                    self.source.read();
                    let value = scalars::scan_single_quoted(&mut self.source, &mut self.reporter)?;
                    return Ok(Token::new(TokenKind::Scalar(value), indent));
                }
                '"' => {
                    let indent = self.source.indent() as i32;
                    self.source.read();
                    let value = scalars::scan_double_quoted(&mut self.source, &mut self.reporter)?;
                    return Ok(Token::new(TokenKind::Scalar(value), indent));
                }
                '|' => return self.scan_block_scalar(false),
                '>' => return self.scan_block_scalar(true),
                '?' => {
                    if let Some(token) = self.scan_key_indicator() {
                        return Ok(token);
                    }
                    return Ok(self.scan_plain());
                }
                ':' => {
                    if let Some(token) = self.scan_value_indicator() {
                        return Ok(token);
                    }
                    return Ok(self.scan_plain());
                }
                '!' => return Ok(self.scan_tag()),
                _ => return Ok(self.scan_plain()),
            }
        }
    }

    fn scan_plain(&mut self) -> Token {
        let indent = self.source.indent() as i32;
        let value = scalars::scan_plain(&mut self.source, self.key_indent);
        Token::new(TokenKind::Scalar(value), indent)
    }

    fn scan_block_scalar(&mut self, folded: bool) -> Result<Token, ScanError> {
        let indent = self.source.indent() as i32;
        self.source.read(); // '|' or '>'
        let value = block::scan_block(&mut self.source, &mut self.reporter, self.key_indent, folded)?;
        Ok(Token::new(TokenKind::Scalar(value), indent))
    }

    /// `: ` or `:` at end of line. Records the key's line indent and moves the
    /// reader's indent to the column after the indicator.
    fn scan_value_indicator(&mut self) -> Option<Token> {
        let indent = self.source.indent() as i32;
        self.source.read(); // ':'
        if !matches!(self.source.peek(), ' ' | '\t' | '\n' | EOF_CHAR) {
            self.source.unread(':');
            return None;
        }
        self.key_indent = indent;
        self.skip_inline_whitespace();
        self.source.set_indent_here();
        Some(Token::new(TokenKind::Value, indent))
    }

    /// `- ` or `-` at end of line, with the same indent adjustment as `:`.
    fn scan_sequence_entry(&mut self) -> Option<Token> {
        let indent = self.source.indent() as i32;
        self.source.read(); // '-'
        if !matches!(self.source.peek(), ' ' | '\t' | '\n' | EOF_CHAR) {
            self.source.unread('-');
            return None;
        }
        self.key_indent = indent;
        self.skip_inline_whitespace();
        self.source.set_indent_here();
        Some(Token::new(TokenKind::SequenceEntry, indent))
    }

    /// `? ` explicit key indicator.
    fn scan_key_indicator(&mut self) -> Option<Token> {
        let indent = self.source.indent() as i32;
        self.source.read(); // '?'
        if !matches!(self.source.peek(), ' ' | '\t' | '\n' | EOF_CHAR) {
            self.source.unread('?');
            return None;
        }
        self.skip_inline_whitespace();
        Some(Token::new(TokenKind::Key, indent))
    }

    /// `---` at column 0, followed by a break or EOF, or by inline content
    /// when the options permit it (the content is then treated as column-0
    /// content of the new document).
    fn scan_document_start(&mut self) -> Option<Token> {
        let indent = self.source.indent() as i32;
        let c1 = self.source.read();
        let c2 = self.source.read();
        let c3 = self.source.read();
        if (c1, c2, c3) == ('-', '-', '-') {
            match self.source.peek() {
                '\n' | EOF_CHAR => {
                    self.mode = Mode::InDoc;
                    return Some(Token::new(TokenKind::DocumentStart, indent));
                }
                ' ' | '\t' if self.options.accept_content_on_start_document_line => {
                    self.skip_inline_whitespace();
                    self.source.rebase();
                    self.mode = Mode::InDoc;
                    return Some(Token::new(TokenKind::DocumentStart, indent));
                }
                _ => {}
            }
        }
        self.source.unread(c3);
        self.source.unread(c2);
        self.source.unread(c1);
        None
    }

    /// `...` at column 0. Anything but whitespace or a comment on the rest of
    /// the line is reported.
    fn scan_document_end(&mut self) -> Result<Option<Token>, ScanError> {
        let indent = self.source.indent() as i32;
        let c1 = self.source.read();
        let c2 = self.source.read();
        let c3 = self.source.read();
        if (c1, c2, c3) == ('.', '.', '.') {
            match self.source.peek() {
                '\n' | EOF_CHAR => {
                    self.mode = Mode::BetweenDocs;
                    return Ok(Some(Token::new(TokenKind::DocumentEnd, indent)));
                }
                ' ' | '\t' => {
                    self.skip_inline_whitespace();
                    match self.source.peek() {
                        '\n' | EOF_CHAR => {}
                        '#' => self.skip_comment(),
                        _ => {
                            self.reporter.report(
                                self.source.mark(),
                                "unexpected text after document end marker",
                            )?;
                            self.skip_comment();
                        }
                    }
                    self.mode = Mode::BetweenDocs;
                    return Ok(Some(Token::new(TokenKind::DocumentEnd, indent)));
                }
                _ => {}
            }
        }
        self.source.unread(c3);
        self.source.unread(c2);
        self.source.unread(c1);
        Ok(None)
    }

    /// `%` directive line, recognized between documents only.
    fn scan_directive(&mut self) -> Token {
        let indent = self.source.indent() as i32;
        self.source.read(); // '%'
        let mut text = String::new();
        while !matches!(self.source.peek(), '\n' | '#' | EOF_CHAR) {
            text.push(self.source.read());
        }
        text.truncate(text.trim_end().len());
        Token::new(TokenKind::Directive(text), indent)
    }

    /// `!...` node tag. Lexed so the parser can discard it.
    fn scan_tag(&mut self) -> Token {
        let indent = self.source.indent() as i32;
        let mut text = String::new();
        text.push(self.source.read()); // '!'
        while !matches!(self.source.peek(), ' ' | '\t' | '\n' | EOF_CHAR) {
            text.push(self.source.read());
        }
        Token::new(TokenKind::Tag(text), indent)
    }

    /// Consume everything up to (not including) the next line break.
    fn skip_comment(&mut self) {
        while !matches!(self.source.peek(), '\n' | EOF_CHAR) {
            self.source.read();
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.source.peek(), ' ' | '\t') {
            self.source.read();
        }
    }

    /// With `ignore_text_outside_document_markers`, drop input line by line
    /// until a `---` document start line (or EOF).
    fn skip_outside_document(&mut self) {
        loop {
            match self.source.peek() {
                EOF_CHAR => return,
                '\n' => {
                    self.source.read();
                }
                '-' if self.source.position() == 0 && self.looks_at_document_start() => return,
                _ => {
                    while !matches!(self.source.peek(), '\n' | EOF_CHAR) {
                        self.source.read();
                    }
                }
            }
        }
    }

    fn looks_at_document_start(&mut self) -> bool {
        let c1 = self.source.read();
        let c2 = self.source.read();
        let c3 = self.source.read();
        let mut is_start = false;
        if (c1, c2, c3) == ('-', '-', '-') {
            is_start = match self.source.peek() {
                '\n' | EOF_CHAR => true,
                ' ' | '\t' => self.options.accept_content_on_start_document_line,
                _ => false,
            };
        }
        self.source.unread(c3);
        self.source.unread(c2);
        self.source.unread(c1);
        is_start
    }
}

/// Check for a `---` or `...` line without consuming anything. Used by the
/// scalar readers to stop at a document boundary mid-scalar.
pub(crate) fn at_document_marker<T: Iterator<Item = char>>(source: &mut CharReader<T>) -> bool {
    let c1 = source.read();
    if c1 != '-' && c1 != '.' {
        source.unread(c1);
        return false;
    }
    let c2 = source.read();
    let c3 = source.read();
    let mut is_marker = false;
    if c2 == c1 && c3 == c1 {
        is_marker = matches!(source.peek(), '\n' | EOF_CHAR | ' ' | '\t');
    }
    source.unread(c3);
    source.unread(c2);
    source.unread(c1);
    is_marker
}
