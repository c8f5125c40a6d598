//! The indentation-driven event parser.
//!
//! Tokens come in on demand from the scanner; JSON-structural events go out
//! through a small FIFO, because a single lookahead decision can emit up to
//! three events (an owed empty value, a container close, the next key). The
//! open containers live on a frame stack keyed by the indent of the owner
//! that introduced each one; dedents pop frames until the target indent is
//! reached again.

use crate::error::{Marker, ScanError};
use crate::events::{Event, EventReceiver};
use crate::options::ReaderOptions;
use crate::scanner::{Scanner, TokenKind};
use smallvec::SmallVec;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Mapping,
    Sequence,
}

/// An open container and the indent of the key or `-` that owns it. The
/// synthetic root sits at indent -1 and is never on the stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: FrameKind,
    enclosing_indent: i32,
}

/// What the last enqueued event was, for the `expecting_key` decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastEvent {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName,
    String,
    End,
}

fn last_event_of(ev: &Event) -> LastEvent {
    match ev {
        Event::StartObject => LastEvent::StartObject,
        Event::EndObject => LastEvent::EndObject,
        Event::StartArray => LastEvent::StartArray,
        Event::EndArray => LastEvent::EndArray,
        Event::PropertyName(_) => LastEvent::PropertyName,
        Event::String(_) => LastEvent::String,
        Event::End => LastEvent::End,
    }
}

/// Pull parser producing JSON-structural events from YAML tokens.
pub struct Parser<T: Iterator<Item = char>> {
    scanner: Scanner<T>,
    options: ReaderOptions,
    stack: SmallVec<[Frame; 8]>,
    /// Indent at which the current container's members start; -1 at the root.
    current_indent: i32,
    queue: VecDeque<Event>,
    last: Option<LastEvent>,
    finished: bool,
}

impl<T: Iterator<Item = char>> Parser<T> {
    #[inline]
    pub fn new(source: T) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    pub fn with_options(source: T, options: ReaderOptions) -> Self {
        Self {
            scanner: Scanner::with_options(source, options),
            options,
            stack: SmallVec::new(),
            current_indent: -1,
            queue: VecDeque::new(),
            last: None,
            finished: false,
        }
    }

    /// Get current position marker.
    #[inline]
    pub fn mark(&self) -> Marker {
        self.scanner.mark()
    }

    /// Whether any diagnostic has been recorded (accumulating mode only).
    #[inline]
    pub fn error_occurred(&self) -> bool {
        self.scanner.reporter().error_occurred()
    }

    /// Diagnostics recorded so far, in occurrence order.
    #[inline]
    pub fn errors(&self) -> &[ScanError] {
        self.scanner.reporter().errors()
    }

    /// Produce the next event. After `End` has been returned it is returned
    /// again on every further call.
    pub fn next_event(&mut self) -> Result<Event, ScanError> {
        loop {
            if let Some(ev) = self.queue.pop_front() {
                return Ok(ev);
            }
            if self.finished {
                return Ok(Event::End);
            }
            self.step()?;
        }
    }

    /// Drive the whole stream into a receiver, ending after `End`.
    pub fn load<R: EventReceiver>(&mut self, receiver: &mut R) -> Result<(), ScanError> {
        loop {
            let ev = self.next_event()?;
            let done = ev == Event::End;
            receiver.on_event(ev);
            if done {
                return Ok(());
            }
        }
    }

    /// Consume tokens until at least one event is enqueued or the stream is
    /// finished. Every path through here consumes a token or enqueues an
    /// event, so the parser cannot stall.
    fn step(&mut self) -> Result<(), ScanError> {
        let token = self.scanner.peek_token()?.clone();
        log::trace!(
            "dispatch {} indent={} current={}",
            token.kind.type_name(),
            token.indent,
            self.current_indent
        );
        match token.kind {
            TokenKind::Directive(_) | TokenKind::Tag(_) => self.scanner.skip(),

            TokenKind::DocumentStart => {
                if !self.options.merge_documents && self.last.is_some() {
                    self.finish()?;
                }
                self.scanner.skip();
            }

            TokenKind::DocumentEnd => {
                if !self.options.merge_documents {
                    self.finish()?;
                }
                self.scanner.skip();
            }

            TokenKind::StreamEnd => self.finish()?,

            TokenKind::NewLine => {
                let indent = token.indent;
                self.scanner.skip();
                let next = self.scanner.peek_token()?;
                if matches!(
                    next.kind,
                    TokenKind::NewLine | TokenKind::DocumentEnd | TokenKind::StreamEnd
                ) {
                    // Blank line.
                    return Ok(());
                }
                let next_is_entry = matches!(next.kind, TokenKind::SequenceEntry);
                if indent < self.current_indent {
                    self.close_to_indent(indent)?;
                }
                if let Some(&top) = self.stack.last() {
                    // A sequence member line must start with `-`; its absence
                    // at the sequence's own indent means the sequence ended.
                    if top.kind == FrameKind::Sequence
                        && indent == top.enclosing_indent
                        && !next_is_entry
                    {
                        self.stack.pop();
                        self.enqueue(Event::EndArray);
                        self.current_indent = top.enclosing_indent;
                    }
                }
            }

            TokenKind::Value => {
                // In a value slot the indicator is the colon of an explicit
                // `? key` form; it has nothing left to emit.
                if self.expecting_key() || token.indent > self.current_indent {
                    self.enqueue_key(token.indent, String::new())?;
                }
                self.scanner.skip();
            }

            TokenKind::Key => {
                if token.indent > self.current_indent {
                    // The `?` opens a mapping; redispatch so the key follows.
                    self.push_frame(FrameKind::Mapping, token.indent, Event::StartObject);
                } else if matches!(self.stack.last(), Some(f) if f.kind == FrameKind::Sequence) {
                    self.report("unexpected '?' inside a sequence")?;
                    self.scanner.skip();
                } else if !self.expecting_key() {
                    // A `?` in a value slot: the owed value is empty.
                    self.enqueue(Event::String(String::new()));
                } else {
                    self.scanner.skip();
                    let next = self.scanner.peek_token()?.clone();
                    if let TokenKind::Scalar(value) = next.kind {
                        self.enqueue(Event::PropertyName(value));
                        self.scanner.skip();
                        let follow = self.scanner.peek_token()?;
                        if !matches!(follow.kind, TokenKind::Value | TokenKind::NewLine) {
                            self.report("missing ':' after explicit key")?;
                        }
                    } else {
                        self.report("expected a scalar after '?'")?;
                    }
                }
            }

            TokenKind::Scalar(value) => {
                let indent = token.indent;
                self.scanner.skip();
                if matches!(self.scanner.peek_token()?.kind, TokenKind::Value) {
                    self.enqueue_key(indent, value)?;
                    self.scanner.skip();
                } else {
                    if self.expecting_key() {
                        self.report("expected a key")?;
                        self.enqueue_key(indent, String::new())?;
                    }
                    self.enqueue(Event::String(value));
                }
            }

            TokenKind::SequenceEntry => {
                let continues = matches!(self.stack.last(), Some(f) if f.kind == FrameKind::Sequence)
                    && token.indent == self.current_indent;
                if continues {
                    // Next item of the open sequence.
                } else if token.indent >= self.current_indent {
                    self.push_frame(FrameKind::Sequence, token.indent, Event::StartArray);
                } else {
                    self.report("unexpected '-'")?;
                }
                self.scanner.skip();
            }
        }
        Ok(())
    }

    /// True when the innermost frame is a mapping and the last event completed
    /// a value (or opened the mapping), so a `PropertyName` must come next.
    fn expecting_key(&self) -> bool {
        matches!(self.stack.last(), Some(f) if f.kind == FrameKind::Mapping)
            && matches!(
                self.last,
                Some(
                    LastEvent::StartObject
                        | LastEvent::EndObject
                        | LastEvent::EndArray
                        | LastEvent::String
                )
            )
    }

    /// Emit a key at `indent`, opening a nested mapping when the indent is
    /// deeper than the current member column, or completing an owed empty
    /// value at the same column.
    fn enqueue_key(&mut self, indent: i32, name: String) -> Result<(), ScanError> {
        if indent > self.current_indent {
            self.push_frame(FrameKind::Mapping, indent, Event::StartObject);
            self.enqueue(Event::PropertyName(name));
        } else if indent == self.current_indent {
            if !self.expecting_key() {
                self.enqueue(Event::String(String::new()));
            }
            self.enqueue(Event::PropertyName(name));
        } else {
            // Dedents are closed before keys are enqueued, so this indicates
            // a slip in the close bookkeeping; recover with the key anyway.
            self.report("key is indented left of its enclosing mapping")?;
            self.enqueue(Event::PropertyName(name));
        }
        Ok(())
    }

    fn push_frame(&mut self, kind: FrameKind, indent: i32, opening: Event) {
        log::trace!("open {kind:?} owner={} members={indent}", self.current_indent);
        self.stack.push(Frame {
            kind,
            enclosing_indent: self.current_indent,
        });
        self.enqueue(opening);
        self.current_indent = indent;
    }

    /// Pop and close every frame whose owner sits at or beyond `target`,
    /// synthesizing the empty value a mapping is still owed. Restores
    /// `current_indent` from each popped frame.
    fn close_to_indent(&mut self, target: i32) -> Result<(), ScanError> {
        while let Some(&top) = self.stack.last() {
            if top.enclosing_indent < target {
                break;
            }
            if top.kind == FrameKind::Mapping && !self.expecting_key() {
                self.enqueue(Event::String(String::new()));
            }
            self.stack.pop();
            self.enqueue(match top.kind {
                FrameKind::Mapping => Event::EndObject,
                FrameKind::Sequence => Event::EndArray,
            });
            self.current_indent = top.enclosing_indent;
        }
        if self.current_indent != target {
            self.report("indentation does not match any open collection")?;
            self.current_indent = target;
        }
        Ok(())
    }

    /// Close everything and emit the terminal `End`.
    fn finish(&mut self) -> Result<(), ScanError> {
        self.close_to_indent(-1)?;
        self.enqueue(Event::End);
        self.finished = true;
        Ok(())
    }

    fn enqueue(&mut self, ev: Event) {
        log::trace!("emit {ev:?}");
        self.last = Some(last_event_of(&ev));
        self.queue.push_back(ev);
    }

    fn report(&mut self, info: &str) -> Result<(), ScanError> {
        let mark = self.scanner.mark();
        self.scanner.reporter_mut().report(mark, info)
    }
}
