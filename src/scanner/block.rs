//! Block scalar scanning (`|` literal and `>` folded styles).
//!
//! The header indicator is consumed by the dispatcher; this module parses the
//! optional explicit indent digit and chomping indicator, resolves the base
//! indentation, and joins the body lines according to the style.

use crate::error::{Reporter, ScanError};
use crate::source::{CharReader, EOF_CHAR};

/// Trailing-break policy from the block scalar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    /// `-`: no trailing break.
    Strip,
    /// default: exactly one trailing break when the body had one.
    Clip,
    /// `+`: every trailing break is kept.
    Keep,
}

/// Scan a block scalar body. `folded` selects `>` semantics, otherwise `|`.
///
/// The base indent is `key_indent` + the explicit digit when one is given
/// (the digit alone at the root), or the first non-empty line's indent. Lines
/// belong to the scalar while their indent is at least the base; a dedented
/// line or a column-0 document marker ends it, with the line's spaces and
/// break pushed back for the dispatcher.
pub(crate) fn scan_block<T: Iterator<Item = char>>(
    source: &mut CharReader<T>,
    reporter: &mut Reporter,
    key_indent: i32,
    folded: bool,
) -> Result<String, ScanError> {
    let (chomping, explicit) = scan_header(source, reporter)?;

    if source.peek() == EOF_CHAR {
        return Ok(String::new());
    }
    source.read(); // the break ending the header line

    let mut base: Option<usize> = explicit.map(|digit| {
        if key_indent < 0 {
            digit
        } else {
            key_indent as usize + digit
        }
    });

    let mut out = String::with_capacity(128);
    let mut pending = 0usize; // breaks owed before the next content line
    let mut started = false;
    let mut prev_more_indented = false;
    let mut max_blank_indent = 0usize;

    loop {
        // Consume this line's indentation, up to the base once it is known.
        let mut stripped = 0usize;
        loop {
            if let Some(b) = base {
                if stripped >= b {
                    break;
                }
            }
            if source.peek() == ' ' {
                source.read();
                stripped += 1;
            } else {
                break;
            }
        }

        match source.peek() {
            EOF_CHAR => break,
            '\n' => {
                // Blank line (possibly with fewer spaces than the base).
                source.read();
                pending += 1;
                if base.is_none() && stripped > max_blank_indent {
                    max_blank_indent = stripped;
                }
                continue;
            }
            _ => {}
        }

        if source.position() == 0 && super::at_document_marker(source) {
            source.unread('\n');
            break;
        }

        match base {
            None => {
                if (stripped as i32) <= key_indent {
                    // First non-empty line sits outside the scalar: empty body.
                    source.unread_n(' ', stripped);
                    source.unread('\n');
                    break;
                }
                base = Some(stripped);
                if max_blank_indent > stripped {
                    reporter.report(
                        source.mark(),
                        "a blank line in a block scalar is more indented than the first content line",
                    )?;
                }
            }
            Some(b) => {
                if stripped < b {
                    // Dedented line ends the scalar.
                    source.unread_n(' ', stripped);
                    source.unread('\n');
                    break;
                }
            }
        }

        let more_indented = matches!(source.peek(), ' ' | '\t');
        let mut line = String::new();
        while !matches!(source.peek(), '\n' | EOF_CHAR) {
            line.push(source.read());
        }

        if line.chars().all(|c| c == ' ' || c == '\t') {
            // An all-space line counts as blank; the extra spaces are dropped.
            if source.peek() == '\n' {
                source.read();
                pending += 1;
                continue;
            }
            break;
        }

        if !started || !folded || more_indented || prev_more_indented {
            for _ in 0..pending {
                out.push('\n');
            }
        } else if pending == 1 {
            out.push(' ');
        } else {
            for _ in 1..pending {
                out.push('\n');
            }
        }
        pending = 0;
        out.push_str(&line);
        started = true;
        prev_more_indented = more_indented;

        if source.peek() == '\n' {
            source.read();
            pending = 1;
        }
    }

    match chomping {
        Chomping::Strip => {}
        Chomping::Clip => {
            if started && pending > 0 {
                out.push('\n');
            }
        }
        Chomping::Keep => {
            for _ in 0..pending {
                out.push('\n');
            }
        }
    }

    Ok(out)
}

/// Parse the header after `|` or `>`: an optional indent digit 1-9 and an
/// optional chomping indicator, in either order, then whitespace and an
/// optional comment to end of line.
fn scan_header<T: Iterator<Item = char>>(
    source: &mut CharReader<T>,
    reporter: &mut Reporter,
) -> Result<(Chomping, Option<usize>), ScanError> {
    let mut chomping = Chomping::Clip;
    let mut explicit = None;

    for _ in 0..2 {
        match source.peek() {
            '+' => {
                source.read();
                chomping = Chomping::Keep;
            }
            '-' => {
                source.read();
                chomping = Chomping::Strip;
            }
            ch @ '1'..='9' => {
                source.read();
                explicit = Some(ch as usize - '0' as usize);
            }
            _ => break,
        }
    }

    loop {
        match source.peek() {
            ' ' | '\t' => {
                source.read();
            }
            '#' => {
                while !matches!(source.peek(), '\n' | EOF_CHAR) {
                    source.read();
                }
            }
            '\n' | EOF_CHAR => break,
            _ => {
                reporter.report(source.mark(), "unexpected character after block scalar header")?;
                while !matches!(source.peek(), '\n' | EOF_CHAR) {
                    source.read();
                }
            }
        }
    }

    Ok((chomping, explicit))
}
