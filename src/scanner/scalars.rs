//! Flow scalar scanning: plain, single-quoted and double-quoted styles.
//!
//! Each reader consumes from the shared `CharReader` and pushes back whatever
//! belongs to the next token, so the dispatcher re-lexes indicators and line
//! breaks it did not own. Folding follows the same rule in every style: a
//! single interior break becomes a space, a run of N breaks becomes N-1
//! literal newlines.

use crate::error::{Reporter, ScanError};
use crate::source::{CharReader, EOF_CHAR};

/// Scan a plain (unquoted) scalar.
///
/// Terminators: EOF, a value indicator (`: ` or `:` at end of line), a
/// comment introduced by whitespace + `#`, or a line whose indent returns
/// control to the enclosing structure (indent <= `key_indent`). The
/// terminating indicator or break is pushed back for the dispatcher.
pub(crate) fn scan_plain<T: Iterator<Item = char>>(
    source: &mut CharReader<T>,
    key_indent: i32,
) -> String {
    let mut out = String::with_capacity(32);
    let mut pending = String::new();

    loop {
        let ch = source.read();
        match ch {
            EOF_CHAR => break,
            ':' => {
                if matches!(source.peek(), ' ' | '\t' | '\n' | EOF_CHAR) {
                    source.unread(':');
                    break;
                }
                flush(&mut out, &mut pending);
                out.push(':');
            }
            '#' if !pending.is_empty() => {
                source.unread('#');
                break;
            }
            ' ' | '\t' => pending.push(ch),
            '\n' => {
                let mut breaks = 1usize;
                let terminated = loop {
                    let mut spaces = 0usize;
                    while source.peek() == ' ' {
                        source.read();
                        spaces += 1;
                    }
                    match source.peek() {
                        '\n' => {
                            source.read();
                            breaks += 1;
                        }
                        EOF_CHAR => {
                            source.unread_n(' ', spaces);
                            source.unread('\n');
                            break true;
                        }
                        _ => {
                            if (source.indent() as i32) <= key_indent
                                || (spaces == 0 && super::at_document_marker(source))
                            {
                                source.unread_n(' ', spaces);
                                source.unread('\n');
                                break true;
                            }
                            break false;
                        }
                    }
                };
                if terminated {
                    break;
                }
                pending.clear();
                if breaks == 1 {
                    pending.push(' ');
                } else {
                    for _ in 1..breaks {
                        pending.push('\n');
                    }
                }
            }
            _ => {
                flush(&mut out, &mut pending);
                out.push(ch);
            }
        }
    }
    // Trailing whitespace stays in `pending` and is dropped here.
    out
}

/// Scan a single-quoted scalar; the opening quote is already consumed.
/// `''` is a literal quote.
pub(crate) fn scan_single_quoted<T: Iterator<Item = char>>(
    source: &mut CharReader<T>,
    reporter: &mut Reporter,
) -> Result<String, ScanError> {
    let mut out = String::with_capacity(32);
    loop {
        match source.read() {
            EOF_CHAR => {
                reporter.report(source.mark(), "unterminated single-quoted scalar")?;
                break;
            }
            '\'' => {
                if source.peek() == '\'' {
                    source.read();
                    out.push('\'');
                } else {
                    break;
                }
            }
            '\n' => fold_quoted(source, &mut out),
            ch => out.push(ch),
        }
    }
    Ok(out)
}

/// Scan a double-quoted scalar; the opening quote is already consumed.
pub(crate) fn scan_double_quoted<T: Iterator<Item = char>>(
    source: &mut CharReader<T>,
    reporter: &mut Reporter,
) -> Result<String, ScanError> {
    let mut out = String::with_capacity(32);
    loop {
        match source.read() {
            EOF_CHAR => {
                reporter.report(source.mark(), "unterminated double-quoted scalar")?;
                break;
            }
            '"' => break,
            '\\' => {
                if let Some(ch) = scan_escape(source, reporter)? {
                    out.push(ch);
                }
            }
            '\n' => fold_quoted(source, &mut out),
            ch => out.push(ch),
        }
    }
    Ok(out)
}

/// Fold an unescaped break inside a quoted scalar: trailing blanks before
/// the break are stripped, continuation-line leading whitespace is skipped,
/// one break becomes a space and N breaks become N-1 newlines.
fn fold_quoted<T: Iterator<Item = char>>(source: &mut CharReader<T>, out: &mut String) {
    while out.ends_with(' ') || out.ends_with('\t') {
        out.pop();
    }
    let mut breaks = 1usize;
    loop {
        while matches!(source.peek(), ' ' | '\t') {
            source.read();
        }
        if source.peek() == '\n' {
            source.read();
            breaks += 1;
        } else {
            break;
        }
    }
    if breaks == 1 {
        out.push(' ');
    } else {
        for _ in 1..breaks {
            out.push('\n');
        }
    }
}

/// Process one escape sequence after the backslash. Returns `None` when the
/// escape contributes nothing (line continuation, or a reported error).
fn scan_escape<T: Iterator<Item = char>>(
    source: &mut CharReader<T>,
    reporter: &mut Reporter,
) -> Result<Option<char>, ScanError> {
    let escape = source.read();
    let ch = match escape {
        '0' => '\0',
        'a' => '\x07',
        'b' => '\x08',
        't' => '\t',
        'n' => '\n',
        'v' => '\x0b',
        'f' => '\x0c',
        'r' => '\r',
        'e' => '\x1b',
        ' ' => ' ',
        '\t' => '\t',
        '"' => '"',
        '/' => '/',
        '\\' => '\\',
        'N' => '\u{0085}',
        '_' => '\u{00A0}',
        'L' => '\u{2028}',
        'P' => '\u{2029}',
        'x' => return scan_hex_escape(source, reporter, 2),
        'u' => return scan_hex_escape(source, reporter, 4),
        'U' => return scan_hex_escape(source, reporter, 8),
        '\n' => {
            // Escaped break: join the lines without a separator.
            while matches!(source.peek(), ' ' | '\t') {
                source.read();
            }
            return Ok(None);
        }
        EOF_CHAR => {
            reporter.report(source.mark(), "unterminated double-quoted scalar")?;
            return Ok(None);
        }
        other => {
            reporter.report(
                source.mark(),
                &format!("invalid escape sequence '\\{other}'"),
            )?;
            return Ok(None);
        }
    };
    Ok(Some(ch))
}

fn scan_hex_escape<T: Iterator<Item = char>>(
    source: &mut CharReader<T>,
    reporter: &mut Reporter,
    digits: u32,
) -> Result<Option<char>, ScanError> {
    let mut value = 0u32;
    for _ in 0..digits {
        let ch = source.read();
        match ch.to_digit(16) {
            Some(d) => value = value * 16 + d,
            None => {
                source.unread(ch);
                reporter.report(source.mark(), "invalid hex digit in escape sequence")?;
                return Ok(None);
            }
        }
    }
    match char::from_u32(value) {
        Some(ch) => Ok(Some(ch)),
        None => {
            reporter.report(
                source.mark(),
                &format!("invalid Unicode code point U+{value:04X}"),
            )?;
            Ok(None)
        }
    }
}

#[inline]
fn flush(out: &mut String, pending: &mut String) {
    if !pending.is_empty() {
        out.push_str(pending);
        pending.clear();
    }
}
