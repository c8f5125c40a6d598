use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The scanning position for error reporting.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Absolute character index from the start of input.
    pub index: usize,
    /// Line number (0-based).
    pub line: usize,
    /// Column number (0-based).
    pub col: usize,
}

impl Marker {
    #[inline]
    pub const fn new(index: usize, line: usize, col: usize) -> Self {
        Self { index, line, col }
    }
}

impl Default for Marker {
    #[inline]
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// A diagnostic produced by the scanner or the event parser.
///
/// Display renders the column 1-based, the line 0-based.
#[derive(Clone, PartialEq, Debug, Eq, Error, Serialize, Deserialize)]
#[error("YAML({},{}): {}", .mark.line, .mark.col + 1, .info)]
pub struct ScanError {
    pub mark: Marker,
    pub info: String,
}

impl ScanError {
    pub fn new(mark: Marker, info: &str) -> Self {
        ScanError {
            mark,
            info: info.to_owned(),
        }
    }
}

/// The single diagnostic channel shared by the scanner and the parser.
///
/// With `throw_on_error` the first report is returned as `Err` and aborts the
/// pipeline; otherwise diagnostics accumulate in occurrence order and the
/// caller inspects them after parsing.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<ScanError>,
    throw_on_error: bool,
}

impl Reporter {
    #[inline]
    pub fn new(throw_on_error: bool) -> Self {
        Self {
            diagnostics: Vec::new(),
            throw_on_error,
        }
    }

    /// Record a diagnostic, or raise it when configured to throw.
    pub fn report(&mut self, mark: Marker, info: &str) -> Result<(), ScanError> {
        let err = ScanError::new(mark, info);
        log::debug!("diagnostic: {err}");
        if self.throw_on_error {
            return Err(err);
        }
        self.diagnostics.push(err);
        Ok(())
    }

    #[inline]
    pub fn error_occurred(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    #[inline]
    pub fn errors(&self) -> &[ScanError] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_one_based_column() {
        let err = ScanError::new(
            Marker::new(12, 3, 0),
            "tab characters must not be used for indentation",
        );
        assert_eq!(
            err.to_string(),
            "YAML(3,1): tab characters must not be used for indentation"
        );
    }

    #[test]
    fn reporter_accumulates_when_not_throwing() {
        let mut reporter = Reporter::new(false);
        reporter.report(Marker::default(), "first").unwrap();
        reporter.report(Marker::new(5, 1, 2), "second").unwrap();
        assert!(reporter.error_occurred());
        assert_eq!(reporter.errors().len(), 2);
        assert_eq!(reporter.errors()[0].info, "first");
    }

    #[test]
    fn reporter_raises_when_throwing() {
        let mut reporter = Reporter::new(true);
        let err = reporter.report(Marker::default(), "boom").unwrap_err();
        assert_eq!(err.info, "boom");
        assert!(!reporter.error_occurred());
    }
}
