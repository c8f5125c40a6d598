use serde::{Deserialize, Serialize};

/// Reader configuration for customizable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderOptions {
    /// Skip input until a `---` document start, and between documents skip
    /// until the next `---`.
    pub ignore_text_outside_document_markers: bool,
    /// Permit content on the same line as a `---` document start marker.
    pub accept_content_on_start_document_line: bool,
    /// Treat multiple `---`-separated documents as one continuous document.
    pub merge_documents: bool,
    /// Raise the first diagnostic instead of accumulating.
    pub throw_on_error: bool,
}

impl Default for ReaderOptions {
    #[inline]
    fn default() -> Self {
        Self {
            ignore_text_outside_document_markers: false,
            accept_content_on_start_document_line: false,
            merge_documents: false,
            throw_on_error: true,
        }
    }
}
