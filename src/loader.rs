use crate::error::ScanError;
use crate::events::{Event, EventReceiver};
use crate::options::ReaderOptions;
use crate::parser::Parser;

/// Our main "public" API: load from a string → produce the full event stream.
///
/// This is the reference sink; any other `EventReceiver` can assemble the
/// same events into a tree or stream them onward.
#[derive(Debug, Default)]
pub struct EventLoader {
    events: Vec<Event>,
}

impl EventReceiver for EventLoader {
    #[inline]
    fn on_event(&mut self, ev: Event) {
        self.events.push(ev);
    }
}

impl EventLoader {
    pub fn load_from_str(source: &str) -> Result<Vec<Event>, ScanError> {
        Self::load_from_str_with(source, ReaderOptions::default())
    }

    pub fn load_from_str_with(
        source: &str,
        options: ReaderOptions,
    ) -> Result<Vec<Event>, ScanError> {
        let mut parser = Parser::with_options(source.chars(), options);
        let mut loader = EventLoader::default();
        parser.load(&mut loader)?;
        Ok(loader.events)
    }
}
