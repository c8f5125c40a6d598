use serde::{Deserialize, Serialize};

/// Structural signals emitted by the event parser.
///
/// A stream of these describes a JSON-equivalent document: objects and arrays
/// open and close in balanced pairs, `PropertyName`/value pairs alternate
/// inside objects, and the stream finishes with exactly one `End`.
#[derive(Clone, PartialEq, Debug, Eq, Serialize, Deserialize)]
pub enum Event {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName(String),
    String(String),
    End,
}

/// A trait for receiving parser events. `EventLoader` is the receiver that
/// collects the full stream into a `Vec<Event>`.
pub trait EventReceiver {
    fn on_event(&mut self, ev: Event);
}
