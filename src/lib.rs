//! A streaming parser converting a restricted YAML subset into
//! JSON-structural events: block mappings & sequences, plain/quoted/block
//! scalars, document markers, comments, with indentation-driven structure.
//!
//! # Example
//! ```rust
//! use yaml_events::{Event, EventLoader};
//!
//! let events = EventLoader::load_from_str("foo: bar").unwrap();
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::StartObject,
//!         Event::PropertyName("foo".to_string()),
//!         Event::String("bar".to_string()),
//!         Event::EndObject,
//!         Event::End,
//!     ]
//! );
//! ```
//!
//! All scalars are strings; anchors, aliases and flow collections are out of
//! scope, and tags are lexed but ignored.

mod error;
mod events;
mod loader;
mod options;
mod parser;
mod scanner;
mod source;

pub use error::{Marker, ScanError};
pub use events::{Event, EventReceiver};
pub use loader::EventLoader;
pub use options::ReaderOptions;
pub use parser::Parser;
pub use scanner::{Scanner, Token, TokenKind};
pub use source::{CharReader, EOF_CHAR};
