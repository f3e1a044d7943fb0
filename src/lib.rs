//! # jsonflow
//!
//! A reactive, non-blocking streaming JSON codec: an event-based parser that
//! never blocks on I/O (you feed it bytes through a [`feeder::JsonFeeder`]
//! and pull [`JsonEvent`]s back out), a pluggable [`actions::SemanticActions`]
//! sink that turns those events into a [`value::Value`] tree, a
//! [`generator`] that serializes a tree back to JSON text, a
//! [`unicode`] transcoding layer for sources that aren't already UTF-8, and a
//! [`transport::Rendezvous`] channel for feeding the parser from a producer
//! thread.
//!
//! ## Examples
//!
//! ### Push-based parsing
//!
//! Push-based parsing is the most flexible way of using jsonflow. Push new
//! bytes into a [`PushJsonFeeder`](crate::feeder::PushJsonFeeder) and then let
//! the parser consume them until it returns [`JsonEvent::NeedMoreInput`].
//! Repeat this process until you receive [`JsonEvent::Eof`] or an `Err`.
//!
//! This approach is very low-level but gives you the freedom to provide new
//! bytes to the parser whenever they are available and to generate new JSON
//! events whenever you need them.
//!
//! ```
//! use jsonflow::{JsonParser, JsonEvent};
//! use jsonflow::feeder::{PushJsonFeeder, JsonFeeder};
//!
//! let json = r#"{"name": "Elvis"}"#.as_bytes();
//!
//! let mut feeder = PushJsonFeeder::new();
//! let mut parser = JsonParser::new(feeder);
//! let mut i: usize = 0;
//! loop {
//!     // feed as many bytes as possible to the parser
//!     let mut event = parser.next_event().unwrap();
//!     while event == Some(JsonEvent::NeedMoreInput) {
//!         i += parser.feeder.push_bytes(&json[i..]);
//!         if i == json.len() {
//!             parser.feeder.done();
//!         }
//!         event = parser.next_event().unwrap();
//!     }
//!
//!     // do something useful with `event`
//!     // match event {
//!     //     ...
//!     // }
//!
//!     if event.is_none() {
//!         break;
//!     }
//!     if event == Some(JsonEvent::Eof) {
//!         break;
//!     }
//! }
//! ```
//!
//! ### Parsing from a `BufReader`
//!
//! [`BufReaderJsonFeeder`](crate::feeder::BufReaderJsonFeeder) allows you to
//! feed the parser from a [`BufReader`](std::io::BufReader). This is useful if
//! you want to parse JSON from a file or a network connection.
//!
//! ```
//! use jsonflow::{JsonParser, JsonEvent};
//!
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("tests/fixtures/pass1.txt").unwrap();
//! let mut reader = BufReader::new(file);
//!
//! let feeder = jsonflow::feeder::BufReaderJsonFeeder::new(&mut reader);
//! let mut parser = JsonParser::new(feeder);
//! loop {
//!     let mut event = parser.next_event().unwrap();
//!     if event == Some(JsonEvent::NeedMoreInput) {
//!         parser.feeder.fill_buf().unwrap();
//!         event = parser.next_event().unwrap();
//!     }
//!
//!     if event.is_none() || event == Some(JsonEvent::Eof) {
//!         break;
//!     }
//! }
//! ```
//!
//! ### Parsing a slice of bytes
//!
//! For convenience, [`SliceJsonFeeder`](crate::feeder::SliceJsonFeeder) allows
//! you to feed the parser from a slice of bytes.
//!
//! ```
//! use jsonflow::{JsonParser, JsonEvent};
//! use jsonflow::feeder::SliceJsonFeeder;
//!
//! let json = r#"{"name": "Elvis"}"#.as_bytes();
//!
//! let mut feeder = SliceJsonFeeder::new(json);
//! let mut parser = JsonParser::new(feeder);
//! loop {
//!     let event = parser.next_event().unwrap();
//!
//!     if event.is_none() || event == Some(JsonEvent::Eof) {
//!         break;
//!     }
//! }
//! ```
//!
//! ### Parsing into a value tree
//!
//! [`actions::parse_to_value`] drives a parser with the library's own
//! [`actions::SemanticActions`] backend ([`actions::ValueBuilder`]) and hands
//! back a single [`value::Value`] once the document is complete.
//!
//! ```
//! use jsonflow::{JsonParser, feeder::SliceJsonFeeder};
//! use jsonflow::actions::parse_to_value;
//!
//! let json = r#"{"name": "Elvis"}"#.as_bytes();
//! let mut parser = JsonParser::new(SliceJsonFeeder::new(json));
//! let value = parse_to_value(&mut parser).unwrap();
//!
//! assert_eq!(value.get("name").unwrap().as_str().unwrap(), "Elvis");
//! ```
//!
//! ### Parsing into a Serde JSON Value
//!
//! For testing and compatibility reasons, jsonflow is able to parse a byte
//! slice into a [Serde JSON](https://github.com/serde-rs/json) Value.
//!
//! Heads up: You need to enable the `serde_json` feature for this.
//!
//! ```
//! use jsonflow::serde_json::from_slice;
//!
//! let json = r#"{"name": "Elvis"}"#.as_bytes();
//! let value = from_slice(json).unwrap();
//!
//! assert!(value.is_object());
//! assert_eq!(value["name"], "Elvis");
//! ```
//!
//! However, if you find yourself doing this, you probably don't need the
//! reactive features of jsonflow and your data seems to completely fit into
//! memory. In this case, you're most likely better off using Serde JSON
//! directly.
pub mod actions;
pub mod arena;
pub mod event;
pub mod feeder;
pub mod generator;
pub mod options;
pub mod parser;
mod reset;
#[cfg(feature = "serde_json")]
pub mod serde_json;
#[cfg(feature = "tokio")]
pub mod tokio;
pub mod transport;
pub mod unicode;
pub mod value;

pub use event::{JsonEvent, NumberClass, ParseErrorKind};
pub use parser::JsonParser;
pub use reset::Reset;
