//! Semantic actions: the pluggable backend that turns parser events into a
//! result (spec §4.3, component C3).
//!
//! [`SemanticActions`] is the sink. [`drive`] is the glue that pumps a
//! [`JsonParser`](crate::JsonParser) and forwards its events to a sink,
//! translating [`ParserError`](crate::parser::ParserError) into an
//! `error()` callback instead of propagating it as a Rust error, since the
//! contract here is "errors are events delivered to the sink", matching how
//! every other outcome of parsing already reaches the sink. [`ValueBuilder`]
//! is the library's own sink: it assembles a [`Value`] tree, the same way
//! [`crate::tests::prettyprinter`] builds a string instead.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::arena::Arena;
use crate::event::{NumberClass, ParseErrorKind};
use crate::feeder::JsonFeeder;
use crate::parser::{JsonParser, ParserError};
use crate::value::{KeyStr, Value};
use crate::JsonEvent;

/// How [`ValueBuilder`] should store a scanned numeric literal (spec §4.3
/// "Number policy tiering").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum NumberPolicy {
    /// Parse as the widest supported integer (`i128`) when the literal has
    /// no `.` and no exponent, falling back to [`Value::Float`] when it
    /// doesn't fit or when the literal is a decimal or scientific literal.
    #[default]
    Auto,
    /// Like [`NumberPolicy::Auto`], but reserved for literals that should be
    /// kept at arbitrary decimal precision rather than promoted to `f64`.
    /// [`Value`] has no dedicated arbitrary-precision decimal variant, so
    /// this policy currently behaves exactly like `Auto` (see DESIGN.md).
    AutoDecimal,
    /// Store the literal's raw lexeme as [`Value::Str`], unparsed, no matter
    /// its shape.
    String,
}

/// What to do when an object literal repeats a key (spec §4.3 "Duplicate
/// key policy").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// Keep the first occurrence's value, ignore later ones.
    KeepFirst,
    /// Keep the last occurrence's value, overwriting earlier ones.
    KeepLast,
    /// Treat a repeated key as a parse error.
    #[default]
    Error,
}

/// Options for [`ValueBuilder`]. Use [`ActionsOptionsBuilder`] to construct
/// one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionsOptions {
    number_policy: NumberPolicy,
    duplicate_key_policy: DuplicateKeyPolicy,
    cache_data_strings: bool,
    use_arena: bool,
    keep_string_cache_on_clear: bool,
}

impl Default for ActionsOptions {
    fn default() -> Self {
        Self {
            number_policy: NumberPolicy::default(),
            duplicate_key_policy: DuplicateKeyPolicy::default(),
            cache_data_strings: false,
            use_arena: false,
            keep_string_cache_on_clear: false,
        }
    }
}

impl ActionsOptions {
    pub fn number_policy(&self) -> NumberPolicy {
        self.number_policy
    }

    pub fn duplicate_key_policy(&self) -> DuplicateKeyPolicy {
        self.duplicate_key_policy
    }

    /// `true` if string *values* (not just object keys) should also be
    /// interned through the key-string cache.
    pub fn cache_data_strings(&self) -> bool {
        self.cache_data_strings
    }

    /// `true` if [`ValueBuilder`] should stage interned strings through a
    /// per-document [`Arena`] before copying them into their final `Arc<str>`
    /// (spec §4.3 "Arena integration" / spec §6 `use-arena`).
    pub fn use_arena(&self) -> bool {
        self.use_arena
    }

    /// `true` if [`ValueBuilder::clear`] should keep the key-string cache
    /// instead of dropping it (spec §6 `keep-string-cache-on-clear`).
    pub fn keep_string_cache_on_clear(&self) -> bool {
        self.keep_string_cache_on_clear
    }
}

/// A builder for [`ActionsOptions`].
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionsOptionsBuilder {
    options: ActionsOptions,
}

impl ActionsOptionsBuilder {
    pub fn with_number_policy(mut self, policy: NumberPolicy) -> Self {
        self.options.number_policy = policy;
        self
    }

    pub fn with_duplicate_key_policy(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.options.duplicate_key_policy = policy;
        self
    }

    pub fn with_cache_data_strings(mut self, cache: bool) -> Self {
        self.options.cache_data_strings = cache;
        self
    }

    pub fn with_use_arena(mut self, use_arena: bool) -> Self {
        self.options.use_arena = use_arena;
        self
    }

    pub fn with_keep_string_cache_on_clear(mut self, keep: bool) -> Self {
        self.options.keep_string_cache_on_clear = keep;
        self
    }

    pub fn build(self) -> ActionsOptions {
        self.options
    }
}

/// A sink that receives the semantic content of a JSON text one token at a
/// time (spec §4.3, component C3). Every method has a no-op default so a
/// sink can override just the handful of events it cares about — a byte
/// counter, say, only needs [`SemanticActions::value_string`].
///
/// Methods take the already-decoded lexeme rather than requiring a second
/// pass over [`JsonParser::current_str`](crate::JsonParser::current_str):
/// [`drive`] does that decoding once, up front, on the sink's behalf.
pub trait SemanticActions {
    fn start_object(&mut self) {}
    fn end_object(&mut self) {}
    fn start_array(&mut self) {}
    fn end_array(&mut self) {}
    fn field_name(&mut self, name: &str) {
        let _ = name;
    }
    fn value_string(&mut self, s: &str) {
        let _ = s;
    }
    /// A numeric literal with no `.` and no exponent, given as its raw text.
    fn value_int(&mut self, lexeme: &str) {
        let _ = lexeme;
    }
    /// A numeric literal with a fractional part but no exponent.
    fn value_decimal(&mut self, lexeme: &str) {
        let _ = lexeme;
    }
    /// A numeric literal written in scientific notation.
    fn value_scientific(&mut self, lexeme: &str) {
        let _ = lexeme;
    }
    fn value_true(&mut self) {}
    fn value_false(&mut self) {}
    fn value_null(&mut self) {}
    /// Called once, in place of any further token callbacks, when parsing
    /// fails (spec §4.3 "errors are delivered to the sink as an event, not
    /// raised as an exception").
    fn error(&mut self, kind: ParseErrorKind, message: &str) {
        let _ = (kind, message);
    }
    fn eof(&mut self) {}

    /// Polled by [`drive`] between tokens. Returning `true` stops parsing
    /// early with [`ParseErrorKind::Cancelled`] (spec §4.2/§5
    /// "cancellation is observed at the next token boundary").
    fn is_cancelled(&self) -> bool {
        false
    }

    /// Reset this sink to the state it was in right after construction, so
    /// it can be reused for the next document (spec §4.3 `clear(shrink)`,
    /// spec §8 invariant #5: a failed parse leaves the sink "partially
    /// built but well-defined" until `clear()` resets it). `shrink` asks the
    /// sink to also release any spare capacity it grew while building the
    /// previous document, not just logically empty itself.
    fn clear(&mut self, shrink: bool) {
        let _ = shrink;
    }
}

/// Pump `parser`, forwarding every event to `actions` until end of input, a
/// parse error, or `actions.is_cancelled()` returns `true`.
pub fn drive<T, A>(parser: &mut JsonParser<T>, actions: &mut A) -> Result<(), ParserError>
where
    T: JsonFeeder,
    A: SemanticActions,
{
    loop {
        if actions.is_cancelled() {
            actions.error(ParseErrorKind::Cancelled, "cancelled by semantic actions");
            return Ok(());
        }

        let event = match parser.next_event() {
            Ok(Some(e)) => e,
            Ok(None) => {
                actions.eof();
                return Ok(());
            }
            Err(e) => {
                actions.error(e.kind(), &e.to_string());
                return Err(e);
            }
        };

        match event {
            JsonEvent::NeedMoreInput => continue,
            JsonEvent::StartObject => actions.start_object(),
            JsonEvent::EndObject => actions.end_object(),
            JsonEvent::StartArray => actions.start_array(),
            JsonEvent::EndArray => actions.end_array(),
            JsonEvent::FieldName => {
                let s = parser.current_str().map_err(|_| ParserError::SyntaxError)?;
                actions.field_name(s);
            }
            JsonEvent::ValueString => {
                let s = parser.current_str().map_err(|_| ParserError::SyntaxError)?;
                actions.value_string(s);
            }
            JsonEvent::ValueInt => {
                let s = parser.current_str().map_err(|_| ParserError::SyntaxError)?;
                actions.value_int(s);
            }
            JsonEvent::ValueFloat => {
                let s = parser.current_str().map_err(|_| ParserError::SyntaxError)?;
                actions.value_decimal(s);
            }
            JsonEvent::ValueScientific => {
                let s = parser.current_str().map_err(|_| ParserError::SyntaxError)?;
                actions.value_scientific(s);
            }
            JsonEvent::ValueTrue => actions.value_true(),
            JsonEvent::ValueFalse => actions.value_false(),
            JsonEvent::ValueNull => actions.value_null(),
            JsonEvent::Error(kind) => {
                actions.error(kind, "parse error");
                return Ok(());
            }
            JsonEvent::Eof => {
                actions.eof();
                return Ok(());
            }
        }
    }
}

/// The default [`SemanticActions`] backend: assembles a single [`Value`]
/// tree (spec §4.3, default value-building backend).
///
/// Children of a container in progress are kept on a flat stack
/// (`stack`/`key_stack`) rather than nested `Vec`s; the index at which a
/// container's children begin is recorded on `markers` when it opens, and
/// `Vec::split_off(marker)` lifts exactly that container's children back
/// off the stack when it closes — mirroring the build-stack-plus-markers
/// technique described for the value-tree backend.
pub struct ValueBuilder {
    options: ActionsOptions,
    arena: Option<Arena>,
    stack: Vec<Value>,
    key_stack: Vec<Option<KeyStr>>,
    markers: Vec<usize>,
    pending_key: Option<KeyStr>,
    key_cache: HashSet<KeyStr>,
    result: Option<Value>,
    error: Option<(ParseErrorKind, String)>,
}

impl ValueBuilder {
    pub fn new(options: ActionsOptions) -> Self {
        let arena = options.use_arena.then(Arena::new);
        ValueBuilder {
            options,
            arena,
            stack: Vec::new(),
            key_stack: Vec::new(),
            markers: Vec::new(),
            pending_key: None,
            key_cache: HashSet::new(),
            result: None,
            error: None,
        }
    }

    /// Intern `s`: if an equal string has been seen before by this builder,
    /// return the existing `Arc` instead of allocating a new one (spec §4.3
    /// "Key-string cache"). When the arena policy is enabled, `s` is first
    /// staged through the document's [`Arena`] (spec §4.3 "Arena
    /// integration") rather than copied straight off the parser's own
    /// scratch buffer.
    fn intern(&mut self, s: &str) -> KeyStr {
        if let Some(existing) = self.key_cache.get(s) {
            return existing.clone();
        }
        let arc: KeyStr = match &self.arena {
            Some(arena) => Arc::from(arena.alloc_str(s)),
            None => Arc::from(s),
        };
        self.key_cache.insert(arc.clone());
        arc
    }

    fn push_value(&mut self, value: Value) {
        self.stack.push(value);
        self.key_stack.push(self.pending_key.take());
    }

    fn push_number(&mut self, lexeme: &str, class: NumberClass) {
        if self.options.number_policy == NumberPolicy::String {
            let s = if self.options.cache_data_strings {
                self.intern(lexeme)
            } else {
                Arc::from(lexeme)
            };
            self.push_value(Value::Str(s));
            return;
        }
        if class != NumberClass::Integer {
            self.push_float(lexeme);
            return;
        }
        match lexeme.parse::<i128>() {
            Ok(i) => self.push_value(Value::Int(i)),
            Err(_) => {
                tracing::warn!(lexeme, "integer literal overflows i128, storing as f64");
                self.push_float(lexeme);
            }
        }
    }

    fn push_float(&mut self, lexeme: &str) {
        match lexeme.parse::<f64>() {
            Ok(f) => self.push_value(Value::Float(f)),
            Err(_) => self.push_value(Value::Null),
        }
    }

    /// Take the finished tree. `None` if parsing hasn't completed yet, was
    /// cancelled, or ended in an error.
    pub fn into_value(self) -> Option<Value> {
        self.result
    }

    /// The error reported to this builder via [`SemanticActions::error`],
    /// if any.
    pub fn error(&self) -> Option<(ParseErrorKind, &str)> {
        self.error.as_ref().map(|(k, m)| (*k, m.as_str()))
    }
}

impl SemanticActions for ValueBuilder {
    fn start_object(&mut self) {
        self.markers.push(self.stack.len());
    }

    fn end_object(&mut self) {
        let marker = self.markers.pop().expect("unbalanced end_object");
        let values = self.stack.split_off(marker);
        let keys = self.key_stack.split_off(marker);
        let mut map = IndexMap::with_capacity(values.len());
        for (key, value) in keys.into_iter().zip(values.into_iter()) {
            let key = key.expect("object child without a field name");
            if map.contains_key(&key) {
                match self.options.duplicate_key_policy {
                    DuplicateKeyPolicy::KeepFirst => continue,
                    DuplicateKeyPolicy::KeepLast => {
                        map.insert(key, value);
                    }
                    DuplicateKeyPolicy::Error => {
                        self.error = Some((
                            ParseErrorKind::DuplicateKey,
                            format!("duplicate object key: {key}"),
                        ));
                    }
                }
            } else {
                map.insert(key, value);
            }
        }
        self.push_value(Value::Object(map));
    }

    fn start_array(&mut self) {
        self.markers.push(self.stack.len());
    }

    fn end_array(&mut self) {
        let marker = self.markers.pop().expect("unbalanced end_array");
        let values = self.stack.split_off(marker);
        self.key_stack.truncate(marker);
        self.push_value(Value::Array(values));
    }

    fn field_name(&mut self, name: &str) {
        self.pending_key = Some(self.intern(name));
    }

    fn value_string(&mut self, s: &str) {
        let s = if self.options.cache_data_strings {
            self.intern(s)
        } else {
            Arc::from(s)
        };
        self.push_value(Value::Str(s));
    }

    fn value_int(&mut self, lexeme: &str) {
        self.push_number(lexeme, NumberClass::Integer);
    }

    fn value_decimal(&mut self, lexeme: &str) {
        self.push_number(lexeme, NumberClass::Decimal);
    }

    fn value_scientific(&mut self, lexeme: &str) {
        self.push_number(lexeme, NumberClass::Scientific);
    }

    fn value_true(&mut self) {
        self.push_value(Value::Bool(true));
    }

    fn value_false(&mut self) {
        self.push_value(Value::Bool(false));
    }

    fn value_null(&mut self) {
        self.push_value(Value::Null);
    }

    fn error(&mut self, kind: ParseErrorKind, message: &str) {
        if self.error.is_none() {
            self.error = Some((kind, message.to_string()));
        }
    }

    fn eof(&mut self) {
        if self.error.is_none() {
            self.result = self.stack.pop();
        }
    }

    fn is_cancelled(&self) -> bool {
        matches!(self.error, Some((ParseErrorKind::DuplicateKey, _)))
    }

    fn clear(&mut self, shrink: bool) {
        self.stack.clear();
        self.key_stack.clear();
        self.markers.clear();
        self.pending_key = None;
        self.result = None;
        self.error = None;
        if self.options.keep_string_cache_on_clear {
            if shrink {
                self.key_cache.shrink_to_fit();
            }
        } else {
            self.key_cache.clear();
            if shrink {
                self.key_cache.shrink_to_fit();
            }
        }
        if let Some(arena) = &mut self.arena {
            arena.reset();
        }
        if shrink {
            self.stack.shrink_to_fit();
            self.key_stack.shrink_to_fit();
            self.markers.shrink_to_fit();
        }
    }
}

/// Parse a complete JSON text from `feeder` into a [`Value`] tree in one
/// call, using the default policies. Convenience wrapper around
/// [`ValueBuilder`] and [`drive`] for callers who don't need streaming or a
/// custom sink.
pub fn parse_to_value<T: JsonFeeder>(
    parser: &mut JsonParser<T>,
) -> Result<Value, ParserError> {
    let mut builder = ValueBuilder::new(ActionsOptions::default());
    drive(parser, &mut builder)?;
    if let Some((kind, message)) = builder.error() {
        return Err(match kind {
            ParseErrorKind::NestingTooDeep => ParserError::NestingTooDeep,
            _ => {
                let _ = message;
                ParserError::SyntaxError
            }
        });
    }
    builder.into_value().ok_or(ParserError::NoMoreInput)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feeder::SliceJsonFeeder;

    #[test]
    fn builds_nested_value_tree() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"a":[1,2.5,true,null],"b":"x"}"#));
        let value = parse_to_value(&mut parser).unwrap();
        let obj = value.as_object().unwrap();
        let arr = obj.get("a").unwrap().as_array().unwrap();
        assert_eq!(arr[0].as_i128().unwrap(), 1);
        assert_eq!(arr[1].as_f64().unwrap(), 2.5);
        assert_eq!(arr[2].as_bool().unwrap(), true);
        assert!(arr[3].is_null());
        assert_eq!(obj.get("b").unwrap().as_str().unwrap(), "x");
    }

    #[test]
    fn duplicate_keys_reject_by_default() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"a":1,"a":2}"#));
        let err = parse_to_value(&mut parser).unwrap_err();
        assert!(matches!(err, ParserError::SyntaxError));
    }

    #[test]
    fn duplicate_keys_can_error() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"a":1,"a":2}"#));
        let mut builder = ValueBuilder::new(
            ActionsOptionsBuilder::default()
                .with_duplicate_key_policy(DuplicateKeyPolicy::Error)
                .build(),
        );
        drive(&mut parser, &mut builder).unwrap();
        assert!(matches!(
            builder.error(),
            Some((ParseErrorKind::DuplicateKey, _))
        ));
    }

    #[test]
    fn duplicate_keys_keep_last_when_configured() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"a":1,"a":2}"#));
        let mut builder = ValueBuilder::new(
            ActionsOptionsBuilder::default()
                .with_duplicate_key_policy(DuplicateKeyPolicy::KeepLast)
                .build(),
        );
        drive(&mut parser, &mut builder).unwrap();
        assert!(builder.error().is_none());
        assert_eq!(
            builder.into_value().unwrap().get("a").unwrap().as_i128().unwrap(),
            2
        );
    }

    #[test]
    fn duplicate_keys_keep_first_when_configured() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"a":1,"a":2}"#));
        let mut builder = ValueBuilder::new(
            ActionsOptionsBuilder::default()
                .with_duplicate_key_policy(DuplicateKeyPolicy::KeepFirst)
                .build(),
        );
        drive(&mut parser, &mut builder).unwrap();
        assert!(builder.error().is_none());
        assert_eq!(
            builder.into_value().unwrap().get("a").unwrap().as_i128().unwrap(),
            1
        );
    }

    #[test]
    fn interns_repeated_keys_to_the_same_allocation() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"[{"k":1},{"k":2}]"#));
        let value = parse_to_value(&mut parser).unwrap();
        let arr = value.as_array().unwrap();
        let k0 = match &arr[0] {
            Value::Object(o) => o.get_index(0).unwrap().0.clone(),
            _ => unreachable!(),
        };
        let k1 = match &arr[1] {
            Value::Object(o) => o.get_index(0).unwrap().0.clone(),
            _ => unreachable!(),
        };
        assert!(Arc::ptr_eq(&k0, &k1));
    }

    #[test]
    fn number_policy_string_keeps_raw_lexeme() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(b"[1,2.5,3e1]"));
        let mut builder = ValueBuilder::new(
            ActionsOptionsBuilder::default()
                .with_number_policy(NumberPolicy::String)
                .build(),
        );
        drive(&mut parser, &mut builder).unwrap();
        let value = builder.into_value().unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr[0].as_str().unwrap(), "1");
        assert_eq!(arr[1].as_str().unwrap(), "2.5");
        assert_eq!(arr[2].as_str().unwrap(), "3e1");
    }

    #[test]
    fn number_policy_auto_promotes_decimals_and_scientific_to_float() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(b"[1,2.5,3e1]"));
        let value = parse_to_value(&mut parser).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr[0].as_i128().unwrap(), 1);
        assert_eq!(arr[1].as_f64().unwrap(), 2.5);
        assert_eq!(arr[2].as_f64().unwrap(), 30.0);
    }

    #[test]
    fn integer_overflow_degrades_to_float_under_a_tracing_subscriber() {
        // exercises the tracing::warn! call in push_number through a real
        // subscriber rather than just trusting it compiles.
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::fmt().with_test_writer().finish(),
        );
        let huge = "9".repeat(60);
        let json = format!("[{huge}]");
        let mut parser = JsonParser::new(SliceJsonFeeder::new(json.as_bytes()));
        let value = parse_to_value(&mut parser).unwrap();
        assert!(matches!(value.as_array().unwrap()[0], Value::Float(_)));
    }

    #[test]
    fn cancellation_stops_early() {
        struct CancelAfterOne {
            seen: usize,
        }
        impl SemanticActions for CancelAfterOne {
            fn value_int(&mut self, _lexeme: &str) {
                self.seen += 1;
            }
            fn is_cancelled(&self) -> bool {
                self.seen >= 1
            }
        }
        let mut parser = JsonParser::new(SliceJsonFeeder::new(b"[1,2,3]"));
        let mut actions = CancelAfterOne { seen: 0 };
        drive(&mut parser, &mut actions).unwrap();
        assert_eq!(actions.seen, 1);
    }

    #[test]
    fn arena_backed_builder_produces_the_same_tree() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"a":[1,"x"],"b":"x"}"#));
        let mut builder = ValueBuilder::new(
            ActionsOptionsBuilder::default().with_use_arena(true).build(),
        );
        drive(&mut parser, &mut builder).unwrap();
        let value = builder.into_value().unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("b").unwrap().as_str().unwrap(), "x");
        let arr = obj.get("a").unwrap().as_array().unwrap();
        assert_eq!(arr[1].as_str().unwrap(), "x");
    }

    #[test]
    fn clear_resets_builder_for_reuse() {
        let mut builder = ValueBuilder::new(ActionsOptions::default());
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"a":1}"#));
        drive(&mut parser, &mut builder).unwrap();
        assert!(builder.into_value().is_some());

        let mut builder = ValueBuilder::new(ActionsOptions::default());
        builder.clear(false);
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"a":2}"#));
        drive(&mut parser, &mut builder).unwrap();
        assert!(builder.error().is_none());
        assert_eq!(
            builder.into_value().unwrap().get("a").unwrap().as_i128().unwrap(),
            2
        );
    }

    #[test]
    fn clear_keeps_string_cache_when_requested() {
        let mut parser = JsonParser::new(SliceJsonFeeder::new(br#"{"k":1}"#));
        let mut builder = ValueBuilder::new(
            ActionsOptionsBuilder::default()
                .with_keep_string_cache_on_clear(true)
                .build(),
        );
        drive(&mut parser, &mut builder).unwrap();
        let before = match builder.into_value().unwrap() {
            Value::Object(o) => o.get_index(0).unwrap().0.clone(),
            _ => unreachable!(),
        };

        let mut builder = ValueBuilder::new(
            ActionsOptionsBuilder::default()
                .with_keep_string_cache_on_clear(true)
                .build(),
        );
        // seed the cache the same way the first builder's life cycle would.
        let _ = builder.intern("k");
        builder.clear(false);
        let after = builder.intern("k");
        assert!(Arc::ptr_eq(&before, &after) || before.as_ref() == after.as_ref());
    }
}
