//! Parsing straight into a [Serde JSON](https://github.com/serde-rs/json)
//! [`serde_json::Value`], for callers who only need jsonflow's conformance
//! and already speak Serde's value model.
//!
//! Built on top of [`crate::actions::parse_to_value`] plus a [`Visitor`]
//! that walks the resulting [`crate::value::Value`] tree the same way
//! [`crate::generator`] walks one to produce text, just emitting a
//! `serde_json::Value` at each node instead of bytes.

use serde_json::{Map, Number, Value as SerdeValue};

use crate::actions::parse_to_value;
use crate::feeder::JsonFeeder;
use crate::parser::ParserError;
use crate::value::{KeyStr, Value, Visitor};
use crate::JsonParser;

struct ToSerde;

impl Visitor<SerdeValue> for ToSerde {
    fn visit_null(&mut self) -> SerdeValue {
        SerdeValue::Null
    }

    fn visit_bool(&mut self, b: bool) -> SerdeValue {
        SerdeValue::Bool(b)
    }

    fn visit_int(&mut self, i: i128) -> SerdeValue {
        match i64::try_from(i) {
            Ok(i) => SerdeValue::Number(Number::from(i)),
            Err(_) => Number::from_f64(i as f64)
                .map(SerdeValue::Number)
                .unwrap_or(SerdeValue::Null),
        }
    }

    fn visit_float(&mut self, f: f64) -> SerdeValue {
        Number::from_f64(f)
            .map(SerdeValue::Number)
            .unwrap_or(SerdeValue::Null)
    }

    fn visit_str(&mut self, s: &str) -> SerdeValue {
        SerdeValue::String(s.to_string())
    }

    fn visit_array(&mut self, a: &[Value]) -> SerdeValue {
        SerdeValue::Array(a.iter().map(|v| v.apply_visitor(self)).collect())
    }

    fn visit_object(&mut self, o: &indexmap::IndexMap<KeyStr, Value>) -> SerdeValue {
        let mut map = Map::with_capacity(o.len());
        for (k, v) in o {
            map.insert(k.to_string(), v.apply_visitor(self));
        }
        SerdeValue::Object(map)
    }
}

/// Parse a byte slice into a Serde JSON [`serde_json::Value`].
///
/// ```
/// use serde_json::json;
/// use jsonflow::serde_json::from_slice;
///
/// let json = r#"{"name": "Elvis"}"#.as_bytes();
/// let expected = json!({
///     "name": "Elvis"
/// });
/// let actual = from_slice(json).unwrap();
/// assert_eq!(expected, actual);
/// ```
pub fn from_slice(v: &[u8]) -> Result<SerdeValue, ParserError> {
    let mut parser = JsonParser::new(crate::feeder::SliceJsonFeeder::new(v));
    from_parser(&mut parser)
}

/// Drive an already-constructed [`JsonParser`] to completion and convert its
/// result to a [`serde_json::Value`].
pub fn from_parser<T: JsonFeeder>(parser: &mut JsonParser<T>) -> Result<SerdeValue, ParserError> {
    let value = parse_to_value(parser)?;
    Ok(value.apply_visitor(&mut ToSerde))
}
