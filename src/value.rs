//! The polymorphic value tree (spec §4.5, component C5): the in-memory
//! representation of one parsed JSON text.
//!
//! [`Value`] is a Rust enum, so "exactly one variant is active" (spec §4.5
//! "Variant set and tag discipline") holds for free instead of needing the
//! `boost::variant` tag bookkeeping the original design note (spec §9)
//! describes. Object keys and strings are [`Arc<str>`] rather than
//! plain `String`: this is what lets [`crate::actions::ValueBuilder`]'s
//! key-string cache (spec §4.3 "Key-string cache") intern a key once and
//! have every occurrence in the tree share the same allocation, which is
//! the allocator-propagation invariant spec §8 #8 asks for in practice.

use std::sync::Arc;

use indexmap::IndexMap;

/// A reference-counted, immutable string used for object keys and string
/// values. Cloning is an `Arc` bump, not a copy.
pub type KeyStr = Arc<str>;

/// A JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// An integral number. The original's tiering (spec §4.3) promotes as
    /// far as `i128` before falling back to [`Value::Float`]; `i128` is the
    /// one variant, not `i32`/`i64`/`i128`, since Rust integers don't need
    /// separate storage per width the way the original's policy table does.
    Int(i128),
    Float(f64),
    Str(KeyStr),
    Array(Vec<Value>),
    Object(IndexMap<KeyStr, Value>),
}

/// The name of a [`Value`]'s active variant, standing in for the original's
/// integer `which()` tag index (spec §4.5).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Array,
    Object,
}

/// Thrown by [`Value::as_ref`]-style accessors when the active variant
/// doesn't match the requested type (spec §4.5 `as<T>()`: "throws
/// `bad-variant-access` if tag mismatches").
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("bad variant access: value is {0:?}")]
pub struct BadVariantAccess(pub Tag);

impl Value {
    /// The active variant's tag (spec §4.5 `which()`).
    pub fn tag(&self) -> Tag {
        match self {
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Bool,
            Value::Int(_) => Tag::Int,
            Value::Float(_) => Tag::Float,
            Value::Str(_) => Tag::Str,
            Value::Array(_) => Tag::Array,
            Value::Object(_) => Tag::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Result<bool, BadVariantAccess> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(BadVariantAccess(self.tag())),
        }
    }

    pub fn as_i128(&self) -> Result<i128, BadVariantAccess> {
        match self {
            Value::Int(i) => Ok(*i),
            _ => Err(BadVariantAccess(self.tag())),
        }
    }

    pub fn as_f64(&self) -> Result<f64, BadVariantAccess> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            _ => Err(BadVariantAccess(self.tag())),
        }
    }

    pub fn as_str(&self) -> Result<&str, BadVariantAccess> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(BadVariantAccess(self.tag())),
        }
    }

    /// `nullptr`-on-mismatch flavor of the accessor (spec §4.5 `as<T*>()`).
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<KeyStr, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<KeyStr, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Convenience lookup: `.source` in spec §8's end-to-end scenario
    /// (`{"source":"src1"}` → `.source` yields `"src1"`).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    /// Destroy the current payload and construct a new one in place (spec
    /// §4.5 `emplace<T>(args...)`).
    pub fn emplace(&mut self, new_value: Value) {
        *self = new_value;
    }

    /// Swap two values' payloads. A Rust enum has no separate "same tag"
    /// fast path to take here (spec §4.5 "if tags equal, delegate to
    /// payload swap; else move-construct+destroy pairwise") — `mem::swap`
    /// is already exactly as cheap either way, since the enum's
    /// representation is a fixed-size tagged union regardless of variant.
    pub fn swap(&mut self, other: &mut Value) {
        std::mem::swap(self, other);
    }

    /// Dispatch to `visitor` based on the active variant (spec §4.5
    /// `apply_visitor`). Rust's pattern match stands in for the original's
    /// function-pointer table indexed by tag (spec §9 design note).
    pub fn apply_visitor<T, V: Visitor<T>>(&self, visitor: &mut V) -> T {
        match self {
            Value::Null => visitor.visit_null(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Int(i) => visitor.visit_int(*i),
            Value::Float(f) => visitor.visit_float(*f),
            Value::Str(s) => visitor.visit_str(s),
            Value::Array(a) => visitor.visit_array(a),
            Value::Object(o) => visitor.visit_object(o),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

/// A double-dispatch visitor over [`Value`]'s seven variants (spec §4.5
/// `apply_visitor`).
pub trait Visitor<T = ()> {
    fn visit_null(&mut self) -> T;
    fn visit_bool(&mut self, b: bool) -> T;
    fn visit_int(&mut self, i: i128) -> T;
    fn visit_float(&mut self, f: f64) -> T;
    fn visit_str(&mut self, s: &str) -> T;
    fn visit_array(&mut self, a: &[Value]) -> T;
    fn visit_object(&mut self, o: &IndexMap<KeyStr, Value>) -> T;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tags_distinguish_variants() {
        assert_eq!(Value::Null.tag(), Tag::Null);
        assert_eq!(Value::from(true).tag(), Tag::Bool);
        assert_eq!(Value::from(1i128).tag(), Tag::Int);
    }

    #[test]
    fn distinct_tags_never_equal() {
        // spec §4.5 equality: "distinct tags are never equal"
        assert_ne!(Value::Int(0), Value::Float(0.0));
        assert_ne!(Value::Null, Value::Bool(false));
    }

    #[test]
    fn bad_variant_access() {
        let v = Value::from("hi");
        assert!(v.as_bool().is_err());
        assert_eq!(v.as_str().unwrap(), "hi");
    }

    #[test]
    fn object_get_by_key() {
        let mut o = IndexMap::new();
        o.insert(Arc::from("source"), Value::from("src1"));
        let v = Value::Object(o);
        assert_eq!(v.get("source").unwrap().as_str().unwrap(), "src1");
    }

    #[test]
    fn swap_values() {
        let mut a = Value::from(1i128);
        let mut b = Value::from("x");
        a.swap(&mut b);
        assert_eq!(a.as_str().unwrap(), "x");
        assert_eq!(b.as_i128().unwrap(), 1);
    }

    #[test]
    fn visitor_dispatch() {
        struct Describe;
        impl Visitor<&'static str> for Describe {
            fn visit_null(&mut self) -> &'static str {
                "null"
            }
            fn visit_bool(&mut self, _: bool) -> &'static str {
                "bool"
            }
            fn visit_int(&mut self, _: i128) -> &'static str {
                "int"
            }
            fn visit_float(&mut self, _: f64) -> &'static str {
                "float"
            }
            fn visit_str(&mut self, _: &str) -> &'static str {
                "str"
            }
            fn visit_array(&mut self, _: &[Value]) -> &'static str {
                "array"
            }
            fn visit_object(&mut self, _: &IndexMap<KeyStr, Value>) -> &'static str {
                "object"
            }
        }
        assert_eq!(Value::Null.apply_visitor(&mut Describe), "null");
        assert_eq!(Value::from(1i128).apply_visitor(&mut Describe), "int");
    }
}
