//! Serializing a [`Value`] tree back to JSON text (spec §4.3 "Generator",
//! added to round out the value-tree backend with its inverse).
//!
//! The compact and pretty-printing logic below is the same structural-depth
//! bookkeeping [`crate::tests::prettyprinter`] uses to pretty-print a
//! *parser's* event stream — a running indent level and "has this container
//! emitted an element yet" flag per nesting level — just driven by walking a
//! [`Value`] tree with [`Visitor`] instead of by parser events. Floats are
//! formatted with [`dtoa`], the same crate the pretty-printer demo uses, for
//! the same reason: shortest round-trippable decimal form without pulling
//! in a second float-formatting crate.

use std::fmt::Write as _;

use crate::value::{KeyStr, Value, Visitor};

/// How [`to_string`] should format its output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    pretty: bool,
    indent_width: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent_width: 2,
        }
    }
}

impl GeneratorOptions {
    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }
}

/// A builder for [`GeneratorOptions`].
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorOptionsBuilder {
    options: GeneratorOptions,
}

impl GeneratorOptionsBuilder {
    /// Emit one member/element per line, indented by
    /// [`with_indent_width`](Self::with_indent_width) spaces per nesting
    /// level. Compact (no added whitespace) when left at the default.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.options.pretty = pretty;
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.options.indent_width = width;
        self
    }

    pub fn build(self) -> GeneratorOptions {
        self.options
    }
}

/// Render `value` as a JSON text. Object member order follows the
/// [`indexmap::IndexMap`]'s insertion order; no trailing commas are ever
/// emitted, including after a container's last element.
pub fn to_string(value: &Value, options: &GeneratorOptions) -> String {
    let mut out = String::new();
    let mut gen = Generator {
        out: &mut out,
        options: *options,
        level: 0,
    };
    value.apply_visitor(&mut gen);
    out
}

struct Generator<'a> {
    out: &'a mut String,
    options: GeneratorOptions,
    level: usize,
}

impl Generator<'_> {
    fn newline_indent(&mut self, level: usize) {
        if self.options.pretty {
            self.out.push('\n');
            for _ in 0..level * self.options.indent_width {
                self.out.push(' ');
            }
        }
    }

    fn write_escaped_str(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{08}' => self.out.push_str("\\b"),
                '\u{0C}' => self.out.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    write!(self.out, "\\u{:04x}", c as u32).unwrap();
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    fn write_container<I, F>(&mut self, open: char, close: char, items: I, mut write_one: F)
    where
        I: ExactSizeIterator,
        F: FnMut(&mut Self, I::Item),
    {
        self.out.push(open);
        let len = items.len();
        if len == 0 {
            self.out.push(close);
            return;
        }
        self.level += 1;
        for (i, item) in items.enumerate() {
            self.newline_indent(self.level);
            write_one(self, item);
            if i + 1 < len {
                self.out.push(',');
            }
        }
        self.level -= 1;
        self.newline_indent(self.level);
        self.out.push(close);
    }
}

impl Visitor<()> for Generator<'_> {
    fn visit_null(&mut self) {
        self.out.push_str("null");
    }

    fn visit_bool(&mut self, b: bool) {
        self.out.push_str(if b { "true" } else { "false" });
    }

    fn visit_int(&mut self, i: i128) {
        write!(self.out, "{i}").unwrap();
    }

    fn visit_float(&mut self, f: f64) {
        let mut buf = dtoa::Buffer::new();
        self.out.push_str(buf.format(f));
    }

    fn visit_str(&mut self, s: &str) {
        self.write_escaped_str(s);
    }

    fn visit_array(&mut self, a: &[Value]) {
        self.write_container('[', ']', a.iter(), |gen, v| {
            v.apply_visitor(gen);
        });
    }

    fn visit_object(&mut self, o: &indexmap::IndexMap<KeyStr, Value>) {
        self.write_container('{', '}', o.iter(), |gen, (k, v)| {
            gen.write_escaped_str(k);
            gen.out.push(':');
            if gen.options.pretty {
                gen.out.push(' ');
            }
            v.apply_visitor(gen);
        });
    }
}
