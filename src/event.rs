/// The reason a parse failed, carried by [`JsonEvent::Error`].
///
/// This mirrors [`crate::parser::ParserError`] but is a plain data payload
/// rather than an error propagated up the call stack, since the sink is
/// expected to receive failures as events, not exceptions (spec §7).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The JSON text contains an illegal byte (e.g. a non-whitespace control
    /// character)
    IllegalInput,

    /// The parsed text is not valid JSON
    SyntaxError,

    /// A byte sequence could not be transcoded from the declared or detected
    /// source encoding (see [`crate::unicode`]).
    EncodingError,

    /// The configured maximum nesting depth was exceeded.
    NestingTooDeep,

    /// [`SemanticActions::is_cancelled`](crate::actions::SemanticActions::is_cancelled)
    /// returned `true`.
    Cancelled,

    /// There is nothing more to parse. The feeder is done and does not provide
    /// more input. Either the JSON text ended prematurely or
    /// [`JsonParser::next_event()`] was called too many times (i.e. after the
    /// end of a valid JSON text was reached).
    NoMoreInput,

    /// An object literal repeated a key under
    /// [`DuplicateKeyPolicy::Error`](crate::actions::DuplicateKeyPolicy::Error).
    DuplicateKey,
}

/// All possible JSON events returned by [`JsonParser::next_event()`](crate::JsonParser::next_event())
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JsonEvent {
    /// The JSON text contains a syntax or encoding error.
    Error(ParseErrorKind),

    /// The JSON parser needs more input before the next event can be returned.
    /// Invoke the parser's feeder to give it more input.
    NeedMoreInput,

    /// The start of a JSON object.
    StartObject,

    /// The end of a JSON object.
    EndObject,

    /// The start of a JSON array.
    StartArray,

    /// The end of a JSON array.
    EndArray,

    /// A field name. Call [JsonParser::current_str()](crate::JsonParser::current_str())
    /// to get the name.
    FieldName,

    /// A string value. Call [JsonParser::current_str()](crate::JsonParser::current_str())
    /// to get the value.
    ValueString,

    /// A numeric literal with no `.` and no exponent. Call
    /// [JsonParser::current_int()](crate::JsonParser::current_int()) to get the value.
    ValueInt,

    /// A numeric literal with a fractional part but no exponent. Call
    /// [JsonParser::current_float()](crate::JsonParser::current_float()) to get the value.
    ValueFloat,

    /// A numeric literal written in scientific notation. Call
    /// [JsonParser::current_float()](crate::JsonParser::current_float()) to get the value.
    ValueScientific,

    /// The boolean value `true`.
    ValueTrue,

    /// The boolean value `false`.
    ValueFalse,

    /// A `null` value.
    ValueNull,

    /// The end of the JSON text
    Eof,
}

impl JsonEvent {
    /// `true` if this event carries one of the three numeric classifications.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            JsonEvent::ValueInt | JsonEvent::ValueFloat | JsonEvent::ValueScientific
        )
    }

    /// The [`NumberClass`] this event carries, if it is one of the three
    /// numeric variants.
    pub fn number_class(&self) -> Option<NumberClass> {
        match self {
            JsonEvent::ValueInt => Some(NumberClass::Integer),
            JsonEvent::ValueFloat => Some(NumberClass::Decimal),
            JsonEvent::ValueScientific => Some(NumberClass::Scientific),
            _ => None,
        }
    }
}

/// The classification of a scanned numeric literal (spec §3 "Number descriptor").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberClass {
    /// No `.`, no exponent.
    Integer,
    /// Has `.`, no exponent.
    Decimal,
    /// Has an exponent (`e`/`E`).
    Scientific,
}
