use std::collections::VecDeque;

use super::JsonFeeder;
use crate::unicode::{utf16, utf32, utf8, Encoding, TranscodeError, Utf16Error, Utf32Error};

/// Wraps any byte-oriented [`JsonFeeder`] and normalizes its declared source
/// encoding to UTF-8 before the bytes reach the grammar machine in
/// [`crate::parser`], so the parser itself only ever has to deal with one
/// encoding (spec §4.1, component C1).
///
/// The inner feeder is expected to hand out the raw bytes of the source
/// text (including any byte-order mark the caller has not already
/// stripped); construct this feeder with the encoding already resolved via
/// [`crate::unicode::detect_bom`] or [`crate::unicode::detect_encoding`].
pub struct TranscodingFeeder<F> {
    inner: F,
    encoding: Encoding,
    raw: Vec<u8>,
    out: VecDeque<u8>,
    error: Option<TranscodeError>,
}

impl<F: JsonFeeder> TranscodingFeeder<F> {
    /// Create a new transcoding feeder. `encoding` is the source encoding
    /// the bytes `inner` yields are in; any byte-order mark must already
    /// have been consumed by the caller.
    pub fn new(inner: F, encoding: Encoding) -> Self {
        Self {
            inner,
            encoding,
            raw: Vec::new(),
            out: VecDeque::new(),
            error: None,
        }
    }

    /// Pull whatever the inner feeder currently has and decode as many
    /// complete scalar values as the buffered bytes allow.
    fn fill(&mut self) {
        if self.error.is_some() {
            return;
        }
        while self.inner.has_input() {
            if let Some(b) = self.inner.next_input() {
                self.raw.push(b);
            }
        }
        loop {
            if self.raw.is_empty() {
                break;
            }
            match decode_one(self.encoding, &self.raw) {
                Ok((cp, consumed)) => {
                    let mut buf = [0u8; 4];
                    let n = utf8::encode_one(cp, &mut buf);
                    self.out.extend(&buf[..n]);
                    self.raw.drain(..consumed);
                }
                Err(e) if e.is_truncated() => {
                    // Need more bytes from the inner feeder before this
                    // scalar can be completed.
                    if self.inner.is_done() {
                        self.error = Some(e.into());
                    }
                    break;
                }
                Err(e) => {
                    self.error = Some(e.into());
                    break;
                }
            }
        }
    }
}

impl<F: JsonFeeder> JsonFeeder for TranscodingFeeder<F> {
    fn has_input(&self) -> bool {
        !self.out.is_empty() || !self.raw.is_empty() || self.inner.has_input()
    }

    fn is_done(&self) -> bool {
        self.out.is_empty() && (self.error.is_some() || (self.inner.is_done() && self.raw.is_empty()))
    }

    fn next_input(&mut self) -> Option<u8> {
        if self.out.is_empty() {
            self.fill();
        }
        self.out.pop_front()
    }

    fn take_error(&mut self) -> Option<TranscodeError> {
        self.error.take()
    }
}

/// Local error shape used only to decide whether a decode failure means
/// "wait for more bytes" or "this is malformed" before converting into the
/// public [`TranscodeError`].
enum DecodeError {
    Truncated,
    Malformed(TranscodeError),
}

impl DecodeError {
    fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated)
    }
}

impl From<DecodeError> for TranscodeError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::Truncated => Utf16Error::Truncated.into(),
            DecodeError::Malformed(e) => e,
        }
    }
}

fn decode_one(encoding: Encoding, raw: &[u8]) -> Result<(u32, usize), DecodeError> {
    match encoding {
        Encoding::Utf8 => utf8::convert_one(raw).map_err(|e| match e {
            crate::unicode::Utf8Error::Truncated => DecodeError::Truncated,
            e => DecodeError::Malformed(e.into()),
        }),
        Encoding::Utf16Le => decode_utf16(raw, u16::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(raw, u16::from_be_bytes),
        Encoding::Utf32Le => decode_utf32(raw, u32::from_le_bytes),
        Encoding::Utf32Be => decode_utf32(raw, u32::from_be_bytes),
    }
}

fn decode_utf16(raw: &[u8], from_bytes: fn([u8; 2]) -> u16) -> Result<(u32, usize), DecodeError> {
    if raw.len() < 2 {
        return Err(DecodeError::Truncated);
    }
    let u0 = from_bytes([raw[0], raw[1]]);
    let units = if (0xD800..=0xDBFF).contains(&u0) {
        if raw.len() < 4 {
            return Err(DecodeError::Truncated);
        }
        vec![u0, from_bytes([raw[2], raw[3]])]
    } else {
        vec![u0]
    };
    utf16::convert_one(&units)
        .map(|(cp, n)| (cp, n * 2))
        .map_err(|e| match e {
            Utf16Error::Truncated => DecodeError::Truncated,
            e => DecodeError::Malformed(e.into()),
        })
}

fn decode_utf32(raw: &[u8], from_bytes: fn([u8; 4]) -> u32) -> Result<(u32, usize), DecodeError> {
    if raw.len() < 4 {
        return Err(DecodeError::Truncated);
    }
    let u0 = from_bytes([raw[0], raw[1], raw[2], raw[3]]);
    utf32::convert_one(&[u0])
        .map(|(cp, n)| (cp, n * 4))
        .map_err(|e| match e {
            Utf32Error::Truncated => DecodeError::Truncated,
            e => DecodeError::Malformed(e.into()),
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::feeder::SliceJsonFeeder;

    fn drain<F: JsonFeeder>(mut f: F) -> (Vec<u8>, Option<TranscodeError>) {
        let mut out = Vec::new();
        loop {
            if let Some(b) = f.next_input() {
                out.push(b);
            } else if f.is_done() {
                break;
            } else {
                break;
            }
        }
        (out, f.take_error())
    }

    #[test]
    fn utf16_le_passthrough_ascii() {
        let src: Vec<u8> = "{\"a\":1}"
            .encode_utf16()
            .flat_map(|u| u.to_le_bytes())
            .collect();
        let feeder = TranscodingFeeder::new(SliceJsonFeeder::new(&src), Encoding::Utf16Le);
        let (out, err) = drain(feeder);
        assert_eq!(out, b"{\"a\":1}");
        assert!(err.is_none());
    }

    #[test]
    fn utf16_be_surrogate_pair_round_trips_to_utf8() {
        let mut units = Vec::new();
        units.extend("\"".encode_utf16());
        units.push(0xD83D);
        units.push(0xDE00);
        units.extend("\"".encode_utf16());
        let src: Vec<u8> = units.into_iter().flat_map(|u| u.to_be_bytes()).collect();
        let feeder = TranscodingFeeder::new(SliceJsonFeeder::new(&src), Encoding::Utf16Be);
        let (out, err) = drain(feeder);
        assert!(err.is_none());
        assert_eq!(std::str::from_utf8(&out).unwrap(), "\"\u{1F600}\"");
    }

    #[test]
    fn utf32_le_rejects_surrogate() {
        let src: Vec<u8> = 0xD800u32.to_le_bytes().to_vec();
        let feeder = TranscodingFeeder::new(SliceJsonFeeder::new(&src), Encoding::Utf32Le);
        let (_out, err) = drain(feeder);
        assert!(matches!(err, Some(TranscodeError::Utf32(_))));
    }
}
