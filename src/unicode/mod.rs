//! Transcoding between the Unicode encodings a JSON text may arrive in and
//! the UTF-8 the grammar machine in [`crate::parser`] consumes (spec §4.1,
//! component C1).
//!
//! JSON text may be encoded in UTF-8, UTF-16 (either byte order) or UTF-32
//! (either byte order). [`detect_bom`] recognizes an explicit byte-order
//! mark; [`detect_encoding`] falls back to the zero-byte-pattern heuristic of
//! RFC 7159 §3 when no BOM is present. The per-encoding `convert_one` /
//! `encode_one` pairs do the actual scalar-value transcoding and are grouped
//! one submodule per encoding, mirroring the table-driven style of the
//! ASCII/state tables in [`crate::parser`].

pub mod utf16;
pub mod utf32;
pub mod utf8;

use thiserror::Error;

/// The largest Unicode scalar value.
pub const MAX_SCALAR: u32 = 0x10FFFF;

/// `true` if `cp` is a Unicode scalar value: not a surrogate and not above
/// [`MAX_SCALAR`]. Noncharacters (e.g. U+FFFE, U+FFFF) are scalar values and
/// are accepted; spec §4.1 only excludes surrogates and out-of-range code
/// points.
pub fn is_valid_scalar(cp: u32) -> bool {
    cp <= MAX_SCALAR && !(0xD800..=0xDFFF).contains(&cp)
}

/// An encoding a JSON text may declare or be detected in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    /// The width, in bytes, of this encoding's fixed unit (1 for UTF-8 byte,
    /// 2 for UTF-16 code unit, 4 for UTF-32 code unit). UTF-8 is variable
    /// width overall, but each transcoder pulls input one byte at a time.
    pub fn unit_width(&self) -> usize {
        match self {
            Encoding::Utf8 => 1,
            Encoding::Utf16Le | Encoding::Utf16Be => 2,
            Encoding::Utf32Le | Encoding::Utf32Be => 4,
        }
    }
}

/// Recognize a byte-order mark at the start of `src`. Returns the encoding
/// it declares and the number of bytes the mark occupies, or `None` if `src`
/// does not start with one of the five standard BOMs.
///
/// Checked longest-prefix-first: the UTF-32LE BOM (`FF FE 00 00`) shares its
/// first two bytes with the UTF-16LE BOM (`FF FE`), so UTF-32 must be tried
/// before UTF-16.
pub fn detect_bom(src: &[u8]) -> Option<(Encoding, usize)> {
    if src.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        Some((Encoding::Utf32Be, 4))
    } else if src.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
        Some((Encoding::Utf32Le, 4))
    } else if src.starts_with(&[0xEF, 0xBB, 0xBF]) {
        Some((Encoding::Utf8, 3))
    } else if src.starts_with(&[0xFE, 0xFF]) {
        Some((Encoding::Utf16Be, 2))
    } else if src.starts_with(&[0xFF, 0xFE]) {
        Some((Encoding::Utf16Le, 2))
    } else {
        None
    }
}

/// Guess the encoding of a BOM-less JSON text from the zero-byte pattern of
/// its first four bytes, per RFC 7159 §3. Every legal JSON text starts with
/// an ASCII structural character or digit, so the position of embedded zero
/// bytes among the first four reveals the unit width and byte order.
///
/// Returns `None` if fewer than four bytes are available or the pattern
/// matches none of the four cases (the text is malformed regardless of
/// encoding).
pub fn detect_encoding(src: &[u8]) -> Option<Encoding> {
    if src.len() < 4 {
        return None;
    }
    match (src[0] == 0, src[1] == 0, src[2] == 0, src[3] == 0) {
        (false, true, false, true) => Some(Encoding::Utf16Le),
        (true, false, true, false) => Some(Encoding::Utf16Be),
        (false, true, true, true) => Some(Encoding::Utf32Le),
        (true, true, true, false) => Some(Encoding::Utf32Be),
        (false, false, false, false) => Some(Encoding::Utf8),
        _ => None,
    }
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Utf8Error {
    #[error("truncated UTF-8 sequence")]
    Truncated,
    #[error("malformed UTF-8 sequence")]
    Malformed,
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Utf16Error {
    #[error("truncated UTF-16 sequence")]
    Truncated,
    #[error("unpaired UTF-16 surrogate")]
    UnpairedSurrogate,
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Utf32Error {
    #[error("truncated UTF-32 sequence")]
    Truncated,
    #[error("{0:#x} is not a valid Unicode scalar value")]
    InvalidScalar(u32),
}

/// Any failure that can occur while normalizing a source encoding to UTF-8.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TranscodeError {
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
    #[error(transparent)]
    Utf16(#[from] Utf16Error),
    #[error(transparent)]
    Utf32(#[from] Utf32Error),
    #[error("declared encoding does not match the byte-order mark found in the input")]
    BomMismatch,
}
