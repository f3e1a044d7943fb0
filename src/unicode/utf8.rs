//! Validating and unchecked conversion between UTF-8 byte sequences and
//! Unicode scalar values, per the bit-exact table in spec §4.1.

use super::{Utf8Error, MAX_SCALAR};

/// Trailing-byte range for one continuation byte.
type TrailRange = (u8, u8);

/// Decode one scalar value starting at `src[0]`, validating every trailing
/// byte against the ranges the leading byte implies. Returns the scalar and
/// the number of bytes consumed.
pub fn convert_one(src: &[u8]) -> Result<(u32, usize), Utf8Error> {
    let b0 = *src.first().ok_or(Utf8Error::Truncated)?;
    match b0 {
        0x00..=0x7F => Ok((b0 as u32, 1)),
        0xC2..=0xDF => decode_trailing(src, &[(0x80, 0xBF)], (b0 & 0x1F) as u32),
        0xE0 => decode_trailing(src, &[(0xA0, 0xBF), (0x80, 0xBF)], (b0 & 0x0F) as u32),
        0xE1..=0xEC => decode_trailing(src, &[(0x80, 0xBF), (0x80, 0xBF)], (b0 & 0x0F) as u32),
        // 0xED leads into the surrogate range; restricting the first trail
        // byte to 0x80..=0x9F rejects D800..DFFF outright (spec §4.1 table).
        0xED => decode_trailing(src, &[(0x80, 0x9F), (0x80, 0xBF)], (b0 & 0x0F) as u32),
        0xEE..=0xEF => decode_trailing(src, &[(0x80, 0xBF), (0x80, 0xBF)], (b0 & 0x0F) as u32),
        0xF0 => decode_trailing(
            src,
            &[(0x90, 0xBF), (0x80, 0xBF), (0x80, 0xBF)],
            (b0 & 0x07) as u32,
        ),
        0xF1..=0xF3 => decode_trailing(
            src,
            &[(0x80, 0xBF), (0x80, 0xBF), (0x80, 0xBF)],
            (b0 & 0x07) as u32,
        ),
        // 0xF4 leads into 100000..10FFFF; restricting the first trail byte to
        // 0x80..=0x8F rejects scalars above U+10FFFF (spec §4.1 table).
        0xF4 => decode_trailing(
            src,
            &[(0x80, 0x8F), (0x80, 0xBF), (0x80, 0xBF)],
            (b0 & 0x07) as u32,
        ),
        0x80..=0xC1 | 0xF5..=0xFF => Err(Utf8Error::Malformed),
    }
}

fn decode_trailing(
    src: &[u8],
    ranges: &[TrailRange],
    lead_bits: u32,
) -> Result<(u32, usize), Utf8Error> {
    let n = ranges.len();
    if src.len() < n + 1 {
        return Err(Utf8Error::Truncated);
    }
    let mut cp = lead_bits;
    for (i, (lo, hi)) in ranges.iter().enumerate() {
        let b = src[i + 1];
        if b < *lo || b > *hi {
            return Err(Utf8Error::Malformed);
        }
        cp = (cp << 6) | (b & 0x3F) as u32;
    }
    Ok((cp, n + 1))
}

/// Decode one scalar value without validating trailing bytes. The caller
/// must already trust `src` (e.g. it was produced by [`encode_one`]).
/// Undefined results (not undefined behavior) if `src` is malformed.
pub fn convert_one_unchecked(src: &[u8]) -> (u32, usize) {
    let b0 = src[0];
    let len = match b0 {
        0x00..=0x7F => return (b0 as u32, 1),
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    };
    let lead_mask: u8 = match len {
        2 => 0x1F,
        3 => 0x0F,
        _ => 0x07,
    };
    let mut cp = (b0 & lead_mask) as u32;
    for b in &src[1..len] {
        cp = (cp << 6) | (b & 0x3F) as u32;
    }
    (cp, len)
}

/// Encode `cp` as UTF-8 into `dst`, returning the number of bytes written.
/// `dst` must have room for at least 4 bytes.
pub fn encode_one(cp: u32, dst: &mut [u8]) -> usize {
    debug_assert!(cp <= MAX_SCALAR);
    if cp < 0x80 {
        dst[0] = cp as u8;
        1
    } else if cp < 0x800 {
        dst[0] = 0xC0 | (cp >> 6) as u8;
        dst[1] = 0x80 | (cp & 0x3F) as u8;
        2
    } else if cp < 0x10000 {
        dst[0] = 0xE0 | (cp >> 12) as u8;
        dst[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
        dst[2] = 0x80 | (cp & 0x3F) as u8;
        3
    } else {
        dst[0] = 0xF0 | (cp >> 18) as u8;
        dst[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
        dst[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
        dst[3] = 0x80 | (cp & 0x3F) as u8;
        4
    }
}
