//! Conversion between UTF-16 code units (already in host byte order) and
//! Unicode scalar values, including surrogate pairing.

use super::Utf16Error;

const HIGH_SURROGATE: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATE: std::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

/// Decode one scalar value starting at `src[0]`, pairing a high surrogate
/// with the following low surrogate if necessary. Returns the scalar and the
/// number of code units consumed (1 or 2).
pub fn convert_one(src: &[u16]) -> Result<(u32, usize), Utf16Error> {
    let u0 = *src.first().ok_or(Utf16Error::Truncated)?;
    if HIGH_SURROGATE.contains(&u0) {
        let u1 = *src.get(1).ok_or(Utf16Error::Truncated)?;
        if !LOW_SURROGATE.contains(&u1) {
            return Err(Utf16Error::UnpairedSurrogate);
        }
        let cp = 0x10000
            + ((u0 as u32 - 0xD800) << 10)
            + (u1 as u32 - 0xDC00);
        Ok((cp, 2))
    } else if LOW_SURROGATE.contains(&u0) {
        Err(Utf16Error::UnpairedSurrogate)
    } else {
        Ok((u0 as u32, 1))
    }
}

/// Encode `cp` as one or two UTF-16 code units into `dst`, returning the
/// number of units written. `dst` must have room for at least 2 units.
pub fn encode_one(cp: u32, dst: &mut [u16]) -> usize {
    if cp < 0x10000 {
        dst[0] = cp as u16;
        1
    } else {
        let v = cp - 0x10000;
        dst[0] = 0xD800 + (v >> 10) as u16;
        dst[1] = 0xDC00 + (v & 0x3FF) as u16;
        2
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bmp_scalar() {
        assert_eq!(convert_one(&[0x0041]), Ok((0x41, 1)));
    }

    #[test]
    fn surrogate_pair() {
        // U+1F600 GRINNING FACE = D83D DE00
        assert_eq!(convert_one(&[0xD83D, 0xDE00]), Ok((0x1F600, 2)));
    }

    #[test]
    fn unpaired_high_surrogate() {
        assert_eq!(
            convert_one(&[0xD83D, 0x0041]),
            Err(Utf16Error::UnpairedSurrogate)
        );
    }

    #[test]
    fn lone_low_surrogate() {
        assert_eq!(convert_one(&[0xDE00]), Err(Utf16Error::UnpairedSurrogate));
    }

    #[test]
    fn truncated_high_surrogate() {
        assert_eq!(convert_one(&[0xD83D]), Err(Utf16Error::Truncated));
    }

    #[test]
    fn round_trip() {
        let mut buf = [0u16; 2];
        for cp in [0x41u32, 0x20AC, 0x1F600, 0x10FFFF] {
            let n = encode_one(cp, &mut buf);
            assert_eq!(convert_one(&buf[..n]), Ok((cp, n)));
        }
    }
}
