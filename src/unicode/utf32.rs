//! UTF-32 is already one code unit per scalar value; this module only
//! validates that each unit is a legal scalar (spec §4.1).

use super::{is_valid_scalar, Utf32Error};

/// Validate and return the scalar at `src[0]`. Always consumes exactly one
/// code unit.
pub fn convert_one(src: &[u32]) -> Result<(u32, usize), Utf32Error> {
    let u0 = *src.first().ok_or(Utf32Error::Truncated)?;
    if is_valid_scalar(u0) {
        Ok((u0, 1))
    } else {
        Err(Utf32Error::InvalidScalar(u0))
    }
}

/// Encode `cp` as a single UTF-32 code unit.
pub fn encode_one(cp: u32, dst: &mut [u32]) -> usize {
    dst[0] = cp;
    1
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_scalar() {
        assert_eq!(convert_one(&[0x1F600]), Ok((0x1F600, 1)));
    }

    #[test]
    fn rejects_surrogate() {
        assert_eq!(
            convert_one(&[0xD800]),
            Err(Utf32Error::InvalidScalar(0xD800))
        );
    }

    #[test]
    fn rejects_above_max_scalar() {
        assert_eq!(
            convert_one(&[0x110000]),
            Err(Utf32Error::InvalidScalar(0x110000))
        );
    }

    #[test]
    fn truncated() {
        assert_eq!(convert_one(&[]), Err(Utf32Error::Truncated));
    }
}
