//! Conversion between the UTF encoding forms using only the standard library.
//!
//! UTF-8 travels as bytes or [`str`], UTF-16 as `u16` code units and UTF-32
//! as `u32` scalar values. No BOM is produced or consumed, and surrogate
//! values never appear on the UTF-32 side.

use thiserror::Error;

/// Failures while transcoding between UTF encoding forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UtfError {
    /// A byte that can never appear in well-formed UTF-8.
    #[error("invalid UTF-8 byte")]
    EncodeUtf8,
    /// The input ended in the middle of a multi-byte sequence.
    #[error("incomplete UTF-8 sequence")]
    IncompleteUtf8,
    /// A lone surrogate, or a high surrogate without its low half.
    #[error("unpaired UTF-16 surrogate")]
    InvalidUtf16,
    /// A code unit outside the Unicode scalar value range.
    #[error("invalid UTF-32 scalar value")]
    InvalidUtf32,
}

/// Shorthand for results of this module.
pub type UtfResult<T> = Result<T, UtfError>;

// One scalar value expands to at most 4 UTF-8 bytes, so conversions towards
// UTF-8 reserve the worst case up front and shrink once.
const MAX_UTF8_PER_SCALAR: usize = 4;

fn validate_utf8(src: &[u8]) -> UtfResult<&str> {
    std::str::from_utf8(src).map_err(|e| match e.error_len() {
        None => UtfError::IncompleteUtf8,
        Some(_) => UtfError::EncodeUtf8,
    })
}

/// Converts UTF-8 bytes into UTF-16 code units.
pub fn utf8_to_utf16(src: &[u8]) -> UtfResult<Vec<u16>> {
    Ok(str_to_utf16(validate_utf8(src)?))
}

/// Converts UTF-16 code units into an owned UTF-8 string.
pub fn utf16_to_utf8(src: &[u16]) -> UtfResult<String> {
    let mut dst = String::with_capacity(src.len() * MAX_UTF8_PER_SCALAR);
    for decoded in char::decode_utf16(src.iter().copied()) {
        match decoded {
            Ok(c) => dst.push(c),
            Err(_) => return Err(UtfError::InvalidUtf16),
        }
    }
    dst.shrink_to_fit();
    Ok(dst)
}

/// Converts UTF-8 bytes into UTF-32 scalar values.
pub fn utf8_to_utf32(src: &[u8]) -> UtfResult<Vec<u32>> {
    Ok(str_to_utf32(validate_utf8(src)?))
}

/// Converts UTF-32 scalar values into an owned UTF-8 string.
///
/// Surrogate code points are not scalar values and fail like any other
/// out-of-range unit.
pub fn utf32_to_utf8(src: &[u32]) -> UtfResult<String> {
    let mut dst = String::with_capacity(src.len() * MAX_UTF8_PER_SCALAR);
    for &unit in src {
        match char::from_u32(unit) {
            Some(c) => dst.push(c),
            None => return Err(UtfError::InvalidUtf32),
        }
    }
    dst.shrink_to_fit();
    Ok(dst)
}

/// Encodes an already-validated string as UTF-16 code units.
pub fn str_to_utf16(src: &str) -> Vec<u16> {
    src.encode_utf16().collect()
}

/// Encodes an already-validated string as UTF-32 scalar values.
pub fn str_to_utf32(src: &str) -> Vec<u32> {
    src.chars().map(u32::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_utf8_byte() {
        assert_eq!(utf8_to_utf16(b"\xff"), Err(UtfError::EncodeUtf8));
        assert_eq!(utf8_to_utf32(b"ab\xc0\x20"), Err(UtfError::EncodeUtf8));
    }

    #[test]
    fn rejects_truncated_utf8_sequence() {
        // First two bytes of U+4F60.
        assert_eq!(utf8_to_utf16(b"\xe4\xbd"), Err(UtfError::IncompleteUtf8));
        assert_eq!(utf8_to_utf32(b"\xe4\xbd"), Err(UtfError::IncompleteUtf8));
    }

    #[test]
    fn rejects_unpaired_surrogates() {
        assert_eq!(utf16_to_utf8(&[0xD800]), Err(UtfError::InvalidUtf16));
        // High surrogate followed by a non-surrogate.
        assert_eq!(utf16_to_utf8(&[0xD83D, 0x0041]), Err(UtfError::InvalidUtf16));
    }

    #[test]
    fn rejects_invalid_scalar_values() {
        assert_eq!(utf32_to_utf8(&[0x110000]), Err(UtfError::InvalidUtf32));
        assert_eq!(utf32_to_utf8(&[0xD800]), Err(UtfError::InvalidUtf32));
    }

    #[test]
    fn empty_input_converts_to_empty_output() {
        assert_eq!(utf8_to_utf16(b""), Ok(Vec::new()));
        assert_eq!(utf16_to_utf8(&[]), Ok(String::new()));
        assert_eq!(utf8_to_utf32(b""), Ok(Vec::new()));
        assert_eq!(utf32_to_utf8(&[]), Ok(String::new()));
    }
}
