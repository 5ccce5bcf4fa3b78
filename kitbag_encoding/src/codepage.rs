//! Byte-encoding conversion through the Windows code-page backend.
//!
//! Every operation does a sizing dry run first, then the real conversion
//! into an exactly-sized buffer; the backend disagreeing with its own
//! prediction is reported as [`CodePageError::BadWrittenSize`].

use std::ptr;

use thiserror::Error;

/// Numeric identifier of a legacy byte encoding.
pub type CodePage = u32;

/// The UTF-8 pseudo code page.
pub const CP_UTF8: CodePage = 65001;

#[allow(non_snake_case)]
mod ffi {
    #[link(name = "kernel32")]
    extern "system" {
        pub(super) fn MultiByteToWideChar(
            code_page: u32,
            flags: u32,
            mb_str: *const u8,
            mb_len: i32,
            wide_str: *mut u16,
            wide_len: i32,
        ) -> i32;
        pub(super) fn WideCharToMultiByte(
            code_page: u32,
            flags: u32,
            wide_str: *const u16,
            wide_len: i32,
            mb_str: *mut u8,
            mb_len: i32,
            default_char: *const u8,
            used_default_char: *mut i32,
        ) -> i32;
    }
}

/// Failures reported by the code-page backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodePageError {
    /// The input length exceeds what the backend can measure.
    #[error("input is too long for the backend")]
    TooLargeLength,
    /// The backend refused to size the conversion; the input is malformed or
    /// the code page is unknown.
    #[error("backend refused to size the conversion")]
    NoDesiredSize,
    /// The backend wrote a different number of units than it predicted.
    #[error("backend wrote an unexpected number of units")]
    BadWrittenSize,
}

/// Shorthand for results of this module.
pub type CodePageResult<T> = Result<T, CodePageError>;

/// Decodes a byte string of `code_page` into wide characters.
pub fn to_wide(src: &[u8], code_page: CodePage) -> CodePageResult<Vec<u16>> {
    if src.is_empty() {
        return Ok(Vec::new());
    }
    let src_len = i32::try_from(src.len()).map_err(|_| CodePageError::TooLargeLength)?;

    let desired = unsafe {
        ffi::MultiByteToWideChar(code_page, 0, src.as_ptr(), src_len, ptr::null_mut(), 0)
    };
    if desired <= 0 {
        return Err(CodePageError::NoDesiredSize);
    }
    let mut dst = vec![0u16; desired as usize];
    let written = unsafe {
        ffi::MultiByteToWideChar(code_page, 0, src.as_ptr(), src_len, dst.as_mut_ptr(), desired)
    };
    if written != desired {
        return Err(CodePageError::BadWrittenSize);
    }
    Ok(dst)
}

/// Encodes wide characters into a byte string of `code_page`.
pub fn to_bytes(src: &[u16], code_page: CodePage) -> CodePageResult<Vec<u8>> {
    if src.is_empty() {
        return Ok(Vec::new());
    }
    let src_len = i32::try_from(src.len()).map_err(|_| CodePageError::TooLargeLength)?;

    let desired = unsafe {
        ffi::WideCharToMultiByte(
            code_page,
            0,
            src.as_ptr(),
            src_len,
            ptr::null_mut(),
            0,
            ptr::null(),
            ptr::null_mut(),
        )
    };
    if desired <= 0 {
        return Err(CodePageError::NoDesiredSize);
    }
    let mut dst = vec![0u8; desired as usize];
    let written = unsafe {
        ffi::WideCharToMultiByte(
            code_page,
            0,
            src.as_ptr(),
            src_len,
            dst.as_mut_ptr(),
            desired,
            ptr::null(),
            ptr::null_mut(),
        )
    };
    if written != desired {
        return Err(CodePageError::BadWrittenSize);
    }
    Ok(dst)
}

/// Re-encodes a byte string from one code page into another, pivoting
/// through wide characters.
pub fn convert(src: &[u8], from: CodePage, to: CodePage) -> CodePageResult<Vec<u8>> {
    to_bytes(&to_wide(src, from)?, to)
}

/// Encodes UTF-8 text as wide characters.
pub fn utf8_to_wide(src: &str) -> CodePageResult<Vec<u16>> {
    to_wide(src.as_bytes(), CP_UTF8)
}

/// Decodes wide characters into UTF-8 text.
pub fn wide_to_utf8(src: &[u16]) -> CodePageResult<String> {
    let raw = to_bytes(src, CP_UTF8)?;
    String::from_utf8(raw).map_err(|_| CodePageError::BadWrittenSize)
}

/// Decodes a byte string of `code_page` into UTF-8 text.
pub fn bytes_to_utf8(src: &[u8], code_page: CodePage) -> CodePageResult<String> {
    wide_to_utf8(&to_wide(src, code_page)?)
}

/// Encodes UTF-8 text as a byte string of `code_page`.
pub fn utf8_to_bytes(src: &str, code_page: CodePage) -> CodePageResult<Vec<u8>> {
    to_bytes(&utf8_to_wide(src)?, code_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_round_trips_through_wide() {
        let text = "caf\u{e9} \u{4e2d}\u{6587}";
        let wide = utf8_to_wide(text).expect("to wide");
        assert_eq!(wide_to_utf8(&wide).as_deref(), Ok(text));
    }

    #[test]
    fn unknown_code_page_is_rejected() {
        assert_eq!(to_wide(b"abc", 4_000_000_000), Err(CodePageError::NoDesiredSize));
    }
}
