//! Legacy byte-encoding conversion backed by the platform `iconv(3)`
//! interface.
//!
//! A [`Converter`] owns one open conversion descriptor for a fixed
//! `(from, to)` encoding pair. Descriptors carry mutable shift state, so a
//! converter must not be shared between threads; moving it to another thread
//! is fine.

use std::ffi::CString;
use std::ptr;

use kitbag_core::bug;
use libc::{c_char, size_t, E2BIG, EILSEQ, EINVAL};
use thiserror::Error;

mod ffi {
    use libc::{c_char, c_int, size_t};

    /// Opaque descriptor type owned by the C library.
    pub(super) enum IconvDescriptor {}

    extern "C" {
        pub(super) fn iconv_open(
            tocode: *const c_char,
            fromcode: *const c_char,
        ) -> *mut IconvDescriptor;
        pub(super) fn iconv(
            cd: *mut IconvDescriptor,
            inbuf: *mut *mut c_char,
            inbytesleft: *mut size_t,
            outbuf: *mut *mut c_char,
            outbytesleft: *mut size_t,
        ) -> size_t;
        pub(super) fn iconv_close(cd: *mut IconvDescriptor) -> c_int;
    }
}

/// Failures reported by the conversion kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IconvError {
    /// The converter was opened on an encoding pair the backend refuses.
    #[error("conversion descriptor is invalid")]
    InvalidCd,
    /// The input contains a byte sequence that is invalid in the source
    /// encoding.
    #[error("invalid multibyte sequence")]
    InvalidMbSeq,
    /// The input ends in the middle of a multibyte sequence.
    #[error("incomplete multibyte sequence")]
    IncompleteMbSeq,
    /// The converted length is not a multiple of the target unit size.
    #[error("converted length does not fit the target unit size")]
    BadRv,
}

/// Shorthand for results of this module.
pub type IconvResult<T> = Result<T, IconvError>;

/// Output buffer grow step when the backend reports it ran out of room.
const GROW_STEP: usize = 16;

/// The `(iconv_t)-1` sentinel returned by a failed `iconv_open`.
fn invalid_descriptor() -> *mut ffi::IconvDescriptor {
    usize::MAX as *mut ffi::IconvDescriptor
}

fn errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

// Code names for the UTF forms. UTF-16/32 must spell out the host
// endianness, otherwise iconv prepends a BOM to every conversion.
const UTF8_NAME: &str = "UTF-8";
#[cfg(target_endian = "little")]
const UTF16_NAME: &str = "UTF-16LE";
#[cfg(target_endian = "big")]
const UTF16_NAME: &str = "UTF-16BE";
#[cfg(target_endian = "little")]
const UTF32_NAME: &str = "UTF-32LE";
#[cfg(target_endian = "big")]
const UTF32_NAME: &str = "UTF-32BE";

/// An open conversion descriptor for one `(from, to)` encoding pair.
///
/// Single-owner resource: not cloneable, moves transfer ownership and `Drop`
/// closes the descriptor. When the backend refuses the pair the converter is
/// still constructed, but every conversion fails with
/// [`IconvError::InvalidCd`].
#[derive(Debug)]
pub struct Converter {
    cd: *mut ffi::IconvDescriptor,
}

// The descriptor is only touched through &mut self, so handing the owner to
// another thread is sound even though the raw pointer is not.
unsafe impl Send for Converter {}

impl Converter {
    /// Opens a descriptor converting `from_code` into `to_code`.
    pub fn new(from_code: &str, to_code: &str) -> Self {
        let cd = match (CString::new(from_code), CString::new(to_code)) {
            (Ok(from), Ok(to)) => unsafe { ffi::iconv_open(to.as_ptr(), from.as_ptr()) },
            // An interior NUL can never name a real encoding.
            _ => invalid_descriptor(),
        };
        Self { cd }
    }

    /// Whether the backend accepted the encoding pair.
    pub fn is_valid(&self) -> bool {
        self.cd != invalid_descriptor()
    }

    /// Runs the conversion kernel over `src`, growing the output buffer
    /// whenever the backend asks for more room.
    ///
    /// The descriptor is put back into its initial shift state after every
    /// call, success or failure.
    pub fn convert(&mut self, src: &[u8]) -> IconvResult<Vec<u8>> {
        if !self.is_valid() {
            return Err(IconvError::InvalidCd);
        }
        if src.is_empty() {
            return Ok(Vec::new());
        }

        let mut dst = vec![0u8; src.len() + GROW_STEP];
        let mut inbuf = src.as_ptr().cast_mut().cast::<c_char>();
        let mut inbytesleft: size_t = src.len();
        let mut outbuf = dst.as_mut_ptr().cast::<c_char>();
        let mut outbytesleft: size_t = dst.len();

        let mut rc = unsafe {
            ffi::iconv(
                self.cd,
                &mut inbuf,
                &mut inbytesleft,
                &mut outbuf,
                &mut outbytesleft,
            )
        };
        while rc == size_t::MAX && errno() == E2BIG {
            // Resume from the position the backend already wrote to.
            let written = dst.len() - outbytesleft;
            dst.resize(dst.len() + GROW_STEP, 0);
            outbytesleft += GROW_STEP;
            outbuf = unsafe { dst.as_mut_ptr().add(written) }.cast::<c_char>();
            rc = unsafe {
                ffi::iconv(
                    self.cd,
                    &mut inbuf,
                    &mut inbytesleft,
                    &mut outbuf,
                    &mut outbytesleft,
                )
            };
        }
        // Snapshot errno before the reset call below can clobber it.
        let err = errno();

        // Restore the initial shift state for the next conversion.
        unsafe {
            ffi::iconv(
                self.cd,
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
            );
        }

        if rc == size_t::MAX {
            match err {
                EILSEQ => Err(IconvError::InvalidMbSeq),
                EINVAL => Err(IconvError::IncompleteMbSeq),
                other => bug!("unexpected errno {other} from iconv()"),
            }
        } else {
            dst.truncate(dst.len() - outbytesleft);
            Ok(dst)
        }
    }
}

impl Drop for Converter {
    fn drop(&mut self) {
        if self.is_valid() {
            unsafe { ffi::iconv_close(self.cd) };
        }
    }
}

fn bytes_to_units_u16(raw: Vec<u8>) -> IconvResult<Vec<u16>> {
    if raw.len() % 2 != 0 {
        return Err(IconvError::BadRv);
    }
    Ok(raw
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
        .collect())
}

fn bytes_to_units_u32(raw: Vec<u8>) -> IconvResult<Vec<u32>> {
    if raw.len() % 4 != 0 {
        return Err(IconvError::BadRv);
    }
    Ok(raw
        .chunks_exact(4)
        .map(|quad| u32::from_ne_bytes([quad[0], quad[1], quad[2], quad[3]]))
        .collect())
}

fn units_to_bytes_u16(src: &[u16]) -> Vec<u8> {
    src.iter().flat_map(|unit| unit.to_ne_bytes()).collect()
}

fn units_to_bytes_u32(src: &[u32]) -> Vec<u8> {
    src.iter().flat_map(|unit| unit.to_ne_bytes()).collect()
}

fn into_utf8_string(raw: Vec<u8>) -> IconvResult<String> {
    // The backend promised UTF-8 output; anything else is a short write.
    String::from_utf8(raw).map_err(|_| IconvError::BadRv)
}

/// Decodes byte strings in a named encoding into UTF-8.
#[derive(Debug)]
pub struct BytesToUtf8 {
    conv: Converter,
}

impl BytesToUtf8 {
    pub fn new(code_name: &str) -> Self {
        Self {
            conv: Converter::new(code_name, UTF8_NAME),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.conv.is_valid()
    }

    pub fn convert(&mut self, src: &[u8]) -> IconvResult<String> {
        into_utf8_string(self.conv.convert(src)?)
    }
}

/// Encodes UTF-8 into byte strings of a named encoding.
#[derive(Debug)]
pub struct Utf8ToBytes {
    conv: Converter,
}

impl Utf8ToBytes {
    pub fn new(code_name: &str) -> Self {
        Self {
            conv: Converter::new(UTF8_NAME, code_name),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.conv.is_valid()
    }

    pub fn convert(&mut self, src: &str) -> IconvResult<Vec<u8>> {
        self.conv.convert(src.as_bytes())
    }
}

/// Converts UTF-8 into host-endian UTF-16 code units.
#[derive(Debug)]
pub struct Utf8ToUtf16 {
    conv: Converter,
}

impl Utf8ToUtf16 {
    pub fn new() -> Self {
        Self {
            conv: Converter::new(UTF8_NAME, UTF16_NAME),
        }
    }

    pub fn convert(&mut self, src: &str) -> IconvResult<Vec<u16>> {
        bytes_to_units_u16(self.conv.convert(src.as_bytes())?)
    }
}

impl Default for Utf8ToUtf16 {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts host-endian UTF-16 code units into UTF-8.
#[derive(Debug)]
pub struct Utf16ToUtf8 {
    conv: Converter,
}

impl Utf16ToUtf8 {
    pub fn new() -> Self {
        Self {
            conv: Converter::new(UTF16_NAME, UTF8_NAME),
        }
    }

    pub fn convert(&mut self, src: &[u16]) -> IconvResult<String> {
        into_utf8_string(self.conv.convert(&units_to_bytes_u16(src))?)
    }
}

impl Default for Utf16ToUtf8 {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts UTF-8 into host-endian UTF-32 scalar values.
#[derive(Debug)]
pub struct Utf8ToUtf32 {
    conv: Converter,
}

impl Utf8ToUtf32 {
    pub fn new() -> Self {
        Self {
            conv: Converter::new(UTF8_NAME, UTF32_NAME),
        }
    }

    pub fn convert(&mut self, src: &str) -> IconvResult<Vec<u32>> {
        bytes_to_units_u32(self.conv.convert(src.as_bytes())?)
    }
}

impl Default for Utf8ToUtf32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts host-endian UTF-32 scalar values into UTF-8.
#[derive(Debug)]
pub struct Utf32ToUtf8 {
    conv: Converter,
}

impl Utf32ToUtf8 {
    pub fn new() -> Self {
        Self {
            conv: Converter::new(UTF32_NAME, UTF8_NAME),
        }
    }

    pub fn convert(&mut self, src: &[u32]) -> IconvResult<String> {
        into_utf8_string(self.conv.convert(&units_to_bytes_u32(src))?)
    }
}

impl Default for Utf32ToUtf8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_pair_yields_invalid_cd() {
        let mut conv = Converter::new("definitely-not-a-charset", "UTF-8");
        assert!(!conv.is_valid());
        assert_eq!(conv.convert(b"abc"), Err(IconvError::InvalidCd));
    }

    #[test]
    fn utf_pair_round_trips() {
        let text = "caf\u{e9} \u{4e2d}\u{6587}";
        let units = Utf8ToUtf16::new().convert(text).expect("to utf16");
        let back = Utf16ToUtf8::new().convert(&units).expect("to utf8");
        assert_eq!(back, text);
        // Explicit endianness suppresses the BOM.
        assert_ne!(units.first(), Some(&0xFEFF));
    }

    #[test]
    fn converter_survives_reuse_after_error() {
        let mut dec = BytesToUtf8::new("GBK");
        assert!(dec.convert(b"\xc4").is_err());
        assert_eq!(dec.convert(b"\xc4\xe3").as_deref(), Ok("\u{4f60}"));
    }
}
