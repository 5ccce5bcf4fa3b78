//! Python-codec-style encoding names resolved onto the platform backend.
//!
//! User-facing names are lowercased and looked up in the alias table; a miss
//! means the name is used verbatim as its own canonical form. The canonical
//! name then maps to the identifier of whichever backend this target has:
//! an iconv charset string on unix, a code-page number on windows.
//!
//! The conversion fronts are constructed infallibly; resolving the name is
//! deferred to the first conversion call, which reports
//! [`PycodecError::NoSuchName`] for names the backend does not know.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use thiserror::Error;

pub use crate::utf::{utf16_to_utf8, utf32_to_utf8, utf8_to_utf16, utf8_to_utf32};

/// Failures of the name-resolving conversion façade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PycodecError {
    /// The encoding name does not resolve to anything the backend knows.
    #[error("unknown encoding name")]
    NoSuchName,
    /// The backend rejected the conversion itself.
    #[cfg(unix)]
    #[error(transparent)]
    Backend(#[from] crate::iconv::IconvError),
    /// The backend rejected the conversion itself.
    #[cfg(windows)]
    #[error(transparent)]
    Backend(#[from] crate::codepage::CodePageError),
}

/// Shorthand for results of this module.
pub type PycodecResult<T> = Result<T, PycodecError>;

/// Python-style aliases mapped to their canonical registry names.
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("646", "ascii"),
        ("us-ascii", "ascii"),
        ("big5-tw", "big5"),
        ("csbig5", "big5"),
        ("big5-hkscs", "big5hkscs"),
        ("hkscs", "big5hkscs"),
        ("ibm037", "cp037"),
        ("ibm039", "cp037"),
        ("273", "cp273"),
        ("ibm273", "cp273"),
        ("csibm273", "cp273"),
        ("ebcdic-cp-he", "cp424"),
        ("ibm424", "cp424"),
        ("437", "cp437"),
        ("ibm437", "cp437"),
        ("ebcdic-cp-be", "cp500"),
        ("ebcdic-cp-ch", "cp500"),
        ("ibm500", "cp500"),
        ("ibm775", "cp775"),
        ("850", "cp850"),
        ("ibm850", "cp850"),
        ("852", "cp852"),
        ("ibm852", "cp852"),
        ("855", "cp855"),
        ("ibm855", "cp855"),
        ("857", "cp857"),
        ("ibm857", "cp857"),
        ("858", "cp858"),
        ("ibm858", "cp858"),
        ("860", "cp860"),
        ("ibm860", "cp860"),
        ("861", "cp861"),
        ("cp-is", "cp861"),
        ("ibm861", "cp861"),
        ("862", "cp862"),
        ("ibm862", "cp862"),
        ("863", "cp863"),
        ("ibm863", "cp863"),
        ("ibm864", "cp864"),
        ("865", "cp865"),
        ("ibm865", "cp865"),
        ("866", "cp866"),
        ("ibm866", "cp866"),
        ("869", "cp869"),
        ("cp-gr", "cp869"),
        ("ibm869", "cp869"),
        ("932", "cp932"),
        ("ms932", "cp932"),
        ("mskanji", "cp932"),
        ("ms-kanji", "cp932"),
        ("windows-31j", "cp932"),
        ("949", "cp949"),
        ("ms949", "cp949"),
        ("uhc", "cp949"),
        ("950", "cp950"),
        ("ms950", "cp950"),
        ("ibm1026", "cp1026"),
        ("1125", "cp1125"),
        ("ibm1125", "cp1125"),
        ("cp866u", "cp1125"),
        ("ruscii", "cp1125"),
        ("ibm1140", "cp1140"),
        ("windows-1250", "cp1250"),
        ("windows-1251", "cp1251"),
        ("windows-1252", "cp1252"),
        ("windows-1253", "cp1253"),
        ("windows-1254", "cp1254"),
        ("windows-1255", "cp1255"),
        ("windows-1256", "cp1256"),
        ("windows-1257", "cp1257"),
        ("windows-1258", "cp1258"),
        ("eucjp", "euc_jp"),
        ("ujis", "euc_jp"),
        ("u-jis", "euc_jp"),
        ("jisx0213", "euc_jis_2004"),
        ("eucjis2004", "euc_jis_2004"),
        ("eucjisx0213", "euc_jisx0213"),
        ("euckr", "euc_kr"),
        ("korean", "euc_kr"),
        ("ksc5601", "euc_kr"),
        ("ks_c-5601", "euc_kr"),
        ("ks_c-5601-1987", "euc_kr"),
        ("ksx1001", "euc_kr"),
        ("ks_x-1001", "euc_kr"),
        ("chinese", "gb2312"),
        ("csiso58gb231280", "gb2312"),
        ("euc-cn", "gb2312"),
        ("euccn", "gb2312"),
        ("eucgb2312-cn", "gb2312"),
        ("gb2312-1980", "gb2312"),
        ("gb2312-80", "gb2312"),
        ("iso-ir-58", "gb2312"),
        ("936", "gbk"),
        ("cp936", "gbk"),
        ("ms936", "gbk"),
        ("gb18030-2000", "gb18030"),
        ("hzgb", "hz"),
        ("hz-gb", "hz"),
        ("hz-gb-2312", "hz"),
        ("csiso2022jp", "iso2022_jp"),
        ("iso2022jp", "iso2022_jp"),
        ("iso-2022-jp", "iso2022_jp"),
        ("iso2022jp-1", "iso2022_jp_1"),
        ("iso-2022-jp-1", "iso2022_jp_1"),
        ("iso2022jp-2", "iso2022_jp_2"),
        ("iso-2022-jp-2", "iso2022_jp_2"),
        ("iso2022jp-2004", "iso2022_jp_2004"),
        ("iso-2022-jp-2004", "iso2022_jp_2004"),
        ("iso2022jp-3", "iso2022_jp_3"),
        ("iso-2022-jp-3", "iso2022_jp_3"),
        ("iso2022jp-ext", "iso2022_jp_ext"),
        ("iso-2022-jp-ext", "iso2022_jp_ext"),
        ("csiso2022kr", "iso2022_kr"),
        ("iso2022kr", "iso2022_kr"),
        ("iso-2022-kr", "iso2022_kr"),
        ("iso-8859-1", "latin_1"),
        ("iso8859-1", "latin_1"),
        ("8859", "latin_1"),
        ("cp819", "latin_1"),
        ("latin", "latin_1"),
        ("latin1", "latin_1"),
        ("l1", "latin_1"),
        ("iso-8859-2", "iso8859_2"),
        ("latin2", "iso8859_2"),
        ("l2", "iso8859_2"),
        ("iso-8859-3", "iso8859_3"),
        ("latin3", "iso8859_3"),
        ("l3", "iso8859_3"),
        ("iso-8859-4", "iso8859_4"),
        ("latin4", "iso8859_4"),
        ("l4", "iso8859_4"),
        ("iso-8859-5", "iso8859_5"),
        ("cyrillic", "iso8859_5"),
        ("iso-8859-6", "iso8859_6"),
        ("arabic", "iso8859_6"),
        ("iso-8859-7", "iso8859_7"),
        ("greek", "iso8859_7"),
        ("greek8", "iso8859_7"),
        ("iso-8859-8", "iso8859_8"),
        ("hebrew", "iso8859_8"),
        ("iso-8859-9", "iso8859_9"),
        ("latin5", "iso8859_9"),
        ("l5", "iso8859_9"),
        ("iso-8859-10", "iso8859_10"),
        ("latin6", "iso8859_10"),
        ("l6", "iso8859_10"),
        ("iso-8859-11", "iso8859_11"),
        ("thai", "iso8859_11"),
        ("iso-8859-13", "iso8859_13"),
        ("latin7", "iso8859_13"),
        ("l7", "iso8859_13"),
        ("iso-8859-14", "iso8859_14"),
        ("latin8", "iso8859_14"),
        ("l8", "iso8859_14"),
        ("iso-8859-15", "iso8859_15"),
        ("latin9", "iso8859_15"),
        ("l9", "iso8859_15"),
        ("iso-8859-16", "iso8859_16"),
        ("latin10", "iso8859_16"),
        ("l10", "iso8859_16"),
        ("cp1361", "johab"),
        ("ms1361", "johab"),
        ("kz_1048", "kz1048"),
        ("strk1048_2002", "kz1048"),
        ("rk1048", "kz1048"),
        ("maccyrillic", "mac_cyrillic"),
        ("macgreek", "mac_greek"),
        ("maciceland", "mac_iceland"),
        ("maclatin2", "mac_latin2"),
        ("maccentraleurope", "mac_latin2"),
        ("mac_centeuro", "mac_latin2"),
        ("macroman", "mac_roman"),
        ("macintosh", "mac_roman"),
        ("macturkish", "mac_turkish"),
        ("csptcp154", "ptcp154"),
        ("pt154", "ptcp154"),
        ("cp154", "ptcp154"),
        ("cyrillic-asian", "ptcp154"),
        ("csshiftjis", "shift_jis"),
        ("shiftjis", "shift_jis"),
        ("sjis", "shift_jis"),
        ("s_jis", "shift_jis"),
        ("shiftjis2004", "shift_jis_2004"),
        ("sjis_2004", "shift_jis_2004"),
        ("sjis2004", "shift_jis_2004"),
        ("shiftjisx0213", "shift_jisx0213"),
        ("sjisx0213", "shift_jisx0213"),
        ("s_jisx0213", "shift_jisx0213"),
        ("u32", "utf_32"),
        ("utf32", "utf_32"),
        ("utf-32be", "utf_32_be"),
        ("utf-32le", "utf_32_le"),
        ("u16", "utf_16"),
        ("utf16", "utf_16"),
        ("utf-16be", "utf_16_be"),
        ("utf-16le", "utf_16_le"),
        ("u7", "utf_7"),
        ("unicode-1-1-utf-7", "utf_7"),
        ("u8", "utf_8"),
        ("utf", "utf_8"),
        ("utf8", "utf_8"),
        ("utf-8", "utf_8"),
        ("cp65001", "utf_8"),
    ])
});

/// Backend identifier a canonical name resolves to.
#[cfg(unix)]
type BackendId = &'static str;
#[cfg(windows)]
type BackendId = crate::codepage::CodePage;

/// Canonical names mapped to iconv charset names.
#[cfg(unix)]
static BACKEND_IDS: Lazy<HashMap<&'static str, BackendId>> = Lazy::new(|| {
    HashMap::from([
        ("ascii", "ASCII"),
        ("big5", "BIG5"),
        ("big5hkscs", "BIG5-HKSCS"),
        ("cp850", "CP850"),
        ("cp862", "CP862"),
        ("cp866", "CP866"),
        ("cp874", "CP874"),
        ("cp932", "CP932"),
        ("cp949", "CP949"),
        ("cp950", "CP950"),
        ("cp1250", "CP1250"),
        ("cp1251", "CP1251"),
        ("cp1252", "CP1252"),
        ("cp1253", "CP1253"),
        ("cp1254", "CP1254"),
        ("cp1255", "CP1255"),
        ("cp1256", "CP1256"),
        ("cp1257", "CP1257"),
        ("cp1258", "CP1258"),
        ("euc_jp", "EUC-JP"),
        ("euc_kr", "EUC-KR"),
        ("gb2312", "CP936"),
        ("gbk", "GBK"),
        ("gb18030", "GB18030"),
        ("hz", "HZ"),
        ("iso2022_jp", "ISO-2022-JP"),
        ("iso2022_jp_1", "ISO-2022-JP-1"),
        ("iso2022_jp_2", "ISO-2022-JP-2"),
        ("iso2022_kr", "ISO-2022-KR"),
        ("latin_1", "ISO-8859-1"),
        ("iso8859_2", "ISO-8859-2"),
        ("iso8859_3", "ISO-8859-3"),
        ("iso8859_4", "ISO-8859-4"),
        ("iso8859_5", "ISO-8859-5"),
        ("iso8859_6", "ISO-8859-6"),
        ("iso8859_7", "ISO-8859-7"),
        ("iso8859_8", "ISO-8859-8"),
        ("iso8859_9", "ISO-8859-9"),
        ("iso8859_10", "ISO-8859-10"),
        ("iso8859_11", "ISO-8859-11"),
        ("iso8859_13", "ISO-8859-13"),
        ("iso8859_14", "ISO-8859-14"),
        ("iso8859_15", "ISO-8859-15"),
        ("iso8859_16", "ISO-8859-16"),
        ("johab", "JOHAB"),
        ("koi8_t", "KOI8-T"),
        ("mac_cyrillic", "MacCyrillic"),
        ("mac_greek", "MacGreek"),
        ("mac_iceland", "MacIceland"),
        ("mac_roman", "MacRoman"),
        ("mac_turkish", "MacTurkish"),
        ("ptcp154", "PT154"),
        ("shift_jis", "SHIFT_JIS"),
        ("utf_32", "UTF-32"),
        ("utf_32_be", "UTF-32BE"),
        ("utf_32_le", "UTF-32LE"),
        ("utf_16", "UTF16"),
        ("utf_16_be", "UTF-16BE"),
        ("utf_16_le", "UTF-16LE"),
        ("utf_7", "UTF-7"),
        ("utf_8", "UTF-8"),
    ])
});

/// Canonical names mapped to Windows code pages.
#[cfg(windows)]
static BACKEND_IDS: Lazy<HashMap<&'static str, BackendId>> = Lazy::new(|| {
    HashMap::from([
        ("ascii", 437),
        ("big5", 950),
        ("cp037", 37),
        ("cp437", 437),
        ("cp500", 500),
        ("cp720", 720),
        ("cp737", 737),
        ("cp775", 775),
        ("cp850", 850),
        ("cp852", 852),
        ("cp855", 855),
        ("cp857", 857),
        ("cp858", 858),
        ("cp860", 860),
        ("cp861", 861),
        ("cp862", 862),
        ("cp863", 863),
        ("cp864", 864),
        ("cp865", 865),
        ("cp866", 866),
        ("cp869", 869),
        ("cp874", 874),
        ("cp875", 875),
        ("cp932", 932),
        ("cp949", 949),
        ("cp950", 950),
        ("cp1026", 1026),
        ("cp1140", 1140),
        ("cp1250", 1250),
        ("cp1251", 1251),
        ("cp1252", 1252),
        ("cp1253", 1253),
        ("cp1254", 1254),
        ("cp1255", 1255),
        ("cp1256", 1256),
        ("cp1257", 1257),
        ("cp1258", 1258),
        ("euc_jp", 20932),
        ("euc_kr", 51949),
        ("gb2312", 936),
        ("gbk", 936),
        ("gb18030", 54936),
        ("hz", 52936),
        ("iso2022_jp", 50220),
        ("iso2022_kr", 50225),
        ("latin_1", 28591),
        ("iso8859_2", 28592),
        ("iso8859_3", 28593),
        ("iso8859_4", 28594),
        ("iso8859_5", 28595),
        ("iso8859_6", 28596),
        ("iso8859_7", 28597),
        ("iso8859_8", 28598),
        ("iso8859_9", 28599),
        ("iso8859_13", 28603),
        ("iso8859_15", 28605),
        ("johab", 1361),
        ("mac_cyrillic", 10007),
        ("mac_greek", 10006),
        ("mac_iceland", 10079),
        ("mac_turkish", 10081),
        ("shift_jis", 932),
        ("utf_7", 65000),
        ("utf_8", 65001),
    ])
});

/// Resolves a user-facing name to its backend identifier.
fn resolve(name: &str) -> PycodecResult<BackendId> {
    let lowered = name.to_ascii_lowercase();
    let canonical = ALIASES
        .get(lowered.as_str())
        .copied()
        .unwrap_or(lowered.as_str());
    match BACKEND_IDS.get(canonical) {
        Some(id) => Ok(*id),
        None => {
            debug!("encoding name {name:?} does not resolve to a backend identifier");
            Err(PycodecError::NoSuchName)
        }
    }
}

/// Whether `name` resolves to an encoding the selected backend knows.
pub fn is_valid_encoding_name(name: &str) -> bool {
    resolve(name).is_ok()
}

#[cfg(unix)]
mod engine {
    use super::{BackendId, PycodecResult};
    use crate::iconv;

    pub(super) struct BytesToUtf8(iconv::BytesToUtf8);

    impl BytesToUtf8 {
        pub(super) fn new(id: BackendId) -> Self {
            Self(iconv::BytesToUtf8::new(id))
        }

        pub(super) fn convert(&mut self, src: &[u8]) -> PycodecResult<String> {
            Ok(self.0.convert(src)?)
        }
    }

    pub(super) struct Utf8ToBytes(iconv::Utf8ToBytes);

    impl Utf8ToBytes {
        pub(super) fn new(id: BackendId) -> Self {
            Self(iconv::Utf8ToBytes::new(id))
        }

        pub(super) fn convert(&mut self, src: &str) -> PycodecResult<Vec<u8>> {
            Ok(self.0.convert(src)?)
        }
    }

    pub(super) struct Recode(iconv::Converter);

    impl Recode {
        pub(super) fn new(from: BackendId, to: BackendId) -> Self {
            Self(iconv::Converter::new(from, to))
        }

        pub(super) fn convert(&mut self, src: &[u8]) -> PycodecResult<Vec<u8>> {
            Ok(self.0.convert(src)?)
        }
    }
}

#[cfg(windows)]
mod engine {
    use super::{BackendId, PycodecResult};
    use crate::codepage;

    pub(super) struct BytesToUtf8(BackendId);

    impl BytesToUtf8 {
        pub(super) fn new(id: BackendId) -> Self {
            Self(id)
        }

        pub(super) fn convert(&mut self, src: &[u8]) -> PycodecResult<String> {
            Ok(codepage::bytes_to_utf8(src, self.0)?)
        }
    }

    pub(super) struct Utf8ToBytes(BackendId);

    impl Utf8ToBytes {
        pub(super) fn new(id: BackendId) -> Self {
            Self(id)
        }

        pub(super) fn convert(&mut self, src: &str) -> PycodecResult<Vec<u8>> {
            Ok(codepage::utf8_to_bytes(src, self.0)?)
        }
    }

    pub(super) struct Recode(BackendId, BackendId);

    impl Recode {
        pub(super) fn new(from: BackendId, to: BackendId) -> Self {
            Self(from, to)
        }

        pub(super) fn convert(&mut self, src: &[u8]) -> PycodecResult<Vec<u8>> {
            Ok(codepage::convert(src, self.0, self.1)?)
        }
    }
}

/// Decodes byte strings of a named encoding into UTF-8.
pub struct BytesToUtf8 {
    name: String,
    engine: Option<engine::BytesToUtf8>,
}

impl BytesToUtf8 {
    /// Construction always succeeds; an unknown name is reported by the
    /// first conversion call.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            engine: None,
        }
    }

    pub fn convert(&mut self, src: &[u8]) -> PycodecResult<String> {
        if self.engine.is_none() {
            self.engine = Some(engine::BytesToUtf8::new(resolve(&self.name)?));
        }
        match self.engine.as_mut() {
            Some(engine) => engine.convert(src),
            None => unreachable!(),
        }
    }
}

/// Encodes UTF-8 into byte strings of a named encoding.
pub struct Utf8ToBytes {
    name: String,
    engine: Option<engine::Utf8ToBytes>,
}

impl Utf8ToBytes {
    /// Construction always succeeds; an unknown name is reported by the
    /// first conversion call.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            engine: None,
        }
    }

    pub fn convert(&mut self, src: &str) -> PycodecResult<Vec<u8>> {
        if self.engine.is_none() {
            self.engine = Some(engine::Utf8ToBytes::new(resolve(&self.name)?));
        }
        match self.engine.as_mut() {
            Some(engine) => engine.convert(src),
            None => unreachable!(),
        }
    }
}

/// Re-encodes byte strings from one named encoding into another.
pub struct Recode {
    from: String,
    to: String,
    engine: Option<engine::Recode>,
}

impl Recode {
    /// Construction always succeeds; an unknown name is reported by the
    /// first conversion call.
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            engine: None,
        }
    }

    pub fn convert(&mut self, src: &[u8]) -> PycodecResult<Vec<u8>> {
        if self.engine.is_none() {
            self.engine = Some(engine::Recode::new(resolve(&self.from)?, resolve(&self.to)?));
        }
        match self.engine.as_mut() {
            Some(engine) => engine.convert(src),
            None => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_names_resolve() {
        assert!(is_valid_encoding_name("utf-8"));
        assert!(is_valid_encoding_name("gb2312"));
        assert!(is_valid_encoding_name("cp1252"));
        // Lookup lowercases first.
        assert!(is_valid_encoding_name("GBK"));
        assert!(is_valid_encoding_name("Latin1"));
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert!(!is_valid_encoding_name("definitely not an encoding"));
        assert!(!is_valid_encoding_name(""));
    }

    #[test]
    fn unknown_name_surfaces_on_first_conversion() {
        let mut front = BytesToUtf8::new("definitely not an encoding");
        assert!(matches!(
            front.convert(b"abc"),
            Err(PycodecError::NoSuchName)
        ));
    }
}
