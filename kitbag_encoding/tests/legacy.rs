//! Legacy code-page round-trips through the iconv backend and the pycodec
//! façade.

#![cfg(unix)]

use kitbag_encoding::{iconv, pycodec};

const GBK_BYTES: &[u8] = b"\xC4\xE3\xBA\xC3\xD6\xD0\xB9\xFA";
const GBK_TEXT: &str = "\u{4F60}\u{597D}\u{4E2D}\u{56FD}";

#[test]
fn gbk_round_trips_through_iconv() {
    let decoded = iconv::BytesToUtf8::new("GBK")
        .convert(GBK_BYTES)
        .expect("decode gbk");
    assert_eq!(decoded, GBK_TEXT);

    let encoded = iconv::Utf8ToBytes::new("GBK")
        .convert(&decoded)
        .expect("encode gbk");
    assert_eq!(encoded, GBK_BYTES);
}

#[test]
fn gbk_round_trips_through_pycodec_names() {
    let mut decoder = pycodec::BytesToUtf8::new("gbk");
    let decoded = decoder.convert(GBK_BYTES).expect("decode gbk");
    assert_eq!(decoded, GBK_TEXT);

    let mut encoder = pycodec::Utf8ToBytes::new("gbk");
    assert_eq!(encoder.convert(&decoded).as_deref(), Ok(GBK_BYTES));

    // The alias table routes cp936 onto the same backend encoding.
    let mut alias = pycodec::BytesToUtf8::new("cp936");
    assert_eq!(alias.convert(GBK_BYTES).as_deref(), Ok(GBK_TEXT));
}

#[test]
fn recode_converts_between_legacy_encodings() {
    // GBK bytes re-encoded into UTF-8 bytes equals the UTF-8 text.
    let mut recode = pycodec::Recode::new("gbk", "utf-8");
    assert_eq!(recode.convert(GBK_BYTES).as_deref(), Ok(GBK_TEXT.as_bytes()));
}
