//! UTF round-trips over a corpus of scripts that exercise one- to four-byte
//! UTF-8 sequences, including astral-plane emoji.

use kitbag_encoding::utf;

const CORPUS: &[&str] = &[
    "\u{30E6}\u{30FC}\u{30B6}\u{30FC}\u{5225}\u{30B5}\u{30A4}\u{30C8}",
    "\u{7B80}\u{4F53}\u{4E2D}\u{6587}",
    "\u{D06C}\u{B85C}\u{C2A4} \u{D50C}\u{B7AB}\u{D3FC}\u{C73C}\u{B85C}",
    "\u{5DE}\u{5D3}\u{5D5}\u{5E8}\u{5D9}\u{5DD} \u{5DE}\u{5D1}\u{5D5}\u{5E7}\u{5E9}\u{5D9}\u{5DD}",
    "\u{623}\u{641}\u{636}\u{644} \u{627}\u{644}\u{628}\u{62D}\u{648}\u{62B}",
    "\u{3A3}\u{1F72} \u{3B3}\u{3BD}\u{3C9}\u{3C1}\u{3AF}\u{3B6}\u{3C9} \u{1F00}\u{3C0}\u{1F78}",
    "\u{414}\u{435}\u{441}\u{44F}\u{442}\u{443}\u{44E} \u{41C}\u{435}\u{436}\u{434}\u{443}\u{43D}\u{430}\u{440}\u{43E}\u{434}\u{43D}\u{443}\u{44E}",
    "\u{E41}\u{E1C}\u{E48}\u{E19}\u{E14}\u{E34}\u{E19}\u{E2E}\u{E31}\u{E48}\u{E19}\u{E40}\u{E2A}\u{E37}\u{E48}\u{E2D}\u{E21}\u{E42}\u{E17}\u{E23}\u{E21}\u{E41}\u{E2A}\u{E19}\u{E2A}\u{E31}\u{E07}\u{E40}\u{E27}\u{E0A}",
    "fran\u{E7}ais langue \u{E9}trang\u{E8}re",
    "ma\u{F1}ana ol\u{E9}",
    "\u{222E} E\u{22C5}da = Q,  n \u{2192} \u{221E}, \u{2211} f(i) = \u{220F} g(i)",
    "\u{1F363} \u{2716} \u{1F37A}",
];

#[test]
fn utf16_round_trips_corpus() {
    for text in CORPUS {
        let units = utf::utf8_to_utf16(text.as_bytes()).expect("encode utf16");
        assert_eq!(units, utf::str_to_utf16(text));
        assert_eq!(utf::utf16_to_utf8(&units).as_deref(), Ok(*text));
    }
}

#[test]
fn utf32_round_trips_corpus() {
    for text in CORPUS {
        let units = utf::utf8_to_utf32(text.as_bytes()).expect("encode utf32");
        assert_eq!(units, utf::str_to_utf32(text));
        assert_eq!(utf::utf32_to_utf8(&units).as_deref(), Ok(*text));
    }
}

#[test]
fn utf16_uses_surrogate_pairs_for_astral_scalars() {
    // Sushi and beer sit above the BMP; each costs two code units.
    let units = utf::str_to_utf16("\u{1F363}\u{1F37A}");
    assert_eq!(units.len(), 4);
    assert!((0xD800..0xDC00).contains(&units[0]));
    assert_eq!(utf::utf16_to_utf8(&units).as_deref(), Ok("\u{1F363}\u{1F37A}"));
}
