//! ANSI SGR sequence production and colored printing.
//!
//! Only SGR sequences are emitted, all in the three-character-payload short
//! form, so any sequence produced here is at most six bytes.

use std::io::{self, Write};

use bitflags::bitflags;
use kitbag_core::bug;

/// The sixteen standard terminal colors plus the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    LightBlack,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    LightWhite,
}

bitflags! {
    /// Font style attributes, combinable as a bit set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attribute: u8 {
        const BOLD = 1;
        const DARK = 2;
        const ITALIC = 4;
        const UNDERLINE = 8;
        const BLINK = 16;
        const REVERSE = 32;
        const CONCEALED = 64;
    }
}

/// Longest sequence this module emits, used for capacity planning.
const MAX_SGR_LEN: usize = "\x1b[000m".len();

/// The SGR sequence selecting `color` as foreground.
///
/// [`Color::Default`] maps to the empty string.
pub fn foreground(color: Color) -> &'static str {
    match color {
        Color::Default => "",
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::White => "\x1b[37m",
        Color::LightBlack => "\x1b[90m",
        Color::LightRed => "\x1b[91m",
        Color::LightGreen => "\x1b[92m",
        Color::LightYellow => "\x1b[93m",
        Color::LightBlue => "\x1b[94m",
        Color::LightMagenta => "\x1b[95m",
        Color::LightCyan => "\x1b[96m",
        Color::LightWhite => "\x1b[97m",
    }
}

/// The SGR sequence selecting `color` as background.
///
/// [`Color::Default`] maps to the empty string.
pub fn background(color: Color) -> &'static str {
    match color {
        Color::Default => "",
        Color::Black => "\x1b[40m",
        Color::Red => "\x1b[41m",
        Color::Green => "\x1b[42m",
        Color::Yellow => "\x1b[43m",
        Color::Blue => "\x1b[44m",
        Color::Magenta => "\x1b[45m",
        Color::Cyan => "\x1b[46m",
        Color::White => "\x1b[47m",
        Color::LightBlack => "\x1b[100m",
        Color::LightRed => "\x1b[101m",
        Color::LightGreen => "\x1b[102m",
        Color::LightYellow => "\x1b[103m",
        Color::LightBlue => "\x1b[104m",
        Color::LightMagenta => "\x1b[105m",
        Color::LightCyan => "\x1b[106m",
        Color::LightWhite => "\x1b[107m",
    }
}

/// The SGR sequence for exactly one style flag.
///
/// The empty set maps to the empty string; passing more than one flag is a
/// caller bug.
pub fn style(attr: Attribute) -> &'static str {
    if attr.is_empty() {
        return "";
    }
    match attr.bits() {
        1 => "\x1b[1m",
        2 => "\x1b[2m",
        4 => "\x1b[3m",
        8 => "\x1b[4m",
        16 => "\x1b[5m",
        32 => "\x1b[6m",
        64 => "\x1b[7m",
        bits => bug!("style() accepts a single attribute flag, got {bits:#b}"),
    }
}

fn append_styles(out: &mut String, attrs: Attribute) {
    for flag in attrs.iter() {
        out.push_str(style(flag));
    }
}

/// The concatenated sequences for every flag in `attrs`, lowest bit first.
pub fn styles(attrs: Attribute) -> String {
    let mut out = String::with_capacity(attrs.bits().count_ones() as usize * MAX_SGR_LEN);
    append_styles(&mut out, attrs);
    out
}

/// The SGR reset sequence.
pub fn reset() -> &'static str {
    "\x1b[0m"
}

/// Wraps `words` in the requested color and style sequences, ending with a
/// reset.
pub fn colored(words: &str, fg: Color, bg: Color, attrs: Attribute) -> String {
    // Styles plus foreground, background and the trailing reset.
    let sequences = attrs.bits().count_ones() as usize + 3;
    let mut out = String::with_capacity(sequences * MAX_SGR_LEN + words.len());
    out.push_str(foreground(fg));
    out.push_str(background(bg));
    append_styles(&mut out, attrs);
    out.push_str(words);
    out.push_str(reset());
    out
}

/// Writes colored text to `dst`.
pub fn cwrite(dst: &mut dyn Write, words: &str, fg: Color, bg: Color, attrs: Attribute) -> io::Result<()> {
    dst.write_all(colored(words, fg, bg, attrs).as_bytes())
}

/// Writes colored text and a newline to `dst`.
pub fn cwriteln(dst: &mut dyn Write, words: &str, fg: Color, bg: Color, attrs: Attribute) -> io::Result<()> {
    cwrite(dst, words, fg, bg, attrs)?;
    dst.write_all(b"\n")
}

/// Prints colored text to stdout.
pub fn cprint(words: &str, fg: Color, bg: Color, attrs: Attribute) -> io::Result<()> {
    cwrite(&mut io::stdout().lock(), words, fg, bg, attrs)
}

/// Prints colored text and a newline to stdout.
pub fn cprintln(words: &str, fg: Color, bg: Color, attrs: Attribute) -> io::Result<()> {
    cwriteln(&mut io::stdout().lock(), words, fg, bg, attrs)
}

/// Prints colored text to stderr.
pub fn ceprint(words: &str, fg: Color, bg: Color, attrs: Attribute) -> io::Result<()> {
    cwrite(&mut io::stderr().lock(), words, fg, bg, attrs)
}

/// Prints colored text and a newline to stderr.
pub fn ceprintln(words: &str, fg: Color, bg: Color, attrs: Attribute) -> io::Result<()> {
    cwriteln(&mut io::stderr().lock(), words, fg, bg, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_is_silent() {
        assert_eq!(foreground(Color::Default), "");
        assert_eq!(background(Color::Default), "");
        assert_eq!(style(Attribute::empty()), "");
    }

    #[test]
    fn bright_colors_use_the_high_ranges() {
        assert_eq!(foreground(Color::LightRed), "\x1b[91m");
        assert_eq!(background(Color::LightRed), "\x1b[101m");
    }

    #[test]
    fn styles_concatenate_low_bit_first() {
        let combined = styles(Attribute::BOLD | Attribute::ITALIC);
        let expected = format!("{}{}", style(Attribute::BOLD), style(Attribute::ITALIC));
        assert_eq!(combined, expected);
        // Order is by bit value, not by argument order.
        assert_eq!(
            styles(Attribute::ITALIC | Attribute::BOLD),
            expected
        );
    }

    #[test]
    fn colored_wraps_text_with_reset() {
        assert_eq!(
            colored("x", Color::Red, Color::Default, Attribute::empty()),
            "\x1b[31mx\x1b[0m"
        );
        assert_eq!(
            colored("x", Color::Red, Color::Blue, Attribute::BOLD),
            "\x1b[31m\x1b[44m\x1b[1mx\x1b[0m"
        );
    }

    #[test]
    fn cwrite_targets_the_given_stream() {
        let mut buffer = Vec::new();
        cwriteln(&mut buffer, "ok", Color::Green, Color::Default, Attribute::empty())
            .expect("write to buffer");
        assert_eq!(buffer, b"\x1b[32mok\x1b[0m\n");
    }
}
