//! Shell-like splitting of one command line into argument tokens.
//!
//! Single quotes, double quotes and backslash escapes are honored. All
//! syntactic characters are ASCII, so the machine can walk code points
//! without decoding anything else specially.

use thiserror::Error;

/// Lexing failures.
///
/// Ending inside a quoted span or right after a backslash is user input, not
/// a bug, so it surfaces as a recoverable error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    /// The command line ended inside quotes or a pending escape.
    #[error("unexpected end of command line")]
    UnexpectedEnd,
}

#[derive(Clone, Copy)]
enum State {
    /// Between tokens.
    Space,
    /// Inside an unquoted token.
    Normal,
    /// Inside single quotes.
    Single,
    /// Inside double quotes.
    Double,
    /// After a backslash; the next character is taken verbatim.
    Escape,
}

/// Splits `cmd` into argument tokens.
///
/// A closing single quote returns to the surrounding unquoted token rather
/// than ending it, so `'a'b` lexes as the single token `ab`; double quotes
/// behave the same way.
pub fn split(cmd: &str) -> Result<Vec<String>, LexError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut state = State::Space;
    // Where to return after an escape.
    let mut prev = State::Space;

    for c in cmd.chars() {
        match state {
            State::Space => match c {
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '\\' => {
                    state = State::Escape;
                    prev = State::Normal;
                }
                ' ' => {}
                _ => {
                    current.push(c);
                    state = State::Normal;
                }
            },
            State::Normal => match c {
                '\\' => {
                    state = State::Escape;
                    prev = State::Normal;
                }
                ' ' => {
                    args.push(std::mem::take(&mut current));
                    state = State::Space;
                }
                // Quotes inside an unquoted token are literal.
                _ => current.push(c),
            },
            State::Single => match c {
                '\'' => state = State::Normal,
                '\\' => {
                    state = State::Escape;
                    prev = State::Single;
                }
                _ => current.push(c),
            },
            State::Double => match c {
                '"' => state = State::Normal,
                '\\' => {
                    state = State::Escape;
                    prev = State::Double;
                }
                _ => current.push(c),
            },
            State::Escape => {
                current.push(c);
                state = prev;
            }
        }
    }

    match state {
        State::Space => Ok(args),
        State::Normal => {
            args.push(current);
            Ok(args)
        }
        State::Single | State::Double | State::Escape => Err(LexError::UnexpectedEnd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(cmd: &str) -> Vec<String> {
        split(cmd).expect("command line lexes")
    }

    #[test]
    fn splits_on_spaces() {
        assert_eq!(ok("foo bar"), ["foo", "bar"]);
        assert_eq!(ok("  foo   bar  "), ["foo", "bar"]);
        assert_eq!(ok(""), Vec::<String>::new());
    }

    #[test]
    fn quotes_preserve_spaces() {
        assert_eq!(ok("'a b'"), ["a b"]);
        assert_eq!(ok("\"a b\""), ["a b"]);
    }

    #[test]
    fn escapes_take_the_next_character_verbatim() {
        assert_eq!(ok("a\\ b"), ["a b"]);
        assert_eq!(ok("a\\\\b"), ["a\\b"]);
        assert_eq!(ok("'a\\'b'"), ["a'b"]);
    }

    #[test]
    fn closing_quote_continues_the_token() {
        assert_eq!(ok("'a'b"), ["ab"]);
        assert_eq!(ok("\"a\"b'c'"), ["abc"]);
    }

    #[test]
    fn opposite_quotes_are_literal_inside_quotes() {
        assert_eq!(ok("'say \"hi\"'"), ["say \"hi\""]);
        assert_eq!(ok("\"it's\""), ["it's"]);
    }

    #[test]
    fn unterminated_input_is_an_error() {
        assert_eq!(split("foo \""), Err(LexError::UnexpectedEnd));
        assert_eq!(split("'open"), Err(LexError::UnexpectedEnd));
        assert_eq!(split("trailing\\"), Err(LexError::UnexpectedEnd));
    }
}
