//! The scanner itself: a finite-state machine over a character stream.
//!
//! [`Scanner::next_token`] reads exactly one token per call. The machine
//! starts every call in [`State::Start`] with an empty text buffer, walks
//! the states one character at a time, and finishes with a [`Step::Emit`].
//! Nothing about a half-read token survives between calls; the only state
//! the scanner keeps is the stream position and its one-character pushback
//! slot.

use std::mem;
use std::str::Chars;

use thiserror::Error;

use crate::config::ScannerConfig;
use crate::reader::{CharStream, PushbackReader};
use crate::tokenizer::token::Token;

/// Error raised when the input is not lexically valid.
///
/// The scanner does not resynchronize. After an error the stream position
/// is unspecified and no further tokens should be requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A character that cannot appear at the current position.
    #[error("unsupported character: '{0}'")]
    UnsupportedCharacter(char),
    /// The input ended in the middle of a token.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// An integer literal that does not fit the token payload.
    #[error("integer literal out of range: {0}")]
    IntegerOutOfRange(String),
}

/// Position of the machine inside a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Initial dispatch state, also skipping inter-token spacing.
    Start,
    /// Inside a quoted string, before the closing quote.
    StringBody,
    /// One `/` seen, the second one still required.
    CommentOpen,
    /// Inside a comment, scanning for the line terminator.
    CommentBody,
    /// Digits of an integer literal.
    Integer,
    /// Letters, digits, or underscores of a name.
    Name,
    /// `(` seen: an id digit, `x`, or spacing must follow.
    FieldOpen,
    /// Digits of a field id.
    FieldId,
    /// Spacing after a field id, `)` still outstanding.
    FieldIdEnd,
    /// `x` seen inside a field: this field carries no id.
    FieldNoId,
    /// `-` seen: a nonzero digit must follow.
    Minus,
}

/// Outcome of feeding one character to the machine.
enum Step {
    /// Keep scanning in the given state.
    Goto(State),
    /// The token is complete.
    Emit(Token),
    /// The token is complete and the character that ended it belongs to the
    /// next token.
    EmitUnread(Token, char),
}

/// Streaming scanner producing one [`Token`] per call.
#[derive(Debug)]
pub struct Scanner<S> {
    source: S,
    config: ScannerConfig,
}

impl<'a> Scanner<PushbackReader<Chars<'a>>> {
    /// Scanner over a string slice, with the default configuration.
    pub fn from_text(input: &'a str) -> Self {
        Self::new(PushbackReader::from(input))
    }
}

impl<S: CharStream> Scanner<S> {
    /// Scanner with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ScannerConfig::default())
    }

    /// Scanner with an explicit configuration.
    pub fn with_config(source: S, config: ScannerConfig) -> Self {
        Self { source, config }
    }

    /// Reads the next token from the stream.
    ///
    /// End of input yields [`Token::Eof`], once per call, indefinitely.
    ///
    /// # Errors
    /// Returns a [`ScanError`] on the first malformed character. The stream
    /// position is unspecified afterwards.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        let mut state = State::Start;
        let mut buffer = String::with_capacity(self.config.buffer_capacity);
        loop {
            let next = self.source.read();
            let step = match state {
                State::Start => self.start(next, &mut buffer),
                State::StringBody => string_body(next, &mut buffer),
                State::CommentOpen => comment_open(next),
                State::CommentBody => self.comment_body(next),
                State::Integer => integer(next, &mut buffer),
                State::Name => name(next, &mut buffer),
                State::FieldOpen => field_open(next, &mut buffer),
                State::FieldId => field_id(next, &mut buffer),
                State::FieldIdEnd => field_id_end(next, &buffer),
                State::FieldNoId => field_no_id(next),
                State::Minus => minus(next, &mut buffer),
            };
            match step {
                Ok(Step::Goto(next_state)) => state = next_state,
                Ok(Step::Emit(token)) => return Ok(token),
                Ok(Step::EmitUnread(token, lookahead)) => {
                    self.source.unread(lookahead);
                    return Ok(token);
                }
                Err(error) => {
                    tracing::error!("Failed to scan token: {}", error);
                    return Err(error);
                }
            }
        }
    }

    /// Consumes the scanner into an iterator over the remaining tokens.
    ///
    /// The iterator yields [`Token::Eof`] once, then ends. It also ends
    /// after yielding an error.
    pub fn tokens(self) -> Tokens<S> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    fn start(&mut self, next: Option<char>, buffer: &mut String) -> Result<Step, ScanError> {
        let Some(c) = next else {
            return Ok(Step::Emit(Token::Eof));
        };
        match c {
            '{' => Ok(Step::Emit(Token::LeftBrace)),
            '}' => Ok(Step::Emit(Token::RightBrace)),
            '=' => Ok(Step::Emit(Token::Equals)),
            ',' => Ok(Step::Emit(Token::Comma)),
            '"' => Ok(Step::Goto(State::StringBody)),
            '/' => Ok(Step::Goto(State::CommentOpen)),
            '(' => Ok(Step::Goto(State::FieldOpen)),
            // Integers never start with a zero, so zero stays unreachable
            // and falls through to the error arm below.
            '1'..='9' => {
                buffer.push(c);
                Ok(Step::Goto(State::Integer))
            }
            '-' => {
                buffer.push(c);
                Ok(Step::Goto(State::Minus))
            }
            _ => {
                if self.config.newline_mode.scan_from(c, &mut self.source) {
                    Ok(Step::Emit(Token::Newline))
                } else if c.is_alphabetic() || c == '_' {
                    buffer.push(c);
                    Ok(Step::Goto(State::Name))
                } else if is_space(c) {
                    Ok(Step::Goto(State::Start))
                } else {
                    Err(ScanError::UnsupportedCharacter(c))
                }
            }
        }
    }

    fn comment_body(&mut self, next: Option<char>) -> Result<Step, ScanError> {
        match next {
            Some(c) if self.config.newline_mode.scan_from(c, &mut self.source) => {
                Ok(Step::Emit(Token::Newline))
            }
            Some(_) => Ok(Step::Goto(State::CommentBody)),
            // A comment runs to the end of its line; the input may end
            // first.
            None => Ok(Step::Emit(Token::Eof)),
        }
    }
}

fn string_body(next: Option<char>, buffer: &mut String) -> Result<Step, ScanError> {
    match next {
        Some('"') => Ok(Step::Emit(Token::Str(mem::take(buffer)))),
        // Control characters include CR and LF: a string must close on its
        // own line.
        Some(c) if c.is_control() => Err(ScanError::UnsupportedCharacter(c)),
        Some(c) => {
            buffer.push(c);
            Ok(Step::Goto(State::StringBody))
        }
        None => Err(ScanError::UnexpectedEndOfInput),
    }
}

fn comment_open(next: Option<char>) -> Result<Step, ScanError> {
    match next {
        Some('/') => Ok(Step::Goto(State::CommentBody)),
        Some(c) => Err(ScanError::UnsupportedCharacter(c)),
        None => Err(ScanError::UnexpectedEndOfInput),
    }
}

fn integer(next: Option<char>, buffer: &mut String) -> Result<Step, ScanError> {
    match next {
        Some(c) if c.is_ascii_digit() => {
            buffer.push(c);
            Ok(Step::Goto(State::Integer))
        }
        Some(c) => Ok(Step::EmitUnread(Token::Int(parse_int(buffer)?), c)),
        None => Ok(Step::Emit(Token::Int(parse_int(buffer)?))),
    }
}

fn name(next: Option<char>, buffer: &mut String) -> Result<Step, ScanError> {
    match next {
        Some(c) if c.is_alphanumeric() || c == '_' => {
            buffer.push(c);
            Ok(Step::Goto(State::Name))
        }
        Some(c) => Ok(Step::EmitUnread(finish_name(buffer), c)),
        None => Ok(Step::Emit(finish_name(buffer))),
    }
}

fn field_open(next: Option<char>, buffer: &mut String) -> Result<Step, ScanError> {
    match next {
        Some(c) if c.is_ascii_digit() => {
            buffer.push(c);
            Ok(Step::Goto(State::FieldId))
        }
        Some('x') => Ok(Step::Goto(State::FieldNoId)),
        Some(c) if is_space(c) => Ok(Step::Goto(State::FieldOpen)),
        Some(c) => Err(ScanError::UnsupportedCharacter(c)),
        None => Err(ScanError::UnexpectedEndOfInput),
    }
}

fn field_id(next: Option<char>, buffer: &mut String) -> Result<Step, ScanError> {
    match next {
        Some(c) if c.is_ascii_digit() => {
            buffer.push(c);
            Ok(Step::Goto(State::FieldId))
        }
        Some(')') => Ok(Step::Emit(Token::Field(parse_int(buffer)?))),
        Some(c) if is_space(c) => Ok(Step::Goto(State::FieldIdEnd)),
        Some(c) => Err(ScanError::UnsupportedCharacter(c)),
        None => Err(ScanError::UnexpectedEndOfInput),
    }
}

fn field_id_end(next: Option<char>, buffer: &str) -> Result<Step, ScanError> {
    match next {
        Some(')') => Ok(Step::Emit(Token::Field(parse_int(buffer)?))),
        Some(c) if is_space(c) => Ok(Step::Goto(State::FieldIdEnd)),
        Some(c) => Err(ScanError::UnsupportedCharacter(c)),
        None => Err(ScanError::UnexpectedEndOfInput),
    }
}

fn field_no_id(next: Option<char>) -> Result<Step, ScanError> {
    match next {
        Some(')') => Ok(Step::Emit(Token::FieldEmpty)),
        Some(c) if is_space(c) => Ok(Step::Goto(State::FieldNoId)),
        Some(c) => Err(ScanError::UnsupportedCharacter(c)),
        None => Err(ScanError::UnexpectedEndOfInput),
    }
}

fn minus(next: Option<char>, buffer: &mut String) -> Result<Step, ScanError> {
    match next {
        // A zero right after the sign would be a leading zero.
        Some(c @ '1'..='9') => {
            buffer.push(c);
            Ok(Step::Goto(State::Integer))
        }
        Some(c) => Err(ScanError::UnsupportedCharacter(c)),
        None => Err(ScanError::UnexpectedEndOfInput),
    }
}

// Names ending here may still be reserved words.
fn finish_name(buffer: &mut String) -> Token {
    match buffer.as_str() {
        "true" => Token::Bool(true),
        "false" => Token::Bool(false),
        _ => Token::Name(mem::take(buffer)),
    }
}

fn parse_int(buffer: &str) -> Result<i64, ScanError> {
    buffer
        .parse()
        .map_err(|_| ScanError::IntegerOutOfRange(buffer.to_string()))
}

/// Unicode space separators (general categories Zs, Zl, and Zp).
///
/// Horizontal tab is a control character, not inter-token spacing; a tab
/// outside strings and comments is an unsupported character.
fn is_space(c: char) -> bool {
    matches!(
        c,
        '\u{0020}'              // space
        | '\u{00A0}'            // no-break space
        | '\u{1680}'            // ogham space mark
        | '\u{2000}'..='\u{200A}'
        | '\u{2028}'            // line separator
        | '\u{2029}'            // paragraph separator
        | '\u{202F}'            // narrow no-break space
        | '\u{205F}'            // medium mathematical space
        | '\u{3000}'            // ideographic space
    )
}

/// Tokenizes `input` completely. The last element is always [`Token::Eof`].
///
/// # Errors
/// Returns the first [`ScanError`]; tokens scanned before the error are
/// discarded.
#[tracing::instrument(level = "debug", skip(input))]
pub fn tokenize(input: &str) -> Result<Vec<Token>, ScanError> {
    let mut scanner = Scanner::from_text(input);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

/// Iterator over the tokens of a [`Scanner`], fused after the end-of-input
/// token or the first error.
#[derive(Debug)]
pub struct Tokens<S> {
    scanner: Scanner<S>,
    done: bool,
}

impl<S: CharStream> Iterator for Tokens<S> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.scanner.next_token();
        match &result {
            Ok(token) if token.is_eof() => self.done = true,
            Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(result)
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn positive_integers_round_trip(value in 1i64..=i64::MAX) {
            let text = value.to_string();
            prop_assert_eq!(tokenize(&text).unwrap(), vec![Token::Int(value), Token::Eof]);
        }

        #[test]
        fn negative_integers_round_trip(value in 1i64..=i64::MAX) {
            let text = (-value).to_string();
            prop_assert_eq!(tokenize(&text).unwrap(), vec![Token::Int(-value), Token::Eof]);
        }

        #[test]
        fn integers_keep_their_delimiter(value in 1i64..=i64::MAX) {
            let text = format!("{},", value);
            prop_assert_eq!(
                tokenize(&text).unwrap(),
                vec![Token::Int(value), Token::Comma, Token::Eof]
            );
        }

        #[test]
        fn field_ids_round_trip(id in 0i64..=i64::MAX) {
            let text = format!("({})", id);
            prop_assert_eq!(tokenize(&text).unwrap(), vec![Token::Field(id), Token::Eof]);
        }

        #[test]
        fn rescanning_reproduces_the_token_sequence(
            words in prop::collection::vec("[a-z_][a-z0-9_]{0,8}", 1..8)
        ) {
            let text = words.join("\n");
            let first = tokenize(&text).unwrap();
            let second = tokenize(&text).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
