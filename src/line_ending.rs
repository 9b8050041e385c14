//! Line-terminator conventions.
//!
//! Newlines are significant in the model format: they end field rows and
//! comments, and they surface as their own token. [`NewlineMode`] selects
//! which byte sequences count as a line terminator, and its scanning
//! methods recognize one terminator on a [`CharStream`] using at most one
//! character of lookahead.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::reader::CharStream;

/// Native line separator of the compilation target.
pub fn platform_separator() -> &'static str {
    if cfg!(windows) {
        "\r\n"
    } else {
        "\n"
    }
}

/// Which line-ending conventions terminate a line.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NewlineMode {
    /// Any of CR, LF, or CRLF terminates a line. CRLF counts as a single
    /// terminator, never as two.
    #[default]
    Universal,
    /// Only the host platform's separator terminates a line.
    Platform,
}

impl NewlineMode {
    /// Returns true if `text` as a whole is exactly one line terminator in
    /// this mode.
    pub fn matches(self, text: &str) -> bool {
        match self {
            NewlineMode::Universal => matches!(text, "\r" | "\n" | "\r\n"),
            NewlineMode::Platform => text == platform_separator(),
        }
    }

    /// Tries to read one line terminator at the current stream position.
    ///
    /// On success the stream is left just past the terminator. On failure
    /// the character that ruled the terminator out is pushed back, except
    /// that with a two-character separator a leading CR stays consumed when
    /// the following character does not complete the pair. The single
    /// pushback slot cannot hold both.
    pub fn scan<S: CharStream>(self, stream: &mut S) -> bool {
        match self {
            NewlineMode::Universal => match stream.read() {
                Some('\r') => {
                    consume_lf(stream);
                    true
                }
                Some('\n') => true,
                Some(other) => {
                    stream.unread(other);
                    false
                }
                None => false,
            },
            NewlineMode::Platform => {
                let separator = platform_separator();
                match stream.read() {
                    Some(first) if separator.len() == 1 => {
                        if separator.starts_with(first) {
                            true
                        } else {
                            stream.unread(first);
                            false
                        }
                    }
                    Some('\r') => match stream.read() {
                        Some('\n') => true,
                        Some(other) => {
                            stream.unread(other);
                            false
                        }
                        None => false,
                    },
                    Some(other) => {
                        stream.unread(other);
                        false
                    }
                    None => false,
                }
            }
        }
    }

    /// Same decision as [`scan`](NewlineMode::scan) with the first character
    /// already in hand.
    ///
    /// `first` is never pushed back; the caller still owns it when the
    /// answer is false. Only the lookahead for a CRLF pair touches the
    /// stream.
    pub fn scan_from<S: CharStream>(self, first: char, stream: &mut S) -> bool {
        match self {
            NewlineMode::Universal => match first {
                '\r' => {
                    consume_lf(stream);
                    true
                }
                '\n' => true,
                _ => false,
            },
            NewlineMode::Platform => {
                let separator = platform_separator();
                if separator.len() == 1 {
                    separator.starts_with(first)
                } else if first == '\r' {
                    match stream.read() {
                        Some('\n') => true,
                        Some(other) => {
                            stream.unread(other);
                            false
                        }
                        None => false,
                    }
                } else {
                    false
                }
            }
        }
    }
}

// A lone CR terminates a line; a following LF belongs to the same CRLF pair.
fn consume_lf<S: CharStream>(stream: &mut S) {
    match stream.read() {
        Some('\n') | None => {}
        Some(other) => stream.unread(other),
    }
}
