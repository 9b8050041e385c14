//! Character input with single-character pushback.
//!
//! The scanner consumes its input one character at a time and sometimes has
//! to look one character past the end of a token before it knows the token
//! is complete. [`CharStream`] is the minimal contract for that access
//! pattern, and [`PushbackReader`] adapts any character iterator to it.

use std::iter::Fuse;
use std::str::Chars;

/// Character-at-a-time input with room to return one character.
///
/// End of input is reported as `None` and is sticky: once `None` has been
/// returned, every later [`read`](CharStream::read) without an intervening
/// [`unread`](CharStream::unread) returns `None` again.
pub trait CharStream {
    /// Consumes and returns the next character, or `None` at end of input.
    fn read(&mut self) -> Option<char>;

    /// Hands `c` back to the stream so that the next
    /// [`read`](CharStream::read) returns it again.
    ///
    /// The pushback slot holds a single character. Callers must not push
    /// back twice without a read in between.
    fn unread(&mut self, c: char);
}

/// [`CharStream`] over any character iterator, with a one-slot pushback
/// buffer.
#[derive(Debug)]
pub struct PushbackReader<I> {
    chars: Fuse<I>,
    pending: Option<char>,
}

impl<I: Iterator<Item = char>> PushbackReader<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.fuse(),
            pending: None,
        }
    }
}

impl<'a> From<&'a str> for PushbackReader<Chars<'a>> {
    fn from(input: &'a str) -> Self {
        Self::new(input.chars())
    }
}

impl<I: Iterator<Item = char>> CharStream for PushbackReader<I> {
    fn read(&mut self) -> Option<char> {
        self.pending.take().or_else(|| self.chars.next())
    }

    fn unread(&mut self, c: char) {
        debug_assert!(self.pending.is_none(), "pushback slot already occupied");
        self.pending = Some(c);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_in_order() {
        let mut reader = PushbackReader::from("abc");
        assert_eq!(reader.read(), Some('a'));
        assert_eq!(reader.read(), Some('b'));
        assert_eq!(reader.read(), Some('c'));
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn test_unread_is_seen_first() {
        let mut reader = PushbackReader::from("ab");
        assert_eq!(reader.read(), Some('a'));
        reader.unread('a');
        assert_eq!(reader.read(), Some('a'));
        assert_eq!(reader.read(), Some('b'));
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut reader = PushbackReader::from("");
        assert_eq!(reader.read(), None);
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn test_unread_after_end_of_input() {
        let mut reader = PushbackReader::from("a");
        assert_eq!(reader.read(), Some('a'));
        assert_eq!(reader.read(), None);
        reader.unread('a');
        assert_eq!(reader.read(), Some('a'));
        assert_eq!(reader.read(), None);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut reader = PushbackReader::from("čß");
        assert_eq!(reader.read(), Some('č'));
        reader.unread('č');
        assert_eq!(reader.read(), Some('č'));
        assert_eq!(reader.read(), Some('ß'));
        assert_eq!(reader.read(), None);
    }
}
