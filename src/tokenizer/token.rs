//! Token values produced by the scanner.
//!
//! A token is a kind plus, for the literal-carrying kinds, exactly one
//! payload. The payload lives inside the enum variant, so a token with a
//! mismatched kind and payload cannot be constructed. The typed accessors
//! panic when asked for a payload the kind does not carry; a parser that
//! trips one of those panics has misread its own grammar.

use strum_macros::{AsRefStr, Display, EnumIter};

/// One lexical unit of the model format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Line terminator, including the one that ends a comment.
    Newline,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `=`
    Equals,
    /// `,`
    Comma,
    /// Quoted string literal, without the quotes. No escape processing is
    /// applied.
    Str(String),
    /// Decimal integer literal.
    Int(i64),
    /// `true` or `false`, lowercase only.
    Bool(bool),
    /// Identifier: a letter or underscore followed by letters, digits, or
    /// underscores.
    Name(String),
    /// Field reference `(id)`, carrying the numeric id.
    Field(i64),
    /// Field reference `(x)`: a field with no id.
    FieldEmpty,
    /// End of input.
    Eof,
}

/// The closed set of token kinds, without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TokenKind {
    Newline,
    LeftBrace,
    RightBrace,
    Equals,
    Comma,
    Str,
    Int,
    Bool,
    Name,
    Field,
    FieldEmpty,
    Eof,
}

impl Token {
    /// The kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Newline => TokenKind::Newline,
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::Equals => TokenKind::Equals,
            Token::Comma => TokenKind::Comma,
            Token::Str(_) => TokenKind::Str,
            Token::Int(_) => TokenKind::Int,
            Token::Bool(_) => TokenKind::Bool,
            Token::Name(_) => TokenKind::Name,
            Token::Field(_) => TokenKind::Field,
            Token::FieldEmpty => TokenKind::FieldEmpty,
            Token::Eof => TokenKind::Eof,
        }
    }

    /// The text payload of a string or name token.
    ///
    /// # Panics
    /// Panics if the token carries no text.
    pub fn str_value(&self) -> &str {
        match self {
            Token::Str(value) | Token::Name(value) => value,
            other => panic!("token {} does not carry a string value", other.kind()),
        }
    }

    /// The integer payload of an integer or field token.
    ///
    /// # Panics
    /// Panics if the token carries no integer.
    pub fn int_value(&self) -> i64 {
        match self {
            Token::Int(value) | Token::Field(value) => *value,
            other => panic!("token {} does not carry an integer value", other.kind()),
        }
    }

    /// The payload of a boolean token.
    ///
    /// # Panics
    /// Panics if the token carries no boolean.
    pub fn bool_value(&self) -> bool {
        match self {
            Token::Bool(value) => *value,
            other => panic!("token {} does not carry a boolean value", other.kind()),
        }
    }

    /// The identifier text of a name token. Sugar for
    /// [`str_value`](Token::str_value).
    pub fn name(&self) -> &str {
        self.str_value()
    }

    /// The id of a field token. Sugar for [`int_value`](Token::int_value).
    pub fn field_id(&self) -> i64 {
        self.int_value()
    }

    /// True for the end-of-input token.
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_kind_covers_every_variant() {
        let cases = [
            (Token::Newline, TokenKind::Newline),
            (Token::LeftBrace, TokenKind::LeftBrace),
            (Token::RightBrace, TokenKind::RightBrace),
            (Token::Equals, TokenKind::Equals),
            (Token::Comma, TokenKind::Comma),
            (Token::Str("s".to_string()), TokenKind::Str),
            (Token::Int(1), TokenKind::Int),
            (Token::Bool(false), TokenKind::Bool),
            (Token::Name("n".to_string()), TokenKind::Name),
            (Token::Field(1), TokenKind::Field),
            (Token::FieldEmpty, TokenKind::FieldEmpty),
            (Token::Eof, TokenKind::Eof),
        ];
        for (token, kind) in cases {
            assert_eq!(token.kind(), kind);
        }
    }

    #[test]
    fn test_str_value_for_strings_and_names() {
        assert_eq!(Token::Str("Petr".to_string()).str_value(), "Petr");
        assert_eq!(Token::Name("income".to_string()).str_value(), "income");
        assert_eq!(Token::Name("income".to_string()).name(), "income");
    }

    #[test]
    fn test_int_value_for_integers_and_fields() {
        assert_eq!(Token::Int(-17).int_value(), -17);
        assert_eq!(Token::Field(3).int_value(), 3);
        assert_eq!(Token::Field(3).field_id(), 3);
    }

    #[test]
    fn test_bool_value() {
        assert!(Token::Bool(true).bool_value());
        assert!(!Token::Bool(false).bool_value());
    }

    #[test]
    #[should_panic(expected = "does not carry a string value")]
    fn test_str_value_rejects_marker_tokens() {
        Token::Comma.str_value();
    }

    #[test]
    #[should_panic(expected = "does not carry an integer value")]
    fn test_int_value_rejects_booleans() {
        Token::Bool(true).int_value();
    }

    #[test]
    #[should_panic(expected = "does not carry a boolean value")]
    fn test_bool_value_rejects_integers() {
        Token::Int(0).bool_value();
    }

    #[test]
    fn test_kind_names_are_snake_case() {
        assert_eq!(TokenKind::LeftBrace.to_string(), "left_brace");
        assert_eq!(TokenKind::FieldEmpty.as_ref(), "field_empty");
        assert_eq!(TokenKind::Eof.to_string(), "eof");
    }

    #[test]
    fn test_is_eof() {
        assert!(Token::Eof.is_eof());
        assert!(!Token::Newline.is_eof());
    }
}
