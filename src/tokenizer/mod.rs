//! # Tokenizer component
//!
//! Lexical analysis for model definition text. The scanner walks the input
//! one character at a time through a finite-state machine and hands back
//! exactly one [`Token`] per call, so a parser can drive it on demand
//! without the whole input being tokenized up front.
//!
//! ## Component structure
//!
//! * [`token`]: token values and their kinds
//! * [`scanner`]: the state machine and the convenience entry points
//!
//! ## Usage
//!
//! ```rust
//! use modelscan::tokenizer::{tokenize, Token};
//!
//! let tokens = tokenize("income=14000\n")?;
//! assert_eq!(tokens.first(), Some(&Token::Name("income".to_string())));
//! assert_eq!(tokens.last(), Some(&Token::Eof));
//! # Ok::<(), modelscan::tokenizer::ScanError>(())
//! ```

pub mod scanner;
pub mod token;

pub use scanner::{tokenize, ScanError, Scanner, Tokens};
pub use token::{Token, TokenKind};
