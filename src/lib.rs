//! # modelscan
//!
//! Streaming scanner for the model definition format: a small,
//! newline-significant notation for board and record models built from
//! names, assignments, literals, field references, and comments.
//!
//! Input flows through the crate in stages:
//!
//! ```text
//! model text --> PushbackReader --> Scanner --> Token stream --> (your parser)
//! ```
//!
//! * [`reader`] supplies characters one at a time with a single-character
//!   pushback slot.
//! * [`line_ending`] decides what counts as a line terminator.
//! * [`tokenizer`] turns characters into [`Token`](tokenizer::Token)
//!   values, one per call.
//! * [`config`] carries the tuning knobs, loadable from JSON.
//!
//! The scanner is strict: the first malformed character aborts the scan
//! with a [`ScanError`](tokenizer::ScanError) instead of guessing at a
//! resynchronization point.

pub mod config;
pub mod error;
pub mod line_ending;
pub mod reader;
pub mod tokenizer;

pub use config::ScannerConfig;
pub use error::*;
pub use line_ending::NewlineMode;
pub use reader::{CharStream, PushbackReader};
pub use tokenizer::{tokenize, ScanError, Scanner, Token, TokenKind, Tokens};

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    // One-time test setup: route tracing output through the env filter so
    // RUST_LOG controls verbosity.
    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
