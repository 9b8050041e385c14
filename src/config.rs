//! Scanner configuration.
//!
//! Every field has a default, so a partial JSON document or struct-update
//! syntax over [`ScannerConfig::default`] both work.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::line_ending::NewlineMode;

/// Tuning knobs for [`Scanner`](crate::tokenizer::scanner::Scanner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Which line-ending conventions terminate a line.
    #[serde(default)]
    pub newline_mode: NewlineMode,

    /// Initial capacity of the per-call token text buffer.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            newline_mode: NewlineMode::default(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl ScannerConfig {
    /// Loads a scanner configuration from a JSON file.
    ///
    /// # Errors
    /// [`Error::Internal`] when the file cannot be opened or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        from_file(path)
    }
}

/// Deserializes a configuration value from a JSON file.
pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path.as_ref())
        .map_err(|e| Error::Internal(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Internal(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

/// Deserializes a configuration value from a JSON string.
pub fn from_str<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    let config = serde_json::from_str(json)
        .map_err(|e| Error::Internal(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_buffer_capacity() -> usize {
    16
}
