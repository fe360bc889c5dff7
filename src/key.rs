//! Key reading functionality
//!
//! The key normally lives in the configuration file. A key reader lets
//! the caller supply it from somewhere else without writing it to disk.

use crate::error::{ErrorCategory, ErrorKind, PlayfairError, Result};
use std::io::{self, IsTerminal, Read, Write};
use zeroize::Zeroizing;

/// Trait for reading keys from various sources
pub trait KeyReader {
    /// Read a key.
    ///
    /// Returns the key wrapped in `Zeroizing` so it is wiped from memory
    /// when dropped.
    fn read_key(&mut self) -> Result<Zeroizing<String>>;
}

/// Returns a fixed key, such as the one stored in the configuration
pub struct ConstantKeyReader {
    key: Zeroizing<String>,
}

impl ConstantKeyReader {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Zeroizing::new(key.into()),
        }
    }
}

impl KeyReader for ConstantKeyReader {
    fn read_key(&mut self) -> Result<Zeroizing<String>> {
        Ok(self.key.clone())
    }
}

/// Reads the key from any io::Read source
///
/// A single trailing line terminator is dropped so `echo key |` works.
pub struct ReaderKeyReader {
    reader: Box<dyn Read>,
}

impl ReaderKeyReader {
    pub fn new(reader: Box<dyn Read>) -> Self {
        Self { reader }
    }
}

impl KeyReader for ReaderKeyReader {
    fn read_key(&mut self) -> Result<Zeroizing<String>> {
        let mut data = Zeroizing::new(Vec::new());
        self.reader.read_to_end(&mut data).map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("error reading key: {}", e),
                e,
            )
        })?;
        let text = std::str::from_utf8(&data).map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Input,
                ErrorKind::KeyUnavailable,
                "key is not valid UTF-8",
                e,
            )
        })?;
        Ok(Zeroizing::new(strip_line_ending(text).to_string()))
    }
}

/// Reads the key from terminal with no echo
pub struct TerminalKeyReader;

impl TerminalKeyReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalKeyReader {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyReader for TerminalKeyReader {
    fn read_key(&mut self) -> Result<Zeroizing<String>> {
        if !io::stdin().is_terminal() {
            return Err(PlayfairError::with_kind(
                ErrorCategory::Input,
                ErrorKind::KeyUnavailable,
                "cannot read key from terminal - stdin is not a terminal",
            ));
        }

        io::stderr().write_all(b"Key (playfair): ").map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write prompt: {}", e),
                e,
            )
        })?;
        io::stderr().flush().map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to flush prompt: {}", e),
                e,
            )
        })?;

        let key = rpassword::read_password().map_err(|e| {
            PlayfairError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::KeyUnavailable,
                format!("failure reading key: {}", e),
                e,
            )
        })?;

        Ok(Zeroizing::new(key))
    }
}

/// Drop one trailing `\n` or `\r\n`.
pub(crate) fn strip_line_ending(s: &str) -> &str {
    s.strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(s)
}
