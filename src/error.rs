use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// The configuration (alphabet, dimensions, key or separator) is
    /// unusable. It must be corrected and the grid rebuilt; retrying with
    /// the same configuration will fail the same way.
    Config,

    /// The text handed to encode/decode cannot be processed with the
    /// current grid. The grid is unaffected and the call may be retried
    /// with corrected input.
    Input,

    /// Any failure that cannot be confidently attributed to any other
    /// category, including violated internal invariants. Callers should
    /// present these as unexpected rather than as "fix your input".
    Internal,
}

/// Fine-grained condition flags for consumers that want to branch on error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Grid height or width is smaller than two.
    InvalidDimension,
    /// The alphabet length differs from height * width.
    SizeMismatch,
    /// The key is empty or uses characters outside the alphabet.
    InvalidKey,
    /// The separator is not a member of the alphabet.
    InvalidSeparator,
    /// The alphabet contains a character more than once.
    DuplicateCharacter,
    /// Plaintext contains the separator character.
    SeparatorInInput,
    /// Input contains a character that has no cell in the grid.
    CharacterNotInGrid,
    /// Ciphertext has an odd number of characters.
    OddLengthInput,
    /// A ciphertext digraph could not have been produced by encoding.
    InvalidCiphertext,
    /// Both characters of a digraph resolved to the same cell after pairing.
    DuplicatePosition,
    /// Unexpected state reached within playfair logic.
    InternalInvariant,
    /// The configuration file is not valid JSON or has the wrong shape.
    ConfigFormat,
    /// The key could not be obtained from the configured reader.
    KeyUnavailable,
    /// Interaction with the filesystem, stdin/stdout, or other I/O failed.
    Io,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct PlayfairError {
    /// Broad error category, always provided.
    pub category: ErrorCategory,
    /// Optional specific condition tag for consumers that need to
    /// branch their behavior. Any code consuming errors MUST handle
    /// the absence of a defined kind.
    pub kind: Option<ErrorKind>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl PlayfairError {
    /// Creates a new error with a required category and display message.
    pub fn new(category: ErrorCategory, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: None,
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that also tags the failure with a kind.
    pub fn with_kind(category: ErrorCategory, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that retains the originating source error.
    pub fn with_source(
        category: ErrorCategory,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: None,
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Creates a new error that carries both a kind tag and the originating source error.
    pub fn with_kind_and_source(
        category: ErrorCategory,
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Shorthand for a tagged configuration error.
    pub(crate) fn config(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorCategory::Config, kind, msg)
    }

    /// Shorthand for a tagged input error.
    pub(crate) fn input(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorCategory::Input, kind, msg)
    }

    /// Shorthand for a tagged internal error.
    pub(crate) fn internal(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorCategory::Internal, kind, msg)
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// True when the error signals a logic defect rather than bad
    /// configuration or input.
    pub fn is_internal(&self) -> bool {
        self.category == ErrorCategory::Internal
    }

    /// Wraps the current error with a higher-level message while preserving the original as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let category = self.category;
        let kind = self.kind;
        Self {
            category,
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PlayfairError>;
