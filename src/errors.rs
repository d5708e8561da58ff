//! Error types for the cloze pipeline.
//!
//! Resolution failures and per-sentence tokenization failures are kept as
//! separate types because the pipeline recovers from each of them differently.
//! Everything else ends up in [`ClozeError`] and reaches the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a [`CorpusSource`](crate::CorpusSource).
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The identifier is not part of the corpus listing.
    #[error("no document named '{identifier}'")]
    NotFound { identifier: String },

    /// The document exists but could not be read.
    #[error("document '{identifier}' could not be read: {message}")]
    Unreadable { identifier: String, message: String },

    /// The corpus listing itself is unavailable.
    #[error("corpus at {} could not be listed: {message}", root.display())]
    Listing { root: PathBuf, message: String },
}

impl CorpusError {
    pub fn not_found(identifier: impl Into<String>) -> Self {
        CorpusError::NotFound {
            identifier: identifier.into(),
        }
    }

    /// Returns true for an unknown identifier, as opposed to an I/O problem.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CorpusError::NotFound { .. })
    }
}

/// Failures reported by [`Tokenizer::split_words`](crate::Tokenizer::split_words).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A non-whitespace control character appeared in the sentence.
    #[error("control character U+{code:04X} at byte {byte_offset}")]
    ControlCharacter { code: u32, byte_offset: usize },

    /// The sentence produced more tokens than the configured limit.
    #[error("sentence has {count} tokens, limit is {limit}")]
    TooLong { count: usize, limit: usize },
}

/// Why a sentence was left out of the tagged text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentenceError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// The tagger returned a different number of labels than it was given words.
    #[error("tagger returned {tags} labels for {words} words")]
    TagCount { words: usize, tags: usize },
}

/// Errors that terminate a pipeline invocation.
#[derive(Debug, Error)]
pub enum ClozeError {
    /// A corpus failure the orchestrator does not recover from (e.g. listing).
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// Writing the rendered document failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be read or parsed.
    #[error("configuration error in {path}: {message}")]
    Config { path: String, message: String },
}

/// Result type for cloze operations.
pub type ClozeResult<T> = Result<T, ClozeError>;
