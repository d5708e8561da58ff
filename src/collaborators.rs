//! Seams to the external collaborators: corpus, tokenizer and tagger.
//!
//! The selector and renderer only ever see [`TaggedText`](crate::TaggedText),
//! so any implementation of these traits can be swapped in, including stubs
//! in tests.

use crate::errors::{CorpusError, TokenizeError};
use crate::types::{Document, TaggedWord};

/// A named collection of raw documents.
pub trait CorpusSource {
    /// Fetch the document with the given identifier.
    ///
    /// Unknown identifiers yield [`CorpusError::NotFound`].
    fn resolve(&self, identifier: &str) -> Result<Document, CorpusError>;

    /// Every identifier `resolve` accepts, in a stable order.
    fn list_identifiers(&self) -> Result<Vec<String>, CorpusError>;
}

/// Splits raw text into sentences, and sentences into word tokens.
pub trait Tokenizer {
    /// Sentences in reading order.
    fn split_sentences(&self, text: &str) -> Vec<String>;

    /// Word tokens of one sentence in reading order.
    ///
    /// A failure only affects this sentence; the pipeline skips it.
    fn split_words(&self, sentence: &str) -> Result<Vec<String>, TokenizeError>;
}

/// Assigns a part-of-speech label to every word of a sentence.
pub trait Tagger {
    /// Every label `tag` can produce.
    fn tagset(&self) -> &[&'static str];

    /// Exactly one [`TaggedWord`] per input word, in the same order.
    fn tag(&self, words: &[String]) -> Vec<TaggedWord>;
}

impl<T: CorpusSource + ?Sized> CorpusSource for &T {
    fn resolve(&self, identifier: &str) -> Result<Document, CorpusError> {
        (**self).resolve(identifier)
    }

    fn list_identifiers(&self) -> Result<Vec<String>, CorpusError> {
        (**self).list_identifiers()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        (**self).split_sentences(text)
    }

    fn split_words(&self, sentence: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).split_words(sentence)
    }
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tagset(&self) -> &[&'static str] {
        (**self).tagset()
    }

    fn tag(&self, words: &[String]) -> Vec<TaggedWord> {
        (**self).tag(words)
    }
}
