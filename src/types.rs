//! Core data model: documents, tagged text, keep-sets and filtered text.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw document fetched from a corpus. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    identifier: String,
    text: String,
}

impl Document {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            identifier: identifier.into(),
            text: text.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A word token paired with the part-of-speech label assigned by a tagger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedWord {
    pub text: String,
    pub tag: String,
}

impl TaggedWord {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        TaggedWord {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

/// Sentences of tagged words, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedText {
    pub sentences: Vec<Vec<TaggedWord>>,
}

impl TaggedText {
    pub fn new(sentences: Vec<Vec<TaggedWord>>) -> Self {
        TaggedText { sentences }
    }

    /// Build from `(word, tag)` pairs, mostly useful in tests and demos.
    ///
    /// ```
    /// use layered_cloze::TaggedText;
    ///
    /// let tagged = TaggedText::from_pairs(&[&[("The", "DT"), ("cat", "NN")]]);
    /// assert_eq!(tagged.shape(), vec![2]);
    /// ```
    pub fn from_pairs(sentences: &[&[(&str, &str)]]) -> Self {
        TaggedText {
            sentences: sentences
                .iter()
                .map(|sentence| {
                    sentence
                        .iter()
                        .map(|(text, tag)| TaggedWord::new(*text, *tag))
                        .collect()
                })
                .collect(),
        }
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Token count per sentence.
    pub fn shape(&self) -> Vec<usize> {
        self.sentences.iter().map(Vec::len).collect()
    }

    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }
}

/// The set of part-of-speech labels whose tokens survive selection.
///
/// Labels are plain strings; their meaning belongs to the tagger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeepSet {
    labels: BTreeSet<String>,
}

/// Proper nouns, common nouns and every verb form of the Penn Treebank tagset.
pub const ESSENTIAL_LABELS: &[&str] = &[
    "NNP", "NNPS", "NN", "NNS", "VB", "VBD", "VBG", "VBN", "VBP", "VBZ",
];

/// Proper nouns only.
pub const PROPER_NOUN_LABELS: &[&str] = &["NNP", "NNPS"];

impl KeepSet {
    pub fn empty() -> Self {
        KeepSet::default()
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeepSet {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Nouns and verbs, the default keep-set.
    pub fn essentials() -> Self {
        Self::from_labels(ESSENTIAL_LABELS.iter().copied())
    }

    pub fn proper_nouns() -> Self {
        Self::from_labels(PROPER_NOUN_LABELS.iter().copied())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Labels that the given tagset never produces, in sorted order.
    pub fn unknown_labels<'a>(&'a self, tagset: &[&str]) -> Vec<&'a str> {
        self.labels()
            .filter(|label| !tagset.contains(label))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for KeepSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_labels(iter)
    }
}

/// The marker that replaces a deleted token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placeholder(String);

impl Placeholder {
    pub fn new(marker: impl Into<String>) -> Self {
        Placeholder(marker.into())
    }

    /// A wider blank in the style of a printed cloze test.
    pub fn blank() -> Self {
        Placeholder("_____".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Placeholder(".".to_string())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tagged text after selection: labels stripped, deleted tokens replaced.
///
/// Always has the same shape as the [`TaggedText`] it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredText {
    pub sentences: Vec<Vec<String>>,
}

impl FilteredText {
    pub fn new(sentences: Vec<Vec<String>>) -> Self {
        FilteredText { sentences }
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Token count per sentence.
    pub fn shape(&self) -> Vec<usize> {
        self.sentences.iter().map(Vec::len).collect()
    }

    /// Number of tokens that are not the placeholder.
    pub fn kept_count(&self, placeholder: &Placeholder) -> usize {
        self.sentences
            .iter()
            .flatten()
            .filter(|token| token.as_str() != placeholder.as_str())
            .count()
    }
}
