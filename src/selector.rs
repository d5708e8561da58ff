//! Cloze selection: keep tokens whose label is in the keep-set, blank the rest.

use crate::types::{FilteredText, KeepSet, Placeholder, TaggedText, TaggedWord};

/// Replaces every token outside a [`KeepSet`] with a [`Placeholder`].
///
/// Selection never adds or drops tokens, so the output always has the shape
/// of the input.
///
/// ```
/// use layered_cloze::{KeepSet, Selector, TaggedText};
///
/// let tagged = TaggedText::from_pairs(&[&[("The", "DT"), ("cat", "NN"), ("sleeps", "VBZ")]]);
/// let filtered = Selector::default().select(&tagged, &KeepSet::from_labels(["NN", "VBZ"]));
/// assert_eq!(filtered.sentences, vec![vec![".", "cat", "sleeps"]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Selector {
    placeholder: Placeholder,
}

impl Selector {
    pub fn new(placeholder: Placeholder) -> Self {
        Selector { placeholder }
    }

    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    pub fn select(&self, tagged: &TaggedText, keep: &KeepSet) -> FilteredText {
        FilteredText {
            sentences: tagged
                .sentences
                .iter()
                .map(|sentence| self.select_sentence(sentence, keep))
                .collect(),
        }
    }

    pub fn select_sentence(&self, sentence: &[TaggedWord], keep: &KeepSet) -> Vec<String> {
        sentence
            .iter()
            .map(|word| self.select_word(word, keep).to_string())
            .collect()
    }

    fn select_word<'a>(&'a self, word: &'a TaggedWord, keep: &KeepSet) -> &'a str {
        if keep.contains(&word.tag) {
            &word.text
        } else {
            self.placeholder.as_str()
        }
    }
}
