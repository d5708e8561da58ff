//! Unicode tokenizer built on `unicode-segmentation`.
//!
//! Sentence and word boundaries follow UAX #29, with two English-specific
//! adjustments: sentences are re-joined after common abbreviations ("Mr.",
//! "U.S."), and contractions are split the Penn Treebank way ("can't" becomes
//! "ca" + "n't").

use std::collections::HashSet;

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use crate::collaborators::Tokenizer;
use crate::errors::TokenizeError;

/// Abbreviations that never end a sentence.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "dr", "mr", "mrs", "ms", "prof", "sr", "jr", "gen", "col", "lt", "capt", "sen", "rep",
        "gov", "pres", "hon", "rev", "e.g", "i.e", "vs", "approx", "jan", "feb", "apr", "jun",
        "jul", "aug", "sept", "sep", "oct", "nov", "dec",
    ]
    .into_iter()
    .collect()
});

/// Abbreviations that end a sentence only when the next one starts with an
/// [`OPENERS`] word: "aid to the U.S. We must" splits, "the U.S. Congress" does not.
static FINAL_ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "st", "inc", "ltd", "corp", "co", "etc", "u.s", "u.k", "u.n", "u.s.a", "p.m", "a.m",
    ]
    .into_iter()
    .collect()
});

/// Words that commonly start a sentence and rarely follow an abbreviation.
static OPENERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "we", "you", "he", "she", "it", "they", "this", "these", "those", "that", "there",
        "the", "a", "an", "but", "and", "so", "yet", "our", "my", "now", "today", "if", "when",
        "let", "in", "as",
    ]
    .into_iter()
    .collect()
});

/// Clitics split off the end of a word, checked in order.
const CLITICS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

const DEFAULT_MAX_TOKENS: usize = 1000;

#[derive(Debug, Clone)]
pub struct UnicodeTokenizer {
    max_tokens: usize,
    extra_abbreviations: HashSet<String>,
}

impl Default for UnicodeTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl UnicodeTokenizer {
    pub fn new() -> Self {
        UnicodeTokenizer {
            max_tokens: DEFAULT_MAX_TOKENS,
            extra_abbreviations: HashSet::new(),
        }
    }

    /// Sentences with more tokens than this fail to split.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_custom_abbreviations(mut self, abbreviations: &[&str]) -> Self {
        for abbrev in abbreviations {
            self.extra_abbreviations
                .insert(abbrev.trim_end_matches('.').to_lowercase());
        }
        self
    }

    /// True when the sentence in `text` runs on into `next`.
    fn continues_into(&self, text: &str, next: Option<&str>) -> bool {
        let last_word = match trailing_abbreviation(text) {
            Some(word) => word,
            None => return false,
        };
        if ABBREVIATIONS.contains(last_word.as_str()) || self.extra_abbreviations.contains(&last_word)
        {
            return true;
        }
        FINAL_ABBREVIATIONS.contains(last_word.as_str()) && !next.map_or(false, starts_with_opener)
    }
}

/// The lowercased word before a final `.`, if `text` ends that way.
fn trailing_abbreviation(text: &str) -> Option<String> {
    let without_period = text.trim_end().strip_suffix('.')?;
    let last_word = without_period
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if last_word.is_empty() {
        None
    } else {
        Some(last_word)
    }
}

fn starts_with_opener(text: &str) -> bool {
    let first_word = text
        .split_word_bounds()
        .find(|segment| segment.chars().any(char::is_alphanumeric))
        .unwrap_or("")
        .to_lowercase();
    OPENERS.contains(first_word.as_str())
}

impl Tokenizer for UnicodeTokenizer {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        let bounds: Vec<&str> = text.split_sentence_bounds().collect();
        for (idx, bound) in bounds.iter().enumerate() {
            pending.push_str(bound);
            if self.continues_into(&pending, bounds.get(idx + 1).copied()) {
                continue;
            }
            let sentence = pending.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            pending.clear();
        }

        let rest = pending.trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences
    }

    fn split_words(&self, sentence: &str) -> Result<Vec<String>, TokenizeError> {
        if let Some((byte_offset, c)) = sentence
            .char_indices()
            .find(|(_, c)| c.is_control() && !c.is_whitespace())
        {
            return Err(TokenizeError::ControlCharacter {
                code: c as u32,
                byte_offset,
            });
        }

        let mut tokens = Vec::new();
        for segment in sentence.split_word_bounds() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            push_word(segment, &mut tokens);
        }

        if tokens.len() > self.max_tokens {
            return Err(TokenizeError::TooLong {
                count: tokens.len(),
                limit: self.max_tokens,
            });
        }
        Ok(tokens)
    }
}

/// Push `word`, splitting a trailing clitic into its own token.
///
/// Typographic apostrophes are normalized to `'` first.
fn push_word(word: &str, tokens: &mut Vec<String>) {
    let word = word.replace('\u{2019}', "'");
    for clitic in CLITICS {
        if word.len() <= clitic.len() {
            continue;
        }
        let idx = word.len() - clitic.len();
        if word.is_char_boundary(idx) && word[idx..].eq_ignore_ascii_case(clitic) {
            tokens.push(word[..idx].to_string());
            tokens.push(word[idx..].to_string());
            return;
        }
    }
    tokens.push(word);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_sentences_on_terminal_punctuation() {
        let tokenizer = UnicodeTokenizer::new();
        assert_eq!(
            tokenizer.split_sentences("Is it over? Yes!  We won.\n\nGo home."),
            vec!["Is it over?", "Yes!", "We won.", "Go home."]
        );
    }

    #[test]
    fn keeps_abbreviations_inside_sentences() {
        let tokenizer = UnicodeTokenizer::new();
        assert_eq!(
            tokenizer.split_sentences("Mr. Speaker, the state is strong. Dr. Smith agrees."),
            vec!["Mr. Speaker, the state is strong.", "Dr. Smith agrees."]
        );
    }

    #[test]
    fn company_and_country_abbreviations_end_sentences_before_openers() {
        let tokenizer = UnicodeTokenizer::new();
        assert_eq!(
            tokenizer.split_sentences("We sent aid to the U.S. We must act. The U.S. Congress agreed."),
            vec!["We sent aid to the U.S.", "We must act.", "The U.S. Congress agreed."]
        );
        assert_eq!(
            tokenizer.split_sentences("He moved to St. Louis. It grew. Acme Co. The rest left."),
            vec!["He moved to St. Louis.", "It grew.", "Acme Co.", "The rest left."]
        );
    }

    #[test]
    fn custom_abbreviations() {
        let tokenizer = UnicodeTokenizer::new().with_custom_abbreviations(&["Amb."]);
        assert_eq!(
            tokenizer.split_sentences("Amb. Stevenson spoke. We listened."),
            vec!["Amb. Stevenson spoke.", "We listened."]
        );
    }

    #[test]
    fn empty_text_has_no_sentences() {
        let tokenizer = UnicodeTokenizer::new();
        assert!(tokenizer.split_sentences("").is_empty());
        assert!(tokenizer.split_sentences("  \n\t ").is_empty());
    }

    #[test]
    fn splits_words_and_punctuation() {
        let tokenizer = UnicodeTokenizer::new();
        assert_eq!(
            tokenizer.split_words("The cat sleeps, and 1,000 dogs bark.").unwrap(),
            vec!["The", "cat", "sleeps", ",", "and", "1,000", "dogs", "bark", "."]
        );
    }

    #[test]
    fn splits_contractions() {
        let tokenizer = UnicodeTokenizer::new();
        assert_eq!(
            tokenizer.split_words("We can't wait; it\u{2019}s late.").unwrap(),
            vec!["We", "ca", "n't", "wait", ";", "it", "'s", "late", "."]
        );
    }

    #[test]
    fn control_characters_fail_the_sentence() {
        let tokenizer = UnicodeTokenizer::new();
        assert_eq!(
            tokenizer.split_words("bad\u{0}word"),
            Err(TokenizeError::ControlCharacter {
                code: 0,
                byte_offset: 3
            })
        );
        assert!(tokenizer.split_words("line\nbreak\tand tab").is_ok());
    }

    #[test]
    fn token_limit() {
        let tokenizer = UnicodeTokenizer::new().with_max_tokens(2);
        assert_eq!(
            tokenizer.split_words("a b c"),
            Err(TokenizeError::TooLong { count: 3, limit: 2 })
        );
        assert_eq!(tokenizer.split_words("a b").unwrap(), vec!["a", "b"]);
    }
}
