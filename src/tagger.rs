//! A small deterministic Penn Treebank tagger.
//!
//! Tags come from, in order of precedence:
//! 1. caller overrides,
//! 2. punctuation and number shapes,
//! 3. a closed-class lexicon (determiners, pronouns, modals, auxiliaries, ...),
//! 4. capitalisation (proper nouns),
//! 5. left context and suffix heuristics, falling back to `NN`.
//!
//! It is no match for a statistical tagger, but it is good enough to pick out
//! nouns and verbs in plain transcripts and it never needs a model file.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::collaborators::Tagger;
use crate::types::TaggedWord;

/// The Penn Treebank tagset, including punctuation tags.
pub const PENN_TAGSET: &[&str] = &[
    "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN", "NNS", "NNP",
    "NNPS", "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS", "RP", "SYM", "TO", "UH", "VB",
    "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT", "WP", "WP$", "WRB", "$", "#", "``", "''", "(",
    ")", ",", ".", ":",
];

static LEXICON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &[&str])] = &[
        (
            "DT",
            &[
                "the", "a", "an", "this", "these", "those", "every", "each", "some", "any", "no",
                "another", "either", "neither",
            ],
        ),
        ("PDT", &["all", "both", "half"]),
        (
            "IN",
            &[
                "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "upon",
                "about", "above", "across", "after", "against", "along", "among", "around",
                "before", "behind", "below", "beneath", "beside", "between", "beyond", "during",
                "except", "inside", "near", "outside", "over", "since", "through", "throughout",
                "toward", "towards", "under", "until", "unlike", "within", "without", "whether",
                "because", "although", "though", "if", "while", "as", "than", "that", "per",
            ],
        ),
        ("CC", &["and", "or", "but", "nor", "yet", "plus"]),
        (
            "PRP",
            &[
                "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
                "yourself", "himself", "herself", "itself", "ourselves", "themselves",
            ],
        ),
        ("PRP$", &["my", "your", "his", "her", "its", "our", "their"]),
        (
            "MD",
            &[
                "will", "would", "shall", "should", "can", "could", "may", "might", "must", "ca",
                "wo", "'ll", "'d",
            ],
        ),
        ("TO", &["to"]),
        ("WDT", &["which", "whatever", "whichever"]),
        ("WP", &["who", "whom", "what"]),
        ("WP$", &["whose"]),
        ("WRB", &["when", "where", "why", "how", "whenever", "wherever"]),
        (
            "RB",
            &[
                "not", "n't", "very", "also", "just", "only", "never", "always", "often", "now",
                "then", "here", "too", "already", "still", "again", "even", "ever", "perhaps",
                "quite", "rather", "soon", "today", "tomorrow", "yesterday", "together", "so",
                "once", "instead", "indeed", "almost", "away", "ago", "well", "far", "however",
            ],
        ),
        ("RBR", &["more", "less"]),
        ("RBS", &["most", "least"]),
        ("JJR", &["better", "worse", "greater", "larger", "higher", "lower", "fewer"]),
        ("JJS", &["best", "worst", "greatest", "largest", "highest", "lowest"]),
        (
            "JJ",
            &[
                "new", "good", "great", "free", "own", "other", "such", "many", "much", "few",
                "strong", "long", "high", "large", "small", "old", "young", "full", "whole",
                "last", "next", "first", "same", "able", "sure", "clear", "true", "real",
            ],
        ),
        ("UH", &["oh", "yes", "amen"]),
        (
            "CD",
            &[
                "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
                "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand",
                "million", "billion",
            ],
        ),
        ("VB", &["be"]),
        ("VBZ", &["is", "has", "does"]),
        ("VBP", &["are", "am", "have", "do", "'re", "'ve", "'m"]),
        (
            "VBD",
            &[
                "was", "were", "had", "did", "said", "made", "took", "gave", "went", "came",
                "saw", "knew", "thought", "told", "found", "became", "began", "brought", "built",
                "kept", "left", "met", "paid", "sent", "spent", "stood", "won", "wrote", "held",
                "felt", "led", "lost", "fought",
            ],
        ),
        (
            "VBN",
            &[
                "been", "done", "gone", "given", "taken", "known", "seen", "shown", "written",
                "become", "begun", "chosen", "spoken", "driven", "grown", "risen", "fallen",
            ],
        ),
        ("VBG", &["being", "having", "doing"]),
    ];

    let mut lexicon = HashMap::new();
    for (tag, words) in entries {
        for word in *words {
            lexicon.insert(*word, *tag);
        }
    }
    lexicon
});

const BE_FORMS: &[&str] = &["be", "is", "are", "am", "was", "were", "been", "being", "'re", "'m"];
const HAVE_FORMS: &[&str] = &["have", "has", "had", "having", "'ve"];
const SUBJECT_PRONOUNS: &[&str] = &["i", "we", "you", "they"];
/// Titles that tag as proper nouns even at the start of a sentence.
const TITLES: &[&str] = &["mr", "mrs", "ms", "dr", "prof", "gen", "sen", "rep", "gov", "pres"];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ship", "ance", "ence", "ism", "ist", "hood", "dom",
];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "ical", "ic", "less", "ish", "al", "ary",
];

#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    overrides: HashMap<String, String>,
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force `tag` for `word` (matched case-insensitively).
    pub fn with_override(mut self, word: &str, tag: impl Into<String>) -> Self {
        self.overrides.insert(word.to_lowercase(), tag.into());
        self
    }

    /// Tag `words[idx]`, given the tags already assigned to `words[..idx]`.
    fn tag_word<'a>(
        &'a self,
        words: &[String],
        idx: usize,
        tagged: &[TaggedWord],
    ) -> std::borrow::Cow<'a, str> {
        let word = words[idx].as_str();
        let prev_tag = tagged.last().map(|w| w.tag.as_str());
        let lower = word.to_lowercase();

        if let Some(tag) = self.overrides.get(&lower) {
            return tag.as_str().into();
        }
        if let Some(tag) = punctuation_tag(word) {
            return tag.into();
        }
        if is_number(word) {
            return "CD".into();
        }

        // Adverbs are transparent for context: "will not go", "has quietly grown".
        let context = tagged.iter().rev().find(|w| w.tag != "RB");
        let context_tag = context.map(|w| w.tag.as_str());
        let context_lower = context.map(|w| w.text.to_lowercase()).unwrap_or_default();

        match lower.as_str() {
            "there" => {
                let next_is_be = words
                    .get(idx + 1)
                    .map_or(false, |next| BE_FORMS.contains(&next.to_lowercase().as_str()));
                return (if next_is_be { "EX" } else { "RB" }).into();
            }
            "'s" => {
                return (if prev_tag == Some("PRP") { "VBZ" } else { "POS" }).into();
            }
            _ => {}
        }

        let capitalized = word.chars().next().map_or(false, char::is_uppercase);
        let sentence_initial = idx == 0;

        if let Some(tag) = LEXICON.get(lower.as_str()) {
            // "US", "May" and friends mid-sentence are names, not pronouns or modals.
            if !(capitalized && !sentence_initial && is_shouty_or_open_class(word, tag)) {
                return (*tag).into();
            }
        }

        if capitalized && (!sentence_initial || TITLES.contains(&lower.as_str())) {
            return proper_noun_tag(word).into();
        }

        open_class_tag(&lower, context_tag, &context_lower).into()
    }
}

impl Tagger for LexiconTagger {
    fn tagset(&self) -> &[&'static str] {
        PENN_TAGSET
    }

    fn tag(&self, words: &[String]) -> Vec<TaggedWord> {
        let mut tagged: Vec<TaggedWord> = Vec::with_capacity(words.len());
        for idx in 0..words.len() {
            let tag = self.tag_word(words, idx, &tagged).into_owned();
            tagged.push(TaggedWord::new(words[idx].as_str(), tag));
        }
        tagged
    }
}

/// Capitalised mid-sentence lexicon hits that should still be read as names.
fn is_shouty_or_open_class(word: &str, tag: &str) -> bool {
    let all_caps = word.len() > 1 && word.chars().all(|c| c.is_uppercase() || c == '.');
    all_caps || matches!(tag, "MD" | "JJ" | "JJR" | "JJS" | "CD" | "VBD" | "VBN")
}

fn proper_noun_tag(word: &str) -> &'static str {
    let lower = word.to_lowercase();
    if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us")
    {
        "NNPS"
    } else {
        "NNP"
    }
}

/// Tag a word outside the lexicon from its suffix and the nearest non-adverb before it.
fn open_class_tag(lower: &str, prev_tag: Option<&str>, prev_lower: &str) -> &'static str {
    let after_determiner = matches!(prev_tag, Some("DT" | "PRP$" | "JJ" | "POS" | "PDT"));

    if matches!(prev_tag, Some("MD" | "TO")) {
        return "VB";
    }

    if lower.len() > 4 && lower.ends_with("ing") {
        return if after_determiner { "NN" } else { "VBG" };
    }
    if lower.len() > 3 && lower.ends_with("ed") {
        if HAVE_FORMS.contains(&prev_lower) || BE_FORMS.contains(&prev_lower) {
            return "VBN";
        }
        return if after_determiner { "JJ" } else { "VBD" };
    }
    if lower.len() > 3 && lower.ends_with("ly") {
        return "RB";
    }

    if let Some(stem) = plural_stem(lower) {
        if has_suffix(stem, NOUN_SUFFIXES) {
            return "NNS";
        }
        if matches!(prev_tag, Some("NN" | "NNP" | "PRP")) {
            return "VBZ";
        }
        return "NNS";
    }

    if has_suffix(lower, NOUN_SUFFIXES) {
        return "NN";
    }
    if has_suffix(lower, ADJECTIVE_SUFFIXES) {
        return "JJ";
    }
    if SUBJECT_PRONOUNS.contains(&prev_lower) {
        return "VBP";
    }
    "NN"
}

/// The word minus a plural `s`, if it looks like a plural.
fn plural_stem(lower: &str) -> Option<&str> {
    if lower.len() <= 3 || ["ss", "us", "is"].iter().any(|end| lower.ends_with(end)) {
        return None;
    }
    lower.strip_suffix('s')
}

fn has_suffix(word: &str, suffixes: &[&str]) -> bool {
    suffixes
        .iter()
        .any(|suffix| word.len() > suffix.len() + 1 && word.ends_with(suffix))
}

fn is_number(word: &str) -> bool {
    word.chars().next().map_or(false, |c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '/' | ':' | '-'))
}

fn punctuation_tag(word: &str) -> Option<&'static str> {
    if word.chars().any(char::is_alphanumeric) {
        return None;
    }
    let tag = match word {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "\u{2013}" | "\u{2014}" | "..." | "\u{2026}" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\u{201c}" | "`" | "``" => "``",
        "\"" | "'" | "\u{201d}" | "''" => "''",
        "$" => "$",
        "#" => "#",
        _ => "SYM",
    };
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(sentence: &str) -> Vec<String> {
        let words: Vec<String> = sentence.split(' ').map(String::from).collect();
        LexiconTagger::new()
            .tag(&words)
            .into_iter()
            .map(|w| w.tag)
            .collect()
    }

    #[test]
    fn determiner_noun_verb() {
        assert_eq!(tags("The cat sleeps ."), vec!["DT", "NN", "VBZ", "."]);
    }

    #[test]
    fn modal_then_base_verb_and_proper_nouns() {
        assert_eq!(
            tags("We will defend the United States ."),
            vec!["PRP", "MD", "VB", "DT", "NNP", "NNPS", "."]
        );
    }

    #[test]
    fn participle_after_auxiliary() {
        assert_eq!(
            tags("Our economy has changed quickly ."),
            vec!["PRP$", "NN", "VBZ", "VBN", "RB", "."]
        );
    }

    #[test]
    fn numbers_plurals_and_past_tense() {
        assert_eq!(
            tags("In 1962 , Americans faced 3 challenges"),
            vec!["IN", "CD", ",", "NNPS", "VBD", "CD", "NNS"]
        );
    }

    #[test]
    fn contractions_from_the_tokenizer() {
        assert_eq!(tags("We ca n't wait"), vec!["PRP", "MD", "RB", "VB"]);
        assert_eq!(
            tags("it 's the nation 's hope"),
            vec!["PRP", "VBZ", "DT", "NN", "POS", "NN"]
        );
    }

    #[test]
    fn titles_are_proper_nouns_anywhere() {
        assert_eq!(tags("Mr . Speaker"), vec!["NNP", ".", "NNP"]);
    }

    #[test]
    fn existential_there() {
        assert_eq!(tags("there is hope"), vec!["EX", "VBZ", "NN"]);
        assert_eq!(tags("go there"), vec!["NN", "RB"]);
    }

    #[test]
    fn overrides_win() {
        let tagger = LexiconTagger::new().with_override("Medicare", "NNP");
        let words = vec!["Medicare".to_string(), "works".to_string()];
        let tagged = tagger.tag(&words);
        assert_eq!(tagged[0].tag, "NNP");
        assert_eq!(tagged[1].tag, "VBZ");
    }

    #[test]
    fn one_tag_per_word_and_all_in_tagset() {
        let words: Vec<String> = "Mr. Speaker , the state of our Union is good ; we 've worked hard !"
            .split(' ')
            .map(String::from)
            .collect();
        let tagged = LexiconTagger::new().tag(&words);
        assert_eq!(tagged.len(), words.len());
        for (word, tagged) in words.iter().zip(&tagged) {
            assert_eq!(word, &tagged.text);
            assert!(PENN_TAGSET.contains(&tagged.tag.as_str()), "{:?}", tagged);
        }
    }
}
