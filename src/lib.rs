#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Part-of-speech cloze deletion for speech transcripts.
//!
//! Pick a speech, keep only the words of some grammatical categories (nouns
//! and verbs by default) and replace everything else with a placeholder. The
//! result is rendered as a plain digest or a small static web page.
//!
//! ## Pipeline
//!
//! ```text
//! CorpusSource -> Tokenizer (sentences, then words) -> Tagger -> Selector -> render
//! ```
//!
//! The corpus, tokenizer and tagger are traits ([`CorpusSource`],
//! [`Tokenizer`], [`Tagger`]); [`DirectoryCorpus`], [`UnicodeTokenizer`] and
//! [`LexiconTagger`] are the defaults.
//!
//! ## Example
//!
//! ```
//! use layered_cloze::{
//!     KeepSet, LexiconTagger, MemoryCorpus, Outcome, Output, Pipeline, Request, UnicodeTokenizer,
//! };
//!
//! let corpus = MemoryCorpus::new().with_document("cat.txt", "The cat sleeps.");
//! let pipeline = Pipeline::new(corpus, UnicodeTokenizer::new(), LexiconTagger::new());
//!
//! let request = Request::new("cat.txt")
//!     .with_keep(KeepSet::from_labels(["NN", "VBZ"]))
//!     .with_output(Output::Digest);
//! match pipeline.run(&request).unwrap() {
//!     Outcome::Digest { text, .. } => assert_eq!(text, ". cat sleeps ."),
//!     other => panic!("{:?}", other),
//! }
//! ```

mod collaborators;
mod config;
mod corpus;
mod display;
mod errors;
mod pipeline;
mod render;
mod selector;
mod tagger;
mod tokenizer;
mod types;

pub use collaborators::{CorpusSource, Tagger, Tokenizer};
pub use config::{
    ClozeConfig, OutputMode, CONFIG_FILE_NAME, DEFAULT_CORPUS_DIR, DEFAULT_IDENTIFIER,
    DEFAULT_OUTPUT,
};
pub use corpus::{DirectoryCorpus, MemoryCorpus};
pub use display::TaggedSentenceDisplay;
pub use errors::{ClozeError, ClozeResult, CorpusError, SentenceError, TokenizeError};
pub use pipeline::{
    DefaultPipeline, Outcome, Output, Pipeline, Request, SkippedSentence, TaggingReport,
};
pub use render::{digest_preview, render_digest, render_document, write_document, Theme};
pub use selector::Selector;
pub use tagger::{LexiconTagger, PENN_TAGSET};
pub use tokenizer::UnicodeTokenizer;
pub use types::{
    Document, FilteredText, KeepSet, Placeholder, TaggedText, TaggedWord, ESSENTIAL_LABELS,
    PROPER_NOUN_LABELS,
};

#[cfg(test)]
mod tests;
