//! The pipeline entry point: resolve, tokenize, tag, select, render.
//!
//! Two failures are recovered here and nowhere else:
//! - an identifier the corpus cannot resolve becomes [`Outcome::Unresolved`],
//!   carrying the full list of valid identifiers;
//! - a sentence the tokenizer cannot split, or the tagger mislabels, is
//!   skipped and reported in the outcome.
//!
//! Everything else (listing failures, write failures) is returned as an error.

use std::fmt::Write as _;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::collaborators::{CorpusSource, Tagger, Tokenizer};
use crate::config::{ClozeConfig, DEFAULT_OUTPUT};
use crate::corpus::DirectoryCorpus;
use crate::display::TaggedSentenceDisplay;
use crate::errors::{ClozeResult, CorpusError, SentenceError};
use crate::render::{render_digest, write_document, Theme};
use crate::selector::Selector;
use crate::tagger::LexiconTagger;
use crate::tokenizer::UnicodeTokenizer;
use crate::types::{KeepSet, TaggedText, TaggedWord};

/// Where a run sends its rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Write an HTML page, creating or truncating the file.
    Document(PathBuf),
    /// Return the plain digest without touching the filesystem.
    Digest,
}

/// One invocation of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub identifier: String,
    pub keep: KeepSet,
    pub output: Output,
}

impl Request {
    /// Nouns and verbs of `identifier`, written to `index.html`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Request {
            identifier: identifier.into(),
            keep: KeepSet::essentials(),
            output: Output::Document(PathBuf::from(DEFAULT_OUTPUT)),
        }
    }

    pub fn with_keep(mut self, keep: KeepSet) -> Self {
        self.keep = keep;
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }
}

/// A sentence dropped because word splitting or tagging failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSentence {
    /// Position among the sentences produced by the sentence splitter.
    pub index: usize,
    pub text: String,
    pub error: SentenceError,
}

/// Tagged text plus the sentences that could not be tokenized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggingReport {
    pub tagged: TaggedText,
    pub skipped: Vec<SkippedSentence>,
}

/// How an invocation ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written {
        path: PathBuf,
        sentences: usize,
        skipped: Vec<SkippedSentence>,
    },
    Digest {
        text: String,
        skipped: Vec<SkippedSentence>,
    },
    /// The identifier did not resolve; nothing was written.
    Unresolved {
        identifier: String,
        reason: String,
        available: Vec<String>,
    },
}

impl Outcome {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Outcome::Unresolved { .. })
    }

    pub fn skipped(&self) -> &[SkippedSentence] {
        match self {
            Outcome::Written { skipped, .. } | Outcome::Digest { skipped, .. } => skipped,
            Outcome::Unresolved { .. } => &[],
        }
    }

    /// Human-readable summary for the caller.
    pub fn report(&self) -> String {
        let mut report = String::new();
        match self {
            Outcome::Written {
                path, sentences, ..
            } => {
                write!(report, "Wrote {} paragraphs to {}", sentences, path.display()).unwrap();
            }
            Outcome::Digest { text, .. } => report.push_str(text),
            Outcome::Unresolved {
                identifier,
                reason,
                available,
            } => {
                writeln!(report, "Could not find '{}': {}", identifier, reason).unwrap();
                report.push_str("Please try again. These are your options:");
                for option in available {
                    write!(report, "\n  {}", option).unwrap();
                }
            }
        }
        let skipped = self.skipped();
        if !skipped.is_empty() {
            write!(report, "\n({} sentences skipped:", skipped.len()).unwrap();
            for sentence in skipped {
                write!(report, " #{} {};", sentence.index, sentence.error).unwrap();
            }
            report.push(')');
        }
        report
    }
}

/// Collaborators plus rendering settings, ready to serve requests.
#[derive(Debug, Clone)]
pub struct Pipeline<C, T, G> {
    corpus: C,
    tokenizer: T,
    tagger: G,
    selector: Selector,
    theme: Theme,
    escape_html: bool,
}

/// The directory-backed pipeline the CLI runs.
pub type DefaultPipeline = Pipeline<DirectoryCorpus, UnicodeTokenizer, LexiconTagger>;

impl DefaultPipeline {
    pub fn from_config(config: &ClozeConfig) -> Self {
        Pipeline::new(
            DirectoryCorpus::new(config.corpus_dir.clone()),
            config.tokenizer(),
            LexiconTagger::new(),
        )
        .with_selector(config.selector())
        .with_theme(config.theme.clone())
        .with_escape_html(config.escape_html)
    }
}

impl<C, T, G> Pipeline<C, T, G>
where
    C: CorpusSource,
    T: Tokenizer,
    G: Tagger,
{
    pub fn new(corpus: C, tokenizer: T, tagger: G) -> Self {
        Pipeline {
            corpus,
            tokenizer,
            tagger,
            selector: Selector::default(),
            theme: Theme::default(),
            escape_html: false,
        }
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Split into sentences, then words, then tag each sentence.
    ///
    /// A sentence whose tags do not line up one-to-one with its words is
    /// skipped like a tokenizer failure, so the shape of the tagged text
    /// always matches the words that went in.
    pub fn tag_text(&self, text: &str) -> TaggingReport {
        let sentences = self.tokenizer.split_sentences(text);
        debug!(sentences = sentences.len(), "split sentences");

        let mut tagged = Vec::with_capacity(sentences.len());
        let mut skipped = Vec::new();
        for (index, sentence) in sentences.into_iter().enumerate() {
            match self.tag_sentence(&sentence) {
                Ok(words) => tagged.push(words),
                Err(error) => {
                    warn!(index, %error, "skipping sentence");
                    skipped.push(SkippedSentence {
                        index,
                        text: sentence,
                        error,
                    });
                }
            }
        }

        TaggingReport {
            tagged: TaggedText::new(tagged),
            skipped,
        }
    }

    fn tag_sentence(&self, sentence: &str) -> Result<Vec<TaggedWord>, SentenceError> {
        let words = self.tokenizer.split_words(sentence)?;
        let tagged = self.tagger.tag(&words);
        if tagged.len() != words.len() {
            return Err(SentenceError::TagCount {
                words: words.len(),
                tags: tagged.len(),
            });
        }
        Ok(tagged)
    }

    pub fn run(&self, request: &Request) -> ClozeResult<Outcome> {
        let document = match self.corpus.resolve(&request.identifier) {
            Ok(document) => document,
            Err(err) => return self.unresolved(&request.identifier, err),
        };

        let unknown = request.keep.unknown_labels(self.tagger.tagset());
        if !unknown.is_empty() {
            warn!(labels = ?unknown, "keep-set has labels the tagger never assigns");
        }

        let report = self.tag_text(document.text());
        if let Some(first) = report.tagged.sentences.first() {
            debug!(
                "first sentence of {}:\n{}",
                document.identifier(),
                TaggedSentenceDisplay::new(first)
                    .with_filter(&request.keep, self.selector.placeholder())
            );
        }

        let filtered = self.selector.select(&report.tagged, &request.keep);
        debug!(
            sentences = filtered.sentence_count(),
            tokens = report.tagged.token_count(),
            kept = filtered.kept_count(self.selector.placeholder()),
            "selected tokens"
        );

        match &request.output {
            Output::Document(path) => {
                write_document(&filtered, &self.theme, self.escape_html, path)?;
                Ok(Outcome::Written {
                    path: path.clone(),
                    sentences: filtered.sentence_count(),
                    skipped: report.skipped,
                })
            }
            Output::Digest => Ok(Outcome::Digest {
                text: render_digest(&filtered),
                skipped: report.skipped,
            }),
        }
    }

    fn unresolved(&self, identifier: &str, err: CorpusError) -> ClozeResult<Outcome> {
        warn!(identifier, error = %err, "could not resolve document");
        let available = self.corpus.list_identifiers()?;
        debug!(available = available.len(), "listed corpus");
        Ok(Outcome::Unresolved {
            identifier: identifier.to_string(),
            reason: err.to_string(),
            available,
        })
    }
}
