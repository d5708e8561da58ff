//! Run configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! classic setup: nouns and verbs of `1962-Kennedy.txt` from a `state_union`
//! directory, written to `index.html`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ClozeError, ClozeResult};
use crate::pipeline::{Output, Request};
use crate::render::Theme;
use crate::selector::Selector;
use crate::tokenizer::UnicodeTokenizer;
use crate::types::{KeepSet, Placeholder};

/// File name looked up in the working directory by the CLI.
pub const CONFIG_FILE_NAME: &str = "cloze.toml";
pub const DEFAULT_CORPUS_DIR: &str = "state_union";
pub const DEFAULT_IDENTIFIER: &str = "1962-Kennedy.txt";
pub const DEFAULT_OUTPUT: &str = "index.html";

/// Where the rendered text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Write an HTML page to `output`.
    Document,
    /// Return the plain digest.
    Digest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClozeConfig {
    pub corpus_dir: PathBuf,
    pub default_identifier: String,
    pub keep: KeepSet,
    pub placeholder: Placeholder,
    pub output: PathBuf,
    pub mode: OutputMode,
    /// Truncate printed digests to this many characters.
    pub digest_limit: Option<usize>,
    pub escape_html: bool,
    pub max_sentence_tokens: usize,
    pub theme: Theme,
}

impl Default for ClozeConfig {
    fn default() -> Self {
        ClozeConfig {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            default_identifier: DEFAULT_IDENTIFIER.to_string(),
            keep: KeepSet::essentials(),
            placeholder: Placeholder::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            mode: OutputMode::Document,
            digest_limit: None,
            escape_html: false,
            max_sentence_tokens: 1000,
            theme: Theme::default(),
        }
    }
}

impl ClozeConfig {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> ClozeResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| ClozeError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str) -> ClozeResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> ClozeResult<Self> {
        toml::from_str(content).map_err(|e| ClozeError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn tokenizer(&self) -> UnicodeTokenizer {
        UnicodeTokenizer::new().with_max_tokens(self.max_sentence_tokens)
    }

    pub fn selector(&self) -> Selector {
        Selector::new(self.placeholder.clone())
    }

    /// A request for `identifier`, or for the default document when `None`.
    pub fn request(&self, identifier: Option<&str>) -> Request {
        let output = match self.mode {
            OutputMode::Document => Output::Document(self.output.clone()),
            OutputMode::Digest => Output::Digest,
        };
        Request::new(identifier.unwrap_or(&self.default_identifier))
            .with_keep(self.keep.clone())
            .with_output(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(ClozeConfig::from_toml_str("").unwrap(), ClozeConfig::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClozeConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, ClozeConfig::default());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = ClozeConfig::from_toml_str(
            r#"
corpus_dir = "speeches"
keep = ["NNP", "NNPS"]
placeholder = "_____"
mode = "digest"
digest_limit = 3000

[theme]
title = "Noun Speak"
background_image = "paper.jpg"
"#,
        )
        .unwrap();

        assert_eq!(config.corpus_dir, PathBuf::from("speeches"));
        assert_eq!(config.keep, KeepSet::proper_nouns());
        assert_eq!(config.placeholder, Placeholder::blank());
        assert_eq!(config.mode, OutputMode::Digest);
        assert_eq!(config.digest_limit, Some(3000));
        assert_eq!(config.theme.title, "Noun Speak");
        assert_eq!(config.theme.background_image.as_deref(), Some("paper.jpg"));
        assert_eq!(config.theme.font_size, Theme::default().font_size);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn empty_theme_urls_turn_them_off() {
        let config = ClozeConfig::from_toml_str(
            r#"
[theme]
font_href = ""
background_image = " "
"#,
        )
        .unwrap();
        assert_eq!(config.theme.font_href, None);
        assert_eq!(config.theme.background_image, None);

        let page = crate::render_document(&crate::FilteredText::default(), &config.theme, false);
        assert!(!page.contains("<link"));
        assert!(!page.contains("background-image"));
        assert!(page.contains("font-family: 'Amatic SC', cursive;"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ClozeConfig::from_toml_str("keepset = []").unwrap_err();
        assert!(matches!(err, ClozeError::Config { .. }));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "mode = \"poster\"").unwrap();
        match ClozeConfig::load(&path) {
            Err(ClozeError::Config { path: reported, .. }) => {
                assert_eq!(reported, path.display().to_string())
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn request_uses_defaults() {
        let config = ClozeConfig::default();
        let request = config.request(None);
        assert_eq!(request.identifier, DEFAULT_IDENTIFIER);
        assert_eq!(request.keep, KeepSet::essentials());
        assert_eq!(request.output, Output::Document(PathBuf::from(DEFAULT_OUTPUT)));

        let request = config.request(Some("1945-Truman.txt"));
        assert_eq!(request.identifier, "1945-Truman.txt");
    }
}
