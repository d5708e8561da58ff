//! Corpus sources: a directory of transcripts and an in-memory map.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::collaborators::CorpusSource;
use crate::errors::CorpusError;
use crate::types::Document;

/// Every `*.txt` file directly inside `root` is a document named by its file name.
///
/// Mirrors the layout of the State of the Union corpus, where identifiers look
/// like `1962-Kennedy.txt`.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    root: PathBuf,
    extension: String,
}

impl DirectoryCorpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryCorpus {
            root: root.into(),
            extension: "txt".to_string(),
        }
    }

    /// Accept files with another extension instead of `txt`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    fn listing_error(&self, err: std::io::Error) -> CorpusError {
        CorpusError::Listing {
            root: self.root.clone(),
            message: err.to_string(),
        }
    }

    fn is_document(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .map_or(false, |ext| ext == self.extension.as_str())
    }
}

impl CorpusSource for DirectoryCorpus {
    fn resolve(&self, identifier: &str) -> Result<Document, CorpusError> {
        // Identifiers are bare file names; anything path-like is unknown.
        if identifier.is_empty()
            || identifier.contains(['/', '\\'])
            || identifier == "."
            || identifier == ".."
        {
            return Err(CorpusError::not_found(identifier));
        }

        let path = self.root.join(identifier);
        if !self.is_document(&path) {
            return Err(CorpusError::not_found(identifier));
        }

        let text = fs::read_to_string(&path).map_err(|e| CorpusError::Unreadable {
            identifier: identifier.to_string(),
            message: e.to_string(),
        })?;
        debug!(identifier, bytes = text.len(), "resolved document");
        Ok(Document::new(identifier, text))
    }

    fn list_identifiers(&self) -> Result<Vec<String>, CorpusError> {
        let mut identifiers = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| self.listing_error(e))? {
            let entry = entry.map_err(|e| self.listing_error(e))?;
            let path = entry.path();
            if !self.is_document(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                identifiers.push(name.to_string());
            }
        }
        identifiers.sort();
        Ok(identifiers)
    }
}

/// Documents held in memory, listed in identifier order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    documents: BTreeMap<String, String>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, identifier: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(identifier, text);
        self
    }

    pub fn insert(&mut self, identifier: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(identifier.into(), text.into());
    }
}

impl CorpusSource for MemoryCorpus {
    fn resolve(&self, identifier: &str) -> Result<Document, CorpusError> {
        self.documents
            .get(identifier)
            .map(|text| Document::new(identifier, text.as_str()))
            .ok_or_else(|| CorpusError::not_found(identifier))
    }

    fn list_identifiers(&self) -> Result<Vec<String>, CorpusError> {
        Ok(self.documents.keys().cloned().collect())
    }
}
