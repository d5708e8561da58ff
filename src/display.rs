use std::fmt::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::types::{KeepSet, Placeholder, TaggedWord};

const SPACE_PADDING: usize = 2;

/// Pad `line` with spaces up to display column `col`, then append `text`.
fn push_at(line: &mut String, col: usize, text: &str) {
    let width = line.width();
    line.extend(std::iter::repeat(' ').take(col.saturating_sub(width)));
    line.push_str(text);
}

/// Debug view of one tagged sentence, one tag marker row per token.
pub struct TaggedSentenceDisplay<'a> {
    sentence: &'a [TaggedWord],
    filter: Option<(&'a KeepSet, &'a Placeholder)>,
}

impl<'a> TaggedSentenceDisplay<'a> {
    pub fn new(sentence: &'a [TaggedWord]) -> Self {
        TaggedSentenceDisplay {
            sentence,
            filter: None,
        }
    }

    /// Also show what survives selection under each token.
    pub fn with_filter(mut self, keep: &'a KeepSet, placeholder: &'a Placeholder) -> Self {
        self.filter = Some((keep, placeholder));
        self
    }

    fn surviving_form(&self, word: &'a TaggedWord) -> Option<&'a str> {
        self.filter.map(|(keep, placeholder)| {
            if keep.contains(&word.tag) {
                word.text.as_str()
            } else {
                placeholder.as_str()
            }
        })
    }

    /// Display column where each token starts.
    fn column_starts(&self) -> Vec<usize> {
        let mut starts = Vec::with_capacity(self.sentence.len());
        let mut col = 0;
        for word in self.sentence {
            starts.push(col);
            let surviving = self.surviving_form(word).map_or(0, |form| form.width());
            col += word.text.width().max(surviving) + SPACE_PADDING;
        }
        starts
    }
}

// The  cat  sleeps  - token line
// ╰DT
//      ╰NN
//           ╰VBZ
// .    cat  sleeps  - filter row, if requested
impl<'a> fmt::Display for TaggedSentenceDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sentence.is_empty() {
            return Ok(());
        }
        let starts = self.column_starts();

        let mut opening_line = String::new();
        for (word, &start) in self.sentence.iter().zip(&starts) {
            push_at(&mut opening_line, start, &word.text);
        }
        f.write_str(&opening_line)?;

        for (word, &start) in self.sentence.iter().zip(&starts) {
            f.write_char('\n')?;
            for _ in 0..start {
                f.write_char(' ')?;
            }
            write!(f, "╰{}", word.tag)?;
        }

        if self.filter.is_some() {
            let mut filter_line = String::new();
            for (word, &start) in self.sentence.iter().zip(&starts) {
                if let Some(form) = self.surviving_form(word) {
                    push_at(&mut filter_line, start, form);
                }
            }
            f.write_char('\n')?;
            f.write_str(&filter_line)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaggedText;

    fn sentence() -> TaggedText {
        TaggedText::from_pairs(&[&[("The", "DT"), ("cat", "NN"), ("sleeps", "VBZ"), (".", ".")]])
    }

    #[test]
    fn tags_under_tokens() {
        let tagged = sentence();
        insta::assert_snapshot!(TaggedSentenceDisplay::new(&tagged.sentences[0]).to_string(), @r###"
        The  cat  sleeps  .
        ╰DT
             ╰NN
                  ╰VBZ
                          ╰.
        "###);
    }

    #[test]
    fn filter_row_uses_wide_placeholders() {
        let tagged = sentence();
        let keep = KeepSet::from_labels(["NN", "VBZ"]);
        let blank = Placeholder::blank();
        let display = TaggedSentenceDisplay::new(&tagged.sentences[0]).with_filter(&keep, &blank);
        insta::assert_snapshot!(display.to_string(), @r###"
        The    cat  sleeps  .
        ╰DT
               ╰NN
                    ╰VBZ
                            ╰.
        _____  cat  sleeps  _____
        "###);
    }

    #[test]
    fn wide_characters_align_by_display_width() {
        let tagged = TaggedText::from_pairs(&[&[("東京", "NNP"), ("grows", "VBZ")]]);
        insta::assert_snapshot!(TaggedSentenceDisplay::new(&tagged.sentences[0]).to_string(), @r###"
        東京  grows
        ╰NNP
              ╰VBZ
        "###);
    }

    #[test]
    fn empty_sentence_renders_nothing() {
        assert_eq!(TaggedSentenceDisplay::new(&[]).to_string(), "");
    }
}
