//! Rendering filtered text as a plain digest or a static HTML page.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::errors::{ClozeError, ClozeResult};
use crate::types::FilteredText;

/// Visual settings for the rendered page. Values are inserted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub title: String,
    /// Stylesheet that provides `font_family`, if any. Empty means none.
    #[serde(deserialize_with = "empty_as_none")]
    pub font_href: Option<String>,
    pub font_family: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub background_image: Option<String>,
    pub font_size: String,
    pub max_width: String,
    pub paragraph_padding: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title: "Essential Speeches".to_string(),
            font_href: Some("https://fonts.googleapis.com/css?family=Amatic+SC".to_string()),
            font_family: "'Amatic SC', cursive".to_string(),
            background_image: Some(
                "https://cdn.pixabay.com/photo/2015/09/22/12/18/paper-951489_960_720.jpg"
                    .to_string(),
            ),
            font_size: "2.3em".to_string(),
            max_width: "800px".to_string(),
            paragraph_padding: "20px".to_string(),
        }
    }
}

/// TOML has no null, so `font_href = ""` is how a config turns a URL off.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|url| !url.trim().is_empty()))
}

impl Theme {
    /// No web font and no background image.
    pub fn plain() -> Self {
        Theme {
            font_href: None,
            font_family: "serif".to_string(),
            background_image: None,
            font_size: "1.2em".to_string(),
            ..Theme::default()
        }
    }
}

fn join_sentence(sentence: &[String]) -> String {
    sentence.join(" ")
}

/// Tokens joined by spaces, sentences joined by newlines.
pub fn render_digest(filtered: &FilteredText) -> String {
    filtered
        .sentences
        .iter()
        .map(|sentence| join_sentence(sentence))
        .collect::<Vec<_>>()
        .join("\n")
}

/// At most `max_chars` characters of `digest`.
pub fn digest_preview(digest: &str, max_chars: usize) -> &str {
    match digest.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &digest[..byte_idx],
        None => digest,
    }
}

/// A complete HTML page with one paragraph per sentence.
///
/// Tokens are inserted verbatim unless `escape_html` is set.
pub fn render_document(filtered: &FilteredText, theme: &Theme, escape_html: bool) -> String {
    let mut page = String::new();
    write_head(&mut page, theme).unwrap();
    page.push_str("<body>\n");
    for sentence in &filtered.sentences {
        let text = join_sentence(sentence);
        let text = if escape_html {
            escape(&text)
        } else {
            Cow::Borrowed(text.as_str())
        };
        writeln!(page, "<p>{}</p>", text).unwrap();
    }
    page.push_str("</body>\n</html>");
    page
}

/// Render and write the page to `path`, creating or truncating it.
pub fn write_document(
    filtered: &FilteredText,
    theme: &Theme,
    escape_html: bool,
    path: &Path,
) -> ClozeResult<()> {
    let page = render_document(filtered, theme, escape_html);
    fs::write(path, &page).map_err(|source| ClozeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        paragraphs = filtered.sentence_count(),
        bytes = page.len(),
        "wrote document"
    );
    Ok(())
}

fn write_head(page: &mut String, theme: &Theme) -> std::fmt::Result {
    writeln!(page, "<!DOCTYPE html>")?;
    writeln!(page, "<html>")?;
    writeln!(page, "<head>")?;
    writeln!(page, "  <meta charset=\"utf-8\">")?;
    writeln!(page, "  <title>{}</title>", theme.title)?;
    if let Some(href) = &theme.font_href {
        writeln!(page, "  <link href=\"{}\" rel=\"stylesheet\">", href)?;
    }
    writeln!(page, "  <style type=\"text/css\">")?;
    writeln!(page, "    body {{")?;
    writeln!(page, "      margin: auto;")?;
    writeln!(page, "      text-align: center;")?;
    writeln!(page, "      max-width: {};", theme.max_width)?;
    writeln!(page, "      font-family: {};", theme.font_family)?;
    writeln!(page, "      font-size: {};", theme.font_size)?;
    if let Some(image) = &theme.background_image {
        writeln!(page, "      background-image: url(\"{}\");", image)?;
    }
    writeln!(page, "    }}")?;
    writeln!(page, "    p {{")?;
    writeln!(page, "      padding: {};", theme.paragraph_padding)?;
    writeln!(page, "    }}")?;
    writeln!(page, "  </style>")?;
    writeln!(page, "</head>")
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filtered(sentences: &[&[&str]]) -> FilteredText {
        FilteredText::new(
            sentences
                .iter()
                .map(|s| s.iter().map(|t| t.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn digest_joins_tokens_and_sentences() {
        let text = filtered(&[&[".", "cat", "sleeps"], &["We", ".", "."]]);
        assert_eq!(render_digest(&text), ". cat sleeps\nWe . .");
    }

    #[test]
    fn digest_of_nothing_is_empty() {
        assert_eq!(render_digest(&FilteredText::default()), "");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(digest_preview("héllo", 2), "hé");
        assert_eq!(digest_preview("short", 100), "short");
        assert_eq!(digest_preview("", 3), "");
    }

    #[test]
    fn plain_document() {
        let text = filtered(&[&[".", "cat", "sleeps"], &["Congress", "."]]);
        insta::assert_snapshot!(render_document(&text, &Theme::plain(), false), @r###"
        <!DOCTYPE html>
        <html>
        <head>
          <meta charset="utf-8">
          <title>Essential Speeches</title>
          <style type="text/css">
            body {
              margin: auto;
              text-align: center;
              max-width: 800px;
              font-family: serif;
              font-size: 1.2em;
            }
            p {
              padding: 20px;
            }
          </style>
        </head>
        <body>
        <p>. cat sleeps</p>
        <p>Congress .</p>
        </body>
        </html>
        "###);
    }

    #[test]
    fn default_theme_links_font_and_background() {
        let page = render_document(&FilteredText::default(), &Theme::default(), false);
        assert!(page.contains(
            "<link href=\"https://fonts.googleapis.com/css?family=Amatic+SC\" rel=\"stylesheet\">"
        ));
        assert!(page.contains("font-family: 'Amatic SC', cursive;"));
        assert!(page.contains("background-image: url(\"https://cdn.pixabay.com/"));
        assert!(page.ends_with("<body>\n</body>\n</html>"));
    }

    #[test]
    fn tokens_are_verbatim_unless_escaping_is_enabled() {
        let text = filtered(&[&["AT&T", "<", "Bell"]]);
        let raw = render_document(&text, &Theme::plain(), false);
        assert!(raw.contains("<p>AT&T < Bell</p>"));
        let escaped = render_document(&text, &Theme::plain(), true);
        assert!(escaped.contains("<p>AT&amp;T &lt; Bell</p>"));
    }

    #[test]
    fn write_document_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "x".repeat(10_000)).unwrap();

        write_document(&filtered(&[&["Go"]]), &Theme::plain(), false, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(!written.contains("xxx"));
    }

    #[test]
    fn write_document_surfaces_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("index.html");
        let err = write_document(&FilteredText::default(), &Theme::plain(), false, &path)
            .unwrap_err();
        assert!(matches!(err, ClozeError::Io { .. }));
    }
}
