//! ContentSegmenter — splits one free-text cell into atomic note fragments.

use crate::datecode::{DateCode, DateCodeExtractor};
use std::cell::OnceCell;

/// One atomic note: trimmed, never empty.
///
/// The date code is computed on first use and cached.
#[derive(Debug, Clone)]
pub struct Fragment {
    text: String,
    code: OnceCell<DateCode>,
}

impl Fragment {
    /// Returns `None` when `text` is blank after trimming.
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then(|| Self {
            text: text.to_string(),
            code: OnceCell::new(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn code(&self, extractor: &DateCodeExtractor) -> DateCode {
        *self.code.get_or_init(|| extractor.extract(&self.text))
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Fragment {}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Splits free text on an ordered list of delimiters.
///
/// Each delimiter re-splits every piece produced by the previous one, and
/// blank pieces are dropped at every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSegmenter {
    delimiters: Vec<String>,
}

impl ContentSegmenter {
    pub fn new<I, S>(delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delimiters: delimiters
                .into_iter()
                .map(Into::into)
                .filter(|d: &String| !d.is_empty())
                .collect(),
        }
    }

    pub fn segment(&self, content: &str) -> Vec<Fragment> {
        let content = content.replace("\r\n", "\n").replace('\r', "\n");
        let content = content.trim();
        if content.is_empty() {
            return Vec::new();
        }

        let mut parts = vec![content.to_string()];
        for delimiter in &self.delimiters {
            parts = parts
                .iter()
                .flat_map(|part| part.split(delimiter.as_str()))
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }

        parts.iter().filter_map(|p| Fragment::new(p)).collect()
    }
}

impl Default for ContentSegmenter {
    fn default() -> Self {
        Self::new(["\n", "|", ";", "、"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(Fragment::as_str).collect()
    }

    #[test]
    fn splits_on_every_delimiter_in_order() {
        let seg = ContentSegmenter::default();
        let parts = seg.segment("a | b\r\nc; d、e\r f");
        assert_eq!(texts(&parts), ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn drops_blank_pieces() {
        let seg = ContentSegmenter::default();
        assert_eq!(texts(&seg.segment(" ;; |\n\n x ; ")), ["x"]);
        assert!(seg.segment("   ").is_empty());
        assert!(seg.segment("").is_empty());
    }

    #[test]
    fn ideographic_comma_is_configurable() {
        let legacy = ContentSegmenter::new(["\n", "|", ";"]);
        assert_eq!(texts(&legacy.segment("甲、乙;丙")), ["甲、乙", "丙"]);
    }

    #[test]
    fn fragment_caches_code() {
        let fragment = Fragment::new("  0301 done ").unwrap();
        assert_eq!(fragment.as_str(), "0301 done");
        assert_eq!(fragment.code(&DateCodeExtractor::default()).value(), 301);
        assert!(Fragment::new(" \t").is_none());
    }
}
