//! DateCodeExtractor — finds the `MMDD` code a note fragment is dated with.
//!
//! Extraction is attempted in order: a code anchored at the very start of the
//! fragment, then the largest standalone 4-digit token anywhere in the text.
//! Tokens that are not a plausible month/day are ignored entirely.

use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

/// An `MM*100+DD` sort key. `0` means the fragment carries no code.
///
/// There is no calendar check beyond the range bounds, so `0231` is a valid
/// code. The value is a grouping key, not a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct DateCode(u16);

impl DateCode {
    pub const NONE: DateCode = DateCode(0);

    /// Build a code from a month and day, or `None` when either is out of
    /// range (`1..=12`, `1..=31`).
    pub fn new(month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            u16::try_from(month * 100 + day).ok().map(DateCode)
        } else {
            None
        }
    }

    /// Interpret a token of exactly four ASCII digits as `MMDD`.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let month = token[..2].parse().ok()?;
        let day = token[2..].parse().ok()?;
        Self::new(month, day)
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn month(self) -> u16 {
        self.0 / 100
    }

    pub fn day(self) -> u16 {
        self.0 % 100
    }
}

impl std::fmt::Display for DateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Replace full-width digits (`０`–`９`) with their ASCII counterparts.
pub fn normalize_full_width_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_full_width_digit) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| {
                if is_full_width_digit(c) {
                    char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c)
                } else {
                    c
                }
            })
            .collect(),
    )
}

fn is_full_width_digit(c: char) -> bool {
    ('０'..='９').contains(&c)
}

/// Extracts [`DateCode`]s from fragment text.
#[derive(Debug, Clone)]
pub struct DateCodeExtractor {
    anchored: Regex,
    standalone: Regex,
    normalize_full_width: bool,
    ignored_prefix: Option<String>,
}

impl DateCodeExtractor {
    pub fn new(normalize_full_width: bool) -> Self {
        Self {
            // Exactly four digits at the start: "03015 items" is not anchored,
            // although a bare `^\d{4}` match would read it as 0301.
            anchored: Regex::new(r"^([0-9]{4})(?:[^0-9]|$)")
                .expect("anchored date-code pattern must compile"),
            standalone: Regex::new(r"\b([0-9]{4})\b")
                .expect("standalone date-code pattern must compile"),
            normalize_full_width,
            ignored_prefix: None,
        }
    }

    /// Strip `prefix` from the start of a fragment before extracting.
    ///
    /// The merge engine sets this to its note tag so that rendered output,
    /// fed back in, lands in the same date buckets. The stripping also applies
    /// to raw input: `Note:0301 x 1231` yields `0301` through the anchored
    /// match, not `1231` through the standalone maximum.
    pub fn ignoring_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.ignored_prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn extract(&self, text: &str) -> DateCode {
        let text = if self.normalize_full_width {
            normalize_full_width_digits(text.trim())
        } else {
            Cow::Borrowed(text.trim())
        };
        let mut text: &str = &text;
        if let Some(prefix) = &self.ignored_prefix {
            while let Some(rest) = text.strip_prefix(prefix.as_str()) {
                text = rest.trim_start();
            }
        }

        if let Some(code) = self
            .anchored
            .captures(text)
            .and_then(|caps| DateCode::from_token(&caps[1]))
        {
            return code;
        }

        // Larger codes are taken as more recent when a fragment mentions
        // several dates.
        self.standalone
            .captures_iter(text)
            .filter_map(|caps| DateCode::from_token(&caps[1]))
            .max()
            .unwrap_or(DateCode::NONE)
    }
}

impl Default for DateCodeExtractor {
    fn default() -> Self {
        Self::new(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
