//! MergeSortEngine — folds the task, progress and note fields of one row into
//! a single deduplicated, date-ordered narrative.
//!
//! Fragments from all three fields are pooled in the configured order and
//! deduplicated on exact text, first occurrence wins. Two layouts follow:
//!
//! - **grouped** (`group_by_date = true`): undated fragments first, then one
//!   bucket per date code, newest first. Inside a bucket, progress fragments
//!   come before task and note fragments. Only progress fragments inside a
//!   dated bucket render untagged.
//! - **flat** (`group_by_date = false`): undated fragments first, then every
//!   dated fragment sorted by date code descending (stable). Every fragment
//!   is tagged.

use crate::config::EngineConfig;
use crate::datecode::{DateCode, DateCodeExtractor};
use crate::segment::{ContentSegmenter, Fragment};
use crate::types::{FieldRole, Note};
use std::collections::{BTreeMap, HashSet};

/// The three free-text inputs of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteSources<'a> {
    pub task_name: &'a str,
    pub progress: &'a str,
    pub note: &'a str,
}

impl<'a> NoteSources<'a> {
    pub fn field(&self, role: FieldRole) -> &'a str {
        match role {
            FieldRole::Progress => self.progress,
            FieldRole::Task => self.task_name,
            FieldRole::Note => self.note,
        }
    }
}

struct Pooled {
    origin: FieldRole,
    fragment: Fragment,
}

#[derive(Default)]
struct Bucket {
    progress: Vec<Pooled>,
    others: Vec<Pooled>,
}

#[derive(Debug, Clone)]
pub struct MergeSortEngine {
    segmenter: ContentSegmenter,
    extractor: DateCodeExtractor,
    group_by_date: bool,
    note_tag: String,
    pooling_order: Vec<FieldRole>,
}

impl MergeSortEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let note_tag = config.merge.note_tag.clone();
        Self {
            segmenter: ContentSegmenter::new(config.segment.delimiters.iter().cloned()),
            extractor: DateCodeExtractor::new(config.dates.normalize_full_width)
                .ignoring_prefix(note_tag.clone()),
            group_by_date: config.merge.group_by_date,
            note_tag,
            pooling_order: config.merge.pooling_order.clone(),
        }
    }

    pub fn extractor(&self) -> &DateCodeExtractor {
        &self.extractor
    }

    pub fn merge(&self, sources: &NoteSources<'_>) -> Vec<Note> {
        let pooled = self.pool(sources);
        if self.group_by_date {
            self.render_grouped(pooled)
        } else {
            self.render_flat(pooled)
        }
    }

    /// Convenience wrapper returning display strings.
    pub fn merge_lines(&self, sources: &NoteSources<'_>) -> Vec<String> {
        self.merge(sources).iter().map(ToString::to_string).collect()
    }

    fn pool(&self, sources: &NoteSources<'_>) -> Vec<Pooled> {
        let mut seen = HashSet::new();
        let mut pooled = Vec::new();
        for &origin in &self.pooling_order {
            for fragment in self.segmenter.segment(sources.field(origin)) {
                if seen.insert(fragment.as_str().to_string()) {
                    pooled.push(Pooled { origin, fragment });
                }
            }
        }
        pooled
    }

    fn render_grouped(&self, pooled: Vec<Pooled>) -> Vec<Note> {
        let mut misc = Vec::new();
        let mut buckets: BTreeMap<DateCode, Bucket> = BTreeMap::new();

        for item in pooled {
            let code = item.fragment.code(&self.extractor);
            if code.is_none() {
                misc.push(item);
                continue;
            }
            let bucket = buckets.entry(code).or_default();
            match item.origin {
                FieldRole::Progress => bucket.progress.push(item),
                FieldRole::Task | FieldRole::Note => bucket.others.push(item),
            }
        }

        let mut notes: Vec<Note> = misc
            .into_iter()
            .map(|item| self.note(item, DateCode::NONE, true))
            .collect();
        for (code, bucket) in buckets.into_iter().rev() {
            notes.extend(bucket.progress.into_iter().map(|item| self.note(item, code, false)));
            notes.extend(bucket.others.into_iter().map(|item| self.note(item, code, true)));
        }
        notes
    }

    fn render_flat(&self, pooled: Vec<Pooled>) -> Vec<Note> {
        let (undated, mut dated): (Vec<_>, Vec<_>) = pooled
            .into_iter()
            .map(|item| (item.fragment.code(&self.extractor), item))
            .partition(|(code, _)| code.is_none());
        dated.sort_by(|(a, _), (b, _)| b.cmp(a));

        undated
            .into_iter()
            .chain(dated)
            .map(|(code, item)| self.note(item, code, true))
            .collect()
    }

    fn note(&self, item: Pooled, code: DateCode, tagged: bool) -> Note {
        Note {
            origin: item.origin,
            code,
            tag: tagged.then(|| self.note_tag.clone()),
            text: item.fragment.into_string(),
        }
    }
}

impl Default for MergeSortEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::defaults())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sources<'a>(task_name: &'a str, progress: &'a str, note: &'a str) -> NoteSources<'a> {
        NoteSources {
            task_name,
            progress,
            note,
        }
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let engine = MergeSortEngine::default();
        let lines = engine.merge_lines(&sources("", "A\nA\nB", ""));
        assert_eq!(lines, ["Note:A", "Note:B"]);
    }

    #[test]
    fn undated_first_then_buckets_descending() {
        let engine = MergeSortEngine::default();
        let lines = engine.merge_lines(&sources("", "0301 a; 1215 b; misc", ""));
        assert_eq!(lines, ["Note:misc", "1215 b", "0301 a"]);
    }

    #[test]
    fn progress_leads_within_bucket() {
        let engine = MergeSortEngine::default();
        let notes = engine.merge(&sources("0301 title", "0301 step", "0301 remark"));
        let lines: Vec<String> = notes.iter().map(ToString::to_string).collect();
        assert_eq!(lines, ["0301 step", "Note:0301 title", "Note:0301 remark"]);
        assert_eq!(notes[1].origin, FieldRole::Task);
    }

    #[test]
    fn duplicate_keeps_first_pooled_origin() {
        let engine = MergeSortEngine::default();
        let notes = engine.merge(&sources("0301 same", "0301 same", ""));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].origin, FieldRole::Progress);
        assert!(!notes[0].is_tagged());
    }

    #[test]
    fn pooling_order_is_configurable() {
        let mut cfg = EngineConfig::defaults();
        cfg.merge.pooling_order = vec![FieldRole::Task, FieldRole::Progress, FieldRole::Note];
        let engine = MergeSortEngine::new(&cfg);
        let notes = engine.merge(&sources("0301 same", "0301 same", ""));
        assert_eq!(notes[0].origin, FieldRole::Task);
        assert_eq!(notes[0].to_string(), "Note:0301 same");
    }

    #[test]
    fn flat_layout_tags_everything() {
        let engine = MergeSortEngine::new(&EngineConfig::legacy());
        let lines = engine.merge_lines(&sources("0301 kickoff", "0215 draft; 0301 done", "misc"));
        assert_eq!(
            lines,
            [
                "Note:misc",
                "Note:0301 done",
                "Note:0301 kickoff",
                "Note:0215 draft",
            ]
        );
    }

    #[test]
    fn tag_prefixed_input_buckets_by_its_anchor() {
        let engine = MergeSortEngine::default();
        let notes = engine.merge(&sources("", "Note:0301 x 1231; 1215 y", ""));
        assert_eq!(notes[0].text, "1215 y");
        assert_eq!(notes[1].text, "Note:0301 x 1231");
        assert_eq!(notes[1].code.value(), 301);
        assert_eq!(engine.extractor().extract("Note:0301 x 1231").value(), 301);
        assert_eq!(DateCodeExtractor::default().extract("Note:0301 x 1231").value(), 1231);
    }

    #[test]
    fn empty_sources_yield_nothing() {
        let engine = MergeSortEngine::default();
        assert!(engine.merge(&NoteSources::default()).is_empty());
    }
}
