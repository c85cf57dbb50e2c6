//! Configuration types for worklog.
//!
//! Every tunable the engine uses lives here: the canonical field keyword
//! table, the segmentation delimiters, and the merge policy.
//! [`EngineConfig::defaults`] returns the built-in values without touching the
//! filesystem; [`EngineConfig::load`] layers an optional TOML file on top.
//! The engine itself never reads configuration on its own.

use crate::error::{Error, Result};
use crate::types::{CanonicalField, FieldRole};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[headers.update_date]
label   = "更新進度"
aliases = ["更新進度", "更新日期", "日期", "date"]

[headers.status]
label   = "狀態"
aliases = ["狀態", "處理人", "負責人", "人員", "user", "status"]

[headers.task_name]
label   = "作業名稱"
aliases = ["作業名稱", "專案名稱", "標題", "名稱", "title", "project"]

[headers.current_progress]
label   = "目前進度"
aliases = ["目前進度", "進度說明", "進度", "progress"]

[headers.note_text]
label   = "附註描述"
aliases = ["附註描述", "附註", "備註", "描述", "說明", "note", "remark"]

[segment]
delimiters = ["\n", "|", ";", "、"]

[dates]
normalize_full_width = true
window_days          = 15

[merge]
group_by_date = true
note_tag      = "Note:"
pooling_order = ["progress", "task", "note"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub headers: HeaderTable,
    pub segment: SegmentConfig,
    pub dates: DateConfig,
    pub merge: MergeConfig,
}

/// `[headers]` section: one keyword entry per canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderTable {
    pub update_date: FieldKeywords,
    pub status: FieldKeywords,
    pub task_name: FieldKeywords,
    pub current_progress: FieldKeywords,
    pub note_text: FieldKeywords,
}

impl HeaderTable {
    pub fn get(&self, field: CanonicalField) -> &FieldKeywords {
        match field {
            CanonicalField::UpdateDate => &self.update_date,
            CanonicalField::Status => &self.status,
            CanonicalField::TaskName => &self.task_name,
            CanonicalField::CurrentProgress => &self.current_progress,
            CanonicalField::NoteText => &self.note_text,
        }
    }

    pub fn get_mut(&mut self, field: CanonicalField) -> &mut FieldKeywords {
        match field {
            CanonicalField::UpdateDate => &mut self.update_date,
            CanonicalField::Status => &mut self.status,
            CanonicalField::TaskName => &mut self.task_name,
            CanonicalField::CurrentProgress => &mut self.current_progress,
            CanonicalField::NoteText => &mut self.note_text,
        }
    }
}

/// Exact header label plus ordered, case-insensitive substring aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldKeywords {
    pub label: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl FieldKeywords {
    pub fn new<I, S>(label: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

/// `[segment]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub delimiters: Vec<String>,
}

/// `[dates]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateConfig {
    #[serde(default = "default_normalize_full_width")]
    pub normalize_full_width: bool,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

fn default_normalize_full_width() -> bool { true }
fn default_window_days() -> u32 { 15 }

/// `[merge]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Group notes into per-date buckets (`true`) or emit one flat list
    /// sorted by date code (`false`).
    #[serde(default = "default_group_by_date")]
    pub group_by_date: bool,
    #[serde(default = "default_note_tag")]
    pub note_tag: String,
    /// Order fields are pooled in before deduplication. Decides which
    /// field's tag a duplicated fragment keeps.
    #[serde(default = "default_pooling_order")]
    pub pooling_order: Vec<FieldRole>,
}

fn default_group_by_date() -> bool { true }
fn default_note_tag() -> String { "Note:".to_string() }
fn default_pooling_order() -> Vec<FieldRole> {
    vec![FieldRole::Progress, FieldRole::Task, FieldRole::Note]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl EngineConfig {
    /// Load the built-in defaults, then `path` on top of them if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The simpler sibling policy: no ideographic-comma delimiter, one flat
    /// date-sorted list, no full-width digit folding.
    pub fn legacy() -> Self {
        Self::defaults().with_legacy_policy()
    }

    /// Switch an already loaded config to the legacy policy, keeping its
    /// header table and tag.
    pub fn with_legacy_policy(mut self) -> Self {
        self.segment.delimiters = vec!["\n".into(), "|".into(), ";".into()];
        self.dates.normalize_full_width = false;
        self.merge.group_by_date = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for field in CanonicalField::ALL {
            let keywords = self.headers.get(field);
            if keywords.label.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{field} has an empty label")));
            }
            if keywords.aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(Error::InvalidConfig(format!("{field} has an empty alias")));
            }
        }

        if self.segment.delimiters.iter().any(String::is_empty) {
            return Err(Error::InvalidConfig("empty delimiter".to_string()));
        }

        let order = &self.merge.pooling_order;
        let is_permutation = order.len() == 3
            && [FieldRole::Progress, FieldRole::Task, FieldRole::Note]
                .iter()
                .all(|role| order.contains(role));
        if !is_permutation {
            return Err(Error::InvalidConfig(format!(
                "pooling_order must list progress, task and note exactly once, got {order:?}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/worklog/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("worklog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_load() {
        let cfg = EngineConfig::defaults();
        assert_eq!(cfg.headers.update_date.label, "更新進度");
        assert_eq!(cfg.segment.delimiters, ["\n", "|", ";", "、"]);
        assert!(cfg.merge.group_by_date);
        assert_eq!(cfg.merge.note_tag, "Note:");
        assert_eq!(cfg.dates.window_days, 15);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn legacy_differs_only_in_policy() {
        let cfg = EngineConfig::legacy();
        assert_eq!(cfg.segment.delimiters, ["\n", "|", ";"]);
        assert!(!cfg.merge.group_by_date);
        assert!(!cfg.dates.normalize_full_width);
        assert_eq!(cfg.headers, EngineConfig::defaults().headers);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = EngineConfig::load(Some(Path::new("/nonexistent/worklog.toml"))).unwrap();
        assert_eq!(cfg, EngineConfig::defaults());
    }

    #[test]
    fn file_overrides_layer_on_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[headers.status]\nlabel = \"Owner\"\n\n[merge]\ngroup_by_date = false").unwrap();

        let cfg = EngineConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.headers.status.label, "Owner");
        assert_eq!(cfg.headers.status.aliases, EngineConfig::defaults().headers.status.aliases);
        assert!(!cfg.merge.group_by_date);
        assert_eq!(cfg.merge.note_tag, "Note:");
    }

    #[test]
    fn rejects_bad_pooling_order() {
        let mut cfg = EngineConfig::defaults();
        cfg.merge.pooling_order = vec![FieldRole::Task, FieldRole::Task, FieldRole::Note];
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_empty_delimiter() {
        let mut cfg = EngineConfig::defaults();
        cfg.segment.delimiters.push(String::new());
        assert!(cfg.validate().is_err());
    }
}
