//! Static header rows and note corpora used across harnesses.

/// Header whose cells match the default canonical labels exactly.
pub const CANONICAL_HEADER: &[&str] = &["更新進度", "狀態", "作業名稱", "目前進度", "附註描述"];

/// Same fields, reached only through default keyword aliases, shuffled.
pub const ALIASED_HEADER: &[&str] = &["Remark", "Project Title", "Update Date", "Progress", "Owner / User"];

/// Progress cells mixing delimiters, duplicates and date codes.
pub const PROGRESS_CORPUS: &[&str] = &[
    "0301 done; 0215 started",
    "0304 racked servers\n0304 racked servers",
    "1215 shipped | 1201 review、1130 draft",
    "waiting on vendor",
    "0102 new year\r\n1231 old year",
];

/// A two-sheet JSON workbook document: one valid sheet, one rejected.
pub const JSON_WORKBOOK: &str = r#"{
  "sheets": [
    {
      "name": "Ops",
      "rows": [
        ["更新進度", "狀態", "作業名稱", "目前進度", "附註描述"],
        ["2024/3/1", "Alice", "0301 Kickoff", "0301 done; 0215 started", null],
        [{"datetime": "2024-03-04T09:00:00"}, "Bob", "Infra", "0304 racked servers\n0304 racked servers", "waiting on vendor"],
        ["2023-12-31", "Carol", "old", "", ""]
      ]
    },
    {
      "name": "Misc",
      "rows": [
        ["Date", "Owner"],
        ["2024-03-01", "Dan"]
      ]
    }
  ]
}"#;
