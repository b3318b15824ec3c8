use serde::{Deserialize, Serialize};

/// Line counts aggregated over one scanned directory tree.
///
/// Only files with a supported extension contribute, so `total_lines` is
/// the total over recognized source files, not the whole tree. Each line
/// lands in exactly one of blank, comment, or code; code lines are also
/// tallied per extension.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineCountReport {
    pub total_lines: u64,
    pub code_lines: u64,
    pub comment_lines: u64,
    pub blank_lines: u64,
    pub java_lines: u64,
    pub python_lines: u64,
    pub javascript_lines: u64,
    pub rust_lines: u64,
    pub css_lines: u64,
    pub html_lines: u64,
}

/// A line-count report joined with repository identity.
///
/// Doubles as the detailed-analysis result row and the persisted
/// advanced-favorites record (keyed by `Name`). Kept flat because the CSV
/// layer does not handle nested structs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoReport {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Total lines")]
    pub total_lines: u64,
    #[serde(rename = "Total lines without spaces or comments")]
    pub code_lines: u64,
    #[serde(rename = "Java lines")]
    pub java_lines: u64,
    #[serde(rename = "Python lines")]
    pub python_lines: u64,
    #[serde(rename = "JavaScript lines")]
    pub javascript_lines: u64,
    #[serde(rename = "Rust lines")]
    pub rust_lines: u64,
    #[serde(rename = "CSS lines")]
    pub css_lines: u64,
    #[serde(rename = "HTML lines")]
    pub html_lines: u64,
    #[serde(rename = "Comment lines")]
    pub comment_lines: u64,
    #[serde(rename = "Empty lines")]
    pub blank_lines: u64,
}

impl RepoReport {
    pub const HEADERS: [&'static str; 11] = [
        "Name",
        "Total lines",
        "Total lines without spaces or comments",
        "Java lines",
        "Python lines",
        "JavaScript lines",
        "Rust lines",
        "CSS lines",
        "HTML lines",
        "Comment lines",
        "Empty lines",
    ];

    pub fn new(name: &str, counts: &LineCountReport) -> Self {
        Self {
            name: name.to_string(),
            total_lines: counts.total_lines,
            code_lines: counts.code_lines,
            java_lines: counts.java_lines,
            python_lines: counts.python_lines,
            javascript_lines: counts.javascript_lines,
            rust_lines: counts.rust_lines,
            css_lines: counts.css_lines,
            html_lines: counts.html_lines,
            comment_lines: counts.comment_lines,
            blank_lines: counts.blank_lines,
        }
    }
}
