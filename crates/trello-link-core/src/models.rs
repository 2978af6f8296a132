//! Core data models

use std::{borrow::Borrow, collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Opaque short code extracted from a title or commit message
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Create a short code, rejecting empty input
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.is_empty() {
            None
        } else {
            Some(Self(code))
        }
    }

    /// Borrow the code text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ShortCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered set of unique short codes, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSet {
    codes: Vec<ShortCode>,
    seen: HashSet<ShortCode>,
}

impl CodeSet {
    /// Create an empty code set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a code unless it is already present. Returns true when inserted.
    pub fn insert(&mut self, code: ShortCode) -> bool {
        if self.seen.contains(&code) {
            return false;
        }
        self.seen.insert(code.clone());
        self.codes.push(code);
        true
    }

    /// Insert every code in order, skipping duplicates
    pub fn extend<I: IntoIterator<Item = ShortCode>>(&mut self, codes: I) {
        for code in codes {
            self.insert(code);
        }
    }

    /// Check membership
    pub fn contains(&self, code: &str) -> bool {
        self.seen.contains(code)
    }

    /// Codes in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, ShortCode> {
        self.codes.iter()
    }

    /// Codes as plain strings, in order
    pub fn as_strs(&self) -> Vec<&str> {
        self.codes.iter().map(ShortCode::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<ShortCode> for CodeSet {
    fn from_iter<I: IntoIterator<Item = ShortCode>>(iter: I) -> Self {
        let mut set = CodeSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a CodeSet {
    type Item = &'a ShortCode;
    type IntoIter = std::slice::Iter<'a, ShortCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Which sources feed the code set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSelection {
    /// Only the pull request title
    Title,
    /// Only the commit messages
    Commits,
    /// Title first, then commit messages
    #[default]
    Both,
}

impl SourceSelection {
    /// Whether the title is read
    pub fn includes_title(self) -> bool {
        matches!(self, SourceSelection::Title | SourceSelection::Both)
    }

    /// Whether commit messages are read
    pub fn includes_commits(self) -> bool {
        matches!(self, SourceSelection::Commits | SourceSelection::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceSelection::Title => "title",
            SourceSelection::Commits => "commits",
            SourceSelection::Both => "both",
        }
    }
}

impl FromStr for SourceSelection {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SourceSelection::Title),
            "commits" => Ok(SourceSelection::Commits),
            "both" => Ok(SourceSelection::Both),
            _ => Err(PatternError::UnknownSource(s.to_string())),
        }
    }
}

impl fmt::Display for SourceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recoverable conditions found while extracting codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionWarning {
    /// The title source is enabled but the title carries no code
    TitleCodeMissing { title: String },
    /// A commit message carries no code; it was skipped
    CommitCodeMissing { message: String },
}

impl ExtractionWarning {
    /// Title warnings are meant for the user; commit misses are informational
    pub fn is_title(&self) -> bool {
        matches!(self, ExtractionWarning::TitleCodeMissing { .. })
    }
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionWarning::TitleCodeMissing { .. } => write!(
                f,
                "Title does not contain a valid Trello short code. Please check your title regex."
            ),
            ExtractionWarning::CommitCodeMissing { message } => write!(
                f,
                "Commit message {} does not contain a valid Trello short code. Please check your commits regex.",
                message
            ),
        }
    }
}

/// Outcome of collecting codes from all enabled sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Unique codes in first-seen order
    pub codes: CodeSet,
    /// Conditions the caller may want to report
    pub warnings: Vec<ExtractionWarning>,
}

impl Extraction {
    /// The title warning, if the title was enabled and carried no code
    pub fn title_warning(&self) -> Option<&ExtractionWarning> {
        self.warnings.iter().find(|w| w.is_title())
    }

    /// Number of commit messages that were skipped
    pub fn skipped_commits(&self) -> usize {
        self.warnings.iter().filter(|w| !w.is_title()).count()
    }
}
