//! Code Collector - aggregates codes from the title and commit messages

use tracing::{debug, warn};

use crate::{
    extractor::{extract_each, extract_one, CodePattern},
    models::{CodeSet, Extraction, ExtractionWarning, SourceSelection},
};

/// Collect unique codes from the enabled sources.
///
/// The title code comes first, then commit codes in commit order. Repeated
/// codes are dropped. A title without a code and commits without a code are
/// reported through [`Extraction::warnings`] and never stop collection.
pub fn extract_codes<I, S>(
    title: &str,
    commits: I,
    title_pattern: &CodePattern,
    commit_pattern: &CodePattern,
    selection: SourceSelection,
) -> Extraction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut codes = CodeSet::new();
    let mut warnings = Vec::new();

    if selection.includes_title() {
        match extract_one(title, title_pattern) {
            Some(code) => {
                debug!(code = %code, "Found short code in title");
                codes.insert(code);
            }
            None => {
                warn!(title = %title, pattern = %title_pattern.as_str(), "Title has no short code");
                warnings.push(ExtractionWarning::TitleCodeMissing {
                    title: title.to_string(),
                });
            }
        }
    }

    if selection.includes_commits() {
        for (message, code) in extract_each(commits, commit_pattern) {
            let message = message.as_ref();
            match code {
                Some(code) => {
                    if !codes.insert(code.clone()) {
                        debug!(code = %code, "Skipping duplicate short code");
                    }
                }
                None => {
                    debug!(message = %message, "Commit message has no short code");
                    warnings.push(ExtractionWarning::CommitCodeMissing {
                        message: message.to_string(),
                    });
                }
            }
        }
    }

    debug!(
        selection = %selection,
        codes = codes.len(),
        warnings = warnings.len(),
        "Collected short codes"
    );

    Extraction { codes, warnings }
}

/// Configured collector holding its patterns and source selection
#[derive(Debug, Clone, Default)]
pub struct CodeCollector {
    title_pattern: CodePattern,
    commit_pattern: CodePattern,
    selection: SourceSelection,
}

impl CodeCollector {
    /// Create a collector
    pub fn new(
        title_pattern: CodePattern,
        commit_pattern: CodePattern,
        selection: SourceSelection,
    ) -> Self {
        Self {
            title_pattern,
            commit_pattern,
            selection,
        }
    }

    pub fn selection(&self) -> SourceSelection {
        self.selection
    }

    pub fn title_pattern(&self) -> &CodePattern {
        &self.title_pattern
    }

    pub fn commit_pattern(&self) -> &CodePattern {
        &self.commit_pattern
    }

    /// Collect codes from a title and commit messages
    pub fn collect<I, S>(&self, title: &str, commits: I) -> Extraction
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extract_codes(
            title,
            commits,
            &self.title_pattern,
            &self.commit_pattern,
            self.selection,
        )
    }
}
