//! Placeholder Replacer - locates the templated region of a body and swaps in fresh links
//!
//! Two strategies implement [`RegionLocator`]:
//! - [`PatternLocator`] matches the whole region, markers included, with a regular expression
//! - [`MarkerLocator`] searches for literal start and end markers
//!
//! [`TemplateStrategy`] selects one of them from configuration. There is no
//! fallback from one strategy to the other.

use std::{fmt, str::FromStr};

use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::{PatternError, PatternResult, ReplaceError, ReplaceResult},
    models::CodeSet,
    renderer::render_links,
};

/// Marker written before the links by the pattern strategy
pub const LINK_START_MARKER: &str = "<!--TRELLO_LINK_START-->";

/// Marker written after the links by the pattern strategy
pub const LINK_END_MARKER: &str = "<!--TRELLO_LINK_END-->";

/// Default whole-region pattern; it matches the markers written back, so re-runs replace their own output
pub const DEFAULT_REGION_PATTERN: &str = r"<!--TRELLO_LINK_START-->[\s\S]*<!--TRELLO_LINK_END-->";

/// Default modifiers for the region pattern
pub const DEFAULT_REGION_FLAGS: &str = "gm";

/// Finds the templated region of a body and replaces it with rendered links
pub trait RegionLocator {
    /// Description of what is searched for, used in error messages
    fn describe(&self) -> String;

    /// Return a new body with the region replaced by `links`
    fn replace_region(&self, body: &str, links: &str) -> ReplaceResult<String>;
}

/// Pattern modifiers in the `gimsu` letter style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    /// Replace every match instead of the first
    pub global: bool,
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries
    pub multi_line: bool,
    /// `.` matches `\n`
    pub dot_all: bool,
    pub unicode: bool,
}

impl RegexFlags {
    /// Canonical letter form, e.g. `gm`
    pub fn as_letters(&self) -> String {
        let mut letters = String::new();
        for (set, letter) in [
            (self.global, 'g'),
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
        ] {
            if set {
                letters.push(letter);
            }
        }
        letters
    }
}

impl FromStr for RegexFlags {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = RegexFlags::default();
        for letter in s.trim().chars() {
            match letter {
                'g' => flags.global = true,
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                's' => flags.dot_all = true,
                // regex is unicode-aware already
                'u' => flags.unicode = true,
                other => return Err(PatternError::UnsupportedFlag(other)),
            }
        }
        Ok(flags)
    }
}

impl fmt::Display for RegexFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_letters())
    }
}

/// Strategy A: a pattern matching the entire region, markers included
#[derive(Debug, Clone)]
pub struct PatternLocator {
    regex: Regex,
    flags: RegexFlags,
}

impl PatternLocator {
    /// Compile a region pattern with the given modifiers
    pub fn new(pattern: &str, flags: RegexFlags) -> PatternResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .build()
            .map_err(|e| PatternError::invalid_regex(pattern, e))?;

        Ok(Self { regex, flags })
    }

    /// Compile from a pattern and a flag string such as `gm`
    pub fn parse(pattern: &str, flags: &str) -> PatternResult<Self> {
        Self::new(pattern, flags.parse()?)
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }
}

impl Default for PatternLocator {
    fn default() -> Self {
        Self {
            regex: RegexBuilder::new(DEFAULT_REGION_PATTERN)
                .multi_line(true)
                .build()
                .expect("default region pattern is valid"),
            flags: RegexFlags {
                global: true,
                multi_line: true,
                ..RegexFlags::default()
            },
        }
    }
}

impl RegionLocator for PatternLocator {
    fn describe(&self) -> String {
        format!("/{}/{}", self.regex.as_str(), self.flags)
    }

    fn replace_region(&self, body: &str, links: &str) -> ReplaceResult<String> {
        let matches = self.regex.find_iter(body).count();
        if matches == 0 {
            warn!(pattern = %self.describe(), "Template region not found");
            return Err(ReplaceError::template_not_found(self.describe()));
        }

        let replacement = format!("{}\n{}\n{}", LINK_START_MARKER, links, LINK_END_MARKER);
        let updated = if self.flags.global {
            self.regex.replace_all(body, NoExpand(&replacement))
        } else {
            self.regex.replace(body, NoExpand(&replacement))
        };

        debug!(
            matches,
            global = self.flags.global,
            "Replaced template region by pattern"
        );

        Ok(updated.into_owned())
    }
}

/// Strategy B: literal start and end markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerLocator {
    start: String,
    end: String,
}

impl MarkerLocator {
    /// Create a locator for a marker pair; markers must be non-empty and distinct
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> PatternResult<Self> {
        let start = start.into();
        let end = end.into();
        if start.is_empty() || end.is_empty() {
            return Err(PatternError::EmptyMarker);
        }
        if start == end {
            return Err(PatternError::IdenticalMarkers(start));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}

impl Default for MarkerLocator {
    fn default() -> Self {
        Self {
            start: LINK_START_MARKER.to_string(),
            end: LINK_END_MARKER.to_string(),
        }
    }
}

impl RegionLocator for MarkerLocator {
    fn describe(&self) -> String {
        format!("{} ... {}", self.start, self.end)
    }

    fn replace_region(&self, body: &str, links: &str) -> ReplaceResult<String> {
        // First occurrence of each marker, searched independently
        let start = body.find(&self.start);
        let end = body.find(&self.end);

        let (start_end, end) = match (start, end) {
            (Some(start), Some(end)) if end >= start + self.start.len() => {
                (start + self.start.len(), end)
            }
            (Some(_), Some(_)) => {
                warn!(
                    start_marker = %self.start,
                    end_marker = %self.end,
                    "End marker appears before start marker"
                );
                return Err(ReplaceError::template_not_found(self.describe()));
            }
            _ => {
                warn!(
                    start_marker = %self.start,
                    end_marker = %self.end,
                    "Template markers not found"
                );
                return Err(ReplaceError::template_not_found(self.describe()));
            }
        };

        let mut updated = String::with_capacity(body.len() + links.len() + 2);
        updated.push_str(&body[..start_end]);
        updated.push('\n');
        updated.push_str(links);
        updated.push('\n');
        updated.push_str(&body[end..]);

        debug!(discarded = end - start_end, "Replaced template region by markers");

        Ok(updated)
    }
}

/// Name of a template strategy, as written in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Whole-region regular expression
    #[default]
    Pattern,
    /// Literal start and end markers
    Markers,
}

impl FromStr for StrategyKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pattern" | "regex" => Ok(StrategyKind::Pattern),
            "markers" | "delimiters" => Ok(StrategyKind::Markers),
            _ => Err(PatternError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Pattern => f.write_str("pattern"),
            StrategyKind::Markers => f.write_str("markers"),
        }
    }
}

/// The configured region locator
#[derive(Debug, Clone)]
pub enum TemplateStrategy {
    Pattern(PatternLocator),
    Markers(MarkerLocator),
}

impl TemplateStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            TemplateStrategy::Pattern(_) => StrategyKind::Pattern,
            TemplateStrategy::Markers(_) => StrategyKind::Markers,
        }
    }
}

impl Default for TemplateStrategy {
    fn default() -> Self {
        TemplateStrategy::Pattern(PatternLocator::default())
    }
}

impl RegionLocator for TemplateStrategy {
    fn describe(&self) -> String {
        match self {
            TemplateStrategy::Pattern(locator) => locator.describe(),
            TemplateStrategy::Markers(locator) => locator.describe(),
        }
    }

    fn replace_region(&self, body: &str, links: &str) -> ReplaceResult<String> {
        match self {
            TemplateStrategy::Pattern(locator) => locator.replace_region(body, links),
            TemplateStrategy::Markers(locator) => locator.replace_region(body, links),
        }
    }
}

/// Render `codes` and write them into the templated region of `body`.
///
/// On error the body is not modified and the caller must not persist it.
pub fn apply_template<L>(locator: &L, body: &str, codes: &CodeSet) -> ReplaceResult<String>
where
    L: RegionLocator + ?Sized,
{
    info!(count = codes.len(), "Injecting {} Trello links into PR body", codes.len());
    let links = render_links(codes);
    locator.replace_region(body, &links)
}
