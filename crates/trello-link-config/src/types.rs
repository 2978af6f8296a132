//! Action input types and their resolved form

use std::fmt;

use serde::{Deserialize, Serialize};
use trello_link_core::{
    CodeCollector, CodePattern, MarkerLocator, PatternLocator, SourceSelection, StrategyKind,
    TemplateStrategy, DEFAULT_CODE_PATTERN, DEFAULT_REGION_FLAGS, DEFAULT_REGION_PATTERN,
    LINK_END_MARKER, LINK_START_MARKER,
};

use crate::error::{ConfigError, Result};

/// Default per-request timeout for GitHub calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw action inputs as read from the environment or a config file.
///
/// Keys are lowercase: `INPUT_TITLEREGEX` becomes `titleregex`, and config
/// files use the same spelling.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionInputs {
    #[serde(default, rename = "replacementregex")]
    pub replacement_regex: Option<String>,
    #[serde(default, rename = "replacementregexflags")]
    pub replacement_regex_flags: Option<String>,
    #[serde(default, rename = "startmarker")]
    pub start_marker: Option<String>,
    #[serde(default, rename = "endmarker")]
    pub end_marker: Option<String>,
    #[serde(default, rename = "templatestrategy")]
    pub template_strategy: Option<String>,
    #[serde(default, rename = "titleregex")]
    pub title_regex: Option<String>,
    #[serde(default, rename = "commitsregex")]
    pub commits_regex: Option<String>,
    #[serde(default, rename = "shortcodesource")]
    pub short_code_source: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "timeoutsecs")]
    pub timeout_secs: Option<String>,
}

impl fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInputs")
            .field("replacement_regex", &self.replacement_regex)
            .field("replacement_regex_flags", &self.replacement_regex_flags)
            .field("start_marker", &self.start_marker)
            .field("end_marker", &self.end_marker)
            .field("template_strategy", &self.template_strategy)
            .field("title_regex", &self.title_regex)
            .field("commits_regex", &self.commits_regex)
            .field("short_code_source", &self.short_code_source)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Inputs are trimmed; blank inputs count as absent
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn or_default(value: &Option<String>, default: &str) -> String {
    non_blank(value).unwrap_or(default).to_string()
}

/// Fully resolved configuration, every input defaulted
#[derive(Clone, PartialEq)]
pub struct ActionConfig {
    pub replacement_regex: String,
    pub replacement_regex_flags: String,
    pub start_marker: String,
    pub end_marker: String,
    pub template_strategy: StrategyKind,
    pub title_regex: String,
    pub commits_regex: String,
    pub short_code_source: SourceSelection,
    /// GitHub token, never logged
    pub token: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("replacement_regex", &self.replacement_regex)
            .field("replacement_regex_flags", &self.replacement_regex_flags)
            .field("start_marker", &self.start_marker)
            .field("end_marker", &self.end_marker)
            .field("template_strategy", &self.template_strategy)
            .field("title_regex", &self.title_regex)
            .field("commits_regex", &self.commits_regex)
            .field("short_code_source", &self.short_code_source)
            .field("token", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            replacement_regex: DEFAULT_REGION_PATTERN.to_string(),
            replacement_regex_flags: DEFAULT_REGION_FLAGS.to_string(),
            start_marker: LINK_START_MARKER.to_string(),
            end_marker: LINK_END_MARKER.to_string(),
            template_strategy: StrategyKind::default(),
            title_regex: DEFAULT_CODE_PATTERN.to_string(),
            commits_regex: DEFAULT_CODE_PATTERN.to_string(),
            short_code_source: SourceSelection::default(),
            token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ActionConfig {
    /// Resolve raw inputs, applying each default independently
    pub fn from_inputs(inputs: &ActionInputs) -> Result<Self> {
        let template_strategy = match non_blank(&inputs.template_strategy) {
            Some(value) => value.parse()?,
            None => StrategyKind::default(),
        };

        let short_code_source = match non_blank(&inputs.short_code_source) {
            Some(value) => value.parse()?,
            None => SourceSelection::default(),
        };

        let timeout_secs = match non_blank(&inputs.timeout_secs) {
            Some(value) => value.parse::<u64>().map_err(|_| {
                ConfigError::Validation(format!("Timeout must be a whole number of seconds, got '{}'", value))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            replacement_regex: or_default(&inputs.replacement_regex, DEFAULT_REGION_PATTERN),
            replacement_regex_flags: or_default(
                &inputs.replacement_regex_flags,
                DEFAULT_REGION_FLAGS,
            ),
            start_marker: or_default(&inputs.start_marker, LINK_START_MARKER),
            end_marker: or_default(&inputs.end_marker, LINK_END_MARKER),
            template_strategy,
            title_regex: or_default(&inputs.title_regex, DEFAULT_CODE_PATTERN),
            commits_regex: or_default(&inputs.commits_regex, DEFAULT_CODE_PATTERN),
            short_code_source,
            token: non_blank(&inputs.token).unwrap_or_default().to_string(),
            timeout_secs,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate values that are not checked by compilation
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(ConfigError::Validation(
                "Input required and not supplied: token".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Compile patterns and markers. Fails before any extraction or replacement runs.
    pub fn compile(&self) -> Result<CompiledConfig> {
        let title_pattern = CodePattern::new(&self.title_regex)?;
        let commit_pattern = CodePattern::new(&self.commits_regex)?;

        let strategy = match self.template_strategy {
            StrategyKind::Pattern => TemplateStrategy::Pattern(PatternLocator::parse(
                &self.replacement_regex,
                &self.replacement_regex_flags,
            )?),
            StrategyKind::Markers => TemplateStrategy::Markers(MarkerLocator::new(
                self.start_marker.as_str(),
                self.end_marker.as_str(),
            )?),
        };

        Ok(CompiledConfig {
            collector: CodeCollector::new(title_pattern, commit_pattern, self.short_code_source),
            strategy,
        })
    }

    /// One line per effective setting, for run notices
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self.template_strategy {
            StrategyKind::Pattern => {
                lines.push(format!("Using replacement regex: {}", self.replacement_regex));
                lines.push(format!(
                    "Using replacement regex flags: {}",
                    self.replacement_regex_flags
                ));
            }
            StrategyKind::Markers => {
                lines.push(format!("Using start marker: {}", self.start_marker));
                lines.push(format!("Using end marker: {}", self.end_marker));
            }
        }
        lines.push(format!("Using title regex: {}", self.title_regex));
        lines.push(format!("Using commits regex: {}", self.commits_regex));
        lines.push(format!("Using short code source: {}", self.short_code_source));
        lines
    }
}

/// Compiled engine values built once per run
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub collector: CodeCollector,
    pub strategy: TemplateStrategy,
}
