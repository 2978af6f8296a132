//! Code Extractor - pulls short codes out of single texts or sequences of texts

use regex::Regex;
use tracing::trace;

use crate::{
    error::{PatternError, PatternResult},
    models::ShortCode,
};

/// Default pattern for titles and commit messages: the text between brackets
pub const DEFAULT_CODE_PATTERN: &str = r"\[(.*)\]";

/// A compiled extraction pattern whose first capture group holds the code
#[derive(Debug, Clone)]
pub struct CodePattern {
    regex: Regex,
}

impl CodePattern {
    /// Compile a pattern, requiring at least one capture group
    pub fn new(pattern: &str) -> PatternResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| PatternError::invalid_regex(pattern, e))?;

        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(PatternError::MissingCaptureGroup(pattern.to_string()));
        }

        Ok(Self { regex })
    }

    /// The source pattern string
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Extract the code from a single text
    pub fn extract(&self, text: &str) -> Option<ShortCode> {
        extract_one(text, self)
    }
}

impl Default for CodePattern {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_CODE_PATTERN).expect("default code pattern is valid"),
        }
    }
}

/// Extract zero or one code from `text`.
///
/// Returns `None` when the pattern does not match or when the first capture
/// group did not participate or captured the empty string.
pub fn extract_one(text: &str, pattern: &CodePattern) -> Option<ShortCode> {
    let code = pattern
        .regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| ShortCode::new(m.as_str()));

    if code.is_none() {
        trace!(pattern = %pattern.as_str(), "No short code in text");
    }

    code
}

/// Pair every text with its code, if any, in input order
pub fn extract_each<'p, I, S>(
    texts: I,
    pattern: &'p CodePattern,
) -> impl Iterator<Item = (S, Option<ShortCode>)> + 'p
where
    I: IntoIterator<Item = S>,
    I::IntoIter: 'p,
    S: AsRef<str> + 'p,
{
    texts.into_iter().map(move |text| {
        let code = extract_one(text.as_ref(), pattern);
        (text, code)
    })
}

/// Extract codes from every text that carries one, in input order.
/// Texts without a code are skipped.
pub fn extract_many<I, S>(texts: I, pattern: &CodePattern) -> Vec<ShortCode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extract_each(texts, pattern)
        .filter_map(|(_, code)| code)
        .collect()
}
