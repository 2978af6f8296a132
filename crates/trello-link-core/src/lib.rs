#![forbid(unsafe_code)]

//! # trello-link core
//!
//! Extracts Trello short codes from a pull request title and its commit
//! messages, renders them as markdown links and writes them into the templated
//! region of the pull request body.
//!
//! ```text
//! extract_codes -> render_links -> apply_template
//! ```
//!
//! Everything here is synchronous and free of I/O. Fetching and persisting the
//! body belongs to the GitHub layer.

pub mod collector;
pub mod error;
pub mod extractor;
pub mod locator;
pub mod models;
pub mod renderer;

pub use collector::{extract_codes, CodeCollector};
pub use error::{PatternError, PatternResult, ReplaceError, ReplaceResult};
pub use extractor::{extract_each, extract_many, extract_one, CodePattern, DEFAULT_CODE_PATTERN};
pub use locator::{
    apply_template, MarkerLocator, PatternLocator, RegexFlags, RegionLocator, StrategyKind,
    TemplateStrategy, DEFAULT_REGION_FLAGS, DEFAULT_REGION_PATTERN, LINK_END_MARKER,
    LINK_START_MARKER,
};
pub use models::{CodeSet, Extraction, ExtractionWarning, ShortCode, SourceSelection};
pub use renderer::{render_link, render_links, LINK_LABEL, TRELLO_CARD_BASE_URL};
