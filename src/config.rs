//! configuration threaded through every call to the response converter
use crate::parsers::{CombinationMode, DEFAULT_MAX_VARIANTS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// read-only settings consumed by [`ResponseConverter`]
///
/// # Examples
///
/// ```
/// # use seedreq::config::ConverterConfig;
/// # use seedreq::parsers::CombinationMode;
/// let config = ConverterConfig::new()
///     .with_fuzzable_header("Referer")
///     .with_fuzzable_header("User-Agent")
///     .with_combination_mode(CombinationMode::All);
///
/// assert_eq!(config.fuzzable_headers(), ["Referer", "User-Agent"]);
/// assert_eq!(config.combination_mode(), CombinationMode::All);
/// assert_eq!(config.max_variants(), 150);
/// ```
///
/// [`ResponseConverter`]: crate::factory::ResponseConverter
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConverterConfig {
    fuzzable_headers: Vec<String>,
    combination_mode: CombinationMode,
    max_variants: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            fuzzable_headers: Vec::new(),
            combination_mode: CombinationMode::default(),
            max_variants: DEFAULT_MAX_VARIANTS,
        }
    }
}

impl ConverterConfig {
    /// no fuzzable headers, [`CombinationMode::TopMiddleBottom`] and at most
    /// [`DEFAULT_MAX_VARIANTS`] variants per form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// add a header name that every produced request should carry, empty, so
    /// it can be mutated downstream
    #[must_use]
    pub fn with_fuzzable_header(mut self, name: &str) -> Self {
        self.fuzzable_headers.push(name.to_string());
        self
    }

    /// set how multi-valued form fields are expanded
    #[must_use]
    pub fn with_combination_mode(mut self, mode: CombinationMode) -> Self {
        self.combination_mode = mode;
        self
    }

    /// cap the number of variants a single form may expand into
    #[must_use]
    pub fn with_max_variants(mut self, max_variants: usize) -> Self {
        self.max_variants = max_variants;
        self
    }

    /// get the fuzzable header names, in the order they were added
    #[must_use]
    pub fn fuzzable_headers(&self) -> &[String] {
        &self.fuzzable_headers
    }

    /// get the form combination mode
    #[must_use]
    pub const fn combination_mode(&self) -> CombinationMode {
        self.combination_mode
    }

    /// get the per-form variant cap
    #[must_use]
    pub const fn max_variants(&self) -> usize {
        self.max_variants
    }
}
