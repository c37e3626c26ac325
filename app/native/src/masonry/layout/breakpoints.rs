//! Responsive column counts driven by viewport-width media queries.
//!
//! Breakpoints are an ordered list of `(query, columns)` pairs. The first
//! query that matches the current viewport width decides the column count;
//! when none match, the default applies. Only width features are supported:
//! `(min-width: N[px])`, `(max-width: N[px])`, and conjunctions of them joined
//! with `and`.

use std::num::NonZeroUsize;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::BreakpointConfig;
use crate::error::{MasonryError, MasonryResult};

/// Matches one `(min-width: 600px)` style feature.
static FEATURE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\([ \t]*(min|max)-width[ \t]*:[ \t]*([0-9]+(?:\.[0-9]+)?)[ \t]*(px)?[ \t]*\)$")
        .map_err(|err| tracing::error!(error = %err, "masonry: media feature pattern failed to compile"))
        .ok()
});

/// A single width condition.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WidthFeature {
    Min(f64),
    Max(f64),
}

impl WidthFeature {
    fn matches(self, width: f64) -> bool {
        match self {
            Self::Min(min) => width >= min,
            Self::Max(max) => width <= max,
        }
    }
}

/// A parsed media query: all features must match.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    source: String,
    features: Vec<WidthFeature>,
}

impl MediaQuery {
    /// Parses a width media query such as `(min-width:1000px)`.
    ///
    /// # Errors
    ///
    /// Returns `MasonryError::InvalidMediaQuery` for anything other than
    /// min/max-width features joined with `and`.
    pub fn parse(query: &str) -> MasonryResult<Self> {
        let Some(feature_re) = FEATURE_RE.as_ref() else {
            return Err(MasonryError::InvalidMediaQuery(query.to_string()));
        };

        let mut features = Vec::new();
        for part in query.split(" and ") {
            let part = part.trim();
            let captures = feature_re
                .captures(part)
                .ok_or_else(|| MasonryError::InvalidMediaQuery(query.to_string()))?;
            let value: f64 = captures[2]
                .parse()
                .map_err(|_| MasonryError::InvalidMediaQuery(query.to_string()))?;
            features.push(if &captures[1] == "min" {
                WidthFeature::Min(value)
            } else {
                WidthFeature::Max(value)
            });
        }

        if features.is_empty() {
            return Err(MasonryError::InvalidMediaQuery(query.to_string()));
        }

        Ok(Self {
            source: query.to_string(),
            features,
        })
    }

    /// Whether the query matches a viewport of the given width.
    #[must_use]
    pub fn matches(&self, viewport_width: f64) -> bool {
        self.features.iter().all(|feature| feature.matches(viewport_width))
    }

    /// The query as written.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.source }
}

/// A query paired with the column count it selects.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoint {
    pub query: MediaQuery,
    pub columns: NonZeroUsize,
}

/// Ordered breakpoint table with a fallback column count.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    entries: Vec<Breakpoint>,
    default_columns: NonZeroUsize,
}

impl Breakpoints {
    /// Builds a table from already parsed breakpoints.
    #[must_use]
    pub const fn new(entries: Vec<Breakpoint>, default_columns: NonZeroUsize) -> Self {
        Self { entries, default_columns }
    }

    /// Parses the breakpoint section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `MasonryError::InvalidMediaQuery` if any query fails to parse.
    pub fn from_config(
        breakpoints: &[BreakpointConfig],
        default_columns: NonZeroUsize,
    ) -> MasonryResult<Self> {
        let entries = breakpoints
            .iter()
            .map(|bp| {
                Ok(Breakpoint {
                    query: MediaQuery::parse(&bp.query)?,
                    columns: bp.columns,
                })
            })
            .collect::<MasonryResult<Vec<_>>>()?;
        Ok(Self::new(entries, default_columns))
    }

    /// Column count for a viewport width.
    #[must_use]
    pub fn columns_for(&self, viewport_width: f64) -> NonZeroUsize {
        breakpoint_to_columns(viewport_width, &self.entries, self.default_columns)
    }

    /// Registered queries, in priority order.
    pub fn queries(&self) -> impl Iterator<Item = &MediaQuery> {
        self.entries.iter().map(|bp| &bp.query)
    }

    /// Number of registered breakpoints.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether only the default column count is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// Maps a viewport width to a column count.
///
/// The first matching breakpoint wins, so tables are usually ordered from the
/// widest `min-width` downwards.
#[must_use]
pub fn breakpoint_to_columns(
    viewport_width: f64,
    breakpoints: &[Breakpoint],
    default_columns: NonZeroUsize,
) -> NonZeroUsize {
    breakpoints
        .iter()
        .find(|bp| bp.query.matches(viewport_width))
        .map_or(default_columns, |bp| bp.columns)
}
