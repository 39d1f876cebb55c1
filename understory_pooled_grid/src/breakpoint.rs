// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint rules and column resolution.
//!
//! A grid carries a list of [`BreakpointRule`]s. For a given available width,
//! [`select_rule`] picks the single rule that applies and [`BreakpointRule::plan`]
//! resolves how many columns to use:
//!
//! - the minimum entry width bounds the column count from above,
//! - the maximum entry width bounds it from below,
//! - the preferred column count (or preferred entry width) picks a value in
//!   between.
//!
//! Widths and counts that are zero or negative count as unset.

/// Column configuration applied up to an area width ceiling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BreakpointRule {
    name: Option<String>,
    max_area_width: f64,
    preferred_columns: u32,
    min_entry_width: f64,
    preferred_entry_width: f64,
    max_entry_width: f64,
}

impl BreakpointRule {
    /// A rule with no ceiling and no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label the rule for diagnostics.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Apply this rule only to areas at most `width` wide.
    #[must_use]
    pub fn with_max_area_width(mut self, width: f64) -> Self {
        self.max_area_width = width;
        self
    }

    /// Prefer exactly this many columns.
    #[must_use]
    pub fn with_preferred_columns(mut self, columns: u32) -> Self {
        self.preferred_columns = columns;
        self
    }

    /// Entries are never narrower than this.
    #[must_use]
    pub fn with_min_entry_width(mut self, width: f64) -> Self {
        self.min_entry_width = width;
        self
    }

    /// Derive the preferred column count from this entry width.
    #[must_use]
    pub fn with_preferred_entry_width(mut self, width: f64) -> Self {
        self.preferred_entry_width = width;
        self
    }

    /// Entries are never wider than this.
    #[must_use]
    pub fn with_max_entry_width(mut self, width: f64) -> Self {
        self.max_entry_width = width;
        self
    }

    /// Diagnostic label.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Area width ceiling, if any.
    pub fn max_area_width(&self) -> Option<f64> {
        set(self.max_area_width)
    }

    /// Explicit preferred column count, if any.
    pub fn preferred_columns(&self) -> Option<u32> {
        (self.preferred_columns > 0).then_some(self.preferred_columns)
    }

    /// Minimum entry width, if any.
    pub fn min_entry_width(&self) -> Option<f64> {
        set(self.min_entry_width)
    }

    /// Preferred entry width, if any.
    pub fn preferred_entry_width(&self) -> Option<f64> {
        set(self.preferred_entry_width)
    }

    /// Maximum entry width, if any.
    pub fn max_entry_width(&self) -> Option<f64> {
        set(self.max_entry_width)
    }

    /// Resolve the column count for an area `width` wide.
    pub fn plan(&self, width: f64) -> ColumnPlan {
        let max_columns = self
            .min_entry_width()
            .map(|w| count(width / w, f64::floor))
            .filter(|&n| n > 0);
        let min_columns = self
            .max_entry_width()
            .map_or(0, |w| count(width / w, f64::ceil));
        let preferred = self
            .preferred_columns()
            .or_else(|| {
                self.preferred_entry_width()
                    .map(|w| count(width / w, f64::floor))
                    .filter(|&n| n > 0)
            })
            .or(max_columns)
            .unwrap_or(min_columns);

        let mut columns = preferred;
        if let Some(max) = max_columns {
            columns = columns.min(max);
        }
        columns = columns.max(min_columns);

        ColumnPlan {
            min_columns,
            max_columns,
            preferred,
            columns,
        }
    }
}

/// How a rule resolved the column count for one width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Lower bound from the maximum entry width (0 when unset).
    pub min_columns: u32,
    /// Upper bound from the minimum entry width (`None` when unbounded).
    pub max_columns: Option<u32>,
    /// Preferred count before clamping.
    pub preferred: u32,
    /// Final count. The lower bound wins when the bounds cross.
    pub columns: u32,
}

/// Pick the rule that applies to an area `width` wide.
///
/// Candidates are the rules whose ceiling is at least `width` plus the rules
/// without a ceiling, which match any width at a distance of `width`. The
/// candidate closest to `width` wins, earlier rules winning ties.
pub fn select_rule(rules: &[BreakpointRule], width: f64) -> Option<&BreakpointRule> {
    let mut best: Option<(&BreakpointRule, f64)> = None;
    for rule in rules {
        let distance = match rule.max_area_width() {
            Some(ceiling) if ceiling >= width => ceiling - width,
            Some(_) => continue,
            None => width.abs(),
        };
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((rule, distance));
        }
    }
    best.map(|(rule, _)| rule)
}

fn set(value: f64) -> Option<f64> {
    (value > 0.0 && value.is_finite()).then_some(value)
}

fn count(ratio: f64, round: fn(f64) -> f64) -> u32 {
    let rounded = round(ratio);
    if rounded.is_nan() || rounded <= 0.0 {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "positive and saturating; column counts never approach u32::MAX"
    )]
    {
        rounded.min(f64::from(u32::MAX)) as u32
    }
}
