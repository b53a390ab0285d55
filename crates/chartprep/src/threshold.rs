use tracing::debug;

use crate::aggregate::CategoryAggregate;
use crate::error::{ChartError, ChartResult};
use crate::{DEFAULT_OTHER_LABEL, DEFAULT_THRESHOLD_PCT};

/// Folds categories below a share of the total into one "Other" entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryThresholder {
    threshold_pct: f64,
    other_label: String,
}

impl CategoryThresholder {
    /// `threshold_pct` is a share of the total, e.g. `0.03` for 3%.
    pub fn new(threshold_pct: f64) -> ChartResult<Self> {
        Self::with_label(threshold_pct, DEFAULT_OTHER_LABEL)
    }

    pub fn with_label(threshold_pct: f64, other_label: &str) -> ChartResult<Self> {
        if !threshold_pct.is_finite() || !(0.0..=1.0).contains(&threshold_pct) {
            return Err(ChartError::InvalidThreshold(threshold_pct));
        }
        if other_label.is_empty() {
            return Err(ChartError::InvalidLabel("other label must not be empty".to_string()));
        }
        Ok(Self {
            threshold_pct,
            other_label: other_label.to_string(),
        })
    }

    pub fn threshold_pct(&self) -> f64 {
        self.threshold_pct
    }

    pub fn other_label(&self) -> &str {
        &self.other_label
    }

    /// Keep every category with at least `threshold_pct * total`, sum the
    /// rest into the other label, and append that entry last.
    ///
    /// The other entry is present even when nothing was folded into it. An
    /// all-zero aggregate has a threshold of 0, so every category is kept.
    /// An existing category named like the other label is merged into it.
    pub fn apply(&self, data: &CategoryAggregate) -> ChartResult<CategoryAggregate> {
        let total = data.total();
        let threshold_abs = self.threshold_pct * total as f64;
        debug!(
            total,
            categories = data.len(),
            threshold_abs,
            "Thresholding category aggregate"
        );

        let mut kept = CategoryAggregate::new();
        let mut excluded: u64 = 0;
        let mut excluded_count = 0usize;
        for (label, magnitude) in data.iter() {
            if meets_threshold(magnitude, threshold_abs) {
                kept.insert(label, magnitude)?;
            } else {
                excluded = checked_sum(excluded, magnitude)?;
                excluded_count += 1;
            }
        }

        // Keep the other entry last even if the input already carried one
        if let Some(existing) = kept.remove(&self.other_label) {
            excluded = checked_sum(excluded, existing)?;
        }
        kept.insert(&self.other_label, excluded)?;

        debug!(
            kept = kept.len() - 1,
            excluded = excluded_count,
            other = excluded,
            "Folded small categories"
        );
        Ok(kept)
    }
}

/// `threshold_pct * total` carries rounding error (0.07 * 100 is
/// 7.000000000000001), so a magnitude within this relative distance below
/// the cut-off counts as equal to it.
const RELATIVE_TOLERANCE: f64 = 1e-12;

fn meets_threshold(magnitude: u64, threshold_abs: f64) -> bool {
    let magnitude = magnitude as f64;
    magnitude >= threshold_abs || threshold_abs - magnitude <= threshold_abs * RELATIVE_TOLERANCE
}

fn checked_sum(acc: u64, magnitude: u64) -> ChartResult<u64> {
    acc.checked_add(magnitude)
        .ok_or_else(|| ChartError::Overflow(format!("other bucket exceeds {}", u64::MAX)))
}

impl Default for CategoryThresholder {
    fn default() -> Self {
        Self {
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            other_label: DEFAULT_OTHER_LABEL.to_string(),
        }
    }
}

/// Threshold `data` at `threshold_pct` of its total with the default label.
pub fn filter_other(data: &CategoryAggregate, threshold_pct: f64) -> ChartResult<CategoryAggregate> {
    CategoryThresholder::new(threshold_pct)?.apply(data)
}
