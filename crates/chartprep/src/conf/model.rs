use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::threshold::CategoryThresholder;
use crate::{DEFAULT_OTHER_LABEL, DEFAULT_THRESHOLD_PCT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Share of the total below which a category is folded, e.g. 0.03
    pub threshold_pct: f64,
    /// Label of the synthetic bucket collecting folded categories
    pub other_label: String,
}

impl ChartConfig {
    /// Build the thresholder this configuration describes.
    pub fn thresholder(&self) -> ChartResult<CategoryThresholder> {
        CategoryThresholder::with_label(self.threshold_pct, &self.other_label)
    }

    /// [`ChartConfig::load`] followed by [`ChartConfig::thresholder`].
    pub fn load_thresholder() -> ChartResult<CategoryThresholder> {
        let config = Self::load()?;
        config.thresholder()
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            other_label: DEFAULT_OTHER_LABEL.to_string(),
        }
    }
}
