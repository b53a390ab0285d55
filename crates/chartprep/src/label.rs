/// Pie-slice label showing the share and the absolute count it stands for.
///
/// The count is recovered from the percentage the chart hands back, so it
/// is rounded half-to-even: `12.5` becomes `12`, `13.5` becomes `14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentLabel {
    /// Widened so summing any slice of `u64` cannot overflow
    total: u128,
}

impl PercentLabel {
    pub fn new(values: &[u64]) -> Self {
        Self {
            total: values.iter().map(|&v| u128::from(v)).sum(),
        }
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    /// `pct` in 0-100. Renders as `"40.0%\n(40)"`.
    pub fn format(&self, pct: f64) -> String {
        let count = (pct * self.total as f64 / 100.0).round_ties_even() as u128;
        format!("{:.1}%\n({})", pct, count)
    }
}

/// Build a label formatter for a chart over `values`.
pub fn autopct_format(values: &[u64]) -> impl Fn(f64) -> String {
    let label = PercentLabel::new(values);
    move |pct| label.format(pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_share_and_count() {
        let fmt = autopct_format(&[40, 60]);
        assert_eq!(fmt(40.0), "40.0%\n(40)");
        assert_eq!(fmt(60.0), "60.0%\n(60)");
    }

    #[test]
    fn test_one_decimal_place() {
        let fmt = autopct_format(&[1, 2]);
        assert_eq!(fmt(100.0 / 3.0), "33.3%\n(1)");
        assert_eq!(fmt(200.0 / 3.0), "66.7%\n(2)");
    }

    #[test]
    fn test_count_rounds_half_to_even() {
        let label = PercentLabel::new(&[25]);
        assert_eq!(label.format(50.0), "50.0%\n(12)");
        let label = PercentLabel::new(&[27]);
        assert_eq!(label.format(50.0), "50.0%\n(14)");
    }

    #[test]
    fn test_empty_values() {
        let label = PercentLabel::new(&[]);
        assert_eq!(label.total(), 0);
        assert_eq!(label.format(0.0), "0.0%\n(0)");
    }

    #[test]
    fn test_total_beyond_u64() {
        let label = PercentLabel::new(&[1 << 62; 4]);
        assert_eq!(label.total(), 1 << 64);
        assert_eq!(label.format(50.0), "50.0%\n(9223372036854775808)");
        assert_eq!(label.format(100.0), "100.0%\n(18446744073709551616)");
    }

    #[test]
    fn test_large_totals() {
        let fmt = autopct_format(&[1_000_000, 3_000_000]);
        assert_eq!(fmt(25.0), "25.0%\n(1000000)");
    }
}
