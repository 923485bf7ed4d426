use serde::{Deserialize, Serialize};

const MONTHLY_LABELS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
const QUARTERLY_LABELS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
const YEARLY_LABELS: [&str; 3] = ["2022", "2023", "2024"];

/// Reporting granularity for trend charts. Each period carries a fixed,
/// hardcoded label set; labels are presentation slots, not calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPeriod {
    Monthly,
    Quarterly,
    Yearly,
}

impl AnalysisPeriod {
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            AnalysisPeriod::Monthly => &MONTHLY_LABELS,
            AnalysisPeriod::Quarterly => &QUARTERLY_LABELS,
            AnalysisPeriod::Yearly => &YEARLY_LABELS,
        }
    }

    pub fn period_count(&self) -> usize {
        self.labels().len()
    }

    /// Parses a period selector string. Unrecognized values fall back to
    /// `Monthly` rather than erroring, matching the view-layer contract.
    pub fn parse(value: &str) -> Self {
        match value {
            "quarterly" => AnalysisPeriod::Quarterly,
            "yearly" => AnalysisPeriod::Yearly,
            _ => AnalysisPeriod::Monthly,
        }
    }
}

impl Default for AnalysisPeriod {
    fn default() -> Self {
        AnalysisPeriod::Monthly
    }
}

/// Phase of the deterministic oscillation applied to a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Cosine,
}

impl Waveform {
    fn sample(&self, index: usize) -> f64 {
        match self {
            Waveform::Sine => (index as f64).sin(),
            Waveform::Cosine => (index as f64).cos(),
        }
    }
}

/// One labeled point of a single-series trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: &'static str,
    pub value: f64,
}

fn is_blank(total: f64) -> bool {
    !total.is_finite() || total == 0.0
}

/// Spreads `total` across the period slots with a deterministic oscillation:
/// `value[i] = round((total / n) * (1 + wave(i) * amplitude))`.
///
/// A zero or non-finite total produces a full zero-filled series of the same
/// length; empty data must never shrink the list of periods.
pub fn variation_values(
    total: f64,
    period: AnalysisPeriod,
    wave: Waveform,
    amplitude: f64,
) -> Vec<f64> {
    let n = period.period_count();
    if is_blank(total) {
        return vec![0.0; n];
    }

    let average = total / n as f64;
    (0..n)
        .map(|i| (average * (1.0 + wave.sample(i) * amplitude)).round())
        .collect()
}

/// Sine-phase trend over the period's fixed labels. The workhorse behind
/// every primary trend chart.
pub fn generate_trend(total: f64, period: AnalysisPeriod, amplitude: f64) -> Vec<TrendPoint> {
    generate_trend_with(total, period, Waveform::Sine, amplitude)
}

pub fn generate_trend_with(
    total: f64,
    period: AnalysisPeriod,
    wave: Waveform,
    amplitude: f64,
) -> Vec<TrendPoint> {
    let values = variation_values(total, period, wave, amplitude);
    period
        .labels()
        .iter()
        .copied()
        .zip(values)
        .map(|(label, value)| TrendPoint { label, value })
        .collect()
}

/// Constant per-period budget line: 110% of the period average, rounded.
/// Zero when the total is blank, like every other derived series.
pub fn budget_line(total: f64, period: AnalysisPeriod) -> f64 {
    if is_blank(total) {
        return 0.0;
    }
    (total / period.period_count() as f64 * 1.1).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_per_period() {
        assert_eq!(
            AnalysisPeriod::Monthly.labels(),
            &["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
        );
        assert_eq!(AnalysisPeriod::Quarterly.labels(), &["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(AnalysisPeriod::Yearly.labels(), &["2022", "2023", "2024"]);
    }

    #[test]
    fn test_parse_falls_back_to_monthly() {
        assert_eq!(AnalysisPeriod::parse("quarterly"), AnalysisPeriod::Quarterly);
        assert_eq!(AnalysisPeriod::parse("yearly"), AnalysisPeriod::Yearly);
        assert_eq!(AnalysisPeriod::parse("monthly"), AnalysisPeriod::Monthly);
        assert_eq!(AnalysisPeriod::parse("weekly"), AnalysisPeriod::Monthly);
        assert_eq!(AnalysisPeriod::parse(""), AnalysisPeriod::Monthly);
    }

    #[test]
    fn test_zero_total_keeps_full_shape() {
        for period in [
            AnalysisPeriod::Monthly,
            AnalysisPeriod::Quarterly,
            AnalysisPeriod::Yearly,
        ] {
            let empty = generate_trend(0.0, period, 0.4);
            let filled = generate_trend(100.0, period, 0.4);
            assert_eq!(empty.len(), filled.len());
            assert_eq!(empty.len(), period.period_count());
            for (e, f) in empty.iter().zip(&filled) {
                assert_eq!(e.label, f.label);
                assert_eq!(e.value, 0.0);
            }
        }
    }

    #[test]
    fn test_nan_total_treated_as_no_data() {
        let points = generate_trend(f64::NAN, AnalysisPeriod::Monthly, 0.4);
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_quarterly_revenue_scenario() {
        // average = 30000; i=0: sin(0) = 0 so value stays at the average;
        // i=1..3 must match the sine formula exactly, not an approximation.
        let points = generate_trend(120_000.0, AnalysisPeriod::Quarterly, 0.4);
        assert_eq!(points[0].value, 30_000.0);
        for (i, point) in points.iter().enumerate() {
            let expected = (30_000.0 * (1.0 + (i as f64).sin() * 0.4)).round();
            assert_eq!(point.value, expected);
        }
        assert_eq!(points[1].value, (30_000.0 * (1.0 + 1.0_f64.sin() * 0.4)).round());
    }

    #[test]
    fn test_determinism() {
        let a = generate_trend(5_000.0, AnalysisPeriod::Monthly, 0.4);
        let b = generate_trend(5_000.0, AnalysisPeriod::Monthly, 0.4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cosine_phase_differs_from_sine() {
        let sine = generate_trend_with(9_000.0, AnalysisPeriod::Monthly, Waveform::Sine, 0.2);
        let cosine = generate_trend_with(9_000.0, AnalysisPeriod::Monthly, Waveform::Cosine, 0.2);
        // cos(0) = 1 lifts the first slot above the average; sin(0) = 0 does not.
        assert_eq!(sine[0].value, 1_500.0);
        assert_eq!(cosine[0].value, 1_800.0);
    }

    #[test]
    fn test_budget_line() {
        assert_eq!(budget_line(6_000.0, AnalysisPeriod::Monthly), 1_100.0);
        assert_eq!(budget_line(0.0, AnalysisPeriod::Monthly), 0.0);
    }
}
