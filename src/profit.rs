use crate::breakdown::{generate_breakdown, BreakdownEntry, CategoryWeight};
use crate::export::{ReportBody, ReportMetric, ReportTrendRow};
use crate::schema::{AnalyticsSummary, FinancialRecord};
use crate::trend::{variation_values, AnalysisPeriod, Waveform};
use serde::Serialize;

pub const PROFIT_BY_SEGMENT: [CategoryWeight; 3] = [
    CategoryWeight::new("Enterprise", 40.0),
    CategoryWeight::new("SMB", 35.0),
    CategoryWeight::new("Consumer", 25.0),
];

const TREND_AMPLITUDE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitSummary {
    /// Backend-reported net profit; intentionally not recomputed from the
    /// revenue and expense totals, which it may diverge from.
    pub net_profit: f64,
    pub profit_margin: f64,
    pub average_monthly_profit: f64,
}

/// One slot of the profit trend with its margin against the revenue share of
/// the same slot, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitTrendPoint {
    pub label: &'static str,
    pub profit: f64,
    pub margin_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitAnalysis {
    pub summary: ProfitSummary,
    pub trends: Vec<ProfitTrendPoint>,
    pub by_segment: Vec<BreakdownEntry>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn build(
    summary: &AnalyticsSummary,
    _records: &[FinancialRecord],
    period: AnalysisPeriod,
) -> ProfitAnalysis {
    let net_profit = summary.net_profit;
    let total_revenue = summary.total_revenue;

    let profit_values = variation_values(net_profit, period, Waveform::Sine, TREND_AMPLITUDE);
    let revenue_shares = variation_values(total_revenue, period, Waveform::Sine, TREND_AMPLITUDE);

    let trends = period
        .labels()
        .iter()
        .copied()
        .zip(profit_values.into_iter().zip(revenue_shares))
        .map(|(label, (profit, revenue_share))| ProfitTrendPoint {
            label,
            profit,
            margin_pct: if revenue_share == 0.0 {
                0.0
            } else {
                round2(profit / revenue_share * 100.0)
            },
        })
        .collect();

    ProfitAnalysis {
        summary: ProfitSummary {
            net_profit,
            profit_margin: if total_revenue == 0.0 {
                0.0
            } else {
                round2(net_profit / total_revenue * 100.0)
            },
            average_monthly_profit: (net_profit / 12.0).round(),
        },
        trends,
        by_segment: generate_breakdown(net_profit, &PROFIT_BY_SEGMENT),
    }
}

impl ProfitAnalysis {
    pub fn report_body(&self, generated_on: chrono::NaiveDate) -> ReportBody {
        let mut body = ReportBody::new("Profit Analysis Report", generated_on);
        body.metrics.push(ReportMetric::new(
            "Net Profit",
            format!("{:.2}", self.summary.net_profit),
        ));
        body.metrics.push(ReportMetric::new(
            "Profit Margin",
            format!("{}%", self.summary.profit_margin),
        ));
        body.trend = self
            .trends
            .iter()
            .map(|p| ReportTrendRow {
                label: p.label.to_string(),
                value: p.profit,
            })
            .collect();
        body.categories = self.by_segment.iter().map(Into::into).collect();
        body
    }
}
