use crate::breakdown::{generate_breakdown, BreakdownEntry, CategoryWeight};
use crate::export::{ReportBody, ReportMetric, ReportTrendRow};
use crate::schema::{absolute_total, records_of_type, AnalyticsSummary, FinancialRecord, RecordType};
use crate::trend::{variation_values, AnalysisPeriod, Waveform};
use serde::Serialize;

pub const REVENUE_BY_CATEGORY: [CategoryWeight; 3] = [
    CategoryWeight::new("Sales", 50.0),
    CategoryWeight::new("Services", 30.0),
    CategoryWeight::new("Products", 20.0),
];

pub const REVENUE_BY_CHANNEL: [CategoryWeight; 3] = [
    CategoryWeight::new("Online", 60.0),
    CategoryWeight::new("Retail", 25.0),
    CategoryWeight::new("Partner", 15.0),
];

pub const EXPENSES_BY_TYPE: [CategoryWeight; 4] = [
    CategoryWeight::new("Marketing", 15.0),
    CategoryWeight::new("Operations", 25.0),
    CategoryWeight::new("Salaries", 45.0),
    CategoryWeight::new("Utilities", 15.0),
];

/// Top-product rows carry a revenue share of the record-amount pool and a
/// unit share of the record count. Partial coverage is intentional: these are
/// leaders, not a full partition.
const TOP_PRODUCTS: [(&str, f64, f64); 3] = [
    ("Product A", 0.35, 0.4),
    ("Product B", 0.25, 0.3),
    ("Product C", 0.20, 0.3),
];

const TREND_AMPLITUDE: f64 = 0.4;
const PROFIT_OVERLAY_AMPLITUDE: f64 = 0.3;

/// Placeholder growth figure carried through from the backend roadmap; the
/// summary endpoint does not provide period-over-period growth yet.
const REVENUE_GROWTH_PLACEHOLDER: f64 = 15.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub average_order_value: f64,
    pub average_monthly_revenue: f64,
    pub revenue_growth: f64,
    pub top_category: &'static str,
    pub top_category_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueTrendPoint {
    pub label: &'static str,
    pub revenue: f64,
    pub transactions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub product: &'static str,
    pub revenue: f64,
    pub units: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitOverlayPoint {
    pub label: &'static str,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueAnalysis {
    pub summary: RevenueSummary,
    pub trends: Vec<RevenueTrendPoint>,
    pub revenue_by_category: Vec<BreakdownEntry>,
    pub revenue_by_channel: Vec<BreakdownEntry>,
    pub top_products: Vec<TopProduct>,
    pub expenses_by_type: Vec<BreakdownEntry>,
    pub profit_overlay: Vec<ProfitOverlayPoint>,
}

/// Assembles the revenue page datasets from one fetch cycle.
pub fn build(
    summary: &AnalyticsSummary,
    records: &[FinancialRecord],
    period: AnalysisPeriod,
) -> RevenueAnalysis {
    let revenue_records = records_of_type(records, RecordType::Revenue);
    let transaction_count = revenue_records.len();
    let has_revenue_records = transaction_count > 0;

    let gate = |total: f64| if has_revenue_records { total } else { 0.0 };
    let total_revenue = summary.total_revenue;

    let revenue_values = variation_values(
        gate(total_revenue),
        period,
        Waveform::Sine,
        TREND_AMPLITUDE,
    );
    let transaction_values = variation_values(
        transaction_count as f64,
        period,
        Waveform::Sine,
        TREND_AMPLITUDE,
    );

    let trends = period
        .labels()
        .iter()
        .copied()
        .zip(revenue_values.into_iter().zip(transaction_values))
        .map(|(label, (revenue, transactions))| RevenueTrendPoint {
            label,
            revenue,
            transactions,
        })
        .collect();

    RevenueAnalysis {
        summary: RevenueSummary {
            total_revenue,
            total_transactions: transaction_count,
            average_order_value: if has_revenue_records {
                total_revenue / transaction_count as f64
            } else {
                0.0
            },
            average_monthly_revenue: (total_revenue / 12.0).round(),
            revenue_growth: REVENUE_GROWTH_PLACEHOLDER,
            top_category: "Sales",
            top_category_amount: (total_revenue * 0.5).round(),
        },
        trends,
        revenue_by_category: generate_breakdown(gate(total_revenue), &REVENUE_BY_CATEGORY),
        revenue_by_channel: generate_breakdown(total_revenue, &REVENUE_BY_CHANNEL),
        top_products: top_products(records),
        expenses_by_type: generate_breakdown(summary.total_expenses, &EXPENSES_BY_TYPE),
        profit_overlay: profit_overlay(summary, period),
    }
}

/// Top sellers scaled off the uploaded record pool rather than the summary,
/// so sign conventions in the raw amounts cannot flip the leaderboard.
fn top_products(records: &[FinancialRecord]) -> Vec<TopProduct> {
    let revenue_records = records_of_type(records, RecordType::Revenue);
    if revenue_records.is_empty() {
        return TOP_PRODUCTS
            .iter()
            .map(|&(product, _, _)| TopProduct {
                product,
                revenue: 0.0,
                units: 0.0,
            })
            .collect();
    }

    let pool = absolute_total(records, RecordType::Revenue);
    let count = revenue_records.len() as f64;

    TOP_PRODUCTS
        .iter()
        .map(|&(product, revenue_share, unit_share)| TopProduct {
            product,
            revenue: (pool * revenue_share).round(),
            units: (count * unit_share).round(),
        })
        .collect()
}

/// Cosine-phase profit line overlaid on the revenue charts. Either total
/// missing means profit cannot be illustrated, so the series zero-fills.
fn profit_overlay(summary: &AnalyticsSummary, period: AnalysisPeriod) -> Vec<ProfitOverlayPoint> {
    let blank = summary.total_revenue == 0.0 || summary.total_expenses == 0.0;
    let net = summary.total_revenue - summary.total_expenses;
    let values = variation_values(
        if blank { 0.0 } else { net },
        period,
        Waveform::Cosine,
        PROFIT_OVERLAY_AMPLITUDE,
    );

    period
        .labels()
        .iter()
        .copied()
        .zip(values)
        .map(|(label, profit)| ProfitOverlayPoint { label, profit })
        .collect()
}

impl RevenueAnalysis {
    /// Flattens the page datasets into an exportable report body.
    pub fn report_body(&self, generated_on: chrono::NaiveDate) -> ReportBody {
        let mut body = ReportBody::new("Revenue Analysis Report", generated_on);
        body.metrics.push(ReportMetric::new(
            "Total Revenue",
            format!("{:.2}", self.summary.total_revenue),
        ));
        body.metrics.push(ReportMetric::new(
            "Transactions",
            self.summary.total_transactions.to_string(),
        ));
        body.metrics.push(ReportMetric::new(
            "Average Order Value",
            format!("{:.2}", self.summary.average_order_value),
        ));
        body.metrics.push(ReportMetric::new(
            "Growth Rate",
            format!("{}%", self.summary.revenue_growth),
        ));
        body.trend = self
            .trends
            .iter()
            .map(|p| ReportTrendRow {
                label: p.label.to_string(),
                value: p.revenue,
            })
            .collect();
        body.categories = self.revenue_by_category.iter().map(Into::into).collect();
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue_record(amount: f64) -> FinancialRecord {
        FinancialRecord {
            amount,
            record_type: RecordType::Revenue,
        }
    }

    fn sample_summary() -> AnalyticsSummary {
        AnalyticsSummary {
            total_revenue: 1_200_000.0,
            total_expenses: 480_000.0,
            net_profit: 720_000.0,
            total_records: 60,
            total_datasets: 1,
            status: Some("ok".to_string()),
        }
    }

    #[test]
    fn test_summary_kpis() {
        let records = vec![revenue_record(800_000.0), revenue_record(400_000.0)];
        let analysis = build(&sample_summary(), &records, AnalysisPeriod::Monthly);

        assert_eq!(analysis.summary.total_transactions, 2);
        assert_eq!(analysis.summary.average_order_value, 600_000.0);
        assert_eq!(analysis.summary.average_monthly_revenue, 100_000.0);
        assert_eq!(analysis.summary.top_category, "Sales");
        assert_eq!(analysis.summary.top_category_amount, 600_000.0);
    }

    #[test]
    fn test_trend_respects_period_selection() {
        let records = vec![revenue_record(1_200_000.0)];
        let quarterly = build(&sample_summary(), &records, AnalysisPeriod::Quarterly);
        assert_eq!(quarterly.trends.len(), 4);
        assert_eq!(quarterly.trends[0].label, "Q1");
        // average 300000 with sin(0) = 0
        assert_eq!(quarterly.trends[0].revenue, 300_000.0);

        let yearly = build(&sample_summary(), &records, AnalysisPeriod::Yearly);
        assert_eq!(yearly.trends.len(), 3);
        assert_eq!(yearly.trends[0].label, "2022");
    }

    #[test]
    fn test_no_revenue_records_zero_fills_trend_and_categories() {
        let analysis = build(&sample_summary(), &[], AnalysisPeriod::Monthly);
        assert!(analysis.trends.iter().all(|p| p.revenue == 0.0));
        assert!(analysis.revenue_by_category.iter().all(|e| e.amount == 0.0));
        assert_eq!(analysis.summary.average_order_value, 0.0);
        // The channel split keys off the summary total alone.
        assert_eq!(analysis.revenue_by_channel[0].amount, 720_000.0);
    }

    #[test]
    fn test_channel_split_percentages() {
        let records = vec![revenue_record(10.0)];
        let analysis = build(&sample_summary(), &records, AnalysisPeriod::Monthly);
        let channels: Vec<_> = analysis
            .revenue_by_channel
            .iter()
            .map(|e| (e.label, e.amount))
            .collect();
        assert_eq!(
            channels,
            vec![
                ("Online", 720_000.0),
                ("Retail", 300_000.0),
                ("Partner", 180_000.0)
            ]
        );
    }

    #[test]
    fn test_top_products_scale_off_record_pool() {
        let records = vec![revenue_record(600.0), revenue_record(-400.0)];
        let analysis = build(&sample_summary(), &records, AnalysisPeriod::Monthly);
        // pool = |600| + |-400| = 1000
        assert_eq!(analysis.top_products[0].revenue, 350.0);
        assert_eq!(analysis.top_products[1].revenue, 250.0);
        assert_eq!(analysis.top_products[2].revenue, 200.0);
        assert_eq!(analysis.top_products[0].units, 1.0);
    }

    #[test]
    fn test_profit_overlay_uses_cosine_phase() {
        let records = vec![revenue_record(1.0)];
        let analysis = build(&sample_summary(), &records, AnalysisPeriod::Monthly);
        // net = 720000, average = 120000, cos(0) = 1 -> 120000 * 1.3
        assert_eq!(analysis.profit_overlay[0].profit, 156_000.0);
    }

    #[test]
    fn test_profit_overlay_blank_when_either_total_missing() {
        let mut summary = sample_summary();
        summary.total_expenses = 0.0;
        let analysis = build(&summary, &[revenue_record(1.0)], AnalysisPeriod::Monthly);
        assert!(analysis.profit_overlay.iter().all(|p| p.profit == 0.0));
    }
}
