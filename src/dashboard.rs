use crate::breakdown::{generate_breakdown, BreakdownEntry, CategoryWeight};
use crate::schema::{AnalyticsSummary, FinancialRecord};
use crate::trend::{variation_values, AnalysisPeriod, Waveform};
use serde::Serialize;

pub const REVENUE_BY_CATEGORY: [CategoryWeight; 3] = [
    CategoryWeight::with_color("Sales", 45.0, "#8884d8"),
    CategoryWeight::with_color("Services", 35.0, "#82ca9d"),
    CategoryWeight::with_color("Products", 20.0, "#ffc658"),
];

pub const EXPENSES_BY_TYPE: [CategoryWeight; 4] = [
    CategoryWeight::new("Marketing", 15.0),
    CategoryWeight::new("Operations", 25.0),
    CategoryWeight::new("Salaries", 45.0),
    CategoryWeight::new("Utilities", 15.0),
];

const REVENUE_AMPLITUDE: f64 = 0.3;
const EXPENSE_AMPLITUDE: f64 = 0.2;

/// KPI header values for the overview page, with ingestion defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub total_records: u64,
    pub total_datasets: u64,
    pub status: String,
}

/// One slot of the revenue-vs-expenses trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowTrendPoint {
    pub label: &'static str,
    pub revenue: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub monthly_trends: Vec<FlowTrendPoint>,
    pub revenue_by_category: Vec<BreakdownEntry>,
    pub expenses_by_type: Vec<BreakdownEntry>,
}

/// Assembles the overview datasets from one summary fetch.
///
/// With no records at all, every chart keeps its full shape with zero values;
/// the overview never collapses to an empty state.
pub fn build(summary: &AnalyticsSummary, records: &[FinancialRecord]) -> DashboardData {
    // An empty record list means "nothing uploaded yet" even if the backend
    // reports stale totals, so it gates every derived chart.
    let gate = |total: f64| if records.is_empty() { 0.0 } else { total };

    let revenue = variation_values(
        gate(summary.total_revenue),
        AnalysisPeriod::Monthly,
        Waveform::Sine,
        REVENUE_AMPLITUDE,
    );
    let expenses = variation_values(
        gate(summary.total_expenses),
        AnalysisPeriod::Monthly,
        Waveform::Cosine,
        EXPENSE_AMPLITUDE,
    );

    let monthly_trends = AnalysisPeriod::Monthly
        .labels()
        .iter()
        .copied()
        .zip(revenue.into_iter().zip(expenses))
        .map(|(label, (revenue, expenses))| FlowTrendPoint {
            label,
            revenue,
            expenses,
        })
        .collect();

    DashboardData {
        summary: DashboardSummary {
            total_revenue: summary.total_revenue,
            total_expenses: summary.total_expenses,
            net_profit: summary.net_profit,
            total_records: summary.total_records,
            total_datasets: summary.total_datasets,
            status: summary
                .status
                .clone()
                .unwrap_or_else(|| "no_data".to_string()),
        },
        monthly_trends,
        revenue_by_category: generate_breakdown(gate(summary.total_revenue), &REVENUE_BY_CATEGORY),
        expenses_by_type: generate_breakdown(gate(summary.total_expenses), &EXPENSES_BY_TYPE),
    }
}

impl DashboardData {
    pub fn report_body(&self, generated_on: chrono::NaiveDate) -> crate::export::ReportBody {
        use crate::export::{ReportBody, ReportMetric, ReportTrendRow};

        let mut body = ReportBody::new("Financial Dashboard Report", generated_on);
        body.metrics.push(ReportMetric::new(
            "Total Revenue",
            format!("{:.2}", self.summary.total_revenue),
        ));
        body.metrics.push(ReportMetric::new(
            "Total Expenses",
            format!("{:.2}", self.summary.total_expenses),
        ));
        body.metrics.push(ReportMetric::new(
            "Net Profit",
            format!("{:.2}", self.summary.net_profit),
        ));
        body.metrics.push(ReportMetric::new(
            "Records",
            self.summary.total_records.to_string(),
        ));
        body.trend = self
            .monthly_trends
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
