use crate::breakdown::{generate_breakdown, BreakdownEntry, CategoryWeight};
use crate::export::{ReportBody, ReportMetric, ReportTrendRow};
use crate::schema::{records_of_type, AnalyticsSummary, FinancialRecord, RecordType};
use crate::trend::{budget_line, variation_values, AnalysisPeriod, Waveform};
use serde::Serialize;

pub const EXPENSE_BY_CATEGORY: [CategoryWeight; 6] = [
    CategoryWeight::new("Salaries", 45.0),
    CategoryWeight::new("Operations", 25.0),
    CategoryWeight::new("Marketing", 15.0),
    CategoryWeight::new("Technology", 8.0),
    CategoryWeight::new("Utilities", 5.0),
    CategoryWeight::new("Other", 2.0),
];

pub const EXPENSE_BY_DEPARTMENT: [CategoryWeight; 5] = [
    CategoryWeight::new("Engineering", 35.0),
    CategoryWeight::new("Sales", 25.0),
    CategoryWeight::new("Marketing", 15.0),
    CategoryWeight::new("Administration", 15.0),
    CategoryWeight::new("Support", 10.0),
];

/// Leader rows, not a partition of the total.
pub const TOP_EXPENSE_ITEMS: [CategoryWeight; 4] = [
    CategoryWeight::new("Office lease", 18.0),
    CategoryWeight::new("Payroll processing", 14.0),
    CategoryWeight::new("Cloud infrastructure", 11.0),
    CategoryWeight::new("Contractor fees", 9.0),
];

/// Estimated savings potential per initiative, as a share of total spend.
pub const COST_OPTIMIZATION: [CategoryWeight; 3] = [
    CategoryWeight::new("Consolidate software subscriptions", 8.0),
    CategoryWeight::new("Renegotiate vendor contracts", 6.0),
    CategoryWeight::new("Automate manual reporting", 4.0),
];

const TREND_AMPLITUDE: f64 = 0.2;
const EXPENSE_GROWTH_PLACEHOLDER: f64 = 8.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total_expenses: f64,
    pub total_transactions: usize,
    pub average_monthly_expenses: f64,
    pub expense_growth: f64,
    pub largest_category: &'static str,
    pub largest_category_amount: f64,
}

/// One slot of the spend-vs-budget trend. The budget line is flat: 110% of
/// the period average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseTrendPoint {
    pub label: &'static str,
    pub expenses: f64,
    pub budget: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseAnalysis {
    pub summary: ExpenseSummary,
    pub trends: Vec<ExpenseTrendPoint>,
    pub by_category: Vec<BreakdownEntry>,
    pub by_department: Vec<BreakdownEntry>,
    pub top_items: Vec<BreakdownEntry>,
    pub optimization_opportunities: Vec<BreakdownEntry>,
}

pub fn build(
    summary: &AnalyticsSummary,
    records: &[FinancialRecord],
    period: AnalysisPeriod,
) -> ExpenseAnalysis {
    let expense_records = records_of_type(records, RecordType::Expense);
    let total_expenses = summary.total_expenses;

    let values = variation_values(total_expenses, period, Waveform::Sine, TREND_AMPLITUDE);
    let budget = budget_line(total_expenses, period);

    let trends = period
        .labels()
        .iter()
        .copied()
        .zip(values)
        .map(|(label, expenses)| ExpenseTrendPoint {
            label,
            expenses,
            budget,
        })
        .collect();

    ExpenseAnalysis {
        summary: ExpenseSummary {
            total_expenses,
            total_transactions: expense_records.len(),
            average_monthly_expenses: (total_expenses / 12.0).round(),
            expense_growth: EXPENSE_GROWTH_PLACEHOLDER,
            largest_category: EXPENSE_BY_CATEGORY[0].label,
            largest_category_amount: (total_expenses * EXPENSE_BY_CATEGORY[0].percentage / 100.0)
                .round(),
        },
        trends,
        by_category: generate_breakdown(total_expenses, &EXPENSE_BY_CATEGORY),
        by_department: generate_breakdown(total_expenses, &EXPENSE_BY_DEPARTMENT),
        top_items: generate_breakdown(total_expenses, &TOP_EXPENSE_ITEMS),
        optimization_opportunities: generate_breakdown(total_expenses, &COST_OPTIMIZATION),
    }
}

impl ExpenseAnalysis {
    pub fn report_body(&self, generated_on: chrono::NaiveDate) -> ReportBody {
        let mut body = ReportBody::new("Expense Analysis Report", generated_on);
        body.metrics.push(ReportMetric::new(
            "Total Expenses",
            format!("{:.2}", self.summary.total_expenses),
        ));
        body.metrics.push(ReportMetric::new(
            "Average Monthly Expenses",
            format!("{:.2}", self.summary.average_monthly_expenses),
        ));
        body.metrics.push(ReportMetric::new(
            "Largest Category",
            self.summary.largest_category.to_string(),
        ));
        body.trend = self
            .trends
            .iter()
            .map(|p| ReportTrendRow {
                label: p.label.to_string(),
                value: p.expenses,
            })
            .collect();
        body.categories = self.by_category.iter().map(Into::into).collect();
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense_record(amount: f64) -> FinancialRecord {
        FinancialRecord {
            amount,
            record_type: RecordType::Expense,
        }
    }

    fn sample_summary() -> AnalyticsSummary {
        AnalyticsSummary {
            total_expenses: 1_000_000.0,
            total_revenue: 2_400_000.0,
            net_profit: 1_400_000.0,
            total_records: 300,
            total_datasets: 3,
            status: Some("ok".to_string()),
        }
    }

    #[test]
    fn test_category_breakdown_exact_values() {
        let analysis = build(&sample_summary(), &[], AnalysisPeriod::Monthly);
        let rows: Vec<_> = analysis
            .by_category
            .iter()
            .map(|e| (e.label, e.amount, e.percentage))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Salaries", 450_000.0, 45.0),
                ("Operations", 250_000.0, 25.0),
                ("Marketing", 150_000.0, 15.0),
                ("Technology", 80_000.0, 8.0),
                ("Utilities", 50_000.0, 5.0),
                ("Other", 20_000.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_budget_line_is_flat_at_110_percent() {
        let analysis = build(&sample_summary(), &[], AnalysisPeriod::Quarterly);
        // 1_000_000 / 4 * 1.1
        assert!(analysis.trends.iter().all(|p| p.budget == 275_000.0));
        assert_eq!(analysis.trends.len(), 4);
    }

    #[test]
    fn test_trend_amplitude() {
        let analysis = build(&sample_summary(), &[], AnalysisPeriod::Monthly);
        let average = 1_000_000.0 / 6.0;
        for (i, point) in analysis.trends.iter().enumerate() {
            let expected = (average * (1.0 + (i as f64).sin() * 0.2)).round();
            assert_eq!(point.expenses, expected);
        }
    }

    #[test]
    fn test_largest_category_matches_breakdown_head() {
        let analysis = build(&sample_summary(), &[], AnalysisPeriod::Monthly);
        assert_eq!(analysis.summary.largest_category, "Salaries");
        assert_eq!(
            analysis.summary.largest_category_amount,
            analysis.by_category[0].amount
        );
    }

    #[test]
    fn test_transaction_count_only_counts_expenses() {
        let records = vec![
            expense_record(-100.0),
            FinancialRecord {
                amount: 50.0,
                record_type: RecordType::Revenue,
            },
            expense_record(-20.0),
        ];
        let analysis = build(&sample_summary(), &records, AnalysisPeriod::Monthly);
        assert_eq!(analysis.summary.total_transactions, 2);
    }

    #[test]
    fn test_zero_total_keeps_all_tables() {
        let mut summary = sample_summary();
        summary.total_expenses = 0.0;
        let analysis = build(&summary, &[], AnalysisPeriod::Monthly);
        assert_eq!(analysis.by_category.len(), 6);
        assert_eq!(analysis.by_department.len(), 5);
        assert_eq!(analysis.top_items.len(), 4);
        assert_eq!(analysis.optimization_opportunities.len(), 3);
        assert!(analysis.by_department.iter().all(|e| e.amount == 0.0));
        assert!(analysis.trends.iter().all(|p| p.expenses == 0.0 && p.budget == 0.0));
    }
}
