//! # Financial Insights Builder
//!
//! A library for deriving illustrative dashboard datasets (trend series,
//! proportional breakdowns, data-quality assessments) from aggregate
//! financial summaries.
//!
//! ## Core Concepts
//!
//! - **Aggregate Summary**: one backend object with total revenue, total
//!   expenses, net profit and record counts — the only real numbers
//! - **Derived Series**: multi-point chart datasets synthesized from the
//!   aggregate with fixed percentage splits and deterministic oscillation
//! - **Zero-Fill**: missing or zero totals never shrink a chart; every
//!   series keeps its full label set with zero values
//! - **Determinism**: equal inputs always produce bit-identical output,
//!   including the seeded data-quality scores
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_insights_builder::*;
//!
//! let summary = AnalyticsSummary {
//!     total_revenue: 2_450_000.0,
//!     total_expenses: 1_890_000.0,
//!     net_profit: 560_000.0,
//!     total_records: 1_240,
//!     total_datasets: 3,
//!     status: Some("ok".to_string()),
//! };
//!
//! let snapshot = build_snapshot(&summary, &[], AnalysisPeriod::Monthly);
//! let report = build_report(
//!     ReportFormat::Csv,
//!     ReportDomain::Revenue,
//!     &snapshot.revenue.report_body(chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
//! )?;
//! ```

pub mod breakdown;
pub mod dashboard;
pub mod error;
pub mod expense;
pub mod export;
pub mod profit;
pub mod quality;
pub mod revenue;
pub mod schema;
pub mod trend;

#[cfg(feature = "client")]
pub mod api;

pub use breakdown::{generate_breakdown, validate_schema, BreakdownEntry, CategoryWeight};
pub use error::{InsightsError, Result};
pub use export::{
    build_report, report_filename, write_report, ReportArtifact, ReportBody, ReportContent,
    ReportDomain, ReportFormat, ReportMetric,
};
pub use quality::{
    assess, generate_data_issues, generate_quality_score, generate_recommendations, DataIssues,
    QualityAssessment, QualityScore,
};
pub use schema::{AnalyticsSummary, FinancialRecord, RecordType, RecordsResponse};
pub use trend::{generate_trend, generate_trend_with, AnalysisPeriod, TrendPoint, Waveform};

use log::{debug, info};
use serde::Serialize;

/// Everything the analytics views render from one fetch cycle: the four
/// analysis domains plus the data-quality assessment. Recomputed in full on
/// every refresh; nothing here carries identity or caches between cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub dashboard: dashboard::DashboardData,
    pub revenue: revenue::RevenueAnalysis,
    pub expense: expense::ExpenseAnalysis,
    pub profit: profit::ProfitAnalysis,
    pub quality: QualityAssessment,
}

pub fn build_snapshot(
    summary: &AnalyticsSummary,
    records: &[FinancialRecord],
    period: AnalysisPeriod,
) -> AnalyticsSnapshot {
    info!(
        "Building analytics snapshot for {} records across {} datasets",
        summary.total_records, summary.total_datasets
    );
    debug!(
        "Summary totals: revenue {}, expenses {}, net profit {}",
        summary.total_revenue, summary.total_expenses, summary.net_profit
    );

    AnalyticsSnapshot {
        dashboard: dashboard::build(summary, records),
        revenue: revenue::build(summary, records, period),
        expense: expense::build(summary, records, period),
        profit: profit::build(summary, records, period),
        quality: assess(summary.total_records),
    }
}
