//! Builds a full analytics snapshot from a canned summary and writes the
//! revenue report as CSV next to the binary.
//!
//! Run with: cargo run --example snapshot_report

use chrono::Local;
use financial_insights_builder::*;

fn main() -> anyhow::Result<()> {
    let summary = AnalyticsSummary {
        total_revenue: 2_450_000.0,
        total_expenses: 1_890_000.0,
        net_profit: 560_000.0,
        total_records: 1_240,
        total_datasets: 3,
        status: Some("ok".to_string()),
    };

    let records = vec![
        FinancialRecord {
            amount: 125_000.0,
            record_type: RecordType::Revenue,
        },
        FinancialRecord {
            amount: -48_000.0,
            record_type: RecordType::Expense,
        },
    ];

    let snapshot = build_snapshot(&summary, &records, AnalysisPeriod::Monthly);

    println!("Dashboard trend:");
    for point in &snapshot.dashboard.monthly_trends {
        println!(
            "  {}: revenue {:>12.0}  expenses {:>12.0}",
            point.label, point.revenue, point.expenses
        );
    }

    println!("\nQuality: overall {}", snapshot.quality.score.overall);
    for recommendation in &snapshot.quality.recommendations {
        println!("  - {}", recommendation);
    }

    let today = Local::now().date_naive();
    let artifact = build_report(
        ReportFormat::Csv,
        ReportDomain::Revenue,
        &snapshot.revenue.report_body(today),
    )?;
    let path = write_report(std::path::Path::new("."), &artifact)?;
    println!("\nWrote {}", path.display());

    Ok(())
}
