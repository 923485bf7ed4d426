//! Fetches the live summary and records from a local backend, then prints
//! the derived expense analysis.
//!
//! Run with: cargo run --example fetch_and_build --features client

use financial_insights_builder::api::ApiClient;
use financial_insights_builder::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url =
        std::env::var("INSIGHTS_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let client = ApiClient::new(base_url);

    let summary = client.analytics_summary().await?;
    let records = client.records().await?;

    let analysis = expense::build(&summary, &records, AnalysisPeriod::Quarterly);

    println!("Total expenses: {:.2}", analysis.summary.total_expenses);
    for point in &analysis.trends {
        println!(
            "  {}: spend {:>12.0}  budget {:>12.0}",
            point.label, point.expenses, point.budget
        );
    }
    for entry in &analysis.by_category {
        println!("  {:<12} {:>12.0} ({}%)", entry.label, entry.amount, entry.percentage);
    }

    Ok(())
}
