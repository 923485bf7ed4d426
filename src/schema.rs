use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Aggregate summary returned by `GET /api/v1/financial-data/analytics/summary`.
///
/// Every numeric field defaults to zero when the backend omits it, so the
/// defaulting rule lives here at the ingestion boundary rather than at each
/// call site. `net_profit` is computed by the backend and is not required to
/// equal `total_revenue - total_expenses`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyticsSummary {
    #[serde(default)]
    #[schemars(description = "Sum of all revenue record amounts in the selected datasets")]
    pub total_revenue: f64,

    #[serde(default)]
    #[schemars(description = "Sum of all expense record amounts in the selected datasets")]
    pub total_expenses: f64,

    #[serde(default)]
    #[schemars(description = "Backend-computed net profit; may diverge from revenue minus expenses")]
    pub net_profit: f64,

    #[serde(default)]
    #[schemars(description = "Number of financial records across all datasets")]
    pub total_records: u64,

    #[serde(default)]
    #[schemars(description = "Number of uploaded datasets")]
    pub total_datasets: u64,

    #[serde(default)]
    #[schemars(description = "Backend status string, e.g. 'ok' or 'no_data'")]
    pub status: Option<String>,
}

impl AnalyticsSummary {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalyticsSummary)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Classification of a single financial record. Unknown backend values fold
/// into `Other` instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Revenue,
    Expense,
    #[serde(other)]
    Other,
}

/// One row from `GET /api/v1/financial-data/records`.
///
/// Records are consumed only for counting and filtering; the derived charts
/// are synthesized from the aggregate summary, not from per-record sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialRecord {
    #[serde(default)]
    #[schemars(description = "Signed amount; sign convention follows record_type")]
    pub amount: f64,

    pub record_type: RecordType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<FinancialRecord>,
}

/// Filters records down to a single type, preserving order.
pub fn records_of_type(records: &[FinancialRecord], kind: RecordType) -> Vec<&FinancialRecord> {
    records.iter().filter(|r| r.record_type == kind).collect()
}

/// Sum of absolute amounts for one record type. Used by the top-item views,
/// which scale fixed ratios against the record pool rather than the summary.
pub fn absolute_total(records: &[FinancialRecord], kind: RecordType) -> f64 {
    records
        .iter()
        .filter(|r| r.record_type == kind)
        .map(|r| r.amount.abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_defaults_missing_fields_to_zero() {
        let summary: AnalyticsSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.net_profit, 0.0);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.total_datasets, 0);
        assert!(summary.status.is_none());
    }

    #[test]
    fn test_summary_net_profit_not_recomputed() {
        let summary: AnalyticsSummary = serde_json::from_str(
            r#"{"total_revenue": 100.0, "total_expenses": 40.0, "net_profit": 55.0}"#,
        )
        .unwrap();
        assert_eq!(summary.net_profit, 55.0);
    }

    #[test]
    fn test_unknown_record_type_folds_to_other() {
        let record: FinancialRecord =
            serde_json::from_str(r#"{"amount": -12.5, "record_type": "adjustment"}"#).unwrap();
        assert_eq!(record.record_type, RecordType::Other);
    }

    #[test]
    fn test_records_of_type_preserves_order() {
        let records = vec![
            FinancialRecord {
                amount: 10.0,
                record_type: RecordType::Revenue,
            },
            FinancialRecord {
                amount: -5.0,
                record_type: RecordType::Expense,
            },
            FinancialRecord {
                amount: 20.0,
                record_type: RecordType::Revenue,
            },
        ];

        let revenue = records_of_type(&records, RecordType::Revenue);
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].amount, 10.0);
        assert_eq!(revenue[1].amount, 20.0);
    }

    #[test]
    fn test_absolute_total_ignores_sign() {
        let records = vec![
            FinancialRecord {
                amount: -100.0,
                record_type: RecordType::Expense,
            },
            FinancialRecord {
                amount: 40.0,
                record_type: RecordType::Expense,
            },
        ];
        assert_eq!(absolute_total(&records, RecordType::Expense), 140.0);
    }

    #[test]
    fn test_schema_generation() {
        let schema_json = AnalyticsSummary::schema_as_json().unwrap();
        assert!(schema_json.contains("total_revenue"));
        assert!(schema_json.contains("total_records"));
    }
}
