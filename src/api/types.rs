use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Trend,
    Health,
    Comparative,
    Risk,
    Forecast,
    Custom,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub dataset_id: u64,
    pub analysis_type: AnalysisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

/// Payload of the `result` field: free-text insights plus whatever optional
/// figures the chosen analysis produced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub insights: String,
    #[serde(default)]
    pub key_metrics: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis_type: String,
    #[serde(default)]
    pub created_at: String,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub dataset_name: String,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_omits_absent_prompt() {
        let request = AnalyzeRequest {
            dataset_id: 7,
            analysis_type: AnalysisType::Health,
            custom_prompt: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"analysis_type\":\"health\""));
        assert!(!json.contains("custom_prompt"));
    }

    #[test]
    fn test_analyze_response_with_partial_result() {
        let response: AnalyzeResponse = serde_json::from_str(
            r#"{
                "analysis_type": "financial_health",
                "created_at": "2024-03-15T10:30:00",
                "result": { "insights": "Margins are healthy.", "health_score": 8.5 }
            }"#,
        )
        .unwrap();
        assert_eq!(response.result.health_score, Some(8.5));
        assert!(response.result.key_metrics.is_none());
    }

    #[test]
    fn test_upload_response_defaults() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"dataset_name": "q1-ledger"}"#).unwrap();
        assert_eq!(response.dataset_name, "q1-ledger");
        assert_eq!(response.total_records, 0);
    }
}
