use crate::api::types::{AnalyzeRequest, AnalyzeResponse, UploadResponse};
use crate::error::{InsightsError, Result};
use crate::schema::{AnalyticsSummary, FinancialRecord, RecordsResponse};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::path::Path;

const SUMMARY_PATH: &str = "/api/v1/financial-data/analytics/summary";
const RECORDS_PATH: &str = "/api/v1/financial-data/records";
const UPLOAD_PATH: &str = "/api/v1/data-upload/upload";
const ANALYZE_PATH: &str = "/api/v1/ai/analyze";

/// Thin client over the financial-data backend. All methods return typed
/// payloads with ingestion defaults already applied by the schema layer.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn checked(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(InsightsError::ApiError {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary> {
        let response = self.client.get(self.url(SUMMARY_PATH)).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub async fn records(&self) -> Result<Vec<FinancialRecord>> {
        let response = self.client.get(self.url(RECORDS_PATH)).send().await?;
        let body: RecordsResponse = Self::checked(response).await?.json().await?;
        Ok(body.records)
    }

    /// Uploads a dataset file as multipart form data. The content type is
    /// guessed from the file extension.
    pub async fn upload_dataset(
        &self,
        path: &Path,
        dataset_name: &str,
        description: &str,
    ) -> Result<UploadResponse> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.csv")
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        let file_part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime_type)?;
        let form = Form::new()
            .part("file", file_part)
            .text("dataset_name", dataset_name.to_string())
            .text("description", description.to_string());

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        let response = self
            .client
            .post(self.url(ANALYZE_PATH))
            .json(request)
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }
}
