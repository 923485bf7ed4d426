use crate::error::{InsightsError, Result};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Vertical layout constants for the PDF line layout, in points. The cursor
/// walks down from the top margin and breaks to a fresh page past the
/// threshold.
const PDF_TOP_MARGIN: f32 = 30.0;
const PDF_PAGE_BREAK: f32 = 250.0;
const PDF_LINE_HEIGHT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    /// CSV content under an .xlsx extension. Spreadsheet apps open it fine;
    /// producing a genuine workbook binary is a non-goal.
    Excel,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Excel => "xlsx",
            ReportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDomain {
    Dashboard,
    Revenue,
    Expense,
    Profit,
    DataQuality,
}

impl ReportDomain {
    fn file_stem(&self) -> &'static str {
        match self {
            ReportDomain::Dashboard => "dashboard-analysis",
            ReportDomain::Revenue => "revenue-analysis",
            ReportDomain::Expense => "expense-analysis",
            ReportDomain::Profit => "profit-analysis",
            ReportDomain::DataQuality => "data-quality-report",
        }
    }
}

/// `<domain>-analysis-<YYYY-MM-DD>.<ext>` (the quality domain uses its
/// `data-quality-report` stem).
pub fn report_filename(domain: ReportDomain, date: NaiveDate, format: ReportFormat) -> String {
    format!(
        "{}-{}.{}",
        domain.file_stem(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetric {
    pub label: String,
    pub value: String,
}

impl ReportMetric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTrendRow {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCategoryRow {
    pub label: String,
    pub amount: f64,
    pub percentage: f64,
}

impl From<&crate::breakdown::BreakdownEntry> for ReportCategoryRow {
    fn from(entry: &crate::breakdown::BreakdownEntry) -> Self {
        Self {
            label: entry.label.to_string(),
            amount: entry.amount,
            percentage: entry.percentage,
        }
    }
}

/// Format-independent report content: a title, headline metrics, then the
/// trend and category series behind the page's charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBody {
    pub title: String,
    pub generated_on: NaiveDate,
    pub metrics: Vec<ReportMetric>,
    pub trend: Vec<ReportTrendRow>,
    pub categories: Vec<ReportCategoryRow>,
}

impl ReportBody {
    pub fn new(title: impl Into<String>, generated_on: NaiveDate) -> Self {
        Self {
            title: title.into(),
            generated_on,
            metrics: Vec::new(),
            trend: Vec::new(),
            categories: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.trend.is_empty() && self.categories.is_empty()
    }
}

/// One positioned text line of the PDF layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportPage {
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportContent {
    /// Serialized table text (CSV and Excel).
    Text(String),
    /// Positioned lines for a PDF renderer; binary encoding happens there.
    Pages(Vec<ReportPage>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    pub filename: String,
    pub content: ReportContent,
}

impl ReportArtifact {
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ReportContent::Text(text) => Some(text),
            ReportContent::Pages(_) => None,
        }
    }
}

/// Builds an export artifact for one analysis domain.
pub fn build_report(
    format: ReportFormat,
    domain: ReportDomain,
    body: &ReportBody,
) -> Result<ReportArtifact> {
    if body.is_empty() {
        return Err(InsightsError::EmptyReport(body.title.clone()));
    }

    info!(
        "Building {} report '{}' ({} metrics, {} trend rows, {} categories)",
        format.extension(),
        body.title,
        body.metrics.len(),
        body.trend.len(),
        body.categories.len()
    );

    let content = match format {
        ReportFormat::Csv | ReportFormat::Excel => ReportContent::Text(to_csv_text(body)?),
        ReportFormat::Pdf => ReportContent::Pages(layout_pdf_pages(body)),
    };

    Ok(ReportArtifact {
        filename: report_filename(domain, body.generated_on, format),
        content,
    })
}

/// Row-oriented table: title and metadata, then one titled section per
/// non-empty series, separated by blank rows.
fn table_rows(body: &ReportBody) -> Vec<Vec<String>> {
    let mut rows = vec![
        vec![body.title.clone()],
        vec![
            "Generated".to_string(),
            body.generated_on.format("%Y-%m-%d").to_string(),
        ],
    ];

    if !body.metrics.is_empty() {
        rows.push(vec![String::new()]);
        rows.push(vec!["Key Metrics".to_string()]);
        rows.push(vec!["Metric".to_string(), "Value".to_string()]);
        for metric in &body.metrics {
            rows.push(vec![metric.label.clone(), metric.value.clone()]);
        }
    }

    if !body.trend.is_empty() {
        rows.push(vec![String::new()]);
        rows.push(vec!["Trend".to_string()]);
        rows.push(vec!["Period".to_string(), "Value".to_string()]);
        for row in &body.trend {
            rows.push(vec![row.label.clone(), format!("{:.2}", row.value)]);
        }
    }

    if !body.categories.is_empty() {
        rows.push(vec![String::new()]);
        rows.push(vec!["Categories".to_string()]);
        rows.push(vec![
            "Category".to_string(),
            "Amount".to_string(),
            "Percentage".to_string(),
        ]);
        for row in &body.categories {
            rows.push(vec![
                row.label.clone(),
                format!("{:.2}", row.amount),
                format!("{:.1}", row.percentage),
            ]);
        }
    }

    rows
}

fn to_csv_text(body: &ReportBody) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in table_rows(body) {
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

struct PdfCursor {
    pages: Vec<ReportPage>,
    y: f32,
}

impl PdfCursor {
    fn new() -> Self {
        Self {
            pages: vec![ReportPage::default()],
            y: PDF_TOP_MARGIN,
        }
    }

    fn push_line(&mut self, text: String) {
        if self.y > PDF_PAGE_BREAK {
            self.pages.push(ReportPage::default());
            self.y = PDF_TOP_MARGIN;
        }
        // The vector always holds at least one page.
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(ReportLine { y: self.y, text });
        }
        self.y += PDF_LINE_HEIGHT;
    }
}

fn layout_pdf_pages(body: &ReportBody) -> Vec<ReportPage> {
    let mut cursor = PdfCursor::new();

    cursor.push_line(body.title.clone());
    cursor.push_line(format!(
        "Generated: {}",
        body.generated_on.format("%Y-%m-%d")
    ));

    if !body.metrics.is_empty() {
        cursor.push_line("Key Metrics".to_string());
        for metric in &body.metrics {
            cursor.push_line(format!("• {}: {}", metric.label, metric.value));
        }
    }

    if !body.trend.is_empty() {
        cursor.push_line("Trend".to_string());
        for row in &body.trend {
            cursor.push_line(format!("• {}: {:.2}", row.label, row.value));
        }
    }

    if !body.categories.is_empty() {
        cursor.push_line("Categories".to_string());
        for row in &body.categories {
            cursor.push_line(format!(
                "• {}: {:.2} ({:.1}%)",
                row.label, row.amount, row.percentage
            ));
        }
    }

    cursor.pages
}

/// Persists an artifact under `dir` and returns the written path. PDF
/// artifacts are written as their plain-text line layout; binary encoding
/// belongs to the rendering layer.
pub fn write_report(dir: &Path, artifact: &ReportArtifact) -> Result<PathBuf> {
    let path = dir.join(&artifact.filename);

    let text = match &artifact.content {
        ReportContent::Text(text) => text.clone(),
        ReportContent::Pages(pages) => pages
            .iter()
            .map(|page| {
                page.lines
                    .iter()
                    .map(|line| line.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\u{c}"),
    };

    std::fs::write(&path, text)?;
    info!("Generated: {}", path.display());

    Ok(path)
}
