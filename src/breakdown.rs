use crate::error::{InsightsError, Result};
use serde::Serialize;

/// One row of a fixed-percentage schema table. The optional color tag rides
/// along for legend mapping in the presentation layer; it never affects the
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeight {
    pub label: &'static str,
    pub percentage: f64,
    pub color_tag: Option<&'static str>,
}

impl CategoryWeight {
    pub const fn new(label: &'static str, percentage: f64) -> Self {
        Self {
            label,
            percentage,
            color_tag: None,
        }
    }

    pub const fn with_color(label: &'static str, percentage: f64, color: &'static str) -> Self {
        Self {
            label,
            percentage,
            color_tag: Some(color),
        }
    }
}

/// One emitted breakdown row: `amount = round(total * percentage / 100)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub label: &'static str,
    pub amount: f64,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_tag: Option<&'static str>,
}

/// Applies a fixed-percentage schema to a total. A zero or non-finite total
/// still emits the full label set with zero amounts; output order always
/// matches schema order (legend/color mapping relies on it — no sorting).
pub fn generate_breakdown(total: f64, schema: &[CategoryWeight]) -> Vec<BreakdownEntry> {
    let blank = !total.is_finite() || total == 0.0;
    schema
        .iter()
        .map(|weight| BreakdownEntry {
            label: weight.label,
            amount: if blank {
                0.0
            } else {
                (total * weight.percentage / 100.0).round()
            },
            percentage: weight.percentage,
            color_tag: weight.color_tag,
        })
        .collect()
}

/// Checks that a category schema covers the whole: non-negative weights
/// summing to 100. The builtin tables hold this by construction; the check
/// exists for caller-supplied schemas.
pub fn validate_schema(schema: &[CategoryWeight]) -> Result<()> {
    if schema.is_empty() {
        return Err(InsightsError::InvalidBreakdownSchema(
            "schema has no categories".to_string(),
        ));
    }

    if let Some(weight) = schema.iter().find(|w| w.percentage < 0.0) {
        return Err(InsightsError::InvalidBreakdownSchema(format!(
            "category '{}' has negative percentage {}",
            weight.label, weight.percentage
        )));
    }

    let sum: f64 = schema.iter().map(|w| w.percentage).sum();
    if (sum - 100.0).abs() > 0.01 {
        return Err(InsightsError::InvalidBreakdownSchema(format!(
            "percentages must sum to 100 (got {})",
            sum
        )));
    }

    Ok(())
}
