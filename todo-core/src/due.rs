use chrono::NaiveDate;

use crate::error::{Error, Result};

const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parses due-date input. Empty input means no due date.
pub fn parse_due(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(Some)
        .ok_or_else(|| Error::invalid("due date", input))
}
