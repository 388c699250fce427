//! Format dispatch and shared URL display helpers

use chrono::{DateTime, Utc};
use tabvault_tabs::GroupRecord;
use url::Url;

use crate::filename::export_filename;
use crate::format::ExportFormat;
use crate::Result;

/// A rendered export, ready to be downloaded or copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

pub fn convert(groups: &[GroupRecord], format: ExportFormat) -> Result<String> {
    convert_at(groups, format, Utc::now())
}

/// Convert with an explicit generation time (used in the text banner and
/// the bookmark timestamps)
pub fn convert_at(
    groups: &[GroupRecord],
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    let output = match format {
        ExportFormat::Json => serde_json::to_string_pretty(groups)?,
        ExportFormat::Markdown => crate::markdown::render(groups),
        ExportFormat::Csv => crate::csv::render(groups),
        ExportFormat::Text => crate::text::render(groups, generated_at),
        ExportFormat::Html => crate::html::render(groups, generated_at.timestamp()),
    };

    tracing::debug!(
        format = %format,
        groups = groups.len(),
        bytes = output.len(),
        "Converted export data"
    );

    Ok(output)
}

/// Convert and attach the download filename and content type
pub fn render(
    session_name: &str,
    groups: &[GroupRecord],
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> Result<ExportArtifact> {
    Ok(ExportArtifact {
        filename: export_filename(session_name, format),
        content_type: format.content_type(),
        body: convert_at(groups, format, generated_at)?,
    })
}

/// `host + path` of a URL, or the raw string when it does not parse.
/// URLs without a host (`about:blank`, `data:`) give just the path.
pub(crate) fn host_and_path(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => format!("{}{}", parsed.host_str().unwrap_or(""), parsed.path()),
        Err(_) => raw.to_string(),
    }
}

/// Host of a URL, empty when it has none, or the raw string when it does
/// not parse
pub(crate) fn host(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => parsed.host_str().unwrap_or("").to_string(),
        Err(_) => raw.to_string(),
    }
}
