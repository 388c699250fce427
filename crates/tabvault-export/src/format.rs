//! Export formats

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON, the only format that can be imported again
    #[default]
    Json,
    Markdown,
    Csv,
    Text,
    /// Netscape bookmark file
    Html,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Json,
        ExportFormat::Markdown,
        ExportFormat::Csv,
        ExportFormat::Text,
        ExportFormat::Html,
    ];

    /// Parse a format name; anything unrecognised means JSON
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" | "structured" => ExportFormat::Json,
            "markdown" | "md" => ExportFormat::Markdown,
            "csv" => ExportFormat::Csv,
            "text" | "txt" | "plain" => ExportFormat::Text,
            "html" | "bookmarks" => ExportFormat::Html,
            other => {
                tracing::debug!(format = %other, "Unknown export format, using json");
                ExportFormat::Json
            }
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
            ExportFormat::Html => "html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Text => "text/plain",
            ExportFormat::Html => "text/html",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
