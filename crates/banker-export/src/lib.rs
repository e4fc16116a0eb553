//! Export formats for answered banker questions
//!
//! Pure formatting functions over already-resolved text: a quoted CSV
//! pair, a minimal-markup HTML document for word-processor import, a
//! word-wrapped paginated text report, and an 800-character slide-deck
//! chunking. Nothing here re-enters the AI gateway.

pub mod report;
pub mod slides;

use chrono::{NaiveDate, Utc};

pub use report::to_report;
pub use slides::{to_slides, Slide};

/// The already-resolved exchange to export
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Subject ticker symbol (or a comparison label)
    pub symbol: String,
    pub question: String,
    pub answer: String,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Doc,
    Report,
    Slides,
}

impl ExportFormat {
    /// File extension for the format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Doc => "doc",
            Self::Report => "txt",
            Self::Slides => "slides.txt",
        }
    }

    /// Parse a user-supplied format name
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "doc" => Some(Self::Doc),
            "report" | "pdf" | "txt" => Some(Self::Report),
            "slides" | "pptx" => Some(Self::Slides),
            _ => None,
        }
    }
}

/// A rendered export
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub content: String,
}

fn escape_csv(text: &str) -> String {
    text.replace('"', "\"\"")
}

/// Delimited-text export: header row plus one quoted question/answer pair.
pub fn to_csv(request: &ExportRequest) -> String {
    format!(
        "\"Question\",\"Answer\"\n\"{}\",\"{}\"",
        escape_csv(&request.question),
        escape_csv(&request.answer)
    )
}

/// Minimal-markup document: HTML wrapped for word-processor import.
pub fn to_doc(request: &ExportRequest) -> String {
    format!(
        "<html><body><h1>AI Analysis: {}</h1><div style=\"white-space: pre-wrap;\">{}</div></body></html>",
        request.symbol, request.answer
    )
}

/// Render a full export with a date-stamped file name.
pub fn export(format: ExportFormat, request: &ExportRequest) -> Document {
    export_on(format, request, Utc::now().date_naive())
}

/// Deterministic variant: the caller supplies the date stamp.
pub fn export_on(format: ExportFormat, request: &ExportRequest, date: NaiveDate) -> Document {
    let content = match format {
        ExportFormat::Csv => to_csv(request),
        ExportFormat::Doc => to_doc(request),
        ExportFormat::Report => to_report(request),
        ExportFormat::Slides => slides::render_deck(&to_slides(request)),
    };
    Document {
        file_name: format!(
            "{}_{}.{}",
            request.symbol,
            date.format("%Y-%m-%d"),
            format.extension()
        ),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ExportRequest {
        ExportRequest {
            symbol: "AAPL".to_string(),
            question: "Is AAPL undervalued?".to_string(),
            answer: "Yes, based on a P/E multiple approach.".to_string(),
        }
    }

    #[test]
    fn test_csv_is_a_two_column_quoted_row() {
        let csv = to_csv(&request());
        assert_eq!(
            csv,
            "\"Question\",\"Answer\"\n\"Is AAPL undervalued?\",\"Yes, based on a P/E multiple approach.\""
        );
    }

    #[test]
    fn test_csv_doubles_embedded_quotes() {
        let req = ExportRequest {
            symbol: "AAPL".into(),
            question: "What about \"moats\"?".into(),
            answer: "Strong \"brand\" moat.".into(),
        };
        let csv = to_csv(&req);
        assert!(csv.contains("\"What about \"\"moats\"\"?\""));
        assert!(csv.contains("\"Strong \"\"brand\"\" moat.\""));
    }

    #[test]
    fn test_doc_wraps_answer_in_html() {
        let doc = to_doc(&request());
        assert!(doc.starts_with("<html><body><h1>AI Analysis: AAPL</h1>"));
        assert!(doc.contains("white-space: pre-wrap"));
        assert!(doc.ends_with("</div></body></html>"));
    }

    #[test]
    fn test_export_stamps_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).expect("valid date");
        let doc = export_on(ExportFormat::Csv, &request(), date);
        assert_eq!(doc.file_name, "AAPL_2026-08-29.csv");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::parse("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("pptx"), Some(ExportFormat::Slides));
        assert_eq!(ExportFormat::parse("pdf"), Some(ExportFormat::Report));
        assert_eq!(ExportFormat::parse("xlsx"), None);
    }
}
