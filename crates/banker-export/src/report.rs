//! Paginated text report
//!
//! Word-wrapped at a fixed column width and page-broken at a fixed line
//! count, with pages separated by form feeds.

use crate::ExportRequest;

const WRAP_WIDTH: usize = 80;
const LINES_PER_PAGE: usize = 40;

/// Greedy word wrap; words longer than the width get their own line.
fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Render the answer as a word-wrapped, page-broken report.
pub fn to_report(request: &ExportRequest) -> String {
    let mut lines = vec![
        format!("AI Banker Report: {}", request.symbol),
        String::new(),
    ];
    for paragraph in request.answer.lines() {
        lines.extend(wrap_line(paragraph, WRAP_WIDTH));
    }

    lines
        .chunks(LINES_PER_PAGE)
        .map(|page| page.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\u{c}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(answer: &str) -> ExportRequest {
        ExportRequest {
            symbol: "AAPL".into(),
            question: "Q".into(),
            answer: answer.into(),
        }
    }

    #[test]
    fn test_report_starts_with_title() {
        let report = to_report(&request("Short answer."));
        assert!(report.starts_with("AI Banker Report: AAPL\n"));
        assert!(report.contains("Short answer."));
    }

    #[test]
    fn test_lines_wrap_at_width() {
        let long = "word ".repeat(60);
        let report = to_report(&request(&long));
        for line in report.lines() {
            assert!(line.chars().count() <= WRAP_WIDTH, "line too long: {line}");
        }
    }

    #[test]
    fn test_long_answers_break_into_pages() {
        let many_paragraphs = (0..100)
            .map(|i| format!("Paragraph {i}."))
            .collect::<Vec<_>>()
            .join("\n");
        let report = to_report(&request(&many_paragraphs));
        let pages: Vec<&str> = report.split('\u{c}').collect();
        assert!(pages.len() > 1);
        for page in pages {
            assert!(page.trim_matches('\n').lines().count() <= LINES_PER_PAGE);
        }
    }
}
