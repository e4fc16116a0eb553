//! Slide-deck chunking
//!
//! The answer is chunked at an 800-character boundary, splitting on the
//! nearest preceding space; a run with no space in the window gets a
//! hard cut so chunking always terminates. Each slide carries the
//! question (truncated) as its title.

use crate::ExportRequest;

const CHARS_PER_SLIDE: usize = 800;
const TITLE_CHARS: usize = 90;

/// One slide of the deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub title: String,
    pub body: String,
}

/// Byte index to cut `text` at, honoring a character limit and
/// preferring the last space at or before it.
fn split_point(text: &str, limit: usize) -> usize {
    let mut last_space = None;
    let mut hard_cut = text.len();
    for (count, (idx, ch)) in text.char_indices().enumerate() {
        if count >= limit {
            hard_cut = idx;
            break;
        }
        if ch == ' ' {
            last_space = Some(idx);
        }
    }
    if hard_cut == text.len() {
        // whole text fits
        return text.len();
    }
    last_space.unwrap_or(hard_cut)
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Chunk an answer into slides.
pub fn to_slides(request: &ExportRequest) -> Vec<Slide> {
    let title = format!("Q: {}", truncate_chars(&request.question, TITLE_CHARS));
    let mut slides = Vec::new();
    let mut remaining = request.answer.trim();

    while !remaining.is_empty() {
        let cut = split_point(remaining, CHARS_PER_SLIDE);
        let chunk = remaining[..cut].trim();
        if !chunk.is_empty() {
            slides.push(Slide {
                title: title.clone(),
                body: chunk.to_string(),
            });
        }
        remaining = remaining[cut..].trim_start();
    }

    slides
}

/// Render a deck as plain text, one slide per page.
pub fn render_deck(slides: &[Slide]) -> String {
    slides
        .iter()
        .enumerate()
        .map(|(i, slide)| format!("Slide {}\n{}\n\n{}", i + 1, slide.title, slide.body))
        .collect::<Vec<_>>()
        .join("\n\u{c}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(question: &str, answer: &str) -> ExportRequest {
        ExportRequest {
            symbol: "AAPL".into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    #[test]
    fn test_short_answer_is_one_slide() {
        let slides = to_slides(&request("Why?", "Because margins."));
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Q: Why?");
        assert_eq!(slides[0].body, "Because margins.");
    }

    #[test]
    fn test_spaceless_1600_chars_yields_two_exact_segments() {
        let answer = "x".repeat(1600);
        let slides = to_slides(&request("Q", &answer));
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].body.chars().count(), 800);
        assert_eq!(slides[1].body.chars().count(), 800);
        let rejoined: String = slides.iter().map(|s| s.body.as_str()).collect();
        assert_eq!(rejoined.trim(), answer);
    }

    #[test]
    fn test_chunks_split_on_preceding_space() {
        let answer = "word ".repeat(400); // 2000 chars of 5-char words
        let slides = to_slides(&request("Q", &answer));
        assert!(slides.len() > 1);
        for slide in &slides {
            assert!(slide.body.chars().count() <= CHARS_PER_SLIDE);
            assert!(!slide.body.starts_with(' '));
            assert!(!slide.body.ends_with(' '));
        }
        let rejoined = slides
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, answer.trim());
    }

    #[test]
    fn test_title_truncates_at_90_chars() {
        let question = "y".repeat(120);
        let slides = to_slides(&request(&question, "body"));
        assert_eq!(slides[0].title.chars().count(), "Q: ".chars().count() + 90);
    }

    #[test]
    fn test_deck_rendering_numbers_slides() {
        let deck = render_deck(&to_slides(&request("Q", &"x".repeat(1600))));
        assert!(deck.starts_with("Slide 1\n"));
        assert!(deck.contains("Slide 2\n"));
    }
}
