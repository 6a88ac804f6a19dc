//! Markdown rendering and derived text metrics for blog posts.

use pulldown_cmark::{html, Event, Parser, Tag};

/// Maximum excerpt length in characters.
pub const EXCERPT_LENGTH: usize = 160;
/// Reading speed used for `reading_time_minutes`.
pub const WORDS_PER_MINUTE: usize = 200;

/// Renders markdown to HTML.
pub fn render_html(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new(markdown));
    out
}

/// Extracts the visible text of a markdown document with whitespace collapsed.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::Rule => text.push(' '),
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_))
            | Event::End(Tag::BlockQuote)
            | Event::End(Tag::TableCell) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds an excerpt of at most [`EXCERPT_LENGTH`] characters from markdown.
///
/// Longer texts are cut at the last word boundary that fits and end with `...`.
pub fn excerpt(markdown: &str) -> String {
    let text = plain_text(markdown);
    if text.chars().count() <= EXCERPT_LENGTH {
        return text;
    }

    let cut: String = text.chars().take(EXCERPT_LENGTH - 3).collect();
    let trimmed = match cut.rfind(' ') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };

    format!("{}...", trimmed.trim_end())
}

/// Estimated reading time in whole minutes, never below one.
pub fn reading_time_minutes(markdown: &str) -> u32 {
    let words = plain_text(markdown).split_whitespace().count();
    (words / WORDS_PER_MINUTE).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render_html("# Title\n\nSome *emphasis*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn plain_text_drops_markup_and_keeps_words_apart() {
        let text = plain_text("# Heading\nFirst **bold** line\n\n- one\n- two");
        assert_eq!(text, "Heading First bold line one two");
    }

    #[test]
    fn short_text_is_its_own_excerpt() {
        assert_eq!(excerpt("Just a *short* post."), "Just a short post.");
    }

    #[test]
    fn long_text_is_cut_on_a_word_boundary() {
        let body = "word ".repeat(100);
        let result = excerpt(&body);

        assert!(result.chars().count() <= EXCERPT_LENGTH);
        assert!(result.ends_with("word..."));
    }

    #[test]
    fn reading_time_is_at_least_one_minute() {
        assert_eq!(reading_time_minutes(""), 1);
        assert_eq!(reading_time_minutes("a few words"), 1);
    }

    #[test]
    fn reading_time_scales_with_word_count() {
        let body = "lorem ".repeat(450);
        assert_eq!(reading_time_minutes(&body), 2);
    }
}
