//! Greedy word wrap against the static font metrics.
//!
//! Both layout strategies wrap through here, so a string breaks at the same
//! words whichever engine places it.

use crate::layout::font_metrics::{get_metrics, FontMetricTable};
use crate::layout::style::FontSpec;

/// Wraps `text` into lines no wider than `max_width_pt`.
///
/// Explicit newlines start a new paragraph; blank paragraphs are dropped.
/// A single word wider than the line is broken by character.
/// Empty text returns no lines.
pub fn wrap_text(text: &str, font: &FontSpec, size_pt: f32, max_width_pt: f32) -> Vec<String> {
    let metrics = get_metrics(font);
    let max_em = if size_pt > 0.0 {
        max_width_pt / size_pt
    } else {
        f32::INFINITY
    };

    text.split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph, metrics, max_em))
        .collect()
}

fn wrap_paragraph(paragraph: &str, metrics: &FontMetricTable, max_em: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let word_w = metrics.measure_str(word);
        let space_w = if current.is_empty() {
            0.0
        } else {
            metrics.space_width
        };

        if current_width + space_w + word_w <= max_em {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_w + word_w;
            continue;
        }

        // Current line is full; push it and start a new one with this word.
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_w <= max_em {
            current.push_str(word);
            current_width = word_w;
        } else {
            let mut pieces = break_word(word, metrics, max_em);
            if let Some(last) = pieces.pop() {
                current_width = metrics.measure_str(&last);
                lines.extend(pieces);
                current = last;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Hard-breaks an over-long word. Every piece holds at least one character.
fn break_word(word: &str, metrics: &FontMetricTable, max_em: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c);
        if !piece.is_empty() && width + w > max_em {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::FontFamily;

    fn font() -> FontSpec {
        FontSpec::regular(FontFamily::Helvetica)
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("", &font(), 10.0, 200.0).is_empty());
        assert!(wrap_text("   \n  ", &font(), 10.0, 200.0).is_empty());
    }

    #[test]
    fn test_short_text_single_line() {
        let lines = wrap_text("Senior Engineer", &font(), 10.0, 400.0);
        assert_eq!(lines, vec!["Senior Engineer"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Architected a distributed caching layer using consistent hashing, \
                    reducing p99 latency by 40% under peak load across three regions";
        let lines = wrap_text(text, &font(), 10.0, 200.0);
        assert!(lines.len() >= 2, "expected a wrap, got {lines:?}");
        let metrics = get_metrics(&font());
        for line in &lines {
            assert!(metrics.text_width(line, 10.0) <= 200.0 + 1e-3, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_newlines_start_paragraphs() {
        let lines = wrap_text("First line\nSecond line", &font(), 10.0, 400.0);
        assert_eq!(lines, vec!["First line", "Second line"]);
    }

    #[test]
    fn test_overlong_word_is_broken() {
        let word = "x".repeat(80);
        let lines = wrap_text(&word, &font(), 10.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
