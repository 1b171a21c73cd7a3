//! Greedy word wrap over static font metrics.
//!
//! Explicit newlines start a new paragraph. Each paragraph is split on single
//! spaces, so a run of spaces keeps its width, and lines fill word by word. A
//! word wider than a whole line starts on the current line, filling what is
//! left of it, and its remainder is broken between characters. The result
//! depends only on (text, width, font size), so the same description always
//! produces the same line count.

use crate::layout::font_metrics::FontMetricTable;

/// Slack for accumulated f32 error when a line is filled exactly to the width.
const WIDTH_EPSILON: f32 = 1e-4;

/// Wraps `text` to `max_width` layout units at `font_size` points.
///
/// Always returns at least one line; an empty text or an empty paragraph
/// contributes a single empty line.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    max_width: f32,
    font_size: f32,
    points_per_unit: f32,
) -> Vec<String> {
    let max_em = max_width * points_per_unit / font_size;
    text.split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph.trim_end_matches('\r'), metrics, max_em))
        .collect()
}

fn overflows(width: f32, max_em: f32) -> bool {
    width > max_em + WIDTH_EPSILON
}

fn wrap_paragraph(paragraph: &str, metrics: &FontMetricTable, max_em: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut width = 0.0_f32;
    // Whether `line` holds at least one word, even an empty one.
    let mut started = false;

    for word in paragraph.split(' ') {
        let word_w = metrics.measure_str(word);
        let sep_w = if started { metrics.space_width } else { 0.0 };

        if !overflows(width + sep_w + word_w, max_em) {
            if started {
                line.push(' ');
            }
            line.push_str(word);
            width += sep_w + word_w;
            started = true;
            continue;
        }

        if !overflows(word_w, max_em) {
            lines.push(std::mem::replace(&mut line, word.to_string()));
            width = word_w;
            started = true;
            continue;
        }

        // Head of the long word goes on the current line.
        let mut chars = word.chars().peekable();
        let mut head = String::new();
        let mut head_w = width + sep_w;
        while let Some(&c) = chars.peek() {
            let char_w = metrics.char_width(c);
            if overflows(head_w + char_w, max_em) {
                break;
            }
            head.push(c);
            head_w += char_w;
            chars.next();
        }
        if !head.is_empty() {
            if started {
                line.push(' ');
            }
            line.push_str(&head);
            started = true;
        }
        if started {
            lines.push(std::mem::take(&mut line));
        }

        // Remainder, at least one character per line.
        width = 0.0;
        for c in chars {
            let char_w = metrics.char_width(c);
            if !line.is_empty() && overflows(width + char_w, max_em) {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
            }
            line.push(c);
            width += char_w;
        }
        started = true;
    }

    lines.push(line);
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
