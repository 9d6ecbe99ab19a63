use console::measure_text_width;

const ELLIPSIS: &str = "...";

/// Display width of a string, ignoring non-printing sequences.
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Pad string to exact display width (left-align)
pub fn pad_left(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Collapse whitespace runs to single spaces, then shorten the text on a
/// word boundary so the result never exceeds `max_length` display columns.
/// An ellipsis marks the cut when anything was dropped.
pub fn truncate(text: &str, max_length: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if display_width(&collapsed) <= max_length {
        return collapsed;
    }

    let budget = max_length.saturating_sub(display_width(ELLIPSIS));
    let mut kept = String::new();
    for word in &words {
        let needed = if kept.is_empty() {
            display_width(word)
        } else {
            display_width(&kept) + 1 + display_width(word)
        };
        if needed > budget {
            break;
        }
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(word);
    }
    kept.push_str(ELLIPSIS);
    kept
}

/// Word-wrap text to `width` display columns, preserving paragraph breaks
/// (blank-line separated). A single word wider than `width` is emitted whole
/// on its own line, never split.
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (i, paragraph) in text.split("\n\n").enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        wrap_paragraph(paragraph, width, &mut lines);
    }
    lines.join("\n")
}

fn wrap_paragraph(text: &str, width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);

        if current_width > 0 && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
}
