//! Text-shaping helpers for the framework-free renderer.

#![allow(missing_docs)]

/// Truncate to a display width, appending `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= width {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Center a string within a width by left-padding.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return truncate(text, width);
    }
    let pad = (width - len) / 2;
    format!("{:pad$}{text}", "", pad = pad)
}

/// Greedy word wrap into at most `max_lines` lines of `width` chars.
/// The final line is truncated with `…` if text remains.
#[must_use]
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let extra = usize::from(!current.is_empty());
        if current.chars().count() + extra + word.chars().count() <= width {
            if extra == 1 {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = truncate(word, width);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut marked: String = last.chars().take(width.saturating_sub(1)).collect();
            marked.push('…');
            *last = marked;
        }
    }
    lines
}

/// One-line dot indicator row, e.g. `● ○ ○`.
#[must_use]
pub fn dot_row(count: usize, active: usize) -> String {
    (0..count)
        .map(|i| if i == active { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Leader line between a label and a right-aligned value, e.g.
/// `Nasi Goreng ·········· 25K`.
#[must_use]
pub fn leader_line(label: &str, value: &str, width: usize) -> String {
    let label_len = label.chars().count();
    let value_len = value.chars().count();
    if label_len + value_len + 2 >= width {
        return truncate(label, width);
    }
    let dots = width - label_len - value_len - 2;
    format!("{label} {} {value}", "·".repeat(dots))
}
