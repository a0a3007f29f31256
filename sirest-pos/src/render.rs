//! Fixed-width plain-text layout
//!
//! Widths are counted in `char`s. Everything the console prints (role views,
//! invoices, cash closings) goes through [`TextBuilder`].

/// Pad `s` with trailing spaces up to `width` chars, cutting it if longer
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

/// Right-align `s` inside `width` chars, cutting it if longer
pub fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.chars().take(width).collect();
    }
    let mut out = " ".repeat(width - len);
    out.push_str(s);
    out
}

/// Cut `s` to `width` chars, marking the cut with `~`
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('~');
    out
}

/// Line-oriented text document
#[derive(Debug, Clone)]
pub struct TextBuilder {
    buf: String,
    width: usize,
}

impl TextBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::with_capacity(1024),
            width: width.max(8),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn line(&mut self, s: &str) {
        self.buf.push_str(&truncate(s, self.width));
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// `====` across the full width
    pub fn eq_sep(&mut self) {
        self.buf.push_str(&"=".repeat(self.width));
        self.buf.push('\n');
    }

    /// `----` across the full width
    pub fn dash_sep(&mut self) {
        self.buf.push_str(&"-".repeat(self.width));
        self.buf.push('\n');
    }

    pub fn center(&mut self, s: &str) {
        let s = truncate(s, self.width);
        let pad = (self.width - s.chars().count()) / 2;
        self.buf.push_str(&" ".repeat(pad));
        self.buf.push_str(&s);
        self.buf.push('\n');
    }

    /// Left text and right text on one line, spaces in between.
    /// The left side is cut when both do not fit.
    pub fn line_lr(&mut self, left: &str, right: &str) {
        let right_len = right.chars().count();
        if right_len >= self.width {
            self.line(right);
            return;
        }
        let left_room = self.width - right_len - 1;
        let left = truncate(left, left_room);
        let gap = self.width - left.chars().count() - right_len;
        self.buf.push_str(&left);
        self.buf.push_str(&" ".repeat(gap));
        self.buf.push_str(right);
        self.buf.push('\n');
    }

    /// `Label: value`
    pub fn pair(&mut self, label: &str, value: &str) {
        self.line(&format!("{label}: {value}"));
    }

    /// One row of fixed columns; the last column is right-aligned
    pub fn columns(&mut self, cells: &[(&str, usize)]) {
        let mut row = String::with_capacity(self.width);
        let last = cells.len().saturating_sub(1);
        for (i, (text, width)) in cells.iter().enumerate() {
            if i == last {
                row.push_str(&pad_left(text, *width));
            } else {
                row.push_str(&pad_to_width(text, *width));
            }
        }
        self.line(row.trim_end());
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
