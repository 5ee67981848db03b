// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout for the rasterizer.
//
// Turns preview blocks into absolutely positioned paint operations.  Sizes are
// given in CSS pixels (96 dpi) and multiplied by the capture scale.  Text
// measurement is abstracted behind `Measure` so the layout can be computed
// without a font on disk.

use crate::preview::{Block, PreviewDocument};

const MM_PER_INCH: f32 = 25.4;
const CSS_DPI: f32 = 96.0;
const TAB_WIDTH: usize = 8;

// Palette, RGBA.
const BLACK: [u8; 4] = [0, 0, 0, 255];
const GRAY_50: [u8; 4] = [249, 250, 251, 255];
const GRAY_300: [u8; 4] = [209, 213, 219, 255];
const GRAY_400: [u8; 4] = [156, 163, 175, 255];
const GRAY_500: [u8; 4] = [107, 114, 128, 255];
const GRAY_600: [u8; 4] = [75, 85, 99, 255];
const GRAY_700: [u8; 4] = [55, 65, 81, 255];
const GRAY_800: [u8; 4] = [31, 41, 55, 255];
const GRAY_900: [u8; 4] = [17, 24, 39, 255];
const BLUE_600: [u8; 4] = [37, 99, 235, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// Width of a run of text in device pixels.
pub trait Measure {
    fn text_width(&self, text: &str, size_px: f32, weight: Weight) -> f32;
}

/// One positioned drawing instruction, in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: Weight,
        color: [u8; 4],
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: [u8; 4],
    },
}

/// A fully positioned page.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<PaintOp>,
}

impl Layout {
    /// All text runs in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            PaintOp::Text { text, .. } => Some(text.as_str()),
            PaintOp::Rect { .. } => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy)]
struct Style {
    /// CSS pixels.
    size: f32,
    weight: Weight,
    color: [u8; 4],
    /// Line height as a multiple of `size`.
    leading: f32,
}

const MASTHEAD: Style = Style {
    size: 14.0,
    weight: Weight::Bold,
    color: GRAY_500,
    leading: 1.43,
};
const HEADLINE: Style = Style {
    size: 30.0,
    weight: Weight::Bold,
    color: GRAY_900,
    leading: 1.25,
};
const SUBHEADLINE: Style = Style {
    size: 20.0,
    weight: Weight::Regular,
    color: GRAY_600,
    leading: 1.5,
};
const DATELINE: Style = Style {
    size: 14.0,
    weight: Weight::Bold,
    color: GRAY_700,
    leading: 1.43,
};
const BODY: Style = Style {
    size: 16.0,
    weight: Weight::Regular,
    color: GRAY_800,
    leading: 1.625,
};
const SECTION_HEADING: Style = Style {
    size: 14.0,
    weight: Weight::Bold,
    color: GRAY_900,
    leading: 1.43,
};
const SMALL: Style = Style {
    size: 14.0,
    weight: Weight::Regular,
    color: GRAY_700,
    leading: 1.625,
};
const END_MARK: Style = Style {
    size: 16.0,
    weight: Weight::Bold,
    color: GRAY_400,
    leading: 1.5,
};

/// Lay out `doc` at `scale` times 96 dpi.
pub fn layout<M: Measure>(doc: &PreviewDocument, scale: f32, measure: &M) -> Layout {
    let px_per_mm = CSS_DPI / MM_PER_INCH * scale;
    let width = doc.page.width_mm * px_per_mm;
    let margin = doc.page.margin_mm * px_per_mm;

    let mut flow = Flow {
        measure,
        scale,
        ops: Vec::new(),
        left: margin,
        right: width - margin,
        y: margin,
    };

    let mut header_open = true;
    for block in &doc.blocks {
        // The header (masthead, headline, subheadline) is closed by a heavy rule.
        if header_open && !matches!(block, Block::Masthead(_) | Block::Headline(_) | Block::Subheadline(_)) {
            flow.gap(24.0 - 8.0);
            flow.rule(4.0, BLACK);
            flow.gap(32.0);
            header_open = false;
        }

        match block {
            Block::Masthead(text) => {
                flow.paragraph(&text.to_uppercase(), MASTHEAD, Align::Left);
                flow.gap(8.0);
            }
            Block::Headline(shown) => {
                flow.paragraph(&shown.text, HEADLINE, Align::Left);
                flow.gap(8.0);
            }
            Block::Subheadline(text) => {
                flow.paragraph(text, SUBHEADLINE, Align::Left);
                flow.gap(8.0);
            }
            Block::Dateline { city, date } => {
                flow.paragraph(&format!("{}, {date}", city.text), DATELINE, Align::Left);
                flow.gap(24.0);
            }
            Block::Body(shown) => {
                flow.paragraph(&shown.text, BODY, Align::Justify);
                flow.gap(40.0);
            }
            Block::About { heading, text } => {
                let inset = flow.px(24.0);
                let top = flow.y;
                let first_op = flow.ops.len();
                flow.left += inset;
                flow.right -= inset;
                flow.y += inset;
                flow.paragraph(&heading.to_uppercase(), SECTION_HEADING, Align::Left);
                flow.gap(8.0);
                flow.paragraph(text, SMALL, Align::Left);
                flow.y += inset;
                flow.left -= inset;
                flow.right += inset;
                flow.ops.insert(
                    first_op,
                    PaintOp::Rect {
                        x: flow.left,
                        y: top,
                        width: flow.right - flow.left,
                        height: flow.y - top,
                        color: GRAY_50,
                    },
                );
                flow.gap(32.0);
            }
            Block::Contact {
                heading,
                name,
                email,
                phone,
                website,
            } => {
                flow.rule(1.0, GRAY_300);
                flow.gap(24.0);
                flow.paragraph(&heading.to_uppercase(), SECTION_HEADING, Align::Left);
                flow.gap(16.0);

                let column_gap = flow.px(16.0);
                let column_width = (flow.right - flow.left - column_gap) / 2.0;
                let (left_x0, left_x1) = (flow.left, flow.left + column_width);
                let (right_x0, right_x1) = (flow.right - column_width, flow.right);
                let top = flow.y;

                let name_style = Style {
                    weight: Weight::Bold,
                    color: GRAY_700,
                    ..SMALL
                };
                let mut left_y = top;
                left_y += flow.lines_at(&name.text, name_style, Align::Left, left_x0, left_x1, left_y);
                left_y += flow.lines_at(&email.text, SMALL, Align::Left, left_x0, left_x1, left_y);

                let link = Style {
                    color: BLUE_600,
                    ..SMALL
                };
                let mut right_y = top;
                right_y += flow.lines_at(&phone.text, SMALL, Align::Right, right_x0, right_x1, right_y);
                right_y += flow.lines_at(&website.text, link, Align::Right, right_x0, right_x1, right_y);

                flow.y = left_y.max(right_y);
            }
            Block::EndMark(text) => {
                flow.gap(32.0);
                flow.paragraph(text, END_MARK, Align::Center);
            }
        }
    }

    let min_height = doc.page.min_height_mm * px_per_mm;
    let height = (flow.y + margin).max(min_height);

    Layout {
        width: width.round() as u32,
        height: height.ceil() as u32,
        ops: flow.ops,
    }
}

struct Flow<'a, M: Measure> {
    measure: &'a M,
    scale: f32,
    ops: Vec<PaintOp>,
    left: f32,
    right: f32,
    y: f32,
}

impl<M: Measure> Flow<'_, M> {
    fn px(&self, css: f32) -> f32 {
        css * self.scale
    }

    fn gap(&mut self, css: f32) {
        self.y += self.px(css);
    }

    fn rule(&mut self, thickness_css: f32, color: [u8; 4]) {
        let height = self.px(thickness_css).max(1.0);
        self.ops.push(PaintOp::Rect {
            x: self.left,
            y: self.y,
            width: self.right - self.left,
            height,
            color,
        });
        self.y += height;
    }

    fn paragraph(&mut self, text: &str, style: Style, align: Align) {
        let (x0, x1, y) = (self.left, self.right, self.y);
        self.y += self.lines_at(text, style, align, x0, x1, y);
    }

    /// Lay out `text` between `x0` and `x1` starting at `top`; returns the
    /// height used.  Every line break starts a new line, empty lines keep
    /// their height.
    fn lines_at(&mut self, text: &str, style: Style, align: Align, x0: f32, x1: f32, top: f32) -> f32 {
        let size = self.px(style.size);
        let line_height = size * style.leading;
        let max_width = x1 - x0;
        let measure = self.measure;
        let width_of = |s: &str| measure.text_width(s, size, style.weight);

        let text = normalize_whitespace(text);
        let mut y = top;
        for source_line in text.split('\n') {
            let wrapped = wrap_line(source_line, max_width, width_of);
            let count = wrapped.len();
            for (i, line) in wrapped.into_iter().enumerate() {
                let baseline_top = y + (line_height - size) / 2.0;
                let last = i + 1 == count;
                if align == Align::Justify && !last {
                    self.justified(&line, style, size, x0, max_width, baseline_top);
                } else if !line.is_empty() {
                    let line_width = width_of(&line);
                    let x = match align {
                        Align::Left | Align::Justify => x0,
                        Align::Right => x1 - line_width,
                        Align::Center => x0 + (max_width - line_width) / 2.0,
                    };
                    self.ops.push(PaintOp::Text {
                        x,
                        y: baseline_top,
                        size,
                        weight: style.weight,
                        color: style.color,
                        text: line,
                    });
                }
                y += line_height;
            }
        }
        y - top
    }

    fn justified(&mut self, line: &str, style: Style, size: f32, x0: f32, max_width: f32, y: f32) {
        let words: Vec<&str> = line.split(' ').collect();
        let widths: Vec<f32> = words
            .iter()
            .map(|w| self.measure.text_width(w, size, style.weight))
            .collect();
        let spacing = if words.len() > 1 {
            (max_width - widths.iter().sum::<f32>()) / (words.len() - 1) as f32
        } else {
            0.0
        };

        let mut x = x0;
        for (word, width) in words.into_iter().zip(widths) {
            if !word.is_empty() {
                self.ops.push(PaintOp::Text {
                    x,
                    y,
                    size,
                    weight: style.weight,
                    color: style.color,
                    text: word.to_string(),
                });
            }
            x += width + spacing;
        }
    }
}

/// Whitespace as a `pre-wrap` block shows it.
///
/// `\r\n` and a lone `\r` become `\n`, tabs advance to the next multiple of
/// eight columns, other control characters are dropped.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
                column = 0;
            }
            '\t' => {
                let spaces = TAB_WIDTH - column % TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            c if c.is_control() => {}
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Greedy word wrap of a single line (no `\n`) to `max_width`.
///
/// Words are separated by single spaces; runs of spaces survive as empty
/// words.  A word wider than the line is broken between characters.
pub fn wrap_line(text: &str, max_width: f32, width_of: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut started = false;

    for word in text.split(' ') {
        if !started {
            line.push_str(word);
            started = true;
        } else {
            let candidate = format!("{line} {word}");
            if width_of(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
            }
        }

        while line.chars().count() > 1 && width_of(&line) > max_width {
            let split = fitting_prefix(&line, max_width, &width_of);
            let rest = line.split_off(split);
            lines.push(line);
            line = rest;
        }
    }

    lines.push(line);
    lines
}

/// Byte index of the longest prefix that fits, never less than one char.
fn fitting_prefix(text: &str, max_width: f32, width_of: &impl Fn(&str) -> f32) -> usize {
    let mut best = text.chars().next().map(char::len_utf8).unwrap_or(0);
    for (idx, _) in text.char_indices().skip(1) {
        if width_of(&text[..idx]) > max_width {
            break;
        }
        best = idx;
    }
    best
}
