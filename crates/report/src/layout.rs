//! Page layout for report blocks.
//!
//! Coordinates are millimetres measured from the top-left corner of the page. The renderer flips
//! them into PDF user space.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const SIDE_MARGIN_MM: f32 = 20.0;
pub const TOP_MARGIN_MM: f32 = 20.0;
pub const BOTTOM_MARGIN_MM: f32 = 15.0;

const MM_PER_PT: f32 = 0.352_778;

/// Font weight of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    /// Average Helvetica advance width as a fraction of the font size.
    fn average_advance(self) -> f32 {
        match self {
            FontWeight::Regular => 0.5,
            FontWeight::Bold => 0.55,
        }
    }
}

/// Horizontal alignment of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One unit of report content.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// A single line occupying a cell of `height` mm.
    Line {
        text: String,
        weight: FontWeight,
        size: f32,
        align: Align,
        height: f32,
    },
    /// Wrapped text, one cell of `line_height` mm per output line.
    Paragraph {
        text: String,
        weight: FontWeight,
        size: f32,
        line_height: f32,
    },
    /// Vertical whitespace.
    Spacer(f32),
}

/// A line of text positioned on a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub weight: FontWeight,
    pub size: f32,
    /// Left edge of the text.
    pub x_mm: f32,
    /// Baseline, measured from the top of the page.
    pub baseline_mm: f32,
}

/// Everything drawn on one page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    pub items: Vec<PlacedText>,
}

fn printable_width() -> f32 {
    PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM
}

fn char_width_mm(size: f32, weight: FontWeight) -> f32 {
    size * weight.average_advance() * MM_PER_PT
}

fn max_chars(size: f32, weight: FontWeight) -> usize {
    let chars = (printable_width() / char_width_mm(size, weight)).floor() as usize;
    chars.max(1)
}

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Explicit newlines are kept, words longer than a line are hard-split and an empty input
/// produces a single empty line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in raw_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            if word.is_empty() {
                continue;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };

            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        lines.push(current);
    }

    lines
}

struct Cursor {
    pages: Vec<PageLayout>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y: TOP_MARGIN_MM,
        }
    }

    fn reserve(&mut self, height: f32) {
        if self.y + height > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM && self.y > TOP_MARGIN_MM {
            self.pages.push(PageLayout::default());
            self.y = TOP_MARGIN_MM;
        }
    }

    fn place(&mut self, text: String, weight: FontWeight, size: f32, x_mm: f32, height: f32) {
        self.reserve(height);
        let cap_height = 0.7 * size * MM_PER_PT;
        let baseline_mm = self.y + (height + cap_height) / 2.0;
        if let Some(page) = self.pages.last_mut() {
            page.items.push(PlacedText {
                text,
                weight,
                size,
                x_mm,
                baseline_mm,
            });
        }
        self.y += height;
    }
}

pub(crate) fn layout(blocks: &[Block]) -> Vec<PageLayout> {
    let mut cursor = Cursor::new();

    for block in blocks {
        match block {
            Block::Line {
                text,
                weight,
                size,
                align,
                height,
            } => {
                let x_mm = match align {
                    Align::Left => SIDE_MARGIN_MM,
                    Align::Center => {
                        let width = text.chars().count() as f32 * char_width_mm(*size, *weight);
                        SIDE_MARGIN_MM + ((printable_width() - width) / 2.0).max(0.0)
                    }
                };
                cursor.place(text.clone(), *weight, *size, x_mm, *height);
            }
            Block::Paragraph {
                text,
                weight,
                size,
                line_height,
            } => {
                for line in wrap_text(text, max_chars(*size, *weight)) {
                    cursor.place(line, *weight, *size, SIDE_MARGIN_MM, *line_height);
                }
            }
            Block::Spacer(mm) => cursor.y += mm,
        }
    }

    cursor.pages
}
