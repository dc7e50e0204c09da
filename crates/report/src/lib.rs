//! Remote Home Check report rendering
//!
//! A deliberately small document model for single-column text reports:
//!
//! - Fixed A4 portrait pages with 20 mm side/top margins and a 15 mm bottom margin
//! - Built-in Helvetica faces only, so no font files ship with the service
//! - Automatic page breaks when the cursor reaches the bottom margin
//! - Word-wrapped paragraphs sized from an average glyph width estimate
//!
//! Layout and rendering are separate steps. [`ReportDocument::layout`] places every line on a
//! page without touching the PDF backend, and [`ReportDocument::render`] draws that layout with
//! `printpdf`.
//!
//! ## Example Usage
//!
//! ```no_run
//! use rhc_report::{FontWeight, ReportDocument};
//!
//! # fn main() -> Result<(), rhc_report::ReportError> {
//! let mut doc = ReportDocument::new("Remote Home Check Assessment Report");
//! doc.line("Patient: Jane Doe", FontWeight::Bold, 12.0)
//!     .heading("Care Plan Suggestion")
//!     .paragraph("Resume standard monitoring", 12.0);
//! let bytes = doc.render()?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

mod layout;
mod render;

pub use layout::{
    wrap_text, Align, Block, FontWeight, PageLayout, PlacedText, BOTTOM_MARGIN_MM, PAGE_HEIGHT_MM,
    PAGE_WIDTH_MM, SIDE_MARGIN_MM, TOP_MARGIN_MM,
};

use std::path::Path;

/// Errors that can occur while producing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The PDF backend failed to load a font or serialise the document
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// The rendered report could not be written to disk
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// A report under construction.
///
/// Builder methods append blocks in reading order and return `&mut Self` so calls can be chained.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    title: String,
    blocks: Vec<Block>,
}

impl ReportDocument {
    /// Starts a document whose first block is the centred bold title.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let blocks = vec![
            Block::Line {
                text: title.clone(),
                weight: FontWeight::Bold,
                size: 16.0,
                align: Align::Center,
                height: 10.0,
            },
            Block::Spacer(10.0),
        ];
        Self { title, blocks }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Appends a bold 14 pt section heading.
    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.line(text, FontWeight::Bold, 14.0)
    }

    /// Appends a single unwrapped, left-aligned line.
    pub fn line(&mut self, text: impl Into<String>, weight: FontWeight, size: f32) -> &mut Self {
        self.blocks.push(Block::Line {
            text: text.into(),
            weight,
            size,
            align: Align::Left,
            height: 10.0,
        });
        self
    }

    /// Appends a regular-weight paragraph wrapped to the printable width.
    pub fn paragraph(&mut self, text: impl Into<String>, size: f32) -> &mut Self {
        self.blocks.push(Block::Paragraph {
            text: text.into(),
            weight: FontWeight::Regular,
            size,
            line_height: 8.0,
        });
        self
    }

    /// Appends vertical whitespace.
    pub fn spacer(&mut self, mm: f32) -> &mut Self {
        self.blocks.push(Block::Spacer(mm));
        self
    }

    /// Places all blocks onto pages.
    pub fn layout(&self) -> Vec<PageLayout> {
        layout::layout(&self.blocks)
    }

    /// Renders the document to PDF bytes.
    pub fn render(&self) -> Result<Vec<u8>, ReportError> {
        let pages = self.layout();
        let bytes = render::render(&self.title, &pages)?;
        tracing::debug!(
            pages = pages.len(),
            bytes = bytes.len(),
            "rendered report '{}'",
            self.title
        );
        Ok(bytes)
    }

    /// Renders the document and writes it to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let bytes = self.render()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ReportDocument {
        let mut doc = ReportDocument::new("Remote Home Check Assessment Report");
        doc.line("Patient: Jane Doe", FontWeight::Bold, 12.0)
            .spacer(10.0)
            .heading("Assessment Scores")
            .line("Insight Score: 95.0/100", FontWeight::Regular, 12.0)
            .heading("Care Plan Suggestion")
            .paragraph(
                "Resume standard monitoring; schedule motivational check-in and goal-setting session",
                12.0,
            );
        doc
    }

    #[test]
    fn new_document_starts_with_centred_title() {
        let doc = ReportDocument::new("Title");
        match &doc.blocks()[0] {
            Block::Line { text, align, .. } => {
                assert_eq!(text, "Title");
                assert_eq!(*align, Align::Center);
            }
            other => panic!("expected title line, got {other:?}"),
        }
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let bytes = sample().render().expect("render should succeed");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn write_to_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");

        sample().write_to(&path).expect("write should succeed");

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF"));
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.pdf");

        let err = sample().write_to(&path).expect_err("should fail");
        assert!(matches!(err, ReportError::Io(_)));
    }
}
