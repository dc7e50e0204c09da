//! PDF backend for laid-out pages.

use crate::layout::{FontWeight, PageLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::ReportError;
use printpdf::{BuiltinFont, Mm, PdfDocument};

const LAYER_NAME: &str = "Content";

/// Characters above Latin-1 that WinAnsiEncoding places in 0x80..=0x9F.
const WIN_ANSI_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Distinct characters in `text` the built-in Helvetica faces cannot encode, in first-seen order.
///
/// The built-in PDF fonts only cover WinAnsiEncoding, so CJK text and emoji come out as garbage.
pub(crate) fn unencodable_chars(text: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in text.chars() {
        let encodable =
            matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(&c);
        if !encodable && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

pub(crate) fn render(title: &str, pages: &[PageLayout]) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };

        for item in &page.items {
            let font = match item.weight {
                FontWeight::Regular => &regular,
                FontWeight::Bold => &bold,
            };
            let unencodable = unencodable_chars(&item.text);
            if !unencodable.is_empty() {
                tracing::warn!(
                    chars = ?unencodable,
                    "report text outside WinAnsiEncoding will not render: '{}'",
                    item.text
                );
            }
            layer.use_text(
                item.text.as_str(),
                item.size,
                Mm(item.x_mm),
                Mm(PAGE_HEIGHT_MM - item.baseline_mm),
                font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ReportError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FontWeight, ReportDocument};

    #[test]
    fn latin_text_is_encodable() {
        assert!(unencodable_chars("Patient: Zoë Müller – 95.0/100 €").is_empty());
    }

    #[test]
    fn cjk_and_emoji_are_reported_once_each() {
        assert_eq!(unencodable_chars("Patient: 山田 山田 😀"), vec!['山', '田', '😀']);
        assert_eq!(unencodable_chars("tab\there"), vec!['\t']);
    }

    #[test]
    fn unencodable_text_still_renders() {
        let mut doc = ReportDocument::new("Report");
        doc.line("Patient: 山田太郎", FontWeight::Bold, 12.0);
        let bytes = doc.render().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
