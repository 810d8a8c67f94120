//! PDF rendering of a laid-out [`Report`].
//!
//! Uses the built-in Helvetica faces, so nothing is embedded and the output
//! stays small. Those faces only cover WinAnsi, which is why text goes
//! through [`pdf_text`] first.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::ExportError;
use crate::layout::{LineKind, Report};

const LAYER_NAME: &str = "Layer 1";

/// Render `report` to PDF bytes, one PDF page per layout page.
pub fn render_pdf(report: &Report) -> Result<Vec<u8>, ExportError> {
    let styles = report.styles();
    let width = Mm(styles.page_width_mm);
    let height = Mm(styles.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(report.title(), width, height, LAYER_NAME);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Font(e.to_string()))?;

    for (index, page) in report.pages().iter().enumerate() {
        let (page_idx, layer_idx) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        for line in &page.lines {
            if line.text.is_empty() {
                continue;
            }
            let font = match line.kind {
                LineKind::Title | LineKind::Heading => &bold,
                LineKind::Field | LineKind::Body => &regular,
            };
            layer.use_text(
                pdf_text(&line.text),
                styles.font_size_pt,
                Mm(line.x_mm),
                Mm(line.y_mm),
                font,
            );
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    tracing::info!(
        pages = report.page_count(),
        bytes = bytes.len(),
        "report rendered"
    );
    Ok(bytes)
}

/// Fold typographic punctuation into ASCII and replace anything else the
/// built-in fonts cannot draw with `?`.
pub fn pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => {
                out.push('-')
            }
            '\u{2022}' | '\u{00B7}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{2009}' | '\u{202F}' => out.push(' '),
            '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
