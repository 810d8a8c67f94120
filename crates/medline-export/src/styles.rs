use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Narrowest usable line, enough for the widest bold glyph.
const MIN_CONTENT_WIDTH_EM: f32 = 2.0;

/// Page geometry and typography for the health report.
///
/// All lengths are millimetres except font size, which is in points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStyles {
    /// Page width (A4 by default).
    pub page_width_mm: f32,

    /// Page height (A4 by default).
    pub page_height_mm: f32,

    /// Margin applied uniformly to all four sides.
    pub margin_mm: f32,

    /// Font size for every line, in points.
    pub font_size_pt: f32,

    /// Vertical advance after the title, intake lines and headings.
    pub field_leading_mm: f32,

    /// Vertical advance after advice and clinic lines.
    pub body_leading_mm: f32,

    /// Extra space between sections.
    pub section_gap_mm: f32,
}

impl Default for PageStyles {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 50.0 * MM_PER_PT,
            font_size_pt: 12.0,
            field_leading_mm: 20.0 * MM_PER_PT,
            body_leading_mm: 15.0 * MM_PER_PT,
            section_gap_mm: 10.0 * MM_PER_PT,
        }
    }
}

impl PageStyles {
    pub fn validate(&self) -> Result<(), ExportError> {
        let positive = [
            ("page_width_mm", self.page_width_mm),
            ("page_height_mm", self.page_height_mm),
            ("font_size_pt", self.font_size_pt),
            ("field_leading_mm", self.field_leading_mm),
            ("body_leading_mm", self.body_leading_mm),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ExportError::Styles(format!("{name} must be positive")));
            }
        }
        if !(self.margin_mm.is_finite() && self.margin_mm >= 0.0) {
            return Err(ExportError::Styles("margin_mm must not be negative".to_string()));
        }
        if !(self.section_gap_mm.is_finite() && self.section_gap_mm >= 0.0) {
            return Err(ExportError::Styles(
                "section_gap_mm must not be negative".to_string(),
            ));
        }
        if self.content_height_mm() <= 0.0 {
            return Err(ExportError::Styles(
                "margins leave no room for content".to_string(),
            ));
        }
        if self.content_width_em() < MIN_CONTENT_WIDTH_EM {
            return Err(ExportError::Styles(
                "margins leave no room for a line of text".to_string(),
            ));
        }
        Ok(())
    }

    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    pub fn content_height_mm(&self) -> f32 {
        self.page_height_mm - 2.0 * self.margin_mm
    }

    /// One em at the configured font size.
    pub fn em_mm(&self) -> f32 {
        self.font_size_pt * MM_PER_PT
    }

    /// Wrapping width in ems of the report font.
    pub fn content_width_em(&self) -> f32 {
        self.content_width_mm() / self.em_mm()
    }

    /// Baseline of the first line on a page.
    pub fn top_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }

    /// Lowest baseline a line may sit on.
    pub fn bottom_mm(&self) -> f32 {
        self.margin_mm
    }
}
