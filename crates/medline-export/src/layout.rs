//! Report composition: intake + advice + clinics → positioned lines on pages.
//!
//! Layout is pure and independent of the PDF backend. Lines are wrapped to
//! [`PageStyles::content_width_em`] using Helvetica advances, with a greedy
//! fill. A page break happens whenever the cursor has dropped below the bottom
//! margin. There is no cap on the number of pages.

use jiff::Timestamp;
use serde::Serialize;

use medline_core::models::intake::Intake;

use crate::error::ExportError;
use crate::metrics::{BOLD_WIDTH_FACTOR, char_width_em, text_width_em};
use crate::styles::PageStyles;

pub const REPORT_TITLE: &str = "AI Health Report";
pub const ADVICE_HEADING: &str = "AI Response:";

/// What a line is, so the renderer can pick a face for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Title,
    Field,
    Heading,
    Body,
}

/// One line of text with its baseline position.
#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub text: String,
    pub kind: LineKind,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub lines: Vec<Line>,
}

/// A fully laid-out report, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    title: String,
    generated_at: Timestamp,
    styles: PageStyles,
    pages: Vec<Page>,
}

impl Report {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn styles(&self) -> &PageStyles {
        &self.styles
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every line across all pages, in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }
}

/// Builds [`Report`]s with a fixed set of page styles.
#[derive(Debug, Clone, Default)]
pub struct ReportComposer {
    styles: PageStyles,
}

impl ReportComposer {
    pub fn new(styles: PageStyles) -> Result<Self, ExportError> {
        styles.validate()?;
        Ok(Self { styles })
    }

    pub fn styles(&self) -> &PageStyles {
        &self.styles
    }

    /// Lay out a report stamped with the current time.
    pub fn build(&self, intake: &Intake, advice: &str, clinics: &[String]) -> Report {
        self.build_at(intake, advice, clinics, Timestamp::now())
    }

    /// Lay out a report stamped with `generated_at`.
    pub fn build_at(
        &self,
        intake: &Intake,
        advice: &str,
        clinics: &[String],
        generated_at: Timestamp,
    ) -> Report {
        let styles = &self.styles;
        let mut pager = Pager::new(styles);

        let title = format!(
            "{REPORT_TITLE} - {}",
            generated_at.strftime("%Y-%m-%d %H:%M:%S UTC")
        );
        pager.push_wrapped(&title, LineKind::Title, styles.field_leading_mm);
        pager.gap(styles.section_gap_mm);

        for (label, value) in intake.labelled_fields() {
            pager.push_wrapped(
                &format!("{label}: {value}"),
                LineKind::Field,
                styles.field_leading_mm,
            );
        }
        pager.gap(styles.section_gap_mm);

        pager.push_wrapped(ADVICE_HEADING, LineKind::Heading, styles.field_leading_mm);
        for paragraph in advice.lines() {
            let wrapped = wrap_text(paragraph, pager.width_em(LineKind::Body));
            if wrapped.is_empty() {
                pager.push(String::new(), LineKind::Body, styles.body_leading_mm);
            }
            for line in wrapped {
                pager.push(line, LineKind::Body, styles.body_leading_mm);
            }
        }

        if !clinics.is_empty() {
            pager.gap(styles.section_gap_mm);
            pager.push_wrapped(
                &format!("Known Clinics in {}:", intake.region()),
                LineKind::Heading,
                styles.field_leading_mm,
            );
            for clinic in clinics {
                pager.push_wrapped(
                    &format!("- {clinic}"),
                    LineKind::Body,
                    styles.body_leading_mm,
                );
            }
        }

        let pages = pager.finish();
        tracing::debug!(pages = pages.len(), "report laid out");

        Report {
            title: REPORT_TITLE.to_string(),
            generated_at,
            styles: styles.clone(),
            pages,
        }
    }
}

/// Vertical cursor over a sequence of pages.
struct Pager<'a> {
    styles: &'a PageStyles,
    pages: Vec<Page>,
    current: Vec<Line>,
    cursor_mm: f32,
}

impl<'a> Pager<'a> {
    fn new(styles: &'a PageStyles) -> Self {
        Self {
            styles,
            pages: Vec::new(),
            current: Vec::new(),
            cursor_mm: styles.top_mm(),
        }
    }

    fn push(&mut self, text: String, kind: LineKind, leading_mm: f32) {
        if self.cursor_mm < self.styles.bottom_mm() {
            self.break_page();
        }
        self.current.push(Line {
            text,
            kind,
            x_mm: self.styles.margin_mm,
            y_mm: self.cursor_mm,
        });
        self.cursor_mm -= leading_mm;
    }

    /// Usable width for a line of `kind`, in regular-face ems.
    fn width_em(&self, kind: LineKind) -> f32 {
        let width = self.styles.content_width_em();
        match kind {
            LineKind::Title | LineKind::Heading => width / BOLD_WIDTH_FACTOR,
            LineKind::Field | LineKind::Body => width,
        }
    }

    fn push_wrapped(&mut self, text: &str, kind: LineKind, leading_mm: f32) {
        for line in wrap_text(text, self.width_em(kind)) {
            self.push(line, kind, leading_mm);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }

    fn break_page(&mut self) {
        let lines = std::mem::take(&mut self.current);
        self.pages.push(Page {
            number: self.pages.len() + 1,
            lines,
        });
        self.cursor_mm = self.styles.top_mm();
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

/// Greedy word wrap so no line is wider than `max_width_em` in Helvetica.
///
/// Runs of whitespace collapse to one space. A word wider than the limit is
/// split across lines, always keeping at least one character per line. Blank
/// input yields no lines.
pub fn wrap_text(text: &str, max_width_em: f32) -> Vec<String> {
    let space = char_width_em(' ');
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_width = text_width_em(word);

        if word_width > max_width_em {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            for c in word.chars() {
                let w = char_width_em(c);
                if !current.is_empty() && current_width + w > max_width_em {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += w;
            }
            continue;
        }

        if !current.is_empty() && current_width + space + word_width > max_width_em {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += space;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
