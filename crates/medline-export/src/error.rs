use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("invalid page styles: {0}")]
    Styles(String),
}
