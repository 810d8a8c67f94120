use jiff::Timestamp;

use medline_core::models::clinic::ClinicDirectory;
use medline_core::models::intake::{Gender, IntakeForm, Lifestyle, SymptomDuration};
use medline_export::layout::ReportComposer;
use medline_export::pdf::{pdf_text, render_pdf};

fn report(advice: &str) -> medline_export::layout::Report {
    let directory = ClinicDirectory::uae();
    let intake = IntakeForm {
        age: 52,
        gender: Gender::Female,
        region: "Sharjah".to_string(),
        duration: SymptomDuration::OverOneWeek,
        symptoms: "joint pain".to_string(),
        history: "arthritis".to_string(),
        medications: "ibuprofen".to_string(),
        lifestyle: Lifestyle::Yes,
        email: None,
    }
    .validate(&directory)
    .unwrap();
    ReportComposer::default().build_at(
        &intake,
        advice,
        directory.lookup("Sharjah"),
        Timestamp::from_second(1_700_000_000).unwrap(),
    )
}

#[test]
fn renders_a_pdf_document() {
    let bytes = render_pdf(&report("Gentle stretching may help.")).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn multi_page_report_renders() {
    let advice = "Stay active and keep a symptom diary. ".repeat(400);
    let report = report(&advice);
    assert!(report.page_count() > 1);
    let bytes = render_pdf(&report).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn non_ascii_advice_still_renders() {
    let bytes = render_pdf(&report("Take it easy \u{2014} \u{201C}rest\u{201D} \u{2026} 🙂")).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn pdf_text_maps_typography_to_ascii() {
    assert_eq!(pdf_text("a \u{2014} b"), "a - b");
    assert_eq!(pdf_text("\u{201C}hi\u{201D} it\u{2019}s"), "\"hi\" it's");
    assert_eq!(pdf_text("wait\u{2026}"), "wait...");
    assert_eq!(pdf_text("plain text"), "plain text");
    assert_eq!(pdf_text("ok 🙂"), "ok ?");
}
