use jiff::Timestamp;

use medline_core::models::clinic::ClinicDirectory;
use medline_core::models::intake::{Gender, Intake, IntakeForm, Lifestyle, SymptomDuration};
use medline_export::layout::{ADVICE_HEADING, LineKind, ReportComposer, wrap_text};
use medline_export::metrics::{BOLD_WIDTH_FACTOR, text_width_em};
use medline_export::styles::PageStyles;

fn intake(symptoms: &str) -> Intake {
    IntakeForm {
        age: 30,
        gender: Gender::Male,
        region: "Dubai".to_string(),
        duration: SymptomDuration::OneToThreeDays,
        symptoms: symptoms.to_string(),
        history: String::new(),
        medications: String::new(),
        lifestyle: Lifestyle::No,
        email: None,
    }
    .validate(&ClinicDirectory::uae())
    .unwrap()
}

fn stamp() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

#[test]
fn short_report_fits_on_one_page() {
    let directory = ClinicDirectory::uae();
    let intake = intake("headache");
    let clinics = directory.lookup("Dubai");

    let report = ReportComposer::default().build_at(&intake, "Rest and hydrate.", clinics, stamp());

    assert_eq!(report.page_count(), 1);
    let texts: Vec<&str> = report.lines().map(|l| l.text.as_str()).collect();
    assert_eq!(texts[0], "AI Health Report - 2023-11-14 22:13:20 UTC");
    assert!(texts.contains(&"Age: 30"));
    assert!(texts.contains(&"Location: Dubai"));
    assert!(texts.contains(&"Symptom Duration: 1-3 days"));
    assert!(texts.contains(&ADVICE_HEADING));
    assert!(texts.contains(&"Rest and hydrate."));
    assert!(texts.contains(&"Known Clinics in Dubai:"));
    for clinic in clinics {
        assert!(texts.contains(&format!("- {clinic}").as_str()));
    }
}

#[test]
fn sections_appear_in_order() {
    let directory = ClinicDirectory::uae();
    let report = ReportComposer::default().build_at(
        &intake("cough"),
        "Advice here.",
        directory.lookup("Dubai"),
        stamp(),
    );
    let texts: Vec<&str> = report.lines().map(|l| l.text.as_str()).collect();
    let pos = |needle: &str| texts.iter().position(|t| t.starts_with(needle)).unwrap();

    assert!(pos("Age:") < pos("Gender:"));
    assert!(pos("Gender:") < pos("Location:"));
    assert!(pos("Location:") < pos("Symptom Duration:"));
    assert!(pos("Symptom Duration:") < pos("Symptoms:"));
    assert!(pos("Symptoms:") < pos("Medical History:"));
    assert!(pos("Medical History:") < pos("Medications:"));
    assert!(pos("Medications:") < pos("Lifestyle:"));
    assert!(pos("Lifestyle:") < pos(ADVICE_HEADING));
    assert!(pos(ADVICE_HEADING) < pos("Advice here."));
    assert!(pos("Advice here.") < pos("Known Clinics in"));
}

#[test]
fn headings_and_title_are_tagged() {
    let report = ReportComposer::default().build_at(&intake("cough"), "ok", &[], stamp());
    let first = report.lines().next().unwrap();
    assert_eq!(first.kind, LineKind::Title);
    let heading = report.lines().find(|l| l.text == ADVICE_HEADING).unwrap();
    assert_eq!(heading.kind, LineKind::Heading);
}

#[test]
fn long_advice_paginates_within_margins() {
    let styles = PageStyles::default();
    let width = styles.content_width_em();
    let paragraph = "Drink plenty of water and get rest. ".repeat(40);
    let advice = vec![paragraph.trim(); 12].join("\n");
    let clinics = ClinicDirectory::uae().lookup("Dubai").to_vec();

    let report = ReportComposer::new(styles.clone())
        .unwrap()
        .build_at(&intake("fever"), &advice, &clinics, stamp());

    assert!(report.page_count() > 1);
    for (i, page) in report.pages().iter().enumerate() {
        assert_eq!(page.number, i + 1);
        assert!(!page.lines.is_empty());
        for line in &page.lines {
            assert!(text_width_em(&line.text) <= width, "line too wide: {}", line.text);
            assert!(line.y_mm >= styles.bottom_mm() - 0.001, "below margin: {}", line.y_mm);
            assert!(line.y_mm <= styles.top_mm() + 0.001);
        }
    }
    // Clinics still come last.
    let last = report.lines().last().unwrap();
    assert_eq!(last.text, format!("- {}", clinics[2]));
}

#[test]
fn long_symptoms_wrap_too() {
    let styles = PageStyles::default();
    let symptoms = "persistent dry cough with mild fever ".repeat(10);
    let report = ReportComposer::default().build_at(&intake(&symptoms), "ok", &[], stamp());

    for line in report.lines() {
        assert!(text_width_em(&line.text) <= styles.content_width_em());
    }
    let symptom_lines = report
        .lines()
        .skip_while(|l| !l.text.starts_with("Symptoms:"))
        .take_while(|l| !l.text.starts_with("Medical History:"))
        .count();
    assert!(symptom_lines > 1);
}

#[test]
fn blank_advice_lines_are_kept_as_spacing() {
    let report =
        ReportComposer::default().build_at(&intake("cough"), "First.\n\nSecond.", &[], stamp());
    let texts: Vec<&str> = report.lines().map(|l| l.text.as_str()).collect();
    let first = texts.iter().position(|t| *t == "First.").unwrap();
    assert_eq!(texts[first + 1], "");
    assert_eq!(texts[first + 2], "Second.");
}

#[test]
fn no_clinic_section_without_clinics() {
    let report = ReportComposer::default().build_at(&intake("cough"), "ok", &[], stamp());
    assert!(report.lines().all(|l| !l.text.starts_with("Known Clinics")));
}

#[test]
fn wrap_text_fills_greedily() {
    // 'the quick' is 4.002em, 'the quick brown' is 7.003em.
    assert_eq!(
        wrap_text("the quick brown fox jumps", 5.0),
        vec!["the quick", "brown fox", "jumps"]
    );
}

#[test]
fn wrap_text_collapses_whitespace() {
    assert_eq!(wrap_text("  a   b\t c  ", 80.0), vec!["a b c"]);
    assert!(wrap_text("   ", 80.0).is_empty());
    assert!(wrap_text("", 80.0).is_empty());
}

#[test]
fn wrap_text_splits_overlong_words() {
    // a, b, d and e are each 0.556em wide.
    assert_eq!(
        wrap_text("abdeabdeab xy", 2.3),
        vec!["abde", "abde", "ab", "xy"]
    );
    assert_eq!(wrap_text("ab abdeabde", 2.3), vec!["ab", "abde", "abde"]);
}

#[test]
fn wrap_text_measures_glyphs_not_characters() {
    // Capital W is more than four times as wide as i.
    assert_eq!(wrap_text("WWWW WWWW", 5.0), vec!["WWWW", "WWWW"]);
    assert_eq!(wrap_text("iiiii iiiii", 5.0), vec!["iiiii iiiii"]);
}

#[test]
fn wrap_text_keeps_at_least_one_glyph_per_line() {
    assert_eq!(wrap_text("WW", 0.5), vec!["W", "W"]);
}

#[test]
fn wrap_text_counts_non_ascii_as_a_full_em() {
    assert_eq!(wrap_text("ééé ééé", 4.0), vec!["ééé", "ééé"]);
}

#[test]
fn all_caps_advice_stays_inside_the_margins() {
    let styles = PageStyles::default();
    let advice = "WWW MMM WWWWWWWW MWMWMW ".repeat(30);

    let report = ReportComposer::new(styles.clone())
        .unwrap()
        .build_at(&intake("fever"), advice.trim(), &[], stamp());

    let em_mm = styles.em_mm();
    for line in report.lines() {
        let factor = match line.kind {
            LineKind::Title | LineKind::Heading => BOLD_WIDTH_FACTOR,
            LineKind::Field | LineKind::Body => 1.0,
        };
        let width_mm = text_width_em(&line.text) * factor * em_mm;
        assert!(
            line.x_mm + width_mm <= styles.page_width_mm - styles.margin_mm + 0.001,
            "overflows right margin: {}",
            line.text
        );
    }
    let body_lines = report
        .lines()
        .filter(|l| l.kind == LineKind::Body && !l.text.is_empty())
        .count();
    assert!(body_lines > 10);
}

#[test]
fn default_styles_are_a4() {
    let styles = PageStyles::default();
    styles.validate().unwrap();
    assert_eq!(styles.page_width_mm, 210.0);
    assert_eq!(styles.page_height_mm, 297.0);
    assert!(styles.content_width_em() > 40.0);
}

#[test]
fn invalid_styles_are_rejected() {
    let mut styles = PageStyles::default();
    styles.margin_mm = 200.0;
    assert!(ReportComposer::new(styles).is_err());

    let mut styles = PageStyles::default();
    styles.font_size_pt = 0.0;
    assert!(ReportComposer::new(styles).is_err());

    let mut styles = PageStyles::default();
    styles.body_leading_mm = f32::NAN;
    assert!(styles.validate().is_err());

    let mut styles = PageStyles::default();
    styles.margin_mm = 103.0;
    assert!(styles.content_height_mm() > 0.0);
    assert!(styles.validate().is_err());
}

#[test]
fn whitespace_only_advice_leaves_a_near_empty_section() {
    let report = ReportComposer::default().build_at(&intake("cough"), "   ", &[], stamp());
    let texts: Vec<&str> = report.lines().map(|l| l.text.as_str()).collect();
    let heading = texts.iter().position(|t| *t == ADVICE_HEADING).unwrap();
    assert!(texts[heading + 1..].iter().all(|t| t.is_empty()));
    assert_eq!(report.page_count(), 1);
}
