use medline_advice::prompt::compose;
use medline_core::models::clinic::ClinicDirectory;
use medline_core::models::intake::{Gender, Intake, IntakeForm, Lifestyle, SymptomDuration};

fn intake(lifestyle: Lifestyle) -> Intake {
    IntakeForm {
        age: 30,
        gender: Gender::Male,
        region: "Dubai".to_string(),
        duration: SymptomDuration::OneToThreeDays,
        symptoms: "headache".to_string(),
        history: "asthma".to_string(),
        medications: "salbutamol inhaler".to_string(),
        lifestyle,
        email: Some("someone@example.com".to_string()),
    }
    .validate(&ClinicDirectory::uae())
    .unwrap()
}

#[test]
fn compose_is_deterministic() {
    let a = compose(&intake(Lifestyle::No));
    let b = compose(&intake(Lifestyle::No));
    assert_eq!(a, b);
}

#[test]
fn every_field_value_appears_exactly_once() {
    for lifestyle in Lifestyle::ALL {
        let prompt = compose(&intake(lifestyle));
        let values = [
            "30",
            "Male",
            "Dubai",
            "1-3 days",
            "headache",
            "asthma",
            "salbutamol inhaler",
            lifestyle.label(),
        ];
        for value in values {
            assert_eq!(
                prompt.matches(value).count(),
                1,
                "{value:?} should appear once in:\n{prompt}"
            );
        }
    }
}

#[test]
fn every_labelled_line_appears_once_in_order() {
    let prompt = compose(&intake(Lifestyle::Yes));
    let lines = [
        "Age: 30",
        "Gender: Male",
        "Location: Dubai",
        "Symptom duration: 1-3 days",
        "Symptoms: headache",
        "Medical history: asthma",
        "Medications: salbutamol inhaler",
        "Smokes or drinks alcohol: Yes",
    ];

    let mut last = 0;
    for line in lines {
        assert_eq!(prompt.matches(line).count(), 1, "{line}");
        let at = prompt.find(line).unwrap();
        assert!(at >= last, "{line} is out of order");
        last = at;
    }
}

#[test]
fn every_duration_and_gender_label_fits_the_template() {
    let directory = ClinicDirectory::uae();
    for gender in Gender::ALL {
        for duration in SymptomDuration::ALL {
            let intake = IntakeForm {
                age: 57,
                gender,
                region: "Sharjah".to_string(),
                duration,
                symptoms: "dizziness".to_string(),
                history: String::new(),
                medications: String::new(),
                lifestyle: Lifestyle::No,
                email: None,
            }
            .validate(&directory)
            .unwrap();

            let prompt = compose(&intake);
            assert_eq!(prompt.matches(gender.label()).count(), 1, "{gender:?}");
            assert_eq!(prompt.matches(duration.label()).count(), 1, "{duration:?}");
        }
    }
}

#[test]
fn prompt_asks_for_causes_lifestyle_urgency_and_local_care() {
    let prompt = compose(&intake(Lifestyle::No));
    assert!(prompt.contains("possible causes"));
    assert!(prompt.contains("lifestyle or diet recommendations"));
    assert!(prompt.contains("(Low, Medium, High)"));
    assert!(prompt.contains("local doctor or clinic in the location given above"));
}

#[test]
fn contact_email_is_not_sent_to_the_model() {
    let prompt = compose(&intake(Lifestyle::No));
    assert!(!prompt.contains("someone@example.com"));
}
