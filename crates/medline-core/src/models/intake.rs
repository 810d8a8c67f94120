use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::clinic::{ClinicDirectory, Region};

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Female")]
    Female,
    #[serde(alias = "Other")]
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Wire value used by forms and JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// How long the symptoms have been present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomDuration {
    #[serde(alias = "< 1 day")]
    UnderOneDay,
    #[serde(alias = "1-3 days")]
    OneToThreeDays,
    #[serde(alias = "> 1 week")]
    OverOneWeek,
}

impl SymptomDuration {
    pub const ALL: [SymptomDuration; 3] = [
        SymptomDuration::UnderOneDay,
        SymptomDuration::OneToThreeDays,
        SymptomDuration::OverOneWeek,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SymptomDuration::UnderOneDay => "< 1 day",
            SymptomDuration::OneToThreeDays => "1-3 days",
            SymptomDuration::OverOneWeek => "> 1 week",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SymptomDuration::UnderOneDay => "under_one_day",
            SymptomDuration::OneToThreeDays => "one_to_three_days",
            SymptomDuration::OverOneWeek => "over_one_week",
        }
    }
}

/// Whether the person smokes or drinks alcohol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    #[serde(alias = "No")]
    No,
    #[serde(alias = "Yes")]
    Yes,
}

impl Lifestyle {
    pub const ALL: [Lifestyle; 2] = [Lifestyle::No, Lifestyle::Yes];

    pub fn label(&self) -> &'static str {
        match self {
            Lifestyle::No => "No",
            Lifestyle::Yes => "Yes",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Lifestyle::No => "no",
            Lifestyle::Yes => "yes",
        }
    }
}

/// Raw form payload, exactly as the form surface submits it.
///
/// Nothing here is trusted; [`IntakeForm::validate`] turns it into an
/// [`Intake`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeForm {
    pub age: u32,
    pub gender: Gender,
    pub region: String,
    pub duration: SymptomDuration,
    pub symptoms: String,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub medications: String,
    pub lifestyle: Lifestyle,
    #[serde(default)]
    pub email: Option<String>,
}

impl IntakeForm {
    /// Check the form against the field rules and the clinic directory.
    ///
    /// Symptom text is the gate for every outbound call: blank or
    /// whitespace-only symptoms are rejected here.
    pub fn validate(self, directory: &ClinicDirectory) -> Result<Intake, CoreError> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(CoreError::AgeOutOfRange {
                min: MIN_AGE,
                max: MAX_AGE,
                got: self.age,
            });
        }

        if self.symptoms.trim().is_empty() {
            return Err(CoreError::MissingSymptoms);
        }

        let region = directory
            .resolve(&self.region)
            .ok_or_else(|| CoreError::UnknownRegion(self.region.clone()))?;

        let contact_email = match self.email.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(email) if is_plausible_email(email) => Some(email.to_string()),
            Some(email) => return Err(CoreError::InvalidEmail(email.to_string())),
        };

        Ok(Intake {
            age: self.age,
            gender: self.gender,
            region,
            duration: self.duration,
            symptoms: self.symptoms,
            history: self.history,
            medications: self.medications,
            lifestyle: self.lifestyle,
            contact_email,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

/// One validated submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Intake {
    age: u32,
    gender: Gender,
    region: Region,
    duration: SymptomDuration,
    symptoms: String,
    history: String,
    medications: String,
    lifestyle: Lifestyle,
    contact_email: Option<String>,
}

impl Intake {
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn duration(&self) -> SymptomDuration {
        self.duration
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn medications(&self) -> &str {
        &self.medications
    }

    pub fn lifestyle(&self) -> Lifestyle {
        self.lifestyle
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    /// The clinical fields as `(label, value)` pairs, in report order.
    ///
    /// The contact email is delivery metadata and is not included.
    pub fn labelled_fields(&self) -> [(&'static str, String); 8] {
        [
            ("Age", self.age.to_string()),
            ("Gender", self.gender.label().to_string()),
            ("Location", self.region.to_string()),
            ("Symptom Duration", self.duration.label().to_string()),
            ("Symptoms", self.symptoms.clone()),
            ("Medical History", self.history.clone()),
            ("Medications", self.medications.clone()),
            ("Lifestyle", self.lifestyle.label().to_string()),
        ]
    }
}
