//! Intake → prompt rendering.
//!
//! The template is fixed. Each clinical field is interpolated exactly once,
//! in report order, and the closing instructions refer back to "the location
//! given above" instead of repeating the region. The instruction text avoids
//! the literal enum labels (`Male`, `Yes`, `< 1 day`, ...) and digits so a
//! field value does not collide with template wording.

use medline_core::models::intake::Intake;

const PREAMBLE: &str = "\
You are a responsible AI health assistant. \
Provide non-diagnostic guidance based on the input:";

const INSTRUCTIONS: &str = "\
- List possible causes (based on the symptoms)
- Suggest lifestyle or diet recommendations
- Indicate the urgency level (Low, Medium, High)
- Recommend visiting a local doctor or clinic in the location given above. Use a friendly tone.

Reminder: this is not a diagnosis.";

/// Render the advice prompt for one intake.
pub fn compose(intake: &Intake) -> String {
    format!(
        "{PREAMBLE}\n\n\
         Age: {age}\n\
         Gender: {gender}\n\
         Location: {location}\n\
         Symptom duration: {duration}\n\
         Symptoms: {symptoms}\n\
         Medical history: {history}\n\
         Medications: {medications}\n\
         Smokes or drinks alcohol: {lifestyle}\n\n\
         {INSTRUCTIONS}",
        age = intake.age(),
        gender = intake.gender().label(),
        location = intake.region(),
        duration = intake.duration().label(),
        symptoms = intake.symptoms(),
        history = intake.history(),
        medications = intake.medications(),
        lifestyle = intake.lifestyle().label(),
    )
}
