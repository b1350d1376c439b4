//! Authoritative address resolution.
//!
//! A household's orders ship to the most recently reported complete survey
//! address when one exists, and to the head-of-household's enrollment
//! address otherwise. Contact and delivery fields always come from
//! enrollment: symptom surveys carry no dropoff instructions.

use hearth_core::{
    non_blank, ExportColumn, HearthError, HouseholdId, ParticipantRecord, RecordSnapshot, Result,
    StudySite,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::head::select_head_of_household;

/// The resolved address + contact bundle for one household.
///
/// Derived and ephemeral: recomputed from the snapshot every run, restricted
/// to the export column set on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub street_address: Option<String>,
    pub apt_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    /// Zipcode normalized to an integer when present, else empty.
    pub zipcode: Option<u32>,

    /// Preferred first name when present, legal first name otherwise.
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub delivery_instructions: Option<String>,

    /// Normalized project/location of the household.
    pub site: StudySite,
}

impl ResolvedAddress {
    /// True unless street, city, and state are all empty.
    ///
    /// Orders must never ship without a deliverable address; callers skip
    /// households failing this test.
    pub fn is_deliverable(&self) -> bool {
        non_blank(&self.street_address).is_some()
            || non_blank(&self.city).is_some()
            || non_blank(&self.state).is_some()
    }

    /// The bundle's value for one export column.
    pub fn export_value(&self, column: ExportColumn) -> serde_json::Value {
        fn text(value: &Option<String>) -> serde_json::Value {
            match value {
                Some(v) => serde_json::Value::String(v.clone()),
                None => serde_json::Value::Null,
            }
        }

        match column {
            ExportColumn::StreetAddress => text(&self.street_address),
            ExportColumn::AptNumber => text(&self.apt_number),
            ExportColumn::City => text(&self.city),
            ExportColumn::State => text(&self.state),
            ExportColumn::Zipcode => match self.zipcode {
                Some(zip) => serde_json::Value::from(zip),
                None => serde_json::Value::Null,
            },
            ExportColumn::FirstName => text(&self.first_name),
            ExportColumn::LastName => text(&self.last_name),
            ExportColumn::Email => text(&self.email),
            ExportColumn::Phone => text(&self.phone),
            ExportColumn::DeliveryInstructions => text(&self.delivery_instructions),
            ExportColumn::Site => serde_json::Value::String(self.site.label().to_string()),
        }
    }
}

/// Resolve the authoritative address bundle for one household.
pub fn resolve_household_address(
    snapshot: &RecordSnapshot,
    household: &HouseholdId,
) -> Result<ResolvedAddress> {
    let records = snapshot.household_records(household)?;
    let enrollment = enrollment_record(&records, household)?;
    let survey = most_recent_survey_address(&records, household);

    // Survey-sourced address fields supersede enrollment; everything else
    // stays anchored to the enrollment record.
    let (street_address, apt_number, city, state, raw_zipcode) = match survey {
        Some(survey) => (
            survey.survey_street_address.clone(),
            survey.survey_apt_number.clone(),
            survey.survey_city.clone(),
            survey.survey_state.clone(),
            survey.survey_zipcode.clone(),
        ),
        None => (
            enrollment.street_address.clone(),
            enrollment.apt_number.clone(),
            enrollment.city.clone(),
            enrollment.state.clone(),
            enrollment.zipcode.clone(),
        ),
    };

    debug!(%household, "setting address site and zipcode");
    Ok(ResolvedAddress {
        street_address,
        apt_number,
        city,
        state,
        zipcode: normalize_zipcode(&raw_zipcode),
        first_name: best_first_name(enrollment),
        last_name: enrollment.last_name.clone(),
        email: enrollment.email.clone(),
        phone: enrollment.phone.clone(),
        delivery_instructions: enrollment.delivery_instructions.clone(),
        site: StudySite::from_code(snapshot.project_code(household)),
    })
}

/// The head-of-household's enrollment-event row.
fn enrollment_record<'a>(
    records: &[&'a ParticipantRecord],
    household: &HouseholdId,
) -> Result<&'a ParticipantRecord> {
    let head = select_head_of_household(records, household)?;

    debug!(%household, head, "fetching head of household enrollment address");
    records
        .iter()
        .find(|r| r.event.participant == head && r.is_enrollment_event())
        .copied()
        .ok_or_else(|| HearthError::MissingEnrollmentRecord {
            household: household.clone(),
            participant: head,
        })
}

/// The most recent symptom survey carrying a complete address, if any.
fn most_recent_survey_address<'a>(
    records: &[&'a ParticipantRecord],
    household: &HouseholdId,
) -> Option<&'a ParticipantRecord> {
    debug!(%household, "selecting the most recent symptom survey address");

    let mut surveys: Vec<&ParticipantRecord> = records
        .iter()
        .filter(|r| r.is_symptom_survey() && r.has_survey_address())
        .copied()
        .collect();

    // Most recently completed first; surveys without a date sort last. The
    // sort is stable, so equal dates keep their snapshot order.
    surveys.sort_by(|a, b| b.survey_date.cmp(&a.survey_date));

    match surveys.into_iter().next() {
        Some(survey) => {
            debug!(%household, "survey address found, superseding enrollment address");
            Some(survey)
        }
        None => {
            debug!(%household, "no survey address found, using enrollment address");
            None
        }
    }
}

/// Preferred first name when present, legal first name otherwise.
fn best_first_name(enrollment: &ParticipantRecord) -> Option<String> {
    if non_blank(&enrollment.pref_first_name).is_some() {
        enrollment.pref_first_name.clone()
    } else {
        enrollment.first_name.clone()
    }
}

/// Zipcodes arrive as free text; keep the integer when one can be read.
fn normalize_zipcode(raw: &Option<String>) -> Option<u32> {
    let text = non_blank(raw)?;
    text.parse::<u32>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().map(|zip| zip as u32))
}
