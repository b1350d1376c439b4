//! Participant record rows of the longitudinal snapshot.
//!
//! A record is one row keyed by (household, event). Enrollment-event rows
//! carry the household's registration address and contact data; repeating
//! symptom survey rows may carry an updated address and the flags that
//! trigger fulfillment. Records are never mutated: resolution produces
//! derived views, not edits to source rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{EventKey, HouseholdId};

/// Repeating instruments appearing in the snapshot. An absent instrument
/// marks a non-repeating enrollment-event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    SymptomSurvey,
}

/// One row of the record snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantRecord {
    /// Household this row belongs to.
    pub household: HouseholdId,

    /// Event-instance key within the household.
    pub event: EventKey,

    /// Repeating instrument, absent on enrollment-event rows.
    pub instrument: Option<Instrument>,

    // Enrollment-scoped address fields.
    pub street_address: Option<String>,
    pub apt_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,

    // Survey-scoped address variants, reported on symptom surveys.
    pub survey_street_address: Option<String>,
    pub survey_apt_number: Option<String>,
    pub survey_city: Option<String>,
    pub survey_state: Option<String>,
    pub survey_zipcode: Option<String>,

    // Contact and delivery fields, enrollment-sourced.
    pub first_name: Option<String>,
    pub pref_first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub delivery_instructions: Option<String>,

    /// Completion date of a symptom survey.
    pub survey_date: Option<NaiveDate>,

    /// Date the survey requested an order.
    pub order_date: Option<NaiveDate>,

    /// Return tracking number once an order has been fulfilled.
    pub tracking_number: Option<String>,

    /// First and second pickup-time-preference codes.
    pub pickup_1: Option<i64>,
    pub pickup_2: Option<i64>,

    /// Whether the survey triggered a swab kit request.
    pub swab_trigger: Option<bool>,

    /// Pointer naming the head-of-household participant index.
    pub head_of_household: Option<u32>,

    /// Raw project/location code, recorded once per household on its
    /// canonical first event.
    pub project_code: Option<i64>,

    /// Resupply kits requested by this survey.
    pub resupply_kits_requested: Option<u32>,

    /// Welcome kits requested by this survey.
    pub welcome_kits_requested: Option<u32>,
}

impl ParticipantRecord {
    /// True if this row is a repeating symptom survey.
    pub fn is_symptom_survey(&self) -> bool {
        self.instrument == Some(Instrument::SymptomSurvey)
    }

    /// True if this row is a non-repeating enrollment-event row.
    pub fn is_enrollment_event(&self) -> bool {
        self.instrument.is_none()
    }

    /// True if the survey-scoped street/city/state are not all empty.
    ///
    /// Non-empty values for these three fields are what marks a survey
    /// address as complete enough to supersede the enrollment address.
    pub fn has_survey_address(&self) -> bool {
        non_blank(&self.survey_street_address).is_some()
            || non_blank(&self.survey_city).is_some()
            || non_blank(&self.survey_state).is_some()
    }

    /// True if no tracking number has been assigned yet.
    pub fn is_unfulfilled(&self) -> bool {
        non_blank(&self.tracking_number).is_none()
    }

    /// True if at least one pickup-time-preference code is present.
    pub fn has_pickup_preference(&self) -> bool {
        self.pickup_1.is_some() || self.pickup_2.is_some()
    }
}

/// Treat empty and whitespace-only strings as absent.
///
/// Remote record exports encode missing values as empty strings, so every
/// presence test in the engine goes through this helper.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}
