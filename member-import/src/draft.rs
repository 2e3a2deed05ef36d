//! Member drafts
//!
//! A draft is a mapped and normalized row that has not been validated yet.
//! It doubles as the form state the single-record import prefills.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{Gender, MemberField, MembershipType, PartyUnit, Religion};

use crate::mapper::MappedRow;
use crate::normalize::{
    DEFAULT_AGE, normalize_date, normalize_email, normalize_gender, normalize_membership_type,
    normalize_national_id, normalize_party_unit, normalize_phone, normalize_religion, resolve_age,
};

/// Time source for one import run
///
/// Ages, default registration dates and timestamps all derive from `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportClock {
    pub now: DateTime<Utc>,
}

impl ImportClock {
    pub fn current() -> Self {
        Self { now: Utc::now() }
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// Unvalidated member candidate / form state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    /// Digits only
    pub national_id: String,
    pub gender: Gender,
    pub religion: Religion,
    /// Unclamped when taken from an explicit age column
    pub age: i64,
    /// Digits only
    pub phone_number: String,
    pub email: String,
    pub job: String,
    pub address: String,
    pub party_unit: PartyUnit,
    pub membership_number: String,
    pub membership_type: MembershipType,
    /// `YYYY-MM-DD`
    pub registration_date: String,
}

impl Default for MemberDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            national_id: String::new(),
            gender: Gender::default(),
            religion: Religion::default(),
            age: i64::from(DEFAULT_AGE),
            phone_number: String::new(),
            email: String::new(),
            job: String::new(),
            address: String::new(),
            party_unit: PartyUnit::default(),
            membership_number: String::new(),
            membership_type: MembershipType::default(),
            registration_date: String::new(),
        }
    }
}

impl MemberDraft {
    /// Normalize a mapped row into a draft
    ///
    /// Fields without a mapped value keep their defaults.
    pub fn from_mapped(row: &MappedRow, clock: &ImportClock) -> Self {
        let text = |field: MemberField| row.get(&field).map(String::as_str);
        let or_empty = |field: MemberField| text(field).unwrap_or("").to_string();

        let registration_date = text(MemberField::RegistrationDate)
            .and_then(normalize_date)
            .unwrap_or_else(|| clock.today())
            .format("%Y-%m-%d")
            .to_string();

        Self {
            name: or_empty(MemberField::Name),
            national_id: normalize_national_id(text(MemberField::NationalId).unwrap_or("")),
            gender: normalize_gender(text(MemberField::Gender).unwrap_or("")),
            religion: normalize_religion(text(MemberField::Religion).unwrap_or("")),
            age: resolve_age(
                text(MemberField::Age),
                text(MemberField::DateOfBirth),
                clock.now,
            ),
            phone_number: normalize_phone(text(MemberField::PhoneNumber).unwrap_or("")),
            email: normalize_email(text(MemberField::Email).unwrap_or("")),
            job: or_empty(MemberField::Job),
            address: or_empty(MemberField::Address),
            party_unit: normalize_party_unit(text(MemberField::PartyUnit).unwrap_or("")),
            membership_number: or_empty(MemberField::MembershipNumber),
            membership_type: normalize_membership_type(
                text(MemberField::MembershipType).unwrap_or(""),
            ),
            registration_date,
        }
    }
}
