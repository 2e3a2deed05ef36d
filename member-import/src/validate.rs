//! Row validation
//!
//! Fail-fast per row: the first broken rule produces the row's only error.
//! Check order: required fields, name length, national ID, email, phone, age.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use shared::error::{AppError, ErrorCode};
use shared::models::{MemberField, MemberRecord};
use shared::util::to_iso;

use crate::draft::MemberDraft;
use crate::normalize::{MAX_AGE, MIN_AGE, NATIONAL_ID_DIGITS, is_valid_national_id, is_valid_phone};

// ── Rule constants ──────────────────────────────────────────────────

/// Minimum full-name length, in characters
pub const MIN_NAME_LEN: usize = 3;

/// Basic email shape: something@something.something, no whitespace
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Which entry point is validating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Spreadsheet rows; membership number optional
    #[default]
    QuickImport,
    /// Single-record form; membership number required
    FullForm,
}

impl ValidationMode {
    /// Fields that must be non-empty, in reporting order
    pub fn required_fields(self) -> &'static [MemberField] {
        match self {
            Self::QuickImport => &[
                MemberField::Name,
                MemberField::NationalId,
                MemberField::Email,
                MemberField::PhoneNumber,
            ],
            Self::FullForm => &[
                MemberField::Name,
                MemberField::NationalId,
                MemberField::Email,
                MemberField::PhoneNumber,
                MemberField::MembershipNumber,
            ],
        }
    }
}

/// Per-row failure, carrying the 1-based row number shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub code: ErrorCode,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            row,
            code,
            message: message.into(),
        }
    }

    /// Duplicate of an existing record on `field`
    pub fn duplicate(row: usize, field: MemberField) -> Self {
        Self::new(
            row,
            ErrorCode::DuplicateMember,
            format!("عضو مكرر: {} مسجل بالفعل", field.label_ar()),
        )
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "الصف {}: {}", self.row, self.message)
    }
}

impl std::error::Error for RowError {}

impl From<RowError> for AppError {
    fn from(err: RowError) -> Self {
        AppError::with_message(err.code, err.to_string()).with_detail("row", err.row)
    }
}

fn field_value(draft: &MemberDraft, field: MemberField) -> &str {
    match field {
        MemberField::Name => &draft.name,
        MemberField::NationalId => &draft.national_id,
        MemberField::PhoneNumber => &draft.phone_number,
        MemberField::Email => &draft.email,
        MemberField::MembershipNumber => &draft.membership_number,
        MemberField::Job => &draft.job,
        MemberField::Address => &draft.address,
        MemberField::RegistrationDate => &draft.registration_date,
        // Enum-valued and derived fields always carry a value
        MemberField::Gender
        | MemberField::Religion
        | MemberField::Age
        | MemberField::PartyUnit
        | MemberField::MembershipType
        | MemberField::DateOfBirth => "-",
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Validate a draft and build the canonical record
///
/// `row` is the 1-based row number used in the error message; `now` stamps
/// `createdAt` and `updatedAt`.
pub fn validate_draft(
    row: usize,
    draft: &MemberDraft,
    mode: ValidationMode,
    now: DateTime<Utc>,
) -> Result<MemberRecord, RowError> {
    let missing: Vec<&str> = mode
        .required_fields()
        .iter()
        .filter(|field| field_value(draft, **field).trim().is_empty())
        .map(|field| field.label_ar())
        .collect();
    if !missing.is_empty() {
        return Err(RowError::new(
            row,
            ErrorCode::RequiredField,
            format!("حقول مطلوبة مفقودة: {}", missing.join("، ")),
        ));
    }

    let name = draft.name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        return Err(RowError::new(
            row,
            ErrorCode::NameTooShort,
            format!("الاسم يجب أن يتكون من {MIN_NAME_LEN} أحرف على الأقل"),
        ));
    }

    if !is_valid_national_id(&draft.national_id) {
        return Err(RowError::new(
            row,
            ErrorCode::NationalIdInvalid,
            format!(
                "الرقم القومي يجب أن يتكون من {NATIONAL_ID_DIGITS} رقماً (تم إدخال {})",
                draft.national_id.chars().count()
            ),
        ));
    }

    if !is_valid_email(&draft.email) {
        return Err(RowError::new(
            row,
            ErrorCode::EmailInvalid,
            format!("البريد الإلكتروني غير صالح: {}", draft.email),
        ));
    }

    if !is_valid_phone(&draft.phone_number) {
        return Err(RowError::new(
            row,
            ErrorCode::PhoneInvalid,
            "رقم الهاتف يجب أن يبدأ بـ 01 ويتكون من 11 رقماً",
        ));
    }

    let age = match u8::try_from(draft.age) {
        Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => age,
        _ => {
            return Err(RowError::new(
                row,
                ErrorCode::AgeOutOfRange,
                format!("العمر يجب أن يكون بين {MIN_AGE} و {MAX_AGE} (القيمة {})", draft.age),
            ));
        }
    };

    let stamp = to_iso(now);
    Ok(MemberRecord {
        name: name.to_string(),
        national_id: draft.national_id.clone(),
        gender: draft.gender,
        religion: draft.religion,
        age,
        phone_number: draft.phone_number.clone(),
        email: draft.email.clone(),
        job: draft.job.trim().to_string(),
        address: draft.address.trim().to_string(),
        party_unit: draft.party_unit,
        membership_number: draft.membership_number.trim().to_string(),
        membership_type: draft.membership_type,
        registration_date: draft.registration_date.clone(),
        created_at: stamp.clone(),
        updated_at: stamp,
    })
}
