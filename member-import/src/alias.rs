//! Column alias resolution
//!
//! Maps raw header cells (Arabic or English, any case, with stray spaces,
//! hyphens or underscores) to the canonical [`MemberField`] they name.

use std::collections::HashMap;

use shared::models::MemberField;

use crate::sheet::Cell;

// ── Alias tables ────────────────────────────────────────────────────

pub const NAME_ALIASES: &[&str] = &[
    "الاسم",
    "الاسم بالكامل",
    "الاسم الكامل",
    "الاسم رباعي",
    "اسم العضو",
    "name",
    "full name",
    "member name",
];

pub const NATIONAL_ID_ALIASES: &[&str] = &[
    "الرقم القومي",
    "الرقم القومى",
    "رقم قومي",
    "رقم البطاقة",
    "national id",
    "national number",
    "nid",
    "id number",
];

pub const GENDER_ALIASES: &[&str] = &["الجنس", "النوع", "gender", "sex"];

pub const RELIGION_ALIASES: &[&str] = &["الديانة", "الدين", "religion"];

pub const AGE_ALIASES: &[&str] = &["العمر", "السن", "age"];

pub const PHONE_ALIASES: &[&str] = &[
    "رقم الهاتف",
    "الهاتف",
    "رقم التليفون",
    "التليفون",
    "رقم الموبايل",
    "الموبايل",
    "phone",
    "phone number",
    "mobile",
    "mobile number",
];

pub const EMAIL_ALIASES: &[&str] = &[
    "البريد الإلكتروني",
    "البريد الالكتروني",
    "البريد",
    "الإيميل",
    "الايميل",
    "email",
    "e-mail",
    "email address",
];

pub const JOB_ALIASES: &[&str] = &["الوظيفة", "المهنة", "العمل", "job", "job title", "occupation"];

pub const ADDRESS_ALIASES: &[&str] = &["العنوان", "محل الإقامة", "address"];

pub const PARTY_UNIT_ALIASES: &[&str] = &["الوحدة الحزبية", "الوحدة", "party unit", "unit"];

pub const MEMBERSHIP_NUMBER_ALIASES: &[&str] = &[
    "رقم العضوية",
    "رقم العضويه",
    "membership number",
    "membership no",
    "member number",
];

pub const MEMBERSHIP_TYPE_ALIASES: &[&str] = &[
    "نوع العضوية",
    "نوع العضويه",
    "الصفة",
    "membership type",
    "role",
];

pub const REGISTRATION_DATE_ALIASES: &[&str] = &[
    "تاريخ التسجيل",
    "تاريخ الانضمام",
    "تاريخ الإنضمام",
    "registration date",
    "join date",
];

pub const DATE_OF_BIRTH_ALIASES: &[&str] = &[
    "تاريخ الميلاد",
    "date of birth",
    "birth date",
    "birthdate",
    "dob",
];

/// Built-in alias table, one entry per canonical field
pub const DEFAULT_ALIAS_TABLE: &[(MemberField, &[&str])] = &[
    (MemberField::Name, NAME_ALIASES),
    (MemberField::NationalId, NATIONAL_ID_ALIASES),
    (MemberField::Gender, GENDER_ALIASES),
    (MemberField::Religion, RELIGION_ALIASES),
    (MemberField::Age, AGE_ALIASES),
    (MemberField::PhoneNumber, PHONE_ALIASES),
    (MemberField::Email, EMAIL_ALIASES),
    (MemberField::Job, JOB_ALIASES),
    (MemberField::Address, ADDRESS_ALIASES),
    (MemberField::PartyUnit, PARTY_UNIT_ALIASES),
    (MemberField::MembershipNumber, MEMBERSHIP_NUMBER_ALIASES),
    (MemberField::MembershipType, MEMBERSHIP_TYPE_ALIASES),
    (MemberField::RegistrationDate, REGISTRATION_DATE_ALIASES),
    (MemberField::DateOfBirth, DATE_OF_BIRTH_ALIASES),
];

/// Lookup key: lowercase, with whitespace, hyphens, underscores and dots removed
pub fn header_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '.' | 'ـ'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Header → canonical field resolver
///
/// Built once from immutable alias tables; resolution is a single hash lookup.
#[derive(Debug, Clone)]
pub struct ColumnAliasResolver {
    index: HashMap<String, MemberField>,
}

impl ColumnAliasResolver {
    /// Build a resolver from custom alias tables
    ///
    /// When two fields claim the same spelling, the earlier table entry keeps it.
    pub fn with_tables(tables: &[(MemberField, &[&str])]) -> Self {
        let mut index = HashMap::new();
        for (field, aliases) in tables {
            index.entry(header_key(field.as_str())).or_insert(*field);
            for alias in *aliases {
                index.entry(header_key(alias)).or_insert(*field);
            }
        }
        Self { index }
    }

    /// Resolve a header string
    pub fn resolve(&self, raw: &str) -> Option<MemberField> {
        let key = header_key(raw);
        if key.is_empty() {
            return None;
        }
        self.index.get(&key).copied()
    }

    /// Resolve a header cell; numbers, booleans and dates never match
    pub fn resolve_cell(&self, cell: &Cell) -> Option<MemberField> {
        match cell {
            Cell::Text(s) => self.resolve(s),
            _ => None,
        }
    }
}

impl Default for ColumnAliasResolver {
    fn default() -> Self {
        Self::with_tables(DEFAULT_ALIAS_TABLE)
    }
}
