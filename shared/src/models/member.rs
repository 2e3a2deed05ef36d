//! Member Model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical member-record attribute that spreadsheet headers resolve to.
///
/// The declaration order is the positional fallback order used when a sheet
/// carries no recognisable header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberField {
    Name,
    NationalId,
    Gender,
    Religion,
    Age,
    PhoneNumber,
    Email,
    Job,
    Address,
    PartyUnit,
    MembershipNumber,
    MembershipType,
    RegistrationDate,
    DateOfBirth,
}

impl MemberField {
    /// All fields in declared order
    pub const ALL: [MemberField; 14] = [
        Self::Name,
        Self::NationalId,
        Self::Gender,
        Self::Religion,
        Self::Age,
        Self::PhoneNumber,
        Self::Email,
        Self::Job,
        Self::Address,
        Self::PartyUnit,
        Self::MembershipNumber,
        Self::MembershipType,
        Self::RegistrationDate,
        Self::DateOfBirth,
    ];

    /// camelCase identifier used in JSON payloads
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::NationalId => "nationalId",
            Self::Gender => "gender",
            Self::Religion => "religion",
            Self::Age => "age",
            Self::PhoneNumber => "phoneNumber",
            Self::Email => "email",
            Self::Job => "job",
            Self::Address => "address",
            Self::PartyUnit => "partyUnit",
            Self::MembershipNumber => "membershipNumber",
            Self::MembershipType => "membershipType",
            Self::RegistrationDate => "registrationDate",
            Self::DateOfBirth => "dateOfBirth",
        }
    }

    /// Arabic column label (export header, error messages)
    pub const fn label_ar(&self) -> &'static str {
        match self {
            Self::Name => "الاسم بالكامل",
            Self::NationalId => "الرقم القومي",
            Self::Gender => "الجنس",
            Self::Religion => "الديانة",
            Self::Age => "العمر",
            Self::PhoneNumber => "رقم الهاتف",
            Self::Email => "البريد الإلكتروني",
            Self::Job => "الوظيفة",
            Self::Address => "العنوان",
            Self::PartyUnit => "الوحدة الحزبية",
            Self::MembershipNumber => "رقم العضوية",
            Self::MembershipType => "نوع العضوية",
            Self::RegistrationDate => "تاريخ التسجيل",
            Self::DateOfBirth => "تاريخ الميلاد",
        }
    }
}

impl fmt::Display for MemberField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender (الجنس)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub const fn label_ar(&self) -> &'static str {
        match self {
            Self::Male => "ذكر",
            Self::Female => "أنثى",
        }
    }
}

/// Religion (الديانة)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Religion {
    #[default]
    #[serde(rename = "مسلم")]
    Muslim,
    #[serde(rename = "مسيحي")]
    Christian,
}

impl Religion {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Muslim => "مسلم",
            Self::Christian => "مسيحي",
        }
    }
}

/// Membership role (نوع العضوية)
///
/// Serialized with the Arabic role name, which is also what the registry
/// API stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipType {
    #[default]
    #[serde(rename = "عضو عادي")]
    Regular,
    #[serde(rename = "عضو عامل")]
    Active,
    #[serde(rename = "عضو مؤسس")]
    Founding,
    #[serde(rename = "عضو شرفي")]
    Honorary,
    #[serde(rename = "أمين الوحدة")]
    UnitSecretary,
    #[serde(rename = "أمين مساعد")]
    AssistantSecretary,
    #[serde(rename = "أمين الصندوق")]
    Treasurer,
    #[serde(rename = "أمين التنظيم")]
    OrganizationSecretary,
    #[serde(rename = "أمين الشباب")]
    YouthSecretary,
    #[serde(rename = "أمينة المرأة")]
    WomenSecretary,
    #[serde(rename = "أمين الإعلام")]
    MediaSecretary,
    #[serde(rename = "أمين العضوية")]
    MembershipSecretary,
    #[serde(rename = "عضو هيئة المكتب")]
    BureauMember,
}

impl MembershipType {
    pub const ALL: [MembershipType; 13] = [
        Self::Regular,
        Self::Active,
        Self::Founding,
        Self::Honorary,
        Self::UnitSecretary,
        Self::AssistantSecretary,
        Self::Treasurer,
        Self::OrganizationSecretary,
        Self::YouthSecretary,
        Self::WomenSecretary,
        Self::MediaSecretary,
        Self::MembershipSecretary,
        Self::BureauMember,
    ];

    /// English slug accepted by the API filters and by imports
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Active => "active",
            Self::Founding => "founding",
            Self::Honorary => "honorary",
            Self::UnitSecretary => "unit_secretary",
            Self::AssistantSecretary => "assistant_secretary",
            Self::Treasurer => "treasurer",
            Self::OrganizationSecretary => "organization_secretary",
            Self::YouthSecretary => "youth_secretary",
            Self::WomenSecretary => "women_secretary",
            Self::MediaSecretary => "media_secretary",
            Self::MembershipSecretary => "membership_secretary",
            Self::BureauMember => "bureau_member",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "عضو عادي",
            Self::Active => "عضو عامل",
            Self::Founding => "عضو مؤسس",
            Self::Honorary => "عضو شرفي",
            Self::UnitSecretary => "أمين الوحدة",
            Self::AssistantSecretary => "أمين مساعد",
            Self::Treasurer => "أمين الصندوق",
            Self::OrganizationSecretary => "أمين التنظيم",
            Self::YouthSecretary => "أمين الشباب",
            Self::WomenSecretary => "أمينة المرأة",
            Self::MediaSecretary => "أمين الإعلام",
            Self::MembershipSecretary => "أمين العضوية",
            Self::BureauMember => "عضو هيئة المكتب",
        }
    }
}

/// Party unit (الوحدة الحزبية)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyUnit {
    #[default]
    #[serde(rename = "وراق الحضر")]
    WarraqAlHadar,
    #[serde(rename = "وراق العرب")]
    WarraqAlArab,
    #[serde(rename = "جزيرة الوراق")]
    WarraqIsland,
    #[serde(rename = "جزيرة محمد")]
    MohamedIsland,
    #[serde(rename = "طناش")]
    Tanash,
    #[serde(rename = "عزبة المفتي")]
    EzbetElMofty,
}

impl PartyUnit {
    /// Whitelist order; the first entry is the default unit
    pub const ALL: [PartyUnit; 6] = [
        Self::WarraqAlHadar,
        Self::WarraqAlArab,
        Self::WarraqIsland,
        Self::MohamedIsland,
        Self::Tanash,
        Self::EzbetElMofty,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WarraqAlHadar => "وراق الحضر",
            Self::WarraqAlArab => "وراق العرب",
            Self::WarraqIsland => "جزيرة الوراق",
            Self::MohamedIsland => "جزيرة محمد",
            Self::Tanash => "طناش",
            Self::EzbetElMofty => "عزبة المفتي",
        }
    }
}

/// Canonical member record (عضو)
///
/// Only ever produced by a successful validation; every field already
/// satisfies the registry's format rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub name: String,
    pub national_id: String,
    pub gender: Gender,
    pub religion: Religion,
    pub age: u8,
    pub phone_number: String,
    pub email: String,
    pub job: String,
    pub address: String,
    pub party_unit: PartyUnit,
    pub membership_number: String,
    pub membership_type: MembershipType,
    pub registration_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Member as stored by the registry API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(flatten)]
    pub record: MemberRecord,
}
