//! Field normalizers
//!
//! Every function here is total: unknown input maps to a documented default
//! instead of failing, so callers always receive a member of the closed
//! enumeration. Format *validity* (national ID length, phone pattern) is
//! judged later by the validator.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use shared::models::{Gender, MembershipType, PartyUnit, Religion};

use crate::sheet::Cell;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 80;
/// Age used when no usable age or birth date is present
pub const DEFAULT_AGE: u8 = MIN_AGE;

pub const NATIONAL_ID_DIGITS: usize = 14;

const DAYS_PER_YEAR: f64 = 365.25;
const SECONDS_PER_DAY: f64 = 86_400.0;
/// Largest serial Excel accepts (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;
/// Bare four-digit text in this range is a birth year, not a serial
const YEAR_ONLY_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

// ── Alias tables ────────────────────────────────────────────────────

pub const MALE_ALIASES: &[&str] = &["ذكر", "male", "m"];
pub const FEMALE_ALIASES: &[&str] = &["أنثى", "انثى", "female", "f"];

pub const RELIGION_ALIASES: &[(&str, Religion)] = &[
    ("مسلم", Religion::Muslim),
    ("مسلمة", Religion::Muslim),
    ("مسلمه", Religion::Muslim),
    ("اسلام", Religion::Muslim),
    ("إسلام", Religion::Muslim),
    ("muslim", Religion::Muslim),
    ("islam", Religion::Muslim),
    ("مسيحي", Religion::Christian),
    ("مسيحى", Religion::Christian),
    ("مسيحية", Religion::Christian),
    ("مسيحيه", Religion::Christian),
    ("قبطي", Religion::Christian),
    ("christian", Religion::Christian),
];

/// Extra spellings on top of each role's Arabic name and English slug
pub const MEMBERSHIP_TYPE_EXTRA_ALIASES: &[(&str, MembershipType)] = &[
    ("عضو", MembershipType::Regular),
    ("member", MembershipType::Regular),
    ("عضو عامل", MembershipType::Active),
    ("مؤسس", MembershipType::Founding),
    ("أمين", MembershipType::UnitSecretary),
    ("امين الوحدة", MembershipType::UnitSecretary),
    ("secretary", MembershipType::UnitSecretary),
    ("امين مساعد", MembershipType::AssistantSecretary),
    ("أمين صندوق", MembershipType::Treasurer),
    ("امين الصندوق", MembershipType::Treasurer),
    ("امين صندوق", MembershipType::Treasurer),
    ("امين التنظيم", MembershipType::OrganizationSecretary),
    ("امين الشباب", MembershipType::YouthSecretary),
    ("امينة المرأة", MembershipType::WomenSecretary),
    ("أمينة المراة", MembershipType::WomenSecretary),
    ("امين الاعلام", MembershipType::MediaSecretary),
    ("امين العضوية", MembershipType::MembershipSecretary),
    ("هيئة المكتب", MembershipType::BureauMember),
];

// ── Text helpers ────────────────────────────────────────────────────

/// Replace Arabic-Indic and Eastern Arabic-Indic digits with ASCII digits
pub fn ascii_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            _ => c,
        })
        .collect()
}

/// Keep only the digits of `raw` (after Arabic digit transliteration)
pub fn digits_only(raw: &str) -> String {
    ascii_digits(raw)
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

fn lookup_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ── Enumerations ────────────────────────────────────────────────────

/// Gender; anything unrecognised is male
pub fn normalize_gender(raw: &str) -> Gender {
    let key = lookup_key(raw);
    if FEMALE_ALIASES.contains(&key.as_str()) {
        Gender::Female
    } else {
        Gender::Male
    }
}

/// Religion; unrecognised or empty is مسلم
pub fn normalize_religion(raw: &str) -> Religion {
    let key = lookup_key(raw);
    RELIGION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, religion)| *religion)
        .unwrap_or_default()
}

/// Membership role; unrecognised or empty is عضو عادي
pub fn normalize_membership_type(raw: &str) -> MembershipType {
    let key = lookup_key(raw);
    if key.is_empty() {
        return MembershipType::default();
    }
    let slug = key.replace([' ', '-'], "_");
    MembershipType::ALL
        .iter()
        .copied()
        .find(|t| t.as_str() == key || t.slug() == slug)
        .or_else(|| {
            MEMBERSHIP_TYPE_EXTRA_ALIASES
                .iter()
                .find(|(alias, _)| *alias == key)
                .map(|(_, t)| *t)
        })
        .unwrap_or_default()
}

/// Party unit by exact name; anything else is the first unit
///
/// Unlike the other enumerations there is no alias or case folding here.
pub fn normalize_party_unit(raw: &str) -> PartyUnit {
    PartyUnit::ALL
        .iter()
        .copied()
        .find(|unit| unit.as_str() == raw)
        .unwrap_or_default()
}

// ── Identity and contact ────────────────────────────────────────────

/// National ID digits (valid iff exactly 14 remain)
pub fn normalize_national_id(raw: &str) -> String {
    digits_only(raw)
}

pub fn is_valid_national_id(digits: &str) -> bool {
    digits.len() == NATIONAL_ID_DIGITS && digits.chars().all(|c| c.is_ascii_digit())
}

/// Phone digits (valid iff `01` followed by 9 digits)
pub fn normalize_phone(raw: &str) -> String {
    digits_only(raw)
}

pub fn is_valid_phone(digits: &str) -> bool {
    digits.len() == 11 && digits.starts_with("01") && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ── Dates and age ───────────────────────────────────────────────────

/// Excel serial day number → timestamp (days since 1899-12-30, UTC)
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= 0.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    epoch.checked_add_signed(Duration::seconds(seconds))
}

/// Parse a date written as text, a bare year (Jan 1), or a numeric Excel serial
pub fn parse_date_text(raw: &str) -> Option<NaiveDateTime> {
    let text = ascii_digits(raw.trim());
    if text.is_empty() {
        return None;
    }
    if let Some(year) = parse_year(&text) {
        return NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0);
    }
    if let Ok(serial) = text.parse::<f64>() {
        return excel_serial_to_datetime(serial);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
            return Some(dt);
        }
    }
    ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_year(text: &str) -> Option<i32> {
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok().filter(|year| YEAR_ONLY_RANGE.contains(year))
}

/// Calendar date of a text or serial date
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    parse_date_text(raw).map(|dt| dt.date())
}

/// Whole years between `dob` and `now`, on a 365.25-day year, clamped
fn age_at(dob: NaiveDateTime, now: DateTime<Utc>) -> u8 {
    let elapsed = now.naive_utc() - dob;
    let years = (elapsed.num_seconds() as f64 / SECONDS_PER_DAY / DAYS_PER_YEAR).floor();
    if years <= 0.0 {
        return DEFAULT_AGE;
    }
    years.clamp(f64::from(MIN_AGE), f64::from(MAX_AGE)) as u8
}

/// Age from a birth-date cell (native date, Excel serial or date text)
pub fn age_from_birth_date(value: &Cell, now: DateTime<Utc>) -> u8 {
    let dob = match value {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Number(serial) => excel_serial_to_datetime(*serial),
        Cell::Text(text) => parse_date_text(text),
        Cell::Empty | Cell::Bool(_) => None,
    };
    dob.map_or(DEFAULT_AGE, |dob| age_at(dob, now))
}

/// Age from birth-date text as produced by the row mapper
pub fn age_from_birth_text(raw: &str, now: DateTime<Utc>) -> u8 {
    parse_date_text(raw).map_or(DEFAULT_AGE, |dob| age_at(dob, now))
}

/// Explicit age text as a whole number, if it is one
pub fn parse_age(raw: &str) -> Option<i64> {
    let text = ascii_digits(raw.trim());
    if let Ok(age) = text.parse::<i64>() {
        return Some(age);
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

/// Age for a draft: explicit age column, else birth date, else 18
///
/// An explicit age is passed through unclamped so the validator can reject
/// out-of-range values.
pub fn resolve_age(age: Option<&str>, date_of_birth: Option<&str>, now: DateTime<Utc>) -> i64 {
    if let Some(age) = age.and_then(parse_age) {
        return age;
    }
    date_of_birth.map_or(i64::from(DEFAULT_AGE), |dob| {
        i64::from(age_from_birth_text(dob, now))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_gender() {
        assert_eq!(normalize_gender("ذكر"), Gender::Male);
        assert_eq!(normalize_gender(" M "), Gender::Male);
        assert_eq!(normalize_gender("أنثى"), Gender::Female);
        assert_eq!(normalize_gender("انثى"), Gender::Female);
        assert_eq!(normalize_gender("FEMALE"), Gender::Female);
        assert_eq!(normalize_gender("f"), Gender::Female);
        assert_eq!(normalize_gender("???"), Gender::Male);
        assert_eq!(normalize_gender(""), Gender::Male);
    }

    #[test]
    fn test_religion() {
        assert_eq!(normalize_religion("مسيحي"), Religion::Christian);
        assert_eq!(normalize_religion(" Christian "), Religion::Christian);
        assert_eq!(normalize_religion("مسلمة"), Religion::Muslim);
        assert_eq!(normalize_religion("buddhist"), Religion::Muslim);
        assert_eq!(normalize_religion(""), Religion::Muslim);
    }

    #[test]
    fn test_membership_type() {
        assert_eq!(normalize_membership_type("treasurer"), MembershipType::Treasurer);
        assert_eq!(
            normalize_membership_type("Unit Secretary"),
            MembershipType::UnitSecretary
        );
        assert_eq!(
            normalize_membership_type("youth-secretary"),
            MembershipType::YouthSecretary
        );
        assert_eq!(normalize_membership_type("أمين الصندوق"), MembershipType::Treasurer);
        assert_eq!(normalize_membership_type("امين صندوق"), MembershipType::Treasurer);
        assert_eq!(normalize_membership_type("عضو مؤسس"), MembershipType::Founding);
        assert_eq!(normalize_membership_type("رئيس"), MembershipType::Regular);
        assert_eq!(normalize_membership_type(""), MembershipType::Regular);
    }

    #[test]
    fn test_normalizers_are_idempotent() {
        for raw in ["ذكر", "انثى", "female", "x", ""] {
            let once = normalize_gender(raw);
            assert_eq!(normalize_gender(once.as_str()), once);
            assert_eq!(normalize_gender(once.label_ar()), once);
        }
        for raw in ["مسيحية", "islam", "x", ""] {
            let once = normalize_religion(raw);
            assert_eq!(normalize_religion(once.as_str()), once);
        }
        for t in MembershipType::ALL {
            assert_eq!(normalize_membership_type(t.as_str()), t);
            assert_eq!(normalize_membership_type(t.slug()), t);
        }
        for unit in PartyUnit::ALL {
            assert_eq!(normalize_party_unit(unit.as_str()), unit);
        }
    }

    #[test]
    fn test_party_unit_is_exact_match_only() {
        assert_eq!(normalize_party_unit("طناش"), PartyUnit::Tanash);
        assert_eq!(normalize_party_unit("جزيرة محمد"), PartyUnit::MohamedIsland);
        assert_eq!(normalize_party_unit(" طناش"), PartyUnit::WarraqAlHadar);
        assert_eq!(normalize_party_unit("وراق  العرب"), PartyUnit::WarraqAlHadar);
        assert_eq!(normalize_party_unit(""), PartyUnit::WarraqAlHadar);
    }

    #[test]
    fn test_national_id() {
        let id = normalize_national_id("123-456-789-012-34");
        assert_eq!(id, "12345678901234");
        assert!(is_valid_national_id(&id));
        assert!(!is_valid_national_id(&normalize_national_id("1234")));
        assert_eq!(normalize_national_id("٢٩٠٠١٠١١٢٣٤٥٦٧"), "29001011234567");
    }

    #[test]
    fn test_phone() {
        let phone = normalize_phone("010 123 4567 8");
        assert_eq!(phone, "01012345678");
        assert!(is_valid_phone(&phone));
        assert!(!is_valid_phone(&normalize_phone("0201012345678")));
        assert!(!is_valid_phone(&normalize_phone("02123456789")));
        assert!(!is_valid_phone(&normalize_phone("0101234567")));
        assert!(is_valid_phone(&normalize_phone("۰۱۰۱۲۳۴۵۶۷۸")));
    }

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ahmed@Example.COM "), "ahmed@example.com");
    }

    #[test]
    fn test_excel_serial() {
        let dt = excel_serial_to_datetime(45292.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let dt = excel_serial_to_datetime(45292.5).unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "12:00");
        assert!(excel_serial_to_datetime(0.0).is_none());
        assert!(excel_serial_to_datetime(-3.0).is_none());
        assert!(excel_serial_to_datetime(f64::NAN).is_none());
    }

    #[test]
    fn test_parse_date_text_formats() {
        let expected = NaiveDate::from_ymd_opt(2001, 6, 15).unwrap();
        for raw in [
            "2001-06-15",
            "2001/06/15",
            "15/06/2001",
            "15-06-2001",
            "2001-06-15T08:00:00",
            "2001-06-15T08:00:00Z",
            "٢٠٠١-٠٦-١٥",
            "37057",
        ] {
            assert_eq!(normalize_date(raw), Some(expected), "input {raw}");
        }
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_age_exactly_twenty_five_years() {
        let now = noon(2026, 6, 15);
        assert_eq!(age_from_birth_text("2001-06-15", now), 25);
        assert_eq!(age_from_birth_text("2001-06-16", now), 24);
    }

    #[test]
    fn test_age_before_six_utc_falls_a_year_short() {
        // 25 calendar years span 9131 days, just under 25 * 365.25
        let midnight = Utc.with_ymd_and_hms(2026, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(age_from_birth_text("2001-06-15", midnight), 24);
        let six = Utc.with_ymd_and_hms(2026, 6, 15, 6, 0, 0).unwrap();
        assert_eq!(age_from_birth_text("2001-06-15", six), 25);
    }

    #[test]
    fn test_year_only_birth_date() {
        let now = noon(2026, 6, 15);
        assert_eq!(normalize_date("1990"), NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(normalize_date("١٩٩٠"), NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(age_from_birth_text("1990", now), 36);
        // five digits is still a serial, also 1990-01-01
        assert_eq!(age_from_birth_text("32874", now), 36);
        assert_eq!(normalize_date("32874"), NaiveDate::from_ymd_opt(1990, 1, 1));
        // four digits outside the year range stay serials
        assert_eq!(normalize_date("1800"), NaiveDate::from_ymd_opt(1904, 12, 4));
    }

    #[test]
    fn test_age_is_clamped() {
        let now = noon(2026, 6, 15);
        assert_eq!(age_from_birth_text("2021-06-15", now), MIN_AGE);
        assert_eq!(age_from_birth_text("1896-06-15", now), MAX_AGE);
        assert_eq!(age_from_birth_text("2030-01-01", now), DEFAULT_AGE);
        assert_eq!(age_from_birth_text("garbage", now), DEFAULT_AGE);
        assert_eq!(age_from_birth_text("", now), DEFAULT_AGE);
    }

    #[test]
    fn test_age_from_cells() {
        let now = noon(2026, 6, 15);
        let dob = NaiveDate::from_ymd_opt(1990, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(age_from_birth_date(&Cell::DateTime(dob), now), 36);
        // 1990-01-01
        assert_eq!(age_from_birth_date(&Cell::Number(32874.0), now), 36);
        assert_eq!(age_from_birth_date(&Cell::from("1990-01-01"), now), 36);
        assert_eq!(age_from_birth_date(&Cell::Bool(true), now), DEFAULT_AGE);
        assert_eq!(age_from_birth_date(&Cell::Empty, now), DEFAULT_AGE);
    }

    #[test]
    fn test_resolve_age_prefers_explicit_column() {
        let now = noon(2026, 6, 15);
        assert_eq!(resolve_age(Some("25"), Some("1990-01-01"), now), 25);
        assert_eq!(resolve_age(Some("٣٠"), None, now), 30);
        assert_eq!(resolve_age(Some("40.0"), None, now), 40);
        assert_eq!(resolve_age(Some("15"), None, now), 15);
        assert_eq!(resolve_age(Some("كبير"), Some("1990-01-01"), now), 36);
        assert_eq!(resolve_age(None, None, now), 18);
    }
}
