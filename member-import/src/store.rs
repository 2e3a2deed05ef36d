//! Member stores for duplicate detection
//!
//! A store answers one question: does a record collide with anything already
//! accepted? Identity keys are national ID, email, phone and membership number.

use std::collections::HashSet;

use shared::models::{MemberField, MemberRecord};

use crate::normalize::{digits_only, normalize_email};

/// Fields compared when looking for duplicates, in reporting priority
pub const IDENTITY_FIELDS: [MemberField; 4] = [
    MemberField::NationalId,
    MemberField::Email,
    MemberField::PhoneNumber,
    MemberField::MembershipNumber,
];

/// Normalized identity key of a record for `field`; `None` when empty
///
/// Records seeded from the registry may carry raw values, so keys are
/// normalized on both insert and lookup.
pub fn identity_key(record: &MemberRecord, field: MemberField) -> Option<String> {
    let key = match field {
        MemberField::NationalId => digits_only(&record.national_id),
        MemberField::Email => normalize_email(&record.email),
        MemberField::PhoneNumber => digits_only(&record.phone_number),
        MemberField::MembershipNumber => record.membership_number.trim().to_string(),
        _ => return None,
    };
    (!key.is_empty()).then_some(key)
}

/// Accepted-record collection consulted by the batch importer
pub trait MemberStore {
    /// First identity field on which `record` collides, if any
    fn find_conflict(&self, record: &MemberRecord) -> Option<MemberField>;

    /// Accept a record; later lookups must see it
    fn insert(&mut self, record: MemberRecord);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash-indexed in-memory store
///
/// Persists across imports for as long as the value lives, so re-importing
/// the same sheet reports every row as a duplicate.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<MemberRecord>,
    national_ids: HashSet<String>,
    emails: HashSet<String>,
    phones: HashSet<String>,
    membership_numbers: HashSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from existing records, e.g. the registry's current member list
    pub fn from_records(records: impl IntoIterator<Item = MemberRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn records(&self) -> &[MemberRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MemberRecord> {
        self.records
    }

    fn index(&self, field: MemberField) -> Option<&HashSet<String>> {
        match field {
            MemberField::NationalId => Some(&self.national_ids),
            MemberField::Email => Some(&self.emails),
            MemberField::PhoneNumber => Some(&self.phones),
            MemberField::MembershipNumber => Some(&self.membership_numbers),
            _ => None,
        }
    }

    fn index_mut(&mut self, field: MemberField) -> Option<&mut HashSet<String>> {
        match field {
            MemberField::NationalId => Some(&mut self.national_ids),
            MemberField::Email => Some(&mut self.emails),
            MemberField::PhoneNumber => Some(&mut self.phones),
            MemberField::MembershipNumber => Some(&mut self.membership_numbers),
            _ => None,
        }
    }
}

impl MemberStore for InMemoryStore {
    fn find_conflict(&self, record: &MemberRecord) -> Option<MemberField> {
        IDENTITY_FIELDS.into_iter().find(|field| {
            match (identity_key(record, *field), self.index(*field)) {
                (Some(key), Some(index)) => index.contains(&key),
                _ => false,
            }
        })
    }

    fn insert(&mut self, record: MemberRecord) {
        for field in IDENTITY_FIELDS {
            if let Some(key) = identity_key(&record, field)
                && let Some(index) = self.index_mut(field)
            {
                index.insert(key);
            }
        }
        self.records.push(record);
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
