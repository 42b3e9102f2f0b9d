//! Compact codec: full-shape record <-> minimal-key wire record.
//!
//! `compact` drops every empty field; `expand` restores each field to its
//! type default. Neither direction can fail.

use chrono::Utc;

use crate::types::{EmergencyContact, IceRecord, SchoolInfo};
use crate::wire::{WireContact, WireRecord, WireSchool};

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn non_empty_list(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

/// Map a full record to its wire shape, omitting empty fields.
///
/// Age is kept whenever it is set, including zero.
pub fn compact(record: &IceRecord) -> WireRecord {
    let emergency_contacts = (!record.emergency_contacts.is_empty()).then(|| {
        record
            .emergency_contacts
            .iter()
            .map(compact_contact)
            .collect()
    });

    let school = compact_school(&record.school);

    WireRecord {
        name: non_empty(&record.name),
        age: record.age,
        date_of_birth: non_empty(&record.date_of_birth),
        blood_type: non_empty(&record.blood_type),
        city: non_empty(&record.city),
        address: non_empty(&record.address),
        section: non_empty(&record.section),
        allergies: non_empty_list(&record.allergies),
        medical_conditions: non_empty_list(&record.medical_conditions),
        current_medications: non_empty_list(&record.current_medications),
        medical_notes: non_empty(&record.medical_notes),
        emergency_contacts,
        primary_doctor: non_empty(&record.primary_doctor),
        insurance_info: non_empty(&record.insurance_info),
        special_instructions: non_empty(&record.special_instructions),
        school: (!school.is_empty()).then_some(school),
    }
}

fn compact_contact(contact: &EmergencyContact) -> WireContact {
    WireContact {
        id: non_empty(&contact.id),
        name: non_empty(&contact.name),
        relationship: non_empty(&contact.relationship),
        phone: non_empty(&contact.phone),
        email: contact.email.as_deref().and_then(non_empty),
    }
}

fn compact_school(school: &SchoolInfo) -> WireSchool {
    WireSchool {
        name: non_empty(&school.name),
        address: non_empty(&school.address),
        city: non_empty(&school.city),
        phone: non_empty(&school.phone),
        referent_phone: non_empty(&school.referent_phone),
        referent_name: non_empty(&school.referent_name),
        logo_url: non_empty(&school.logo_url),
        section: non_empty(&school.section),
    }
}

/// Map a wire record back to the full shape.
///
/// Missing keys become defaults, contacts without an id get a fresh UUID,
/// and `last_updated` is always stamped with the current time.
pub fn expand(wire: WireRecord) -> IceRecord {
    IceRecord {
        name: wire.name.unwrap_or_default(),
        age: wire.age,
        date_of_birth: wire.date_of_birth.unwrap_or_default(),
        blood_type: wire.blood_type.unwrap_or_default(),
        city: wire.city.unwrap_or_default(),
        address: wire.address.unwrap_or_default(),
        section: wire.section.unwrap_or_default(),
        allergies: wire.allergies.unwrap_or_default(),
        medical_conditions: wire.medical_conditions.unwrap_or_default(),
        current_medications: wire.current_medications.unwrap_or_default(),
        medical_notes: wire.medical_notes.unwrap_or_default(),
        emergency_contacts: wire
            .emergency_contacts
            .unwrap_or_default()
            .into_iter()
            .map(expand_contact)
            .collect(),
        primary_doctor: wire.primary_doctor.unwrap_or_default(),
        insurance_info: wire.insurance_info.unwrap_or_default(),
        special_instructions: wire.special_instructions.unwrap_or_default(),
        school: wire.school.map(expand_school).unwrap_or_default(),
        last_updated: Some(Utc::now()),
    }
}

fn expand_contact(contact: WireContact) -> EmergencyContact {
    let id = contact
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    EmergencyContact {
        id,
        name: contact.name.unwrap_or_default(),
        relationship: contact.relationship.unwrap_or_default(),
        phone: contact.phone.unwrap_or_default(),
        email: contact.email.filter(|e| !e.is_empty()),
    }
}

fn expand_school(school: WireSchool) -> SchoolInfo {
    SchoolInfo {
        name: school.name.unwrap_or_default(),
        address: school.address.unwrap_or_default(),
        city: school.city.unwrap_or_default(),
        phone: school.phone.unwrap_or_default(),
        referent_phone: school.referent_phone.unwrap_or_default(),
        referent_name: school.referent_name.unwrap_or_default(),
        logo_url: school.logo_url.unwrap_or_default(),
        section: school.section.unwrap_or_default(),
    }
}
