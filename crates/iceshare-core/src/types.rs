use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emergency contact attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyContact {
    pub id: String,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// School sub-record. Every field is optional; empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolInfo {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub referent_phone: String,
    pub referent_name: String,
    pub logo_url: String,
    pub section: String,
}

impl SchoolInfo {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.address,
            &self.city,
            &self.phone,
            &self.referent_phone,
            &self.referent_name,
            &self.logo_url,
            &self.section,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}

/// Full-shape ICE (In Case of Emergency) record.
///
/// Every field carries a concrete default, so a record decoded from a
/// sparse wire shape never has to distinguish "missing" from "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IceRecord {
    // Personal
    pub name: String,
    pub age: Option<u32>,
    pub date_of_birth: String,
    pub blood_type: String,
    pub city: String,
    pub address: String,
    pub section: String,

    // Medical
    pub allergies: Vec<String>,
    pub medical_conditions: Vec<String>,
    pub current_medications: Vec<String>,
    pub medical_notes: String,

    pub emergency_contacts: Vec<EmergencyContact>,

    pub primary_doctor: String,
    pub insurance_info: String,
    pub special_instructions: String,

    pub school: SchoolInfo,

    /// Informational only; never used for conflict resolution.
    pub last_updated: Option<DateTime<Utc>>,
}

impl IceRecord {
    /// Name and age are both filled in.
    pub fn has_data(&self) -> bool {
        !self.name.is_empty() && self.age.is_some()
    }

    pub fn has_emergency_contacts(&self) -> bool {
        !self.emergency_contacts.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.has_data() && self.has_emergency_contacts()
    }

    /// Stamp `last_updated` with the current time.
    pub fn touch(&mut self) {
        self.last_updated = Some(Utc::now());
    }

    /// Append a contact with a freshly generated id and return that id.
    pub fn add_contact(
        &mut self,
        name: impl Into<String>,
        relationship: impl Into<String>,
        phone: impl Into<String>,
        email: Option<String>,
    ) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.emergency_contacts.push(EmergencyContact {
            id: id.clone(),
            name: name.into(),
            relationship: relationship.into(),
            phone: phone.into(),
            email,
        });
        self.touch();
        id
    }

    /// Apply `update` to the contact with `id`. Returns false if no such contact.
    pub fn update_contact<F>(&mut self, id: &str, update: F) -> bool
    where
        F: FnOnce(&mut EmergencyContact),
    {
        match self.emergency_contacts.iter_mut().find(|c| c.id == id) {
            Some(contact) => {
                update(contact);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove the contact with `id`. Returns false if no such contact.
    pub fn remove_contact(&mut self, id: &str) -> bool {
        let before = self.emergency_contacts.len();
        self.emergency_contacts.retain(|c| c.id != id);
        let removed = self.emergency_contacts.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Pretty-printed full-shape JSON.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse full-shape JSON; missing fields take their defaults.
    pub fn import_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut record: IceRecord = serde_json::from_str(json)?;
        record.touch();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_blank() {
        let record = IceRecord::default();
        assert!(record.name.is_empty());
        assert!(record.age.is_none());
        assert!(record.emergency_contacts.is_empty());
        assert!(record.school.is_empty());
        assert!(!record.has_data());
        assert!(!record.is_complete());
    }

    #[test]
    fn completeness_requires_name_age_and_contact() {
        let mut record = IceRecord {
            name: "John Doe".into(),
            age: Some(30),
            ..Default::default()
        };
        assert!(record.has_data());
        assert!(!record.is_complete());

        record.add_contact("Mom", "Parent", "555-1234", None);
        assert!(record.is_complete());
    }

    #[test]
    fn add_update_remove_contact() {
        let mut record = IceRecord::default();
        let id = record.add_contact("Mom", "Parent", "555-1234", None);
        assert!(record.last_updated.is_some());
        assert_eq!(record.emergency_contacts[0].id, id);

        assert!(record.update_contact(&id, |c| c.phone = "555-9999".into()));
        assert_eq!(record.emergency_contacts[0].phone, "555-9999");
        assert!(!record.update_contact("missing", |c| c.phone.clear()));

        assert!(record.remove_contact(&id));
        assert!(!record.remove_contact(&id));
        assert!(record.emergency_contacts.is_empty());
    }

    #[test]
    fn generated_contact_ids_are_unique() {
        let mut record = IceRecord::default();
        let a = record.add_contact("A", "", "", None);
        let b = record.add_contact("B", "", "", None);
        assert_ne!(a, b);
    }

    #[test]
    fn school_emptiness() {
        let mut school = SchoolInfo::default();
        assert!(school.is_empty());
        school.referent_name = "Ms. Smith".into();
        assert!(!school.is_empty());
    }

    #[test]
    fn full_shape_uses_camel_case() {
        let record = IceRecord {
            date_of_birth: "2019-04-01".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["dateOfBirth"], "2019-04-01");
        assert!(json.get("emergencyContacts").is_some());
        assert!(json.get("lastUpdated").is_some());
    }

    #[test]
    fn import_fills_defaults() {
        let record = IceRecord::import_json(r#"{"name":"Jane","allergies":["Peanuts"]}"#).unwrap();
        assert_eq!(record.name, "Jane");
        assert_eq!(record.allergies, vec!["Peanuts"]);
        assert!(record.age.is_none());
        assert!(record.school.is_empty());
        assert!(record.last_updated.is_some());
    }

    #[test]
    fn export_import_preserves_fields() {
        let mut record = IceRecord {
            name: "Jane".into(),
            age: Some(8),
            blood_type: "O+".into(),
            ..Default::default()
        };
        record.add_contact("Dad", "Parent", "555-0000", Some("dad@example.com".into()));
        let exported = record.export_json().unwrap();
        let imported = IceRecord::import_json(&exported).unwrap();
        assert_eq!(imported.name, record.name);
        assert_eq!(imported.age, record.age);
        assert_eq!(imported.emergency_contacts, record.emergency_contacts);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(IceRecord::import_json("not json").is_err());
    }
}
