//! Minimal-key wire shape carried inside share tokens.
//!
//! Every field is optional and omitted when empty. Unknown keys are
//! ignored on parse; a known key holding the wrong JSON type is rejected.

use serde::{Deserialize, Serialize};

use crate::error::ShareError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(rename = "dob", default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "b", default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "ad", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "sec", default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(rename = "al", default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(rename = "mc", default, skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<Vec<String>>,
    #[serde(rename = "cm", default, skip_serializing_if = "Option::is_none")]
    pub current_medications: Option<Vec<String>>,
    #[serde(rename = "mn", default, skip_serializing_if = "Option::is_none")]
    pub medical_notes: Option<String>,
    #[serde(rename = "ec", default, skip_serializing_if = "Option::is_none")]
    pub emergency_contacts: Option<Vec<WireContact>>,
    #[serde(rename = "pd", default, skip_serializing_if = "Option::is_none")]
    pub primary_doctor: Option<String>,
    #[serde(rename = "ii", default, skip_serializing_if = "Option::is_none")]
    pub insurance_info: Option<String>,
    #[serde(rename = "si", default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub school: Option<WireSchool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireContact {
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSchool {
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "rp", default, skip_serializing_if = "Option::is_none")]
    pub referent_phone: Option<String>,
    #[serde(rename = "rn", default, skip_serializing_if = "Option::is_none")]
    pub referent_name: Option<String>,
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(rename = "sec", default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl WireSchool {
    pub fn is_empty(&self) -> bool {
        *self == WireSchool::default()
    }
}

/// Serialize a wire record as compact JSON text.
pub fn to_json(wire: &WireRecord) -> Result<String, ShareError> {
    serde_json::to_string(wire).map_err(ShareError::from_json)
}

/// Parse JSON text into a wire record.
///
/// Syntax errors surface as [`ShareError::Serialization`]; a well-formed
/// document with a mistyped field surfaces as [`ShareError::MalformedWireShape`].
pub fn from_json(json: &str) -> Result<WireRecord, ShareError> {
    serde_json::from_str(json).map_err(ShareError::from_json)
}
