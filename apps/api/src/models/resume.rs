//! Canonical schema for a parsed résumé.
//!
//! The record is a value: the ingestion service creates one, the field-path
//! mutator derives new snapshots from one, and the upload controller is the
//! only component that installs one. No component mutates a record it did
//! not create.

use serde::{Deserialize, Serialize};

/// Contact block. Empty string is a valid "unknown" value for every field;
/// consumers never branch on missing vs empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub website: String,
    pub linkedin: String,
    pub twitter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
}

/// One work-experience entry. `id` is assigned once at the ingestion
/// boundary and is not editable; list addressing and re-rendering key on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceEntry {
    pub id: String,
    pub title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

/// One education entry, same `id` discipline as work experience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub dates: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The single mutable-by-replacement aggregate. Absent sections deserialize
/// as empty sequences, never as missing keys, so a record is always complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub contact: Contact,
    pub summary: String,
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl Contact {
    /// Maps a wire field name to its editable slot. Adding a contact field
    /// is one new arm here — the path mutator itself never changes.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "title" => Some(&mut self.title),
            "location" => Some(&mut self.location),
            "email" => Some(&mut self.email),
            "website" => Some(&mut self.website),
            "linkedin" => Some(&mut self.linkedin),
            "twitter" => Some(&mut self.twitter),
            // An absent picture URL is editable as present-but-empty.
            "profilePicUrl" => Some(self.profile_pic_url.get_or_insert_with(String::new)),
            _ => None,
        }
    }
}

impl WorkExperienceEntry {
    /// `id` is deliberately absent: identifiers are assigned at ingestion
    /// and never rewritten.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "company" => Some(&mut self.company),
            "dates" => Some(&mut self.dates),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

impl EducationEntry {
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "degree" => Some(&mut self.degree),
            "institution" => Some(&mut self.institution),
            "dates" => Some(&mut self.dates),
            "details" => Some(self.details.get_or_insert_with(String::new)),
            _ => None,
        }
    }
}
