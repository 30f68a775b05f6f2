//! Summary view — the read-only projection of the current résumé record.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::resume::{Contact, EducationEntry, ResumeRecord, WorkExperienceEntry};
use crate::state::AppState;
use crate::upload::controller::UploadState;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryView {
    Idle,
    Uploading,
    Failed {
        message: String,
    },
    Ready {
        profile: ProfileHeader,
        contact: Vec<ContactLink>,
        summary: String,
        skills: Vec<String>,
        work_experience: Vec<SectionItem>,
        education: Vec<SectionItem>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileHeader {
    pub name: String,
    pub title: String,
    pub location: String,
    pub initials: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactLink {
    pub label: String,
    pub href: String,
    pub text: String,
}

/// One rendered line item of a list section, keyed by the record entry id.
#[derive(Debug, Clone, Serialize)]
pub struct SectionItem {
    pub id: String,
    pub heading: String,
    pub subheading: String,
    pub body: String,
}

impl SummaryView {
    /// Projects the current lifecycle state. Pure — the record is read,
    /// never changed.
    pub fn project(state: &UploadState) -> Self {
        match state {
            UploadState::Idle => SummaryView::Idle,
            UploadState::Uploading => SummaryView::Uploading,
            UploadState::Failed { message } => SummaryView::Failed {
                message: message.clone(),
            },
            UploadState::Ready { record } => Self::from_record(record),
        }
    }

    fn from_record(record: &ResumeRecord) -> Self {
        SummaryView::Ready {
            profile: ProfileHeader {
                name: record.contact.name.clone(),
                title: record.contact.title.clone(),
                location: record.contact.location.clone(),
                initials: initials(&record.contact.name),
            },
            contact: contact_links(&record.contact),
            summary: record.summary.clone(),
            skills: record.skills.clone(),
            work_experience: record.work_experience.iter().map(experience_item).collect(),
            education: record.education.iter().map(education_item).collect(),
        }
    }
}

/// Uppercase initials of the first two words of a name.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Email always renders; other links are dropped when the value is empty.
fn contact_links(contact: &Contact) -> Vec<ContactLink> {
    let mut links = vec![ContactLink {
        label: "Email".to_string(),
        href: format!("mailto:{}", contact.email),
        text: contact.email.clone(),
    }];
    for (label, value) in [
        ("Website", &contact.website),
        ("LinkedIn", &contact.linkedin),
        ("Twitter", &contact.twitter),
    ] {
        if value.is_empty() {
            continue;
        }
        links.push(ContactLink {
            label: label.to_string(),
            href: external_href(value),
            text: value.clone(),
        });
    }
    links
}

/// Prefixes bare domains with https:// so stored values render as links.
fn external_href(value: &str) -> String {
    if value.starts_with("http://") || value.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}

fn experience_item(entry: &WorkExperienceEntry) -> SectionItem {
    SectionItem {
        id: entry.id.clone(),
        heading: entry.title.clone(),
        subheading: format!("{} - {}", entry.company, entry.dates),
        body: entry.description.clone(),
    }
}

fn education_item(entry: &EducationEntry) -> SectionItem {
    SectionItem {
        id: entry.id.clone(),
        heading: entry.degree.clone(),
        subheading: format!("{} - {}", entry.institution, entry.dates),
        body: entry.details.clone().unwrap_or_default(),
    }
}

/// GET /api/v1/resume/summary
pub async fn handle_summary(State(state): State<AppState>) -> Json<SummaryView> {
    Json(SummaryView::project(&state.controller.current()))
}
