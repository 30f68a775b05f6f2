//! Editable view — projects the record into form bindings whose `path`
//! values feed the field-path mutator. Edits flow back through the
//! controller's single authoritative record rather than diverging into a
//! separate draft that would later need reconciling.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::resume::ResumeRecord;
use crate::state::AppState;
use crate::upload::controller::UploadState;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EditorView {
    Idle,
    Uploading,
    Failed {
        message: String,
    },
    Ready {
        contact: Vec<FieldBinding>,
        summary: FieldBinding,
        skills: FieldBinding,
        work_experience: Vec<EntryForm>,
        education: Vec<EntryForm>,
    },
}

/// One editable field: `path` is a valid mutator address for the current
/// record, `value` is the current content.
#[derive(Debug, Clone, Serialize)]
pub struct FieldBinding {
    pub label: String,
    pub path: String,
    pub value: String,
    pub multiline: bool,
}

/// One list entry's form group, keyed by the record id so list re-renders
/// stay stable across edits.
#[derive(Debug, Clone, Serialize)]
pub struct EntryForm {
    pub id: String,
    pub fields: Vec<FieldBinding>,
}

impl EditorView {
    pub fn project(state: &UploadState) -> Self {
        match state {
            UploadState::Idle => EditorView::Idle,
            UploadState::Uploading => EditorView::Uploading,
            UploadState::Failed { message } => EditorView::Failed {
                message: message.clone(),
            },
            UploadState::Ready { record } => Self::from_record(record),
        }
    }

    fn from_record(record: &ResumeRecord) -> Self {
        EditorView::Ready {
            contact: vec![
                text_field("Email", "contact.email", &record.contact.email),
                text_field("Website", "contact.website", &record.contact.website),
                text_field("LinkedIn", "contact.linkedin", &record.contact.linkedin),
                text_field("Twitter", "contact.twitter", &record.contact.twitter),
            ],
            summary: multiline_field("Summary", "summary", &record.summary),
            // The one aggregate binding: the whole list edited as a single
            // comma-joined string.
            skills: multiline_field(
                "Skills (comma-separated)",
                "skills",
                &record.skills.join(", "),
            ),
            work_experience: record
                .work_experience
                .iter()
                .enumerate()
                .map(|(i, entry)| EntryForm {
                    id: entry.id.clone(),
                    fields: vec![
                        text_field("Title", &format!("workExperience.{i}.title"), &entry.title),
                        text_field(
                            "Company",
                            &format!("workExperience.{i}.company"),
                            &entry.company,
                        ),
                        text_field("Dates", &format!("workExperience.{i}.dates"), &entry.dates),
                        multiline_field(
                            "Description",
                            &format!("workExperience.{i}.description"),
                            &entry.description,
                        ),
                    ],
                })
                .collect(),
            education: record
                .education
                .iter()
                .enumerate()
                .map(|(i, entry)| EntryForm {
                    id: entry.id.clone(),
                    fields: vec![
                        text_field("Degree", &format!("education.{i}.degree"), &entry.degree),
                        text_field(
                            "Institution",
                            &format!("education.{i}.institution"),
                            &entry.institution,
                        ),
                        text_field("Dates", &format!("education.{i}.dates"), &entry.dates),
                        multiline_field(
                            "Details",
                            &format!("education.{i}.details"),
                            entry.details.as_deref().unwrap_or_default(),
                        ),
                    ],
                })
                .collect(),
        }
    }
}

fn text_field(label: &str, path: &str, value: &str) -> FieldBinding {
    FieldBinding {
        label: label.to_string(),
        path: path.to_string(),
        value: value.to_string(),
        multiline: false,
    }
}

fn multiline_field(label: &str, path: &str, value: &str) -> FieldBinding {
    FieldBinding {
        label: label.to_string(),
        path: path.to_string(),
        value: value.to_string(),
        multiline: true,
    }
}

/// GET /api/v1/resume/editor
pub async fn handle_editor(State(state): State<AppState>) -> Json<EditorView> {
    Json(EditorView::project(&state.controller.current()))
}
