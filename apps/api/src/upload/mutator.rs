//! Field-path mutator — applies a single edit, addressed by a dotted/indexed
//! path string, to a snapshot of the résumé record and returns a new
//! snapshot.
//!
//! Pure and synchronous: no I/O, no installation. The path is parsed once
//! into typed segments and then walked structurally — field names resolve
//! through the schema's `field_mut` methods, so supporting a new field is a
//! schema change, not a new branch here. A rejected edit returns
//! `InvalidPath` and the caller's record is untouched; there is no partial
//! write.

use thiserror::Error;

use crate::models::resume::ResumeRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPath {
    #[error("empty field path")]
    EmptyPath,

    #[error("empty segment in path `{0}`")]
    EmptySegment(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("index {0} is out of range")]
    IndexOutOfRange(usize),

    #[error("`{0}` does not address an editable leaf field")]
    NotALeaf(String),
}

/// One parsed path segment: a field name, or a position in an ordered
/// sequence when the segment is a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Field(&'a str),
    Index(usize),
}

fn parse_path(path: &str) -> Result<Vec<Segment<'_>>, InvalidPath> {
    if path.is_empty() {
        return Err(InvalidPath::EmptyPath);
    }
    path.split('.')
        .map(|segment| {
            if segment.is_empty() {
                return Err(InvalidPath::EmptySegment(path.to_string()));
            }
            Ok(match segment.parse::<usize>() {
                Ok(index) => Segment::Index(index),
                Err(_) => Segment::Field(segment),
            })
        })
        .collect()
}

/// Applies one edit and returns a new record snapshot. The input record is
/// never modified, so callers may keep referencing the pre-edit value.
pub fn apply(record: &ResumeRecord, path: &str, value: &str) -> Result<ResumeRecord, InvalidPath> {
    use Segment::{Field, Index};

    let segments = parse_path(path)?;
    let mut next = record.clone();

    match segments.as_slice() {
        [Field("summary")] => next.summary = value.to_string(),

        // The one aggregate edit: the whole skill list re-derived from a
        // comma-delimited string. Duplicates are preserved.
        [Field("skills")] => next.skills = split_skills(value),

        [Field("skills"), Index(i)] => {
            let slot = next
                .skills
                .get_mut(*i)
                .ok_or(InvalidPath::IndexOutOfRange(*i))?;
            *slot = value.to_string();
        }

        [Field("contact"), Field(name)] => {
            let slot = next
                .contact
                .field_mut(name)
                .ok_or_else(|| InvalidPath::UnknownField(format!("contact.{name}")))?;
            *slot = value.to_string();
        }

        [Field("workExperience"), Index(i), Field(name)] => {
            let entry = next
                .work_experience
                .get_mut(*i)
                .ok_or(InvalidPath::IndexOutOfRange(*i))?;
            let slot = entry
                .field_mut(name)
                .ok_or_else(|| InvalidPath::UnknownField(format!("workExperience.{name}")))?;
            *slot = value.to_string();
        }

        [Field("education"), Index(i), Field(name)] => {
            let entry = next
                .education
                .get_mut(*i)
                .ok_or(InvalidPath::IndexOutOfRange(*i))?;
            let slot = entry
                .field_mut(name)
                .ok_or_else(|| InvalidPath::UnknownField(format!("education.{name}")))?;
            *slot = value.to_string();
        }

        // Anything else is a known root addressed as a non-leaf, or an
        // unknown field altogether.
        other => {
            return Err(match other.first() {
                Some(Field(name))
                    if !matches!(
                        *name,
                        "summary" | "skills" | "contact" | "workExperience" | "education"
                    ) =>
                {
                    InvalidPath::UnknownField((*name).to_string())
                }
                _ => InvalidPath::NotALeaf(path.to_string()),
            });
        }
    }

    Ok(next)
}

/// Splits a comma-delimited skill string, trimming surrounding whitespace
/// and dropping empty elements. Duplicates are preserved.
pub fn split_skills(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Contact, EducationEntry, WorkExperienceEntry};

    fn sample_record() -> ResumeRecord {
        ResumeRecord {
            contact: Contact {
                name: "Greg Brockman".to_string(),
                title: "President, Chairman, Co-founder of OpenAI".to_string(),
                location: "San Francisco, CA".to_string(),
                email: "greg@gregbrockman.com".to_string(),
                website: "gregbrockman.com".to_string(),
                linkedin: "linkedin.com/in/thegdb".to_string(),
                twitter: "x.com/gdb".to_string(),
                profile_pic_url: None,
            },
            summary: "I love to build / sometimes also break things.".to_string(),
            skills: vec!["Python".to_string(), "Golang".to_string(), "CUDA".to_string()],
            work_experience: vec![
                WorkExperienceEntry {
                    id: "exp-1".to_string(),
                    title: "President, Chairman, Co-founder".to_string(),
                    company: "OpenAI".to_string(),
                    dates: "2015 - Present".to_string(),
                    description: "Building AGI to benefit all of humanity.".to_string(),
                },
                WorkExperienceEntry {
                    id: "exp-2".to_string(),
                    title: "Chief Technology Officer".to_string(),
                    company: "Stripe".to_string(),
                    dates: "2010 - 2015".to_string(),
                    description: "Increasing the GDP of the internet.".to_string(),
                },
            ],
            education: vec![
                EducationEntry {
                    id: "edu-1".to_string(),
                    degree: "Computer Science".to_string(),
                    institution: "MIT".to_string(),
                    dates: "2006 - 2010".to_string(),
                    details: Some("Cambridge, MA".to_string()),
                },
                EducationEntry {
                    id: "edu-2".to_string(),
                    degree: "Computer Science".to_string(),
                    institution: "Harvard University".to_string(),
                    dates: "2006 - 2008".to_string(),
                    details: None,
                },
            ],
        }
    }

    #[test]
    fn test_edit_contact_leaf() {
        let record = sample_record();
        let next = apply(&record, "contact.email", "gdb@openai.com").unwrap();
        assert_eq!(next.contact.email, "gdb@openai.com");
        assert_eq!(next.contact.name, record.contact.name);
    }

    #[test]
    fn test_edit_summary_preserves_text_verbatim() {
        let record = sample_record();
        let next = apply(&record, "summary", "line one\n\nline two").unwrap();
        assert_eq!(next.summary, "line one\n\nline two");
    }

    #[test]
    fn test_edit_work_experience_entry_leaves_siblings_untouched() {
        let record = sample_record();
        let next = apply(&record, "workExperience.0.title", "CEO").unwrap();

        let mut expected = record.clone();
        expected.work_experience[0].title = "CEO".to_string();
        assert_eq!(next, expected);
    }

    #[test]
    fn test_mutator_never_mutates_its_input() {
        let record = sample_record();
        let before = record.clone();
        let _ = apply(&record, "workExperience.1.company", "Acme").unwrap();
        let _ = apply(&record, "workExperience.99.title", "CEO");
        assert_eq!(record, before);
    }

    #[test]
    fn test_edit_absent_education_details_creates_the_slot() {
        let record = sample_record();
        let next = apply(&record, "education.1.details", "Cambridge, MA").unwrap();
        assert_eq!(next.education[1].details.as_deref(), Some("Cambridge, MA"));
    }

    #[test]
    fn test_skills_aggregate_splits_trims_and_drops_empties() {
        let record = sample_record();
        let next = apply(&record, "skills", "Go, Rust,  C++ ").unwrap();
        assert_eq!(next.skills, vec!["Go", "Rust", "C++"]);
    }

    #[test]
    fn test_skills_round_trip_is_idempotent_modulo_whitespace() {
        let record = sample_record();
        let first = apply(&record, "skills", "Go, Rust,  C++ ").unwrap();
        let rejoined = first.skills.join(", ");
        let second = apply(&first, "skills", &rejoined).unwrap();
        assert_eq!(second.skills, first.skills);
    }

    #[test]
    fn test_skills_duplicates_are_preserved() {
        let record = sample_record();
        let next = apply(&record, "skills", "Rust, Rust").unwrap();
        assert_eq!(next.skills, vec!["Rust", "Rust"]);
    }

    #[test]
    fn test_skills_index_edits_one_element() {
        let record = sample_record();
        let next = apply(&record, "skills.1", "Rust").unwrap();
        assert_eq!(next.skills, vec!["Python", "Rust", "CUDA"]);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let record = sample_record();
        let err = apply(&record, "workExperience.99.title", "CEO").unwrap_err();
        assert_eq!(err, InvalidPath::IndexOutOfRange(99));
    }

    #[test]
    fn test_unknown_top_level_field_is_rejected() {
        let record = sample_record();
        let err = apply(&record, "salary", "1000000").unwrap_err();
        assert_eq!(err, InvalidPath::UnknownField("salary".to_string()));
    }

    #[test]
    fn test_unknown_entry_field_is_rejected() {
        let record = sample_record();
        let err = apply(&record, "workExperience.0.salary", "1000000").unwrap_err();
        assert_eq!(
            err,
            InvalidPath::UnknownField("workExperience.salary".to_string())
        );
    }

    #[test]
    fn test_non_leaf_paths_are_rejected() {
        let record = sample_record();
        assert_eq!(
            apply(&record, "contact", "x").unwrap_err(),
            InvalidPath::NotALeaf("contact".to_string())
        );
        assert_eq!(
            apply(&record, "workExperience.0", "x").unwrap_err(),
            InvalidPath::NotALeaf("workExperience.0".to_string())
        );
        assert_eq!(
            apply(&record, "contact.email.domain", "x").unwrap_err(),
            InvalidPath::NotALeaf("contact.email.domain".to_string())
        );
    }

    #[test]
    fn test_entry_id_is_not_editable() {
        let record = sample_record();
        let err = apply(&record, "workExperience.0.id", "other").unwrap_err();
        assert_eq!(err, InvalidPath::UnknownField("workExperience.id".to_string()));
    }

    #[test]
    fn test_malformed_paths_are_rejected() {
        let record = sample_record();
        assert_eq!(apply(&record, "", "x").unwrap_err(), InvalidPath::EmptyPath);
        assert_eq!(
            apply(&record, "contact.", "x").unwrap_err(),
            InvalidPath::EmptySegment("contact.".to_string())
        );
    }
}
