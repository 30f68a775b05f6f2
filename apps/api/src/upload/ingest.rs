//! Ingestion service — turns a raw document into a `ResumeRecord` via the
//! external parsing collaborator. Stateless; safe to invoke concurrently
//! for independent documents.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::resume::{EducationEntry, ResumeRecord, WorkExperienceEntry};
use crate::parser_client::{DocumentParser, ParsedResume, ParserError};

/// Media types advertised to the client: PDF, DOC, DOCX. Advisory only —
/// anything else is still forwarded; acceptance is the provider's call.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("no document bytes were supplied")]
    EmptyDocument,

    #[error("résumé parsing failed: {0}")]
    Parser(#[from] ParserError),
}

#[derive(Clone)]
pub struct IngestionService {
    parser: Arc<dyn DocumentParser>,
}

impl IngestionService {
    pub fn new(parser: Arc<dyn DocumentParser>) -> Self {
        Self { parser }
    }

    /// Parses one document into a fully-populated record.
    ///
    /// Every failure — provider unreachable, non-2xx response, schema
    /// deviation — comes back as a typed `IngestionError`; nothing panics
    /// past this boundary.
    pub async fn parse(
        &self,
        document: &[u8],
        filename: &str,
        mime_type: &str,
    ) -> Result<ResumeRecord, IngestionError> {
        if document.is_empty() {
            return Err(IngestionError::EmptyDocument);
        }
        if !ACCEPTED_MIME_TYPES.contains(&mime_type) {
            warn!("unadvertised media type `{mime_type}` for {filename}; forwarding anyway");
        }

        let parsed = self.parser.parse(document, filename, mime_type).await?;
        info!(
            "parsed résumé from {filename} ({} bytes, {} experience entries)",
            document.len(),
            parsed.work_experience.len()
        );

        Ok(build_record(parsed))
    }
}

/// Converts the wire payload into the canonical record, assigning a fresh
/// unique id to every list entry. The provider is not trusted to supply
/// stable identifiers.
pub fn build_record(parsed: ParsedResume) -> ResumeRecord {
    ResumeRecord {
        contact: parsed.contact,
        summary: parsed.summary,
        skills: parsed.skills,
        work_experience: parsed
            .work_experience
            .into_iter()
            .map(|entry| WorkExperienceEntry {
                id: Uuid::new_v4().to_string(),
                title: entry.title,
                company: entry.company,
                dates: entry.dates,
                description: entry.description,
            })
            .collect(),
        education: parsed
            .education
            .into_iter()
            .map(|entry| EducationEntry {
                id: Uuid::new_v4().to_string(),
                degree: entry.degree,
                institution: entry.institution,
                dates: entry.dates,
                details: entry.details,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::parser_client::{ParsedEducation, ParsedWorkExperience};

    #[derive(Default)]
    struct StubParser {
        calls: AtomicUsize,
        fail_with: Option<String>,
        payload: ParsedResume,
    }

    #[async_trait]
    impl DocumentParser for StubParser {
        async fn parse(
            &self,
            _document: &[u8],
            _filename: &str,
            _mime_type: &str,
        ) -> Result<ParsedResume, ParserError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(message) => Err(ParserError::Api {
                    status: 503,
                    message: message.clone(),
                }),
                None => Ok(self.payload.clone()),
            }
        }
    }

    fn sample_payload() -> ParsedResume {
        ParsedResume {
            summary: "I love to build / sometimes also break things.".to_string(),
            skills: vec!["Python".to_string(), "Golang".to_string()],
            work_experience: vec![
                ParsedWorkExperience {
                    title: "President, Chairman, Co-founder".to_string(),
                    company: "OpenAI".to_string(),
                    dates: "2015 - Present".to_string(),
                    description: "Building AGI to benefit all of humanity.".to_string(),
                },
                ParsedWorkExperience {
                    title: "Chief Technology Officer".to_string(),
                    company: "Stripe".to_string(),
                    dates: "2010 - 2015".to_string(),
                    description: "Increasing the GDP of the internet.".to_string(),
                },
            ],
            education: vec![
                ParsedEducation {
                    degree: "Computer Science".to_string(),
                    institution: "MIT".to_string(),
                    dates: "2006 - 2010".to_string(),
                    details: Some("Cambridge, MA".to_string()),
                },
                ParsedEducation {
                    degree: "Computer Science".to_string(),
                    institution: "Harvard University".to_string(),
                    dates: "2006 - 2008".to_string(),
                    details: None,
                },
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_every_list_entry_gets_a_fresh_unique_id() {
        let service = IngestionService::new(Arc::new(StubParser {
            payload: sample_payload(),
            ..Default::default()
        }));

        let record = service
            .parse(b"%PDF-1.4", "resume.pdf", "application/pdf")
            .await
            .unwrap();

        let mut experience_ids: HashSet<&str> = HashSet::new();
        for entry in &record.work_experience {
            assert!(!entry.id.is_empty());
            assert!(experience_ids.insert(&entry.id));
        }
        let mut education_ids: HashSet<&str> = HashSet::new();
        for entry in &record.education {
            assert!(!entry.id.is_empty());
            assert!(education_ids.insert(&entry.id));
        }
    }

    #[tokio::test]
    async fn test_empty_document_is_a_typed_failure_without_a_provider_call() {
        let parser = Arc::new(StubParser::default());
        let service = IngestionService::new(parser.clone());

        let result = service.parse(b"", "resume.pdf", "application/pdf").await;

        assert!(matches!(result, Err(IngestionError::EmptyDocument)));
        assert_eq!(parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unadvertised_media_type_is_forwarded_not_rejected() {
        let parser = Arc::new(StubParser {
            payload: sample_payload(),
            ..Default::default()
        });
        let service = IngestionService::new(parser.clone());

        let result = service.parse(b"plain text", "resume.txt", "text/plain").await;

        assert!(result.is_ok());
        assert_eq!(parser.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_ingestion_error() {
        let service = IngestionService::new(Arc::new(StubParser {
            fail_with: Some("resume parser is down".to_string()),
            ..Default::default()
        }));

        let err = service
            .parse(b"%PDF-1.4", "resume.pdf", "application/pdf")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("resume parser is down"));
    }

    #[test]
    fn test_sparse_payload_builds_a_complete_record() {
        let record = build_record(ParsedResume::default());
        assert!(record.skills.is_empty());
        assert!(record.work_experience.is_empty());
        assert!(record.education.is_empty());
    }
}
