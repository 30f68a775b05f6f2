/// Parser client — the single point of entry for calls to the external
/// résumé-parsing service.
///
/// ARCHITECTURAL RULE: No other module may call the parsing provider
/// directly. All extraction MUST go through the `DocumentParser` seam, so
/// the provider can be swapped (or stubbed in tests) without touching the
/// ingestion pipeline.
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::Contact;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parser returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unreadable parser response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("parser unavailable after {retries} attempts")]
    Unavailable { retries: u32 },
}

/// Wire payload returned by the parsing provider on success. Every section
/// is defaulted so a sparse response still yields a complete value; list
/// entries carry no identifiers — those are assigned at the ingestion
/// boundary, where the provider is not trusted to supply them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub contact: Contact,
    pub summary: String,
    pub skills: Vec<String>,
    pub work_experience: Vec<ParsedWorkExperience>,
    pub education: Vec<ParsedEducation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedWorkExperience {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedEducation {
    pub degree: String,
    pub institution: String,
    pub dates: String,
    pub details: Option<String>,
}

/// Failure body from the provider: `{ "error": "..." }` with a non-2xx status.
#[derive(Debug, Deserialize)]
struct ParserErrorBody {
    error: String,
}

/// The seam between the ingestion pipeline and the external parsing
/// collaborator. Carried as `Arc<dyn DocumentParser>` so tests can stub it.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn parse(
        &self,
        document: &[u8],
        filename: &str,
        mime_type: &str,
    ) -> Result<ParsedResume, ParserError>;
}

/// HTTP implementation of `DocumentParser`. Posts the document as
/// `multipart/form-data` and retries 429 and 5xx responses with
/// exponential backoff.
#[derive(Clone)]
pub struct HttpParserClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpParserClient {
    pub fn new(endpoint: String, api_key: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl DocumentParser for HttpParserClient {
    async fn parse(
        &self,
        document: &[u8],
        filename: &str,
        mime_type: &str,
    ) -> Result<ParsedResume, ParserError> {
        let mut last_error: Option<ParserError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "parser call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            // The form owns its part, so it is rebuilt per attempt.
            let part = Part::bytes(document.to_vec())
                .file_name(filename.to_string())
                .mime_str(mime_type)
                .map_err(ParserError::Http)?;
            let form = Form::new().part("resume", part);

            let response = self
                .client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .multipart(form)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ParserError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("parser returned {}: {}", status, body);
                last_error = Some(ParserError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = parse_error_body(&body);
                return Err(ParserError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            // Deserialize from text rather than response.json() so a schema
            // deviation surfaces as `ParserError::Parse`, never a crash.
            let body = response.text().await?;
            let parsed: ParsedResume = serde_json::from_str(&body)?;

            debug!(
                "parser call succeeded: {} skills, {} experience entries, {} education entries",
                parsed.skills.len(),
                parsed.work_experience.len(),
                parsed.education.len()
            );

            return Ok(parsed);
        }

        Err(last_error.unwrap_or(ParserError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

/// Extracts the human-readable message from a provider failure body,
/// falling back to the raw body when it is not the documented shape.
fn parse_error_body(body: &str) -> String {
    serde_json::from_str::<ParserErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_body_with_documented_shape() {
        let body = r#"{"error": "No resume file uploaded"}"#;
        assert_eq!(parse_error_body(body), "No resume file uploaded");
    }

    #[test]
    fn test_parse_error_body_falls_back_to_raw_body() {
        let body = "upstream gateway exploded";
        assert_eq!(parse_error_body(body), "upstream gateway exploded");
    }

    #[test]
    fn test_sparse_response_deserializes_to_complete_payload() {
        let parsed: ParsedResume = serde_json::from_str("{}").unwrap();
        assert!(parsed.skills.is_empty());
        assert!(parsed.work_experience.is_empty());
        assert!(parsed.education.is_empty());
        assert!(parsed.contact.name.is_empty());
    }

    #[test]
    fn test_camel_case_wire_names_deserialize() {
        let json = r#"{
            "contact": {"name": "Greg Brockman", "profilePicUrl": "https://example.com/g.png"},
            "workExperience": [{"title": "President", "company": "OpenAI", "dates": "2015 - Present", "description": "AGI"}],
            "education": [{"degree": "Computer Science", "institution": "MIT", "dates": "2006 - 2010"}]
        }"#;
        let parsed: ParsedResume = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.contact.name, "Greg Brockman");
        assert_eq!(parsed.work_experience[0].company, "OpenAI");
        assert_eq!(parsed.education[0].institution, "MIT");
        assert!(parsed.education[0].details.is_none());
    }

    #[test]
    fn test_wrong_typed_section_is_a_parse_error() {
        let json = r#"{"skills": 42}"#;
        assert!(serde_json::from_str::<ParsedResume>(json).is_err());
    }
}
