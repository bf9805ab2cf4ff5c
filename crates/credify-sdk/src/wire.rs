//! Wire formats exchanged with the verification service.
//!
//! Everything here is decoded leniently and converted to domain types once,
//! so nothing past the SDK sees the service's raw shapes.

use credify_domain::{Claim, Source, Verdict, VerificationResult};
use serde::{Deserialize, Serialize};

/// Body of `POST /check`
#[derive(Debug, Serialize)]
pub(crate) struct CheckRequest<'a> {
    pub text: &'a str,
}

/// Answer of the `GET /` health probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Service-reported status string
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SourcePayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

impl From<SourcePayload> for Source {
    fn from(payload: SourcePayload) -> Self {
        Source::new(
            payload.title.unwrap_or_default(),
            payload.url.unwrap_or_default(),
            payload.snippet.unwrap_or_default(),
        )
    }
}

/// Record ids are strings by contract; numeric ids are tolerated.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdPayload {
    Text(String),
    Number(i64),
}

impl From<IdPayload> for String {
    fn from(id: IdPayload) -> Self {
        match id {
            IdPayload::Text(text) => text,
            IdPayload::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerificationPayload {
    #[serde(default)]
    verdict: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    sources: Option<Vec<SourcePayload>>,
    #[serde(default)]
    news_sources: Option<Vec<SourcePayload>>,
    #[serde(default)]
    factcheck_sources: Option<Vec<SourcePayload>>,
}

impl From<VerificationPayload> for VerificationResult {
    fn from(payload: VerificationPayload) -> Self {
        VerificationResult::new(
            parse_verdict(payload.verdict),
            payload.confidence.unwrap_or_default(),
            payload.explanation.unwrap_or_default(),
        )
        .with_sources(merge_sources([
            payload.sources,
            payload.news_sources,
            payload.factcheck_sources,
        ]))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClaimPayload {
    #[serde(default)]
    id: Option<IdPayload>,
    #[serde(default)]
    claim: Option<String>,
    #[serde(default)]
    verdict: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    sources: Option<Vec<SourcePayload>>,
    #[serde(default)]
    news_sources: Option<Vec<SourcePayload>>,
    #[serde(default)]
    factcheck_sources: Option<Vec<SourcePayload>>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<ClaimPayload> for Claim {
    fn from(payload: ClaimPayload) -> Self {
        Claim {
            id: payload.id.map(String::from),
            claim: payload.claim.unwrap_or_default(),
            verdict: parse_verdict(payload.verdict),
            confidence: payload.confidence.unwrap_or_default(),
            explanation: payload.explanation,
            sources: merge_sources([
                payload.sources,
                payload.news_sources,
                payload.factcheck_sources,
            ]),
            created_at: payload.created_at,
        }
    }
}

fn parse_verdict(label: Option<String>) -> Verdict {
    label.map(Verdict::from).unwrap_or(Verdict::Unverified)
}

/// Concatenate source arrays in order; entries are kept by position.
fn merge_sources<const N: usize>(groups: [Option<Vec<SourcePayload>>; N]) -> Vec<Source> {
    groups
        .into_iter()
        .flatten()
        .flatten()
        .map(Source::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_payload_merges_sources_in_order() {
        let json = r#"{
            "verdict": "PARTIALLY TRUE",
            "confidence": 64,
            "explanation": "Mixed evidence",
            "sources": [{"title": "A", "url": "https://a.example/1", "snippet": "a"}],
            "news_sources": [{"title": "B", "url": "https://b.example/2", "snippet": "b"}],
            "factcheck_sources": [
                {"title": "C", "url": "https://c.example/3", "snippet": "c"},
                {"title": "A", "url": "https://a.example/1", "snippet": "a"}
            ]
        }"#;

        let payload: VerificationPayload = serde_json::from_str(json).unwrap();
        let result = VerificationResult::from(payload);

        assert_eq!(result.verdict, Verdict::PartiallyTrue);
        assert_eq!(result.confidence, 64.0);
        let titles: Vec<&str> = result.sources.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_missing_and_null_arrays() {
        let json = r#"{"verdict": "FALSE", "confidence": 92, "explanation": "...", "sources": null}"#;
        let payload: VerificationPayload = serde_json::from_str(json).unwrap();
        let result = VerificationResult::from(payload);
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_unknown_verdict_is_kept_as_other() {
        let json = r#"{"verdict": "MISLEADING", "confidence": 50, "explanation": ""}"#;
        let payload: VerificationPayload = serde_json::from_str(json).unwrap();
        let result = VerificationResult::from(payload);
        assert_eq!(result.verdict, Verdict::Other("MISLEADING".to_string()));
    }

    #[test]
    fn test_claim_payload_with_numeric_id() {
        let json = r#"{
            "id": 42,
            "claim": "The Earth is flat",
            "verdict": "FALSE",
            "confidence": 92,
            "created_at": "2024-03-01T12:30:00Z"
        }"#;

        let payload: ClaimPayload = serde_json::from_str(json).unwrap();
        let claim = Claim::from(payload);

        assert_eq!(claim.id.as_deref(), Some("42"));
        assert_eq!(claim.claim, "The Earth is flat");
        assert!(claim.explanation.is_none());
        assert_eq!(claim.created_at.as_deref(), Some("2024-03-01T12:30:00Z"));
    }

    #[test]
    fn test_check_request_body() {
        let body = serde_json::to_string(&CheckRequest { text: "Cats can fly" }).unwrap();
        assert_eq!(body, r#"{"text":"Cats can fly"}"#);
    }
}
