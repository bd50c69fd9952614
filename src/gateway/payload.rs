//! Request/response DTOs for the gateway.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// `"intent"`, `"crime"`, or `"none"` for the rephrase fallback.
    pub matched: String,
    pub score: f32,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub summary: String,
    /// Optional caller-supplied metadata; accepted and echoed into logs only,
    /// persistence is out of scope.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub detected_labels: Vec<String>,
    pub recommendations: Vec<String>,
    pub diagnostics: Diagnostics,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub user_sentiment: f32,
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    pub crime: Option<String>,
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SimilarResponse {
    pub similar_crimes: Vec<SimilarCrimeDto>,
}

#[derive(Debug, Serialize)]
pub struct SimilarCrimeDto {
    pub crime: String,
    pub description: String,
    pub similarity: f32,
}
