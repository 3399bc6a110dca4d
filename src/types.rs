use serde::{Deserialize, Serialize};

use crate::assistants::FileCounts;

/// POST /chat request. Fields default to empty so a missing field is
/// reported as a 400 validation error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub assistant_id: String,
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub message: String,
}

/// POST /chat response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /session request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[serde(default)]
    pub vector_store_id: String,
    #[serde(default)]
    pub vector_store_name: Option<String>,
    /// Assistant to replace, deleted best effort before the new one is made.
    #[serde(default)]
    pub previous_assistant_id: Option<String>,
}

/// POST /session response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub assistant_id: String,
    pub thread_id: String,
    pub model: String,
}

/// One entry in the GET /knowledge-bases listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub id: String,
    pub name: String,
    pub status: String,
    pub file_counts: FileCounts,
    pub created_at: String,
}

/// GET /knowledge-bases response.
#[derive(Debug, Serialize)]
pub struct KnowledgeBasesResponse {
    pub data: Vec<KnowledgeBase>,
}

/// Error body for every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
