use serde::{Deserialize, Serialize};

/// Status of an assistant run, as reported by the upstream service.
///
/// Unknown status strings deserialize into `Other` so an unrecognized
/// terminal state is still classified as a failure with its exact text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Cancelling,
    RequiresAction,
    Completed,
    Failed,
    Cancelled,
    Expired,
    Incomplete,
    #[serde(untagged)]
    Other(String),
}

impl RunStatus {
    /// Non-terminal states keep the polling loop going; everything else is
    /// terminal (`Completed` is the only terminal success).
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Cancelling => "cancelling",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One asynchronous execution of an assistant against a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
}

/// A conversation thread held by the upstream service.
#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    pub id: String,
}

/// An assistant configuration bound to a model and a vector store.
#[derive(Debug, Clone, Deserialize)]
pub struct Assistant {
    pub id: String,
}

/// A message in a thread. Content is a list of typed parts; only the
/// `text` kind is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
}

impl Message {
    /// Builds an assistant text message. Test and mock helper.
    pub fn assistant_text(value: &str) -> Self {
        Self {
            role: "assistant".to_string(),
            content: vec![ContentPart {
                kind: "text".to_string(),
                text: Some(TextContent {
                    value: value.to_string(),
                }),
            }],
        }
    }
}

/// An externally managed, searchable document collection.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorStore {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: String,
    #[serde(default)]
    pub file_counts: FileCounts,
    pub created_at: i64,
}

/// Deserialized from the upstream's snake_case wire form; serialized
/// camelCase to match the rest of the HTTP surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "snake_case"))]
pub struct FileCounts {
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub cancelled: u64,
    #[serde(default)]
    pub total: u64,
}

/// Paginated list envelope used by the upstream list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_status_round_trips_known_values() {
        let run: Run = serde_json::from_str(r#"{"id":"run_1","status":"in_progress"}"#).unwrap();
        assert_eq!(run.status, RunStatus::InProgress);
        assert!(!run.status.is_terminal());

        let run: Run = serde_json::from_str(r#"{"id":"run_1","status":"completed"}"#).unwrap();
        assert_eq!(run.status, RunStatus::Completed);
        assert!(run.status.is_terminal());
    }

    #[test]
    fn run_status_preserves_unknown_values() {
        let run: Run = serde_json::from_str(r#"{"id":"run_1","status":"paused"}"#).unwrap();
        assert_eq!(run.status, RunStatus::Other("paused".to_string()));
        assert!(run.status.is_terminal());
        assert_eq!(run.status.as_str(), "paused");
    }

    #[test]
    fn file_counts_parse_snake_case_and_serialize_camel_case() {
        let counts: FileCounts =
            serde_json::from_str(r#"{"in_progress":1,"completed":2,"total":3}"#).unwrap();
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.total, 3);

        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["inProgress"], 1);
        assert!(json.get("in_progress").is_none());
    }

    #[test]
    fn message_content_parses_text_parts() {
        let json = r#"{
            "role": "assistant",
            "content": [
                {"type": "image_file"},
                {"type": "text", "text": {"value": "hi", "annotations": []}}
            ]
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.content.len(), 2);
        assert!(msg.content[0].text.is_none());
        assert_eq!(msg.content[1].text.as_ref().unwrap().value, "hi");
    }
}
