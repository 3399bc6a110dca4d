use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use super::{Assistant, AssistantsApi, ListResponse, Message, Run, Thread, VectorStore};
use crate::config::Config;
use crate::error::ChatError;

/// Typed client for the hosted assistants API, pinned to the v2 interface.
///
/// The beta `assistants=v2` surface is the only one supported; if the
/// upstream rejects it the error is surfaced as-is rather than probing
/// alternative interface versions at runtime.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateAssistantRequest<'a> {
    name: &'a str,
    model: &'a str,
    instructions: &'a str,
    tools: Vec<Tool>,
    tool_resources: ToolResources,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ToolResources {
    file_search: FileSearchResource,
}

#[derive(Debug, Serialize)]
struct FileSearchResource {
    vector_store_ids: Vec<String>,
}

/// Error envelope returned by the upstream on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("OpenAI-Beta", "assistants=v2")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes a response, converting non-2xx bodies into `UpstreamError`
    /// with the service's own message text when present.
    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ChatError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| format!("{}: {}", status, body));
        Err(ChatError::Upstream(message))
    }
}

#[async_trait]
impl AssistantsApi for OpenAiClient {
    async fn create_message(
        &self,
        thread_id: &str,
        role: &str,
        content: &str,
    ) -> Result<Message, ChatError> {
        let response = self
            .request(
                self.client
                    .post(self.url(&format!("/threads/{thread_id}/messages"))),
            )
            .json(&CreateMessageRequest { role, content })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, ChatError> {
        let response = self
            .request(
                self.client
                    .post(self.url(&format!("/threads/{thread_id}/runs"))),
            )
            .json(&CreateRunRequest { assistant_id })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, ChatError> {
        let response = self
            .request(
                self.client
                    .get(self.url(&format!("/threads/{thread_id}/runs/{run_id}"))),
            )
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>, ChatError> {
        let response = self
            .request(
                self.client
                    .get(self.url(&format!("/threads/{thread_id}/messages"))),
            )
            .send()
            .await?;
        let list: ListResponse<Message> = Self::decode(response).await?;
        Ok(list.data)
    }

    async fn create_assistant(
        &self,
        name: &str,
        model: &str,
        instructions: &str,
        vector_store_id: &str,
    ) -> Result<Assistant, ChatError> {
        let request = CreateAssistantRequest {
            name,
            model,
            instructions,
            tools: vec![Tool {
                kind: "file_search",
            }],
            tool_resources: ToolResources {
                file_search: FileSearchResource {
                    vector_store_ids: vec![vector_store_id.to_string()],
                },
            },
        };
        let response = self
            .request(self.client.post(self.url("/assistants")))
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<(), ChatError> {
        let response = self
            .request(
                self.client
                    .delete(self.url(&format!("/assistants/{assistant_id}"))),
            )
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ChatError::Upstream(format!("{}: {}", status, body)))
    }

    async fn create_thread(&self) -> Result<Thread, ChatError> {
        let response = self
            .request(self.client.post(self.url("/threads")))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list_vector_stores(&self) -> Result<Vec<VectorStore>, ChatError> {
        let response = self
            .request(self.client.get(self.url("/vector_stores")))
            .send()
            .await?;
        let list: ListResponse<VectorStore> = Self::decode(response).await?;
        Ok(list.data)
    }
}
