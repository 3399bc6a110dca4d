use crate::assistants::{AssistantsApi, Thread};
use crate::error::ChatError;

/// A freshly opened chat session: an assistant bound to one knowledge base
/// plus an empty conversation thread.
#[derive(Debug, Clone)]
pub struct Session {
    pub assistant_id: String,
    pub thread_id: String,
    pub model: String,
}

/// Creates an assistant with file search over `vector_store_id` and a fresh
/// thread. One-shot calls, no polling, no retry.
///
/// When `previous_assistant_id` is given the old assistant is deleted best
/// effort before the new one is created; a delete failure is logged and
/// otherwise ignored, matching the session-replacement flow in the UI.
pub async fn open_session(
    api: &dyn AssistantsApi,
    model: &str,
    vector_store_id: &str,
    vector_store_name: Option<&str>,
    previous_assistant_id: Option<&str>,
) -> Result<Session, ChatError> {
    if let Some(old) = previous_assistant_id {
        if let Err(err) = api.delete_assistant(old).await {
            tracing::warn!(assistant_id = old, %err, "failed to delete previous assistant");
        }
    }

    let store_name = vector_store_name.unwrap_or(vector_store_id);
    let assistant = api
        .create_assistant(
            &format!("Assistant for {store_name}"),
            model,
            &instructions(store_name),
            vector_store_id,
        )
        .await?;
    let Thread { id: thread_id } = api.create_thread().await?;

    tracing::info!(
        assistant_id = %assistant.id,
        thread_id = %thread_id,
        vector_store_id,
        "session opened"
    );

    Ok(Session {
        assistant_id: assistant.id,
        thread_id,
        model: model.to_string(),
    })
}

fn instructions(store_name: &str) -> String {
    format!(
        "You are a knowledgeable AI assistant with access to documents in the \
         '{store_name}' knowledge base.\n\n\
         Your role is to:\n\
         - Provide accurate, detailed answers based on the documents in the knowledge base\n\
         - Cite specific sources when applicable\n\
         - Be clear when information is not available in the knowledge base\n\
         - Maintain a helpful, professional, and friendly tone\n\
         - Provide well-structured responses with proper formatting\n\
         - Be concise and to the point and brief\n\n\
         Always prioritize accuracy and cite your sources when answering questions."
    )
}
