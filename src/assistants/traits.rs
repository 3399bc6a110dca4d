use async_trait::async_trait;

use super::{Assistant, Message, Run, Thread, VectorStore};
use crate::error::ChatError;

/// The slice of the hosted assistants API this service consumes.
///
/// All operations are one-shot request/response calls; none retries. The
/// trait exists so the run driver and the HTTP handlers can be exercised
/// against a scripted mock.
#[async_trait]
pub trait AssistantsApi: Send + Sync {
    /// Appends a message to a thread.
    async fn create_message(
        &self,
        thread_id: &str,
        role: &str,
        content: &str,
    ) -> Result<Message, ChatError>;

    /// Starts a new run of `assistant_id` against the thread's current state.
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, ChatError>;

    /// Fetches the current state of a run.
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, ChatError>;

    /// Lists a thread's messages, newest first per the upstream convention.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>, ChatError>;

    /// Creates an assistant with file search bound to one vector store.
    async fn create_assistant(
        &self,
        name: &str,
        model: &str,
        instructions: &str,
        vector_store_id: &str,
    ) -> Result<Assistant, ChatError>;

    /// Deletes an assistant. Callers treat failures as best effort.
    async fn delete_assistant(&self, assistant_id: &str) -> Result<(), ChatError>;

    /// Creates a fresh, empty conversation thread.
    async fn create_thread(&self) -> Result<Thread, ChatError>;

    /// Lists the available vector stores.
    async fn list_vector_stores(&self) -> Result<Vec<VectorStore>, ChatError>;
}
