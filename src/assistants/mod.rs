mod client;
mod mock;
mod traits;
mod types;

pub use client::OpenAiClient;
pub use mock::MockAssistants;
pub use traits::AssistantsApi;
pub use types::{
    Assistant, ContentPart, FileCounts, ListResponse, Message, Run, RunStatus, TextContent,
    Thread, VectorStore,
};
